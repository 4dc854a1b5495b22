//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

/// Coarse value-kind classification mirrored from the runtime crate.
#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Text,
    Int,
    Float,
    Bool,
    Other,
}

impl Kind {
    fn tokens(self) -> TokenStream {
        match self {
            Kind::Text => quote!(sqlbind::ValueKind::Text),
            Kind::Int => quote!(sqlbind::ValueKind::Int),
            Kind::Float => quote!(sqlbind::ValueKind::Float),
            Kind::Bool => quote!(sqlbind::ValueKind::Bool),
            Kind::Other => quote!(sqlbind::ValueKind::Other),
        }
    }
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let table_name = get_table_name(&input)?;
    let type_name = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut spec_exprs = Vec::with_capacity(fields.len());
    let mut value_arms = Vec::with_capacity(fields.len());
    let mut apply_arms = Vec::with_capacity(fields.len());

    for field in fields.iter() {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();
        let (column, primary_key) = get_field_attrs(field)?;
        let (kind, is_option) = classify(&field.ty);
        let kind_tokens = kind.tokens();

        let mut spec = quote!(sqlbind::FieldSpec::new(#field_name, #kind_tokens));
        if let Some(column) = &column {
            spec = quote!(#spec.with_column(#column));
        }
        if primary_key {
            spec = quote!(#spec.primary_key());
        }
        spec_exprs.push(spec);

        if kind == Kind::Other {
            if is_option {
                value_arms.push(quote! {
                    #field_name => match &self.#field_ident {
                        Some(v) => sqlbind::Value::Other(v.to_string()),
                        None => sqlbind::Value::Null,
                    }
                });
                apply_arms.push(quote! {
                    #field_name => {
                        self.#field_ident = match value {
                            sqlbind::Value::Null => None,
                            other => Some(::std::convert::From::from(other.as_text())),
                        };
                    }
                });
            } else {
                value_arms.push(quote! {
                    #field_name => sqlbind::Value::Other(self.#field_ident.to_string())
                });
                apply_arms.push(quote! {
                    #field_name => {
                        self.#field_ident = ::std::convert::From::from(value.as_text());
                    }
                });
            }
        } else {
            value_arms.push(quote! {
                #field_name => sqlbind::Value::from(self.#field_ident.clone())
            });
            apply_arms.push(quote! {
                #field_name => {
                    self.#field_ident = sqlbind::FromValue::from_value(value);
                }
            });
        }
    }

    let table_expr = match table_name {
        Some(table) => quote!(#table.to_string()),
        None => quote!(sqlbind::storage_name(#type_name)),
    };

    Ok(quote! {
        impl #impl_generics sqlbind::Record for #name #ty_generics #where_clause {
            fn table() -> ::std::string::String {
                #table_expr
            }

            fn fields() -> ::std::vec::Vec<sqlbind::FieldSpec> {
                vec![#(#spec_exprs),*]
            }

            fn value_of(&self, field: &str) -> sqlbind::Value {
                match field {
                    #(#value_arms,)*
                    _ => sqlbind::Value::Null,
                }
            }

            fn apply(&mut self, field: &str, value: sqlbind::Value) {
                match field {
                    #(#apply_arms)*
                    _ => {}
                }
            }
        }
    })
}

fn get_table_name(input: &DeriveInput) -> Result<Option<String>> {
    let mut table = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                table = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported orm attribute on struct, expected `table`"))
            }
        })?;
    }
    Ok(table)
}

fn get_field_attrs(field: &syn::Field) -> Result<(Option<String>, bool)> {
    let mut column = None;
    let mut primary_key = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                column = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("primary_key") {
                primary_key = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported orm attribute on field, expected `column` or `primary_key`",
                ))
            }
        })?;
    }
    Ok((column, primary_key))
}

/// Classify a field type into a value kind, unwrapping one `Option` layer.
fn classify(ty: &syn::Type) -> (Kind, bool) {
    if let Some(inner) = option_inner(ty) {
        let (kind, _) = classify(inner);
        return (kind, true);
    }

    let syn::Type::Path(type_path) = ty else {
        return (Kind::Other, false);
    };
    let Some(segment) = type_path.path.segments.last() else {
        return (Kind::Other, false);
    };

    let kind = match segment.ident.to_string().as_str() {
        "String" => Kind::Text,
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => Kind::Int,
        "f32" | "f64" => Kind::Float,
        "bool" => Kind::Bool,
        _ => Kind::Other,
    };
    (kind, false)
}

fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
