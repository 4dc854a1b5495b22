//! Derive macros for sqlbind
//!
//! Provides the `#[derive(Record)]` macro.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive the `Record` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlbind::Record;
///
/// #[derive(Default, Record)]
/// #[orm(table = "users")]
/// struct User {
///     #[orm(primary_key)]
///     id: i64,
///     username: String,
///     #[orm(column = "email_address")]
///     email: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Storage table name; defaults to the
///   derived storage name of the type
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(primary_key)]` - Mark field as primary key
///
/// # Field types
///
/// `String`, the integer primitives up to 64 bits, `f32`/`f64`, `bool`,
/// and `Option` of any of these map to the corresponding value kind.
/// Any other type rides the string-shaped `Other` kind and must implement
/// `ToString` and `From<String>`.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
