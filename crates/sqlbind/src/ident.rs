//! Storage-name derivation for fields and record types.

/// Derive a storage name (column or table) from a host-language identifier.
///
/// The rule is applied uniformly to every character: a lowercase ASCII
/// letter passes through as-is; any other character is emitted as an
/// underscore followed by the character lowercased. So `UserID` becomes
/// `_user_i_d`, and names containing digits or existing underscores pick up
/// doubled separators (`col1` -> `col_1`, `user_id` -> `user__id`).
///
/// Generated statements depend on these exact outputs; callers who want
/// conventional names supply an explicit column or table instead.
pub fn storage_name(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() * 2);
    for c in ident.chars() {
        if c.is_ascii_lowercase() {
            out.push(c);
        } else {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::storage_name;

    #[test]
    fn uppercase_runs() {
        assert_eq!(storage_name("UserID"), "_user_i_d");
    }

    #[test]
    fn plain_lowercase_is_identity() {
        assert_eq!(storage_name("id"), "id");
        assert_eq!(storage_name("email"), "email");
    }

    #[test]
    fn digits_double_up() {
        assert_eq!(storage_name("col1"), "col_1");
    }

    #[test]
    fn existing_underscores_double_up() {
        assert_eq!(storage_name("user_id"), "user__id");
    }

    #[test]
    fn capitalized_type_name_gains_leading_underscore() {
        assert_eq!(storage_name("User"), "_user");
    }

    #[test]
    fn empty_input() {
        assert_eq!(storage_name(""), "");
    }
}
