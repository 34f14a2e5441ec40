//! Lookup key derivation

use crate::options::{ClassConfig, FieldConfig};

/// Convert a camelCase (or snake_case) name to UPPER_SNAKE_CASE.
///
/// An underscore is inserted before every uppercase letter that directly
/// follows a lowercase letter or a digit, then the whole string is
/// uppercased. Input without lowercase letters is treated as already
/// CONSTANT_CASE and comes back unchanged, which keeps the conversion
/// idempotent even for names like `a1B2c3`.
pub fn to_constant_case(name: &str) -> String {
    if !name.chars().any(char::is_lowercase) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_uppercase() {
            if let Some(p) = prev {
                if p.is_lowercase() || p.is_ascii_digit() {
                    out.push('_');
                }
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_uppercase()
}

/// Key a field is looked up under.
///
/// An explicit `var_name` is used verbatim; otherwise the field name,
/// converted to constant case when the effective setting asks for it.
pub fn derive_key(field_name: &str, field: &FieldConfig, class: &ClassConfig) -> String {
    if let Some(var_name) = field.var_name() {
        return var_name.to_string();
    }

    if field.effective_use_constant_case(class) {
        to_constant_case(field_name)
    } else {
        field_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_constant_case("apiKey"), "API_KEY");
        assert_eq!(to_constant_case("databaseUrlV2"), "DATABASE_URL_V2");
        assert_eq!(to_constant_case("oauth2Token"), "OAUTH2_TOKEN");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_constant_case("api_key"), "API_KEY");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(to_constant_case("port"), "PORT");
        assert_eq!(to_constant_case(""), "");
    }

    #[test]
    fn test_leading_uppercase_no_underscore() {
        assert_eq!(to_constant_case("ApiKey"), "API_KEY");
    }

    #[test]
    fn test_idempotent_on_constant_case() {
        for name in ["apiKey", "databaseUrlV2", "maxRetries3Times", "a1B2c3", "HTTPServer"] {
            let once = to_constant_case(name);
            assert_eq!(to_constant_case(&once), once, "not idempotent for {name}");
        }
        assert_eq!(to_constant_case("MY_TOKEN"), "MY_TOKEN");
        assert_eq!(to_constant_case("A1_B2C3"), "A1_B2C3");
    }

    #[test]
    fn test_digit_boundary() {
        assert_eq!(to_constant_case("ipV4Address"), "IP_V4_ADDRESS");
        assert_eq!(to_constant_case("a1B2c3"), "A1_B2C3");
    }

    #[test]
    fn test_var_name_used_verbatim_even_with_constant_case() {
        let class = ClassConfig::default().with_use_constant_case(true);
        let field = FieldConfig::new().with_var_name("MY_TOKEN");
        assert_eq!(derive_key("token", &field, &class), "MY_TOKEN");

        let field = FieldConfig::new().with_var_name("lowerCase");
        assert_eq!(derive_key("token", &field, &class), "lowerCase");
    }

    #[test]
    fn test_class_constant_case() {
        let class = ClassConfig::default().with_use_constant_case(true);
        assert_eq!(derive_key("apiKey", &FieldConfig::new(), &class), "API_KEY");
    }

    #[test]
    fn test_field_name_verbatim_by_default() {
        let class = ClassConfig::default();
        assert_eq!(derive_key("apiKey", &FieldConfig::new(), &class), "apiKey");
    }

    #[test]
    fn test_field_override_of_constant_case() {
        let class = ClassConfig::default().with_use_constant_case(true);
        let field = FieldConfig::new().with_use_constant_case(false);
        assert_eq!(derive_key("apiKey", &field, &class), "apiKey");

        let class = ClassConfig::default();
        let field = FieldConfig::new().with_use_constant_case(true);
        assert_eq!(derive_key("apiKey", &field, &class), "API_KEY");
    }
}
