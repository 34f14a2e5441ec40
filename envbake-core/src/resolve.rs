//! Field resolution: lookup key, typed value, defaults and optionality

use crate::case::derive_key;
use crate::decl::{ClassDecl, FieldDecl, ValueKind};
use crate::error::{Error, Result};
use crate::loader::EnvMap;
use crate::options::{ClassConfig, DefaultValue};
use tracing::debug;

/// A value converted to its declared kind
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i128),
    UInt(u128),
    Float(f64),
}

/// A field after lookup and conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub decl: FieldDecl,
    /// Key the field was looked up under
    pub key: String,
    /// `None` only for optional nullable fields with no value
    pub value: Option<Value>,
    /// Effective obfuscation setting
    pub obfuscate: bool,
}

/// Resolve every field of `class` against `env`, in declaration order.
///
/// The first failing field aborts the class.
pub fn resolve_class(class: &ClassDecl, env: &EnvMap) -> Result<Vec<ResolvedField>> {
    class
        .fields
        .iter()
        .map(|field| resolve_field(field, &class.config, env))
        .collect()
}

/// Resolve a single field.
///
/// Lookup order: the env file value, then the field default, then `None`
/// for optional nullable fields. Anything else is a missing key.
pub fn resolve_field(field: &FieldDecl, class: &ClassConfig, env: &EnvMap) -> Result<ResolvedField> {
    let key = derive_key(&field.name, &field.config, class);
    let kind = field.ty.kind;

    let value = if let Some(raw) = env.get(&key) {
        debug!(field = %field.name, key = %key, "resolved from env file");
        Some(convert_raw(raw, kind, &key)?)
    } else if let Some(default) = field.config.default_value() {
        debug!(field = %field.name, key = %key, default = %default, "using default value");
        Some(convert_default(default, field, &key)?)
    } else if field.config.effective_optional(class) && field.ty.nullable {
        debug!(field = %field.name, key = %key, "optional field left empty");
        None
    } else {
        return Err(Error::missing_key(key, field.name.clone()));
    };

    Ok(ResolvedField {
        decl: field.clone(),
        key,
        value,
        obfuscate: field.config.effective_obfuscate(class),
    })
}

macro_rules! parse_as {
    ($raw:expr, $key:expr, $kind:expr, $ty:ty, $variant:ident, $wide:ty) => {
        $raw.trim()
            .parse::<$ty>()
            .map(|v| Value::$variant(v as $wide))
            .map_err(|e| Error::conversion($key, $raw, $kind.rust_type(), e))
    };
}

/// Convert a raw env file value to `kind`
pub fn convert_raw(raw: &str, kind: ValueKind, key: &str) -> Result<Value> {
    match kind {
        ValueKind::Str => Ok(Value::Str(raw.to_string())),
        ValueKind::Bool => raw
            .trim()
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| Error::conversion(key, raw, kind.rust_type(), e)),
        ValueKind::I8 => parse_as!(raw, key, kind, i8, Int, i128),
        ValueKind::I16 => parse_as!(raw, key, kind, i16, Int, i128),
        ValueKind::I32 => parse_as!(raw, key, kind, i32, Int, i128),
        ValueKind::I64 => parse_as!(raw, key, kind, i64, Int, i128),
        ValueKind::I128 => parse_as!(raw, key, kind, i128, Int, i128),
        ValueKind::Isize => parse_as!(raw, key, kind, isize, Int, i128),
        ValueKind::U8 => parse_as!(raw, key, kind, u8, UInt, u128),
        ValueKind::U16 => parse_as!(raw, key, kind, u16, UInt, u128),
        ValueKind::U32 => parse_as!(raw, key, kind, u32, UInt, u128),
        ValueKind::U64 => parse_as!(raw, key, kind, u64, UInt, u128),
        ValueKind::U128 => parse_as!(raw, key, kind, u128, UInt, u128),
        ValueKind::Usize => parse_as!(raw, key, kind, usize, UInt, u128),
        ValueKind::F32 => parse_as!(raw, key, kind, f32, Float, f64),
        ValueKind::F64 => parse_as!(raw, key, kind, f64, Float, f64),
    }
}

/// Check a default against the field's declared kind and convert it
fn convert_default(default: &DefaultValue, field: &FieldDecl, key: &str) -> Result<Value> {
    let kind = field.ty.kind;
    match (default, kind) {
        (DefaultValue::Str(s), ValueKind::Str) => Ok(Value::Str(s.clone())),
        (DefaultValue::Bool(b), ValueKind::Bool) => Ok(Value::Bool(*b)),
        // Range checking goes through the same parser as env file values
        (DefaultValue::Int(i), k) if k.is_integer() => convert_raw(&i.to_string(), k, key),
        (DefaultValue::Int(i), k) if k.is_float() => Ok(Value::Float(*i as f64)),
        (DefaultValue::Float(x), ValueKind::F32) if x.is_finite() && !(*x as f32).is_finite() => {
            Err(Error::conversion(key, x.to_string(), kind.rust_type(), "out of range for f32"))
        }
        (DefaultValue::Float(x), k) if k.is_float() => Ok(Value::Float(*x)),
        _ => Err(Error::InvalidDefaultType {
            field: field.name.clone(),
            expected: kind.rust_type().to_string(),
            found: default.describe().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::FieldType;
    use crate::loader::parse_env_str;
    use crate::options::FieldConfig;

    fn field(name: &str, ty: &str, config: FieldConfig) -> FieldDecl {
        FieldDecl::new(name, ty.parse().unwrap(), config)
    }

    #[test]
    fn test_resolve_from_env() {
        let env = parse_env_str("apiUrl=https://example.com\nport=8080\ndebug=true\nratio=0.5\n").unwrap();
        let class = ClassConfig::default();

        let url = resolve_field(&field("apiUrl", "String", FieldConfig::new()), &class, &env).unwrap();
        assert_eq!(url.key, "apiUrl");
        assert_eq!(url.value, Some(Value::Str("https://example.com".into())));

        let port = resolve_field(&field("port", "u16", FieldConfig::new()), &class, &env).unwrap();
        assert_eq!(port.value, Some(Value::UInt(8080)));

        let debug = resolve_field(&field("debug", "bool", FieldConfig::new()), &class, &env).unwrap();
        assert_eq!(debug.value, Some(Value::Bool(true)));

        let ratio = resolve_field(&field("ratio", "f32", FieldConfig::new()), &class, &env).unwrap();
        assert_eq!(ratio.value, Some(Value::Float(0.5)));
    }

    #[test]
    fn test_constant_case_key() {
        let env = parse_env_str("API_KEY=secret\n").unwrap();
        let class = ClassConfig::default().with_use_constant_case(true);

        let resolved = resolve_field(&field("apiKey", "String", FieldConfig::new()), &class, &env).unwrap();
        assert_eq!(resolved.key, "API_KEY");
        assert_eq!(resolved.value, Some(Value::Str("secret".into())));
    }

    #[test]
    fn test_var_name_beats_constant_case() {
        let env = parse_env_str("MY_TOKEN=abc\nTOKEN=wrong\n").unwrap();
        let class = ClassConfig::default().with_use_constant_case(true);
        let config = FieldConfig::new().with_var_name("MY_TOKEN");

        let resolved = resolve_field(&field("token", "String", config), &class, &env).unwrap();
        assert_eq!(resolved.key, "MY_TOKEN");
        assert_eq!(resolved.value, Some(Value::Str("abc".into())));
    }

    #[test]
    fn test_default_used_when_missing() {
        let env = EnvMap::new();
        let class = ClassConfig::default();

        let port = resolve_field(
            &field("port", "u16", FieldConfig::new().with_default_value(3000)),
            &class,
            &env,
        )
        .unwrap();
        assert_eq!(port.value, Some(Value::UInt(3000)));

        let host = resolve_field(
            &field("host", "String", FieldConfig::new().with_default_value("localhost")),
            &class,
            &env,
        )
        .unwrap();
        assert_eq!(host.value, Some(Value::Str("localhost".into())));

        let scale = resolve_field(
            &field("scale", "f64", FieldConfig::new().with_default_value(2)),
            &class,
            &env,
        )
        .unwrap();
        assert_eq!(scale.value, Some(Value::Float(2.0)));
    }

    #[test]
    fn test_env_value_beats_default() {
        let env = parse_env_str("port=9090\n").unwrap();
        let resolved = resolve_field(
            &field("port", "u16", FieldConfig::new().with_default_value(3000)),
            &ClassConfig::default(),
            &env,
        )
        .unwrap();
        assert_eq!(resolved.value, Some(Value::UInt(9090)));
    }

    #[test]
    fn test_optional_nullable_field_is_none() {
        let config = FieldConfig::new().with_optional(true);
        let resolved = resolve_field(
            &field("sentryDsn", "Option<String>", config),
            &ClassConfig::default(),
            &EnvMap::new(),
        )
        .unwrap();
        assert_eq!(resolved.value, None);
    }

    #[test]
    fn test_class_allows_optional_fields() {
        let class = ClassConfig::default().with_allow_optional_fields(true);
        let resolved =
            resolve_field(&field("timeout", "Option<u32>", FieldConfig::new()), &class, &EnvMap::new())
                .unwrap();
        assert_eq!(resolved.value, None);
    }

    #[test]
    fn test_field_can_opt_out_of_class_optional() {
        let class = ClassConfig::default().with_allow_optional_fields(true);
        let config = FieldConfig::new().with_optional(false);
        let result = resolve_field(&field("timeout", "Option<u32>", config), &class, &EnvMap::new());
        assert!(matches!(result, Err(Error::MissingKey { key, .. }) if key == "timeout"));
    }

    #[test]
    fn test_optional_requires_nullable_type() {
        let config = FieldConfig::new().with_optional(true);
        let result = resolve_field(&field("port", "u16", config), &ClassConfig::default(), &EnvMap::new());
        assert!(matches!(result, Err(Error::MissingKey { .. })));
    }

    #[test]
    fn test_missing_key_names_derived_key() {
        let class = ClassConfig::default().with_use_constant_case(true);
        let result = resolve_field(&field("apiKey", "String", FieldConfig::new()), &class, &EnvMap::new());
        match result {
            Err(Error::MissingKey { key, field }) => {
                assert_eq!(key, "API_KEY");
                assert_eq!(field, "apiKey");
            }
            other => panic!("Expected MissingKey error, got {:?}", other),
        }
    }

    #[test]
    fn test_type_conversion_error() {
        let env = parse_env_str("port=eighty\n").unwrap();
        let result = resolve_field(&field("port", "u16", FieldConfig::new()), &ClassConfig::default(), &env);
        match result {
            Err(Error::TypeConversion { key, value, type_name, .. }) => {
                assert_eq!(key, "port");
                assert_eq!(value, "eighty");
                assert_eq!(type_name, "u16");
            }
            other => panic!("Expected TypeConversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_bool_is_strict() {
        let env = parse_env_str("debug=yes\n").unwrap();
        let result = resolve_field(&field("debug", "bool", FieldConfig::new()), &ClassConfig::default(), &env);
        assert!(matches!(result, Err(Error::TypeConversion { .. })));
    }

    #[test]
    fn test_numbers_are_trimmed() {
        assert_eq!(convert_raw(" 42 ", ValueKind::I32, "N").unwrap(), Value::Int(42));
    }

    #[test]
    fn test_mismatched_default_type() {
        let config = FieldConfig::new().with_default_value("8080");
        let result = resolve_field(&field("port", "u16", config), &ClassConfig::default(), &EnvMap::new());
        match result {
            Err(Error::InvalidDefaultType { field, expected, found }) => {
                assert_eq!(field, "port");
                assert_eq!(expected, "u16");
                assert_eq!(found, "string");
            }
            other => panic!("Expected InvalidDefaultType error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_default() {
        let config = FieldConfig::new().with_default_value(300);
        let result = resolve_field(&field("level", "u8", config), &ClassConfig::default(), &EnvMap::new());
        assert!(matches!(result, Err(Error::TypeConversion { .. })));
    }

    #[test]
    fn test_out_of_range_float_default() {
        let scale = field("scale", "f32", FieldConfig::new().with_default_value(1e300));
        let err = resolve_field(&scale, &ClassConfig::default(), &EnvMap::new()).unwrap_err();
        assert!(matches!(err, Error::TypeConversion { ref type_name, .. } if type_name == "f32"));

        let scale = field("scale", "f64", FieldConfig::new().with_default_value(1e300));
        let resolved = resolve_field(&scale, &ClassConfig::default(), &EnvMap::new()).unwrap();
        assert_eq!(resolved.value, Some(Value::Float(1e300)));
    }

    #[test]
    fn test_resolve_class_records_obfuscation() {
        let env = parse_env_str("API_KEY=secret\nAPI_URL=https://example.com\n").unwrap();
        let class = ClassDecl::new(
            "Env",
            ClassConfig::default().with_use_constant_case(true).with_obfuscate(true),
            vec![
                field("apiKey", "String", FieldConfig::new()),
                field("apiUrl", "String", FieldConfig::new().with_obfuscate(false)),
            ],
        );

        let fields = resolve_class(&class, &env).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].obfuscate);
        assert!(!fields[1].obfuscate);
        assert_eq!(fields[1].decl.ty, FieldType::new(ValueKind::Str));
    }

    #[test]
    fn test_resolve_class_fails_on_first_missing() {
        let class = ClassDecl::new(
            "Env",
            ClassConfig::default(),
            vec![
                field("first", "String", FieldConfig::new()),
                field("second", "String", FieldConfig::new()),
            ],
        );
        let result = resolve_class(&class, &EnvMap::new());
        assert!(matches!(result, Err(Error::MissingKey { key, .. }) if key == "first"));
    }
}
