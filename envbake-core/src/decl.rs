//! Declarations of the classes and fields to generate.
//!
//! These stand in for annotated source declarations: the derive macro builds
//! them from a struct, build scripts build them by hand or load them from a
//! JSON manifest.

use crate::error::{Error, Result};
use crate::options::{ClassConfig, FieldConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar kind a field resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Str,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl ValueKind {
    /// Map a bare type spelling (`u16`, `String`, `&'static str`, ...) to a kind
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        let kind = match spelling {
            "String" | "std::string::String" | "::std::string::String" | "str" | "&str"
            | "&'staticstr" => Self::Str,
            "bool" => Self::Bool,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            _ => return None,
        };
        Some(kind)
    }

    /// Rust type returned by the generated accessor
    pub fn rust_type(&self) -> &'static str {
        match self {
            Self::Str => "&'static str",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::Str | Self::Bool | Self::F32 | Self::F64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Declared type of a field: a scalar kind, possibly wrapped in `Option`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldType {
    pub kind: ValueKind,
    pub nullable: bool,
}

impl FieldType {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

const OPTION_PREFIXES: &[&str] = &["Option<", "std::option::Option<", "::std::option::Option<"];

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let (inner, nullable) = OPTION_PREFIXES
            .iter()
            .find_map(|prefix| {
                compact
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_suffix('>'))
            })
            .map_or((compact.as_str(), false), |inner| (inner, true));

        ValueKind::from_spelling(inner)
            .map(|kind| Self { kind, nullable })
            .ok_or_else(|| Error::UnsupportedType {
                field: String::new(),
                type_name: s.trim().to_string(),
            })
    }
}

impl TryFrom<String> for FieldType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.kind.rust_type())
        } else {
            f.write_str(self.kind.rust_type())
        }
    }
}

/// One declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name as declared; also the accessor name
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub config: FieldConfig,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: FieldType, config: FieldConfig) -> Self {
        Self {
            name: name.into(),
            ty,
            config,
        }
    }
}

/// One declared class and its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Declared name, used for the generated type unless `config.name()` is set
    pub name: String,
    #[serde(default)]
    pub config: ClassConfig,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, config: ClassConfig, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            config,
            fields,
        }
    }

    /// Name of the generated type
    pub fn output_name(&self) -> &str {
        self.config.name().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_types() {
        assert_eq!("u16".parse::<FieldType>().unwrap(), FieldType::new(ValueKind::U16));
        assert_eq!("bool".parse::<FieldType>().unwrap(), FieldType::new(ValueKind::Bool));
        assert_eq!("String".parse::<FieldType>().unwrap(), FieldType::new(ValueKind::Str));
        assert_eq!(
            "&'static str".parse::<FieldType>().unwrap(),
            FieldType::new(ValueKind::Str)
        );
    }

    #[test]
    fn test_parse_token_spacing() {
        // Spelling as produced by `quote!(#ty).to_string()`
        assert_eq!(
            "Option < & 'static str >".parse::<FieldType>().unwrap(),
            FieldType::nullable(ValueKind::Str)
        );
        assert_eq!(
            "std :: option :: Option < f64 >".parse::<FieldType>().unwrap(),
            FieldType::nullable(ValueKind::F64)
        );
    }

    #[test]
    fn test_parse_unsupported_type() {
        let err = "Vec<String>".parse::<FieldType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { type_name, .. } if type_name == "Vec<String>"));
    }

    #[test]
    fn test_display_is_accessor_type() {
        assert_eq!(FieldType::new(ValueKind::Str).to_string(), "&'static str");
        assert_eq!(FieldType::nullable(ValueKind::I64).to_string(), "Option<i64>");
    }

    #[test]
    fn test_output_name_prefers_override() {
        let decl = ClassDecl::new("EnvDecl", ClassConfig::default(), Vec::new());
        assert_eq!(decl.output_name(), "EnvDecl");

        let decl = ClassDecl::new("EnvDecl", ClassConfig::default().with_name("Env"), Vec::new());
        assert_eq!(decl.output_name(), "Env");
    }

    #[test]
    fn test_deserialize_class_decl() {
        let decl: ClassDecl = serde_json::from_str(
            r#"{
                "name": "AppEnv",
                "config": {"path": ".env.app", "use_constant_case": true},
                "fields": [
                    {"name": "api_key", "type": "String", "config": {"obfuscate": true}},
                    {"name": "port", "type": "u16"},
                    {"name": "sentry_dsn", "type": "Option<String>", "config": {"optional": true}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(decl.config.path(), ".env.app");
        assert!(decl.config.use_constant_case());
        assert_eq!(decl.fields.len(), 3);
        assert_eq!(decl.fields[0].config.obfuscate_override(), Some(true));
        assert_eq!(decl.fields[1].ty, FieldType::new(ValueKind::U16));
        assert!(decl.fields[2].ty.nullable);
    }
}
