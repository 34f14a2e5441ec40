//! Class-level and field-level generation options.
//!
//! Both configs are immutable value objects. Field options are overrides:
//! `None` means "inherit the class default", and the merge is a plain
//! `Option::unwrap_or` at lookup time.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Env file loaded when no path (or an empty one) is given
pub const DEFAULT_ENV_PATH: &str = ".env";

/// Options applying to one generated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    path: String,
    require_env_file: bool,
    name: Option<String>,
    obfuscate: bool,
    allow_optional_fields: bool,
    use_constant_case: bool,
    random_seed: Option<u64>,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self::new(None::<String>)
    }
}

impl ClassConfig {
    /// Create a config loading `path`, falling back to `.env` when absent or empty.
    pub fn new(path: impl Into<Option<String>>) -> Self {
        let path = path
            .into()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_ENV_PATH.to_string());

        Self {
            path,
            require_env_file: false,
            name: None,
            obfuscate: false,
            allow_optional_fields: false,
            use_constant_case: false,
            random_seed: None,
        }
    }

    pub fn with_require_env_file(mut self, require: bool) -> Self {
        self.require_env_file = require;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_obfuscate(mut self, obfuscate: bool) -> Self {
        self.obfuscate = obfuscate;
        self
    }

    pub fn with_allow_optional_fields(mut self, allow: bool) -> Self {
        self.allow_optional_fields = allow;
        self
    }

    pub fn with_use_constant_case(mut self, constant_case: bool) -> Self {
        self.use_constant_case = constant_case;
        self
    }

    /// Seed obfuscation keys so repeated builds emit identical output
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Env file path, relative to the project root
    pub fn path(&self) -> &str {
        // Deserialized configs may carry an empty path
        if self.path.is_empty() {
            DEFAULT_ENV_PATH
        } else {
            &self.path
        }
    }

    pub fn require_env_file(&self) -> bool {
        self.require_env_file
    }

    /// Name overriding the generated type's derived name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn obfuscate(&self) -> bool {
        self.obfuscate
    }

    pub fn allow_optional_fields(&self) -> bool {
        self.allow_optional_fields
    }

    pub fn use_constant_case(&self) -> bool {
        self.use_constant_case
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }
}

/// Options applying to one declared field.
///
/// Every setting is an override of the matching [`ClassConfig`] default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    var_name: Option<String>,
    obfuscate: Option<bool>,
    default_value: Option<DefaultValue>,
    optional: Option<bool>,
    use_constant_case: Option<bool>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look the field up under `name` verbatim
    pub fn with_var_name(mut self, name: impl Into<String>) -> Self {
        self.var_name = Some(name.into());
        self
    }

    pub fn with_obfuscate(mut self, obfuscate: bool) -> Self {
        self.obfuscate = Some(obfuscate);
        self
    }

    pub fn with_default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    pub fn with_use_constant_case(mut self, constant_case: bool) -> Self {
        self.use_constant_case = Some(constant_case);
        self
    }

    pub fn var_name(&self) -> Option<&str> {
        self.var_name.as_deref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    pub fn obfuscate_override(&self) -> Option<bool> {
        self.obfuscate
    }

    pub fn optional_override(&self) -> Option<bool> {
        self.optional
    }

    pub fn use_constant_case_override(&self) -> Option<bool> {
        self.use_constant_case
    }

    /// Field override if present, else the class default
    pub fn effective_obfuscate(&self, class: &ClassConfig) -> bool {
        self.obfuscate.unwrap_or(class.obfuscate())
    }

    pub fn effective_optional(&self, class: &ClassConfig) -> bool {
        self.optional.unwrap_or(class.allow_optional_fields())
    }

    pub fn effective_use_constant_case(&self, class: &ClassConfig) -> bool {
        self.use_constant_case.unwrap_or(class.use_constant_case())
    }
}

/// Value used when a field's key is absent from the env file.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Str(String),
    Bool(bool),
    Int(i128),
    Float(f64),
}

impl DefaultValue {
    /// Short description of the variant, used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! default_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(value: $ty) -> Self {
                    Self::Int(value as i128)
                }
            }
        )*
    };
}

default_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i128(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
        }
    }
}

struct DefaultValueVisitor;

impl Visitor<'_> for DefaultValueVisitor {
    type Value = DefaultValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, bool or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(DefaultValue::Str(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(DefaultValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Int(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Int(v.into()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(DefaultValue::Int(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Float(v))
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DefaultValueVisitor)
    }
}
