//! Error types for env file generation

use std::path::PathBuf;

/// Errors that can occur while generating accessors from an env file.
///
/// Every variant is fatal to the generation of the class being processed.
/// Nothing here is recovered or retried; the error is reported back to the
/// build (as a `compile_error!` from the derive macro, or as a failed
/// `build.rs`).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The env file does not exist and the class requires it.
    #[error("Environment file '{}' is required but was not found", path.display())]
    MissingFile {
        /// Absolute path that was looked up
        path: PathBuf,
    },

    /// The env file exists but could not be read or parsed.
    #[error("Failed to read environment file '{}': {source}", path.display())]
    EnvFile {
        /// Absolute path of the env file
        path: PathBuf,
        /// Underlying read or line-parse failure
        source: dotenvy::Error,
    },

    /// A required key is absent, has no default and the field is not optional.
    #[error("Environment variable '{key}' for field '{field}' is required but not set")]
    MissingKey {
        /// Lookup key derived for the field
        key: String,
        /// Declared field name
        field: String,
    },

    /// The raw value (or an out-of-range default) cannot be converted to the declared type.
    #[error("Failed to convert '{value}' of environment variable '{key}' to {type_name}: {message}")]
    TypeConversion {
        /// Lookup key derived for the field
        key: String,
        /// Raw value that failed to convert
        value: String,
        /// Declared type of the field
        type_name: String,
        /// Message from the parser
        message: String,
    },

    /// The default value is not a string, bool or number, or does not match the field type.
    #[error("Invalid default for field '{field}': expected {expected}, found {found}")]
    InvalidDefaultType {
        /// Declared field name
        field: String,
        /// What the declared type accepts
        expected: String,
        /// What was given
        found: String,
    },

    /// The declared type is not one the generator can emit.
    #[error("Unsupported type '{type_name}' for field '{field}'")]
    UnsupportedType {
        /// Declared field name (empty when parsing a bare type spelling)
        field: String,
        /// Type as written
        type_name: String,
    },

    /// A generated type or accessor name is not a valid Rust identifier.
    #[error("'{name}' is not a valid Rust identifier")]
    InvalidIdentifier {
        /// Offending name
        name: String,
    },

    /// A generation manifest could not be deserialized.
    #[error("Failed to parse manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A variable cargo sets for build scripts is missing.
    #[error("Environment variable '{name}' is not set; is this running inside a build script?")]
    BuildEnv {
        /// Name of the cargo variable
        name: &'static str,
    },

    /// Reading a manifest or writing generated output failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl Error {
    /// Create a type conversion error for a field of `type_name`
    pub(crate) fn conversion(
        key: impl Into<String>,
        value: impl Into<String>,
        type_name: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::TypeConversion {
            key: key.into(),
            value: value.into(),
            type_name: type_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing key error
    pub(crate) fn missing_key(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingKey {
            key: key.into(),
            field: field.into(),
        }
    }
}

/// Result alias used throughout the generator
pub type Result<T, E = Error> = std::result::Result<T, E>;
