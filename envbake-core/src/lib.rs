//! Generator core for `envbake`
//!
//! This crate holds everything that runs at build time: the options model,
//! the env file loader, key derivation, field resolution, obfuscation and
//! code emission. The `envbake` crate re-exports it together with the
//! `#[derive(Envbake)]` macro; build scripts can depend on it directly.
//!
//! # Pipeline
//!
//! 1. [`load_env_file`] reads `KEY=VALUE` pairs from the class's env file
//! 2. [`resolve_class`] derives each field's lookup key and converts its value
//! 3. [`emit_class`] writes one accessor per field, obfuscating where asked
//!
//! [`generate`] runs all three for a [`ClassDecl`].
//!
//! # Example
//!
//! ```rust
//! use envbake_core::{generate_source, ClassConfig, ClassDecl, FieldConfig, FieldDecl};
//! use std::path::Path;
//!
//! let class = ClassDecl::new(
//!     "Env",
//!     ClassConfig::default().with_use_constant_case(true),
//!     vec![FieldDecl::new(
//!         "serverPort",
//!         "u16".parse().unwrap(),
//!         FieldConfig::new().with_default_value(8080),
//!     )],
//! );
//!
//! // No .env in this directory, so the default is used
//! let source = generate_source(Path::new("/nonexistent"), &class).unwrap();
//! assert!(source.contains("8080u16"));
//! ```

pub mod build;
pub mod case;
pub mod decl;
pub mod emit;
mod error;
pub mod generate;
pub mod loader;
pub mod manifest;
pub mod obfuscate;
pub mod options;
pub mod resolve;

pub use case::{derive_key, to_constant_case};
pub use decl::{ClassDecl, FieldDecl, FieldType, ValueKind};
pub use emit::{emit_class, Target};
pub use error::{Error, Result};
pub use generate::{generate, generate_for, generate_source};
pub use loader::{load_env_file, EnvMap};
pub use manifest::Manifest;
pub use obfuscate::{reveal, Obfuscator, Reveal};
pub use options::{ClassConfig, DefaultValue, FieldConfig, DEFAULT_ENV_PATH};
pub use resolve::{resolve_class, resolve_field, ResolvedField, Value};
