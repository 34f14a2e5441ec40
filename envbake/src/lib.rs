//! Bake `.env` values into typed Rust accessors at build time
//!
//! `envbake` reads a `.env` file while your crate compiles and generates one
//! accessor function per declared field. Values end up in the binary; the
//! `.env` file does not need to exist at runtime.
//!
//! The main distinguishing feature is **obfuscation**: fields marked
//! `#[envbake(obfuscate)]` are stored XOR-ed with a random key and revealed
//! lazily on first access, so they do not show up in a plain `strings` dump.
//! This is deliberately *not* encryption; the key ships next to the data.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Envbake)]` on a struct describing the fields
//! - **Type-safe**: strings, bools, integers and floats, optionally in `Option<T>`
//! - **Build-time errors**: missing keys and bad values fail compilation
//! - **Defaults and optional fields**: per field or for the whole struct
//! - **Constant case**: look `api_key` up as `API_KEY`
//! - **Build scripts**: drive the same generator from `build.rs` with a JSON manifest
//!
//! # Value Parsing
//!
//! - Strings: `API_URL=https://example.com` → `&'static str`
//! - Numbers: `MAX_CONNECTIONS=42` → any integer or float type
//! - Booleans: `DEBUG=true` (exactly `true` or `false`)
//!
//! # Example
//!
//! ```rust,ignore
//! use envbake::Envbake;
//!
//! // .env:
//! //   API_URL=https://api.example.com
//! //   API_KEY=sk-live-1234
//! #[derive(Envbake)]
//! #[envbake(use_constant_case)]
//! struct Env {
//!     api_url: &'static str,
//!
//!     // Stored obfuscated, revealed on first call
//!     #[envbake(obfuscate)]
//!     api_key: String,
//!
//!     #[envbake(default = 8080)]
//!     port: u16,
//! }
//!
//! assert_eq!(Env::api_url(), "https://api.example.com");
//! assert_eq!(Env::api_key(), "sk-live-1234");
//! assert_eq!(Env::port(), 8080);
//! ```
//!
//! # Attributes
//!
//! ## `#[envbake(path = "...")]` - Env File
//!
//! Path of the env file relative to the crate root (`CARGO_MANIFEST_DIR`).
//! Defaults to `.env`. A missing file counts as empty unless
//! `require_env_file` is set.
//!
//! An existing file is tracked by the compiler, so editing it rebuilds the
//! crate. A file that did not exist at the last build is not tracked:
//! after creating it, touch the source file holding the derive (or run
//! `cargo clean -p <crate>`) to pick it up.
//!
//! ```rust,ignore
//! #[derive(Envbake)]
//! #[envbake(path = ".env.production", require_env_file)]
//! struct Env {
//!     database_url: String,
//! }
//! ```
//!
//! ## `#[envbake(var_name = "CUSTOM_NAME")]`
//!
//! Look the field up under an explicit key. The key is used verbatim, even
//! when `use_constant_case` is on.
//!
//! ```rust,ignore
//! #[derive(Envbake)]
//! #[envbake(use_constant_case)]
//! struct Env {
//!     // Read from MY_TOKEN, not TOKEN
//!     #[envbake(var_name = "MY_TOKEN")]
//!     token: String,
//! }
//! ```
//!
//! ## `#[envbake(default = value)]`
//!
//! String, bool or number literal used when the key is missing.
//!
//! ## `#[envbake(optional)]` / `#[envbake(allow_optional_fields)]`
//!
//! An `Option<T>` field with no value and no default becomes `None` instead
//! of a compile error.
//!
//! ## `#[envbake(name = "Env")]`
//!
//! Generate a new unit struct carrying the accessors instead of adding them
//! to the annotated struct.
//!
//! ## `#[envbake(obfuscate)]` and `#[envbake(random_seed = N)]`
//!
//! Obfuscate one field, or every field when used on the struct. A fixed seed
//! makes the generated keys identical across builds.
//!
//! Field-level `obfuscate`, `optional` and `use_constant_case` override the
//! struct-level setting in both directions (`= false` switches them off).
//!
//! # Build scripts
//!
//! Without the derive macro, describe classes in a JSON manifest and run
//! [`build::run`] from `build.rs`; see [`Manifest`] for the format.

pub use envbake_core::{
    build, case, decl, emit, generate, generate_for, generate_source, loader, manifest,
    obfuscate, options, resolve, ClassConfig, ClassDecl, DefaultValue, Error, FieldConfig,
    FieldDecl, FieldType, Manifest, Result, ValueKind,
};
pub use envbake_derive::Envbake;

// Re-export for macro-generated code
#[doc(hidden)]
pub mod __private {
    pub use envbake_core::obfuscate::reveal;
    pub use std::sync::LazyLock;
}
