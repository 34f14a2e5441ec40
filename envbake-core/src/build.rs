//! Helpers for running the generator from `build.rs`
//!
//! Generated code refers to `::envbake::__private` for obfuscated fields,
//! so the crate including the output needs `envbake` as a regular
//! dependency even when the build script only uses `envbake-core`:
//!
//! ```toml
//! [dependencies]
//! envbake = "0.1"
//!
//! [build-dependencies]
//! envbake-core = "0.1"
//! ```
//!
//! ```no_run
//! // build.rs
//! fn main() {
//!     envbake_core::build::run("envbake.json").unwrap();
//! }
//! ```
//!
//! ```ignore
//! // src/env.rs
//! include!(concat!(env!("OUT_DIR"), "/envbake.rs"));
//! ```

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use proc_macro2::TokenStream;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File written into `OUT_DIR` by [`run`]
pub const OUTPUT_FILE: &str = "envbake.rs";

/// Generate every class in the manifest at `manifest` (relative to the
/// crate root) into `$OUT_DIR/envbake.rs`.
///
/// Prints `cargo:rerun-if-changed` for the manifest and every env file it
/// references. Returns the path of the written file.
pub fn run(manifest: impl AsRef<Path>) -> Result<PathBuf> {
    let root = PathBuf::from(cargo_var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(cargo_var("OUT_DIR")?);
    let manifest_path = root.join(manifest);

    println!("cargo:rerun-if-changed={}", manifest_path.display());
    let manifest = Manifest::from_path(&manifest_path)?;
    for path in manifest.env_files(&root) {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let out = out_dir.join(OUTPUT_FILE);
    write_source(&manifest.generate(&root)?, &out)?;
    Ok(out)
}

/// Write generated tokens to `path` as Rust source
pub fn write_source(tokens: &TokenStream, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "writing generated source");
    fs::write(path, tokens.to_string()).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn cargo_var(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| Error::BuildEnv { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_run_writes_output() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(
            root.path().join("envbake.json"),
            r#"{"classes": [{"name": "Env", "fields": [{"name": "port", "type": "u16"}]}]}"#,
        )
        .unwrap();
        fs::write(root.path().join(".env"), "port=4000\n").unwrap();

        let original_root = env::var_os("CARGO_MANIFEST_DIR");
        env::set_var("CARGO_MANIFEST_DIR", root.path());
        env::set_var("OUT_DIR", out.path());

        let written = run("envbake.json").unwrap();
        assert_eq!(written, out.path().join(OUTPUT_FILE));

        let source = fs::read_to_string(&written).unwrap();
        assert!(source.contains("pub struct Env ;"));
        assert!(source.contains("4000u16"));

        env::remove_var("OUT_DIR");
        match original_root {
            Some(value) => env::set_var("CARGO_MANIFEST_DIR", value),
            None => env::remove_var("CARGO_MANIFEST_DIR"),
        }
    }

    #[test]
    #[serial]
    fn test_run_outside_build_script() {
        let root = TempDir::new().unwrap();
        let original_root = env::var_os("CARGO_MANIFEST_DIR");
        env::set_var("CARGO_MANIFEST_DIR", root.path());
        env::remove_var("OUT_DIR");
        let result = run("envbake.json");
        assert!(matches!(result, Err(Error::BuildEnv { name: "OUT_DIR" })));

        match original_root {
            Some(value) => env::set_var("CARGO_MANIFEST_DIR", value),
            None => env::remove_var("CARGO_MANIFEST_DIR"),
        }
    }
}
