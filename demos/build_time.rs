//! Driving the generator without the derive macro
//!
//! The same calls back `envbake::build::run` in a `build.rs`. Set
//! `RUST_LOG=envbake_core=debug` to see what the generator does.

use anyhow::Context;
use envbake::{generate_source, ClassConfig, ClassDecl, FieldConfig, FieldDecl, Manifest};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");

    // Declared in code
    let class = ClassDecl::new(
        "AppEnv",
        ClassConfig::new("demo.env".to_string()).with_use_constant_case(true),
        vec![
            FieldDecl::new("appName", "String".parse()?, FieldConfig::new()),
            FieldDecl::new(
                "port",
                "u16".parse()?,
                FieldConfig::new().with_default_value(8080),
            ),
            FieldDecl::new(
                "apiKey",
                "String".parse()?,
                FieldConfig::new().with_obfuscate(true),
            ),
        ],
    );
    let source = generate_source(&root, &class).context("failed to generate AppEnv")?;
    println!("{}\n", source);

    // Declared in a JSON manifest, as a build script would
    let manifest = Manifest::from_json_str(
        r#"{
            "classes": [{
                "name": "Flags",
                "config": {"path": "demo.env", "use_constant_case": true},
                "fields": [
                    {"name": "debugMode", "type": "bool"},
                    {"name": "betaFeatures", "type": "Option<bool>", "config": {"optional": true}}
                ]
            }]
        }"#,
    )?;
    let tokens = manifest.generate(&root).context("failed to generate manifest")?;
    println!("{}", tokens);

    Ok(())
}
