//! One-class generation: load, resolve, emit

use crate::decl::ClassDecl;
use crate::emit::{emit_class, parse_ident, Target};
use crate::error::Result;
use crate::loader::{env_file_path, load_env_file};
use crate::obfuscate::Obfuscator;
use crate::resolve::resolve_class;
use proc_macro2::TokenStream;
use std::fs;
use std::path::Path;
use tracing::info;

/// Generate a `pub` unit struct named after `class` with one accessor per field.
///
/// `root` is the directory the class's env file path is relative to.
pub fn generate(root: &Path, class: &ClassDecl) -> Result<TokenStream> {
    let ident = parse_ident(class.output_name())?;
    let target = Target::define(ident, syn::parse_quote!(pub));
    generate_for(root, class, &target)
}

/// Generate accessors for `class` on an explicit target
pub fn generate_for(root: &Path, class: &ClassDecl, target: &Target) -> Result<TokenStream> {
    let env = load_env_file(root, &class.config)?;
    let fields = resolve_class(class, &env)?;

    // Relative roots would make `include_bytes!` resolve against the wrong file
    let anchor = fs::canonicalize(env_file_path(root, &class.config))
        .ok()
        .filter(|path| path.is_file());

    let mut obfuscator = Obfuscator::new(class.config.random_seed());
    let tokens = emit_class(target, &fields, &mut obfuscator, anchor.as_deref())?;

    info!(
        class = %target.ident,
        fields = fields.len(),
        obfuscated = fields.iter().filter(|f| f.obfuscate).count(),
        "generated env accessors"
    );
    Ok(tokens)
}

/// Same as [`generate`], rendered as Rust source text
pub fn generate_source(root: &Path, class: &ClassDecl) -> Result<String> {
    generate(root, class).map(|tokens| tokens.to_string())
}
