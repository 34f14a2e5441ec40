//! Derive macro implementation for envbake

use envbake_core::emit::parse_ident;
use envbake_core::{derive_key, generate_for, ClassDecl, Error, FieldDecl, FieldType, Target};
use proc_macro::TokenStream;
use quote::ToTokens;
use std::path::{Path, PathBuf};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Token};

mod attrs;

/// `Envbake` derive macro
///
/// Reads the struct's env file at compile time and generates one accessor
/// function per field.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[envbake(path = ".env.prod")]`: Env file relative to the crate root (default `.env`)
/// - `#[envbake(require_env_file)]`: Fail when the env file is missing
/// - `#[envbake(name = "Env")]`: Generate a new unit struct with this name instead of
///   adding accessors to the annotated struct
/// - `#[envbake(obfuscate)]`: Obfuscate every field by default
/// - `#[envbake(allow_optional_fields)]`: Treat `Option<T>` fields as optional by default
/// - `#[envbake(use_constant_case)]`: Look fields up as `UPPER_SNAKE_CASE` by default
/// - `#[envbake(random_seed = 42)]`: Reproducible obfuscation keys
///
/// **Field-level**:
/// - `#[envbake(var_name = "CUSTOM_NAME")]`: Explicit lookup key
/// - `#[envbake(default = value)]`: String, bool or number literal used when the key is missing
/// - `#[envbake(obfuscate)]`, `#[envbake(optional)]`, `#[envbake(use_constant_case)]`:
///   Override the struct-level setting (`= false` to switch off)
///
/// # Example
///
/// See the `envbake` crate documentation for usage examples.
#[proc_macro_derive(Envbake, attributes(envbake))]
pub fn derive_envbake(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let root = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            return syn::Error::new_spanned(&input.ident, "CARGO_MANIFEST_DIR is not set")
                .to_compile_error()
                .into();
        }
    };

    expand(&input, &root)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput, root: &Path) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Envbake does not support generic structs",
        ));
    }

    let empty = Punctuated::<Field, Token![,]>::new();
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => &empty,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Envbake only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Envbake only supports structs",
            ));
        }
    };

    let config = attrs::class_config(&input.attrs)?;
    let decls = fields
        .iter()
        .map(field_decl)
        .collect::<syn::Result<Vec<_>>>()?;

    let target = match config.name() {
        Some(name) => {
            let ident = parse_ident(name)
                .map_err(|e| syn::Error::new_spanned(&input.ident, e))?;
            Target::define(ident, input.vis.clone())
        }
        None => Target::existing(input.ident.clone()),
    };

    let class = ClassDecl::new(input.ident.to_string(), config, decls);
    generate_for(root, &class, &target).map_err(|e| spanned_error(e, &class, fields, input))
}

fn field_decl(field: &Field) -> syn::Result<FieldDecl> {
    // Named fields always carry an ident
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "Envbake fields must be named"))?;
    let name = ident.unraw().to_string();

    let spelling = field.ty.to_token_stream().to_string();
    let ty: FieldType = spelling.parse().map_err(|_| {
        let err = Error::UnsupportedType {
            field: name.clone(),
            type_name: spelling.clone(),
        };
        syn::Error::new_spanned(&field.ty, err)
    })?;

    let config = attrs::field_config(&name, &field.attrs)?;
    Ok(FieldDecl::new(name, ty, config))
}

/// Point field-specific errors at the offending field, everything else at the struct
fn spanned_error(
    err: Error,
    class: &ClassDecl,
    fields: &Punctuated<Field, Token![,]>,
    input: &DeriveInput,
) -> syn::Error {
    let field_name = match &err {
        Error::MissingKey { field, .. } | Error::InvalidDefaultType { field, .. } => {
            Some(field.clone())
        }
        Error::TypeConversion { key, .. } => class
            .fields
            .iter()
            .find(|decl| derive_key(&decl.name, &decl.config, &class.config) == *key)
            .map(|decl| decl.name.clone()),
        _ => None,
    };

    let field = field_name.and_then(|name| {
        fields
            .iter()
            .find(|f| f.ident.as_ref().is_some_and(|i| i.unraw() == name))
    });

    match field {
        Some(field) => syn::Error::new_spanned(field, err),
        None => syn::Error::new_spanned(&input.ident, err),
    }
}
