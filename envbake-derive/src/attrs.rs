//! Attribute parsing for `#[envbake(...)]` annotations.
//!
//! Struct-level attributes become a [`ClassConfig`], field-level attributes a
//! [`FieldConfig`]. Unknown keys are rejected so typos surface as compile
//! errors instead of silently falling back to defaults.

use envbake_core::{ClassConfig, DefaultValue, Error, FieldConfig};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Lit, LitBool, LitInt, LitStr, UnOp};

/// Parse `#[envbake(...)]` on the struct itself.
///
/// Supported keys: `path`, `require_env_file`, `name`, `obfuscate`,
/// `allow_optional_fields`, `use_constant_case`, `random_seed`.
pub fn class_config(attrs: &[Attribute]) -> syn::Result<ClassConfig> {
    let mut path: Option<String> = None;
    let mut require_env_file = false;
    let mut name: Option<String> = None;
    let mut obfuscate = false;
    let mut allow_optional_fields = false;
    let mut use_constant_case = false;
    let mut random_seed: Option<u64> = None;

    for attr in attrs {
        if !attr.path().is_ident("envbake") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                path = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("require_env_file") {
                require_env_file = parse_flag(&meta)?;
            } else if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("obfuscate") {
                obfuscate = parse_flag(&meta)?;
            } else if meta.path.is_ident("allow_optional_fields") {
                allow_optional_fields = parse_flag(&meta)?;
            } else if meta.path.is_ident("use_constant_case") {
                use_constant_case = parse_flag(&meta)?;
            } else if meta.path.is_ident("random_seed") {
                random_seed = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
            } else {
                return Err(meta.error("unsupported struct-level envbake attribute"));
            }
            Ok(())
        })?;
    }

    let mut config = ClassConfig::new(path)
        .with_require_env_file(require_env_file)
        .with_obfuscate(obfuscate)
        .with_allow_optional_fields(allow_optional_fields)
        .with_use_constant_case(use_constant_case);
    if let Some(name) = name {
        config = config.with_name(name);
    }
    if let Some(seed) = random_seed {
        config = config.with_random_seed(seed);
    }
    Ok(config)
}

/// Parse `#[envbake(...)]` on a field named `field_name`.
///
/// Supported keys: `var_name`, `obfuscate`, `default`, `optional`,
/// `use_constant_case`. Flags left out stay `None` and inherit the class
/// setting.
pub fn field_config(field_name: &str, attrs: &[Attribute]) -> syn::Result<FieldConfig> {
    let mut config = FieldConfig::new();

    for attr in attrs {
        if !attr.path().is_ident("envbake") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("var_name") {
                let name = meta.value()?.parse::<LitStr>()?.value();
                config = std::mem::take(&mut config).with_var_name(name);
            } else if meta.path.is_ident("obfuscate") {
                let flag = parse_flag(&meta)?;
                config = std::mem::take(&mut config).with_obfuscate(flag);
            } else if meta.path.is_ident("default") {
                let expr: Expr = meta.value()?.parse()?;
                let value = default_value(field_name, &expr)?;
                config = std::mem::take(&mut config).with_default_value(value);
            } else if meta.path.is_ident("optional") {
                let flag = parse_flag(&meta)?;
                config = std::mem::take(&mut config).with_optional(flag);
            } else if meta.path.is_ident("use_constant_case") {
                let flag = parse_flag(&meta)?;
                config = std::mem::take(&mut config).with_use_constant_case(flag);
            } else {
                return Err(meta.error("unsupported field-level envbake attribute"));
            }
            Ok(())
        })?;
    }

    Ok(config)
}

/// `flag` alone means `true`; `flag = false` is also accepted
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        Ok(meta.value()?.parse::<LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Defaults must be string, bool or (possibly negated) number literals
fn default_value(field_name: &str, expr: &Expr) -> syn::Result<DefaultValue> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(DefaultValue::Str(s.value())),
            Lit::Bool(b) => Ok(DefaultValue::Bool(b.value)),
            Lit::Int(i) => Ok(DefaultValue::Int(i.base10_parse()?)),
            Lit::Float(f) => Ok(DefaultValue::Float(f.base10_parse()?)),
            _ => Err(invalid_default(field_name, expr, "another literal")),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match default_value(field_name, inner)? {
            DefaultValue::Int(i) => Ok(DefaultValue::Int(-i)),
            DefaultValue::Float(f) => Ok(DefaultValue::Float(-f)),
            _ => Err(invalid_default(field_name, expr, "a negated non-number")),
        },
        _ => Err(invalid_default(field_name, expr, "an expression")),
    }
}

fn invalid_default(field_name: &str, expr: &Expr, found: &str) -> syn::Error {
    let err = Error::InvalidDefaultType {
        field: field_name.to_string(),
        expected: "a string, bool or number literal".to_string(),
        found: found.to_string(),
    };
    syn::Error::new_spanned(expr, err)
}
