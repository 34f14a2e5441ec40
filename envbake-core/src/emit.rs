//! Code emission for resolved classes

use crate::decl::{FieldType, ValueKind};
use crate::error::{Error, Result};
use crate::obfuscate::Obfuscator;
use crate::resolve::{ResolvedField, Value};
use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use std::path::Path;
use syn::{Ident, Visibility};

/// Type the accessors are attached to
#[derive(Debug, Clone)]
pub struct Target {
    pub ident: Ident,
    /// `Some` to define a new unit struct with this visibility,
    /// `None` to add an `impl` block to an existing type
    pub define: Option<Visibility>,
}

impl Target {
    pub fn existing(ident: Ident) -> Self {
        Self {
            ident,
            define: None,
        }
    }

    pub fn define(ident: Ident, vis: Visibility) -> Self {
        Self {
            ident,
            define: Some(vis),
        }
    }
}

/// Parse `name` as an identifier, falling back to a raw identifier for keywords
pub fn parse_ident(name: &str) -> Result<Ident> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{}", name)))
        .map_err(|_| Error::InvalidIdentifier {
            name: name.to_string(),
        })
}

/// Emit the accessors for `fields` on `target`.
///
/// `env_file`, when given, is anchored with `include_bytes!` so the
/// compiler tracks it and regenerates when it changes.
pub fn emit_class(
    target: &Target,
    fields: &[ResolvedField],
    obfuscator: &mut Obfuscator,
    env_file: Option<&Path>,
) -> Result<TokenStream> {
    let ident = &target.ident;

    let accessors = fields
        .iter()
        .map(|field| emit_accessor(field, obfuscator))
        .collect::<Result<Vec<_>>>()?;

    let definition = target.define.as_ref().map(|vis| {
        quote! {
            #[allow(dead_code)]
            #vis struct #ident;
        }
    });

    let anchor = env_file.map(|path| {
        let path = path.display().to_string();
        quote! {
            const _: &[u8] = ::core::include_bytes!(#path);
        }
    });

    Ok(quote! {
        #anchor
        #definition

        #[allow(dead_code, non_snake_case)]
        impl #ident {
            #(#accessors)*
        }
    })
}

fn emit_accessor(field: &ResolvedField, obfuscator: &mut Obfuscator) -> Result<TokenStream> {
    let ident = parse_ident(&field.decl.name)?;
    let ty = field.decl.ty;
    let ret = return_type(ty);
    let doc = format!(" Value of `{}` baked from the env file.", field.key);

    let value = match &field.value {
        Some(value) => value,
        None => {
            return Ok(quote! {
                #[doc = #doc]
                pub const fn #ident() -> #ret {
                    ::core::option::Option::None
                }
            });
        }
    };

    if !field.obfuscate {
        let literal = wrap_some(value_tokens(value, ty.kind), ty);
        return Ok(quote! {
            #[doc = #doc]
            pub const fn #ident() -> #ret {
                #literal
            }
        });
    }

    let obfuscated = obfuscator.obfuscate(value, ty.kind);
    let len = obfuscated.data.len();
    let data = &obfuscated.data;
    let key = &obfuscated.key;
    let stored = stored_type(ty.kind);
    let read = if ty.kind == ValueKind::Str {
        quote!(VALUE.as_str())
    } else {
        quote!(*VALUE)
    };
    let read = wrap_some(read, ty);

    Ok(quote! {
        #[doc = #doc]
        pub fn #ident() -> #ret {
            const DATA: [u8; #len] = [#(#data),*];
            const KEY: [u8; #len] = [#(#key),*];
            static VALUE: ::envbake::__private::LazyLock<#stored> =
                ::envbake::__private::LazyLock::new(|| {
                    ::envbake::__private::reveal::<#stored>(&DATA, &KEY)
                });
            #read
        }
    })
}

fn wrap_some(tokens: TokenStream, ty: FieldType) -> TokenStream {
    if ty.nullable {
        quote!(::core::option::Option::Some(#tokens))
    } else {
        tokens
    }
}

fn scalar_ident(kind: ValueKind) -> Ident {
    Ident::new(kind.rust_type(), Span::call_site())
}

fn return_type(ty: FieldType) -> TokenStream {
    let inner = match ty.kind {
        ValueKind::Str => quote!(&'static str),
        kind => {
            let ident = scalar_ident(kind);
            quote!(#ident)
        }
    };
    if ty.nullable {
        quote!(::core::option::Option<#inner>)
    } else {
        inner
    }
}

/// Type held by the lazily revealed static
fn stored_type(kind: ValueKind) -> TokenStream {
    match kind {
        ValueKind::Str => quote!(::std::string::String),
        kind => {
            let ident = scalar_ident(kind);
            quote!(#ident)
        }
    }
}

fn value_tokens(value: &Value, kind: ValueKind) -> TokenStream {
    match value {
        Value::Str(s) => quote!(#s),
        Value::Bool(b) => quote!(#b),
        Value::Int(i) => {
            let lit = match kind {
                ValueKind::I8 => Literal::i8_suffixed(*i as i8),
                ValueKind::I16 => Literal::i16_suffixed(*i as i16),
                ValueKind::I32 => Literal::i32_suffixed(*i as i32),
                ValueKind::I64 => Literal::i64_suffixed(*i as i64),
                ValueKind::Isize => Literal::isize_suffixed(*i as isize),
                _ => Literal::i128_suffixed(*i),
            };
            quote!(#lit)
        }
        Value::UInt(u) => {
            let lit = match kind {
                ValueKind::U8 => Literal::u8_suffixed(*u as u8),
                ValueKind::U16 => Literal::u16_suffixed(*u as u16),
                ValueKind::U32 => Literal::u32_suffixed(*u as u32),
                ValueKind::U64 => Literal::u64_suffixed(*u as u64),
                ValueKind::Usize => Literal::usize_suffixed(*u as usize),
                _ => Literal::u128_suffixed(*u),
            };
            quote!(#lit)
        }
        Value::Float(x) => float_tokens(*x, kind),
    }
}

fn float_tokens(x: f64, kind: ValueKind) -> TokenStream {
    let ty = scalar_ident(kind);
    // Check the value at the declared width; f32 overflows where f64 does not
    let x = if kind == ValueKind::F32 {
        f64::from(x as f32)
    } else {
        x
    };
    if x.is_nan() {
        quote!(#ty::NAN)
    } else if x == f64::INFINITY {
        quote!(#ty::INFINITY)
    } else if x == f64::NEG_INFINITY {
        quote!(#ty::NEG_INFINITY)
    } else if kind == ValueKind::F32 {
        let lit = Literal::f32_suffixed(x as f32);
        quote!(#lit)
    } else {
        let lit = Literal::f64_suffixed(x);
        quote!(#lit)
    }
}
