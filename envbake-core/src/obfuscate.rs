//! Reversible XOR obfuscation of resolved values.
//!
//! This is obfuscation, not encryption: the key is emitted next to the data
//! and XOR is its own inverse. It keeps values out of a plain `strings` dump
//! of the binary and nothing more.
//!
//! Values travel as their canonical bytes: UTF-8 for strings, one byte for
//! bools and little-endian bytes for numbers. `isize`/`usize` always use 8
//! bytes so generated code does not depend on the host's pointer width.

use crate::decl::ValueKind;
use crate::resolve::Value;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::mem::size_of;

/// Obfuscated bytes together with the key that reveals them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obfuscated {
    pub data: Vec<u8>,
    pub key: Vec<u8>,
}

/// Per-class source of obfuscation keys
pub struct Obfuscator {
    rng: StdRng,
}

impl Obfuscator {
    /// Seeded generators produce the same keys on every build
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Obfuscate `value` of the declared `kind` with a fresh key
    pub fn obfuscate(&mut self, value: &Value, kind: ValueKind) -> Obfuscated {
        let plain = to_bytes(value, kind);
        let mut key = vec![0u8; plain.len()];
        self.rng.fill_bytes(&mut key);

        Obfuscated {
            data: xor(&plain, &key),
            key,
        }
    }
}

/// XOR `data` with `key`, repeating the key as needed
pub fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

/// Canonical byte representation of a value of the declared kind
pub fn to_bytes(value: &Value, kind: ValueKind) -> Vec<u8> {
    match value {
        Value::Str(s) => s.as_bytes().to_vec(),
        Value::Bool(b) => vec![u8::from(*b)],
        Value::Int(i) => signed_bytes(*i, kind),
        Value::UInt(u) => unsigned_bytes(*u, kind),
        Value::Float(x) if kind == ValueKind::F32 => (*x as f32).to_le_bytes().to_vec(),
        Value::Float(x) => x.to_le_bytes().to_vec(),
    }
}

fn signed_bytes(i: i128, kind: ValueKind) -> Vec<u8> {
    match kind {
        ValueKind::I8 => (i as i8).to_le_bytes().to_vec(),
        ValueKind::I16 => (i as i16).to_le_bytes().to_vec(),
        ValueKind::I32 => (i as i32).to_le_bytes().to_vec(),
        ValueKind::I64 | ValueKind::Isize => (i as i64).to_le_bytes().to_vec(),
        _ => i.to_le_bytes().to_vec(),
    }
}

fn unsigned_bytes(u: u128, kind: ValueKind) -> Vec<u8> {
    match kind {
        ValueKind::U8 => (u as u8).to_le_bytes().to_vec(),
        ValueKind::U16 => (u as u16).to_le_bytes().to_vec(),
        ValueKind::U32 => (u as u32).to_le_bytes().to_vec(),
        ValueKind::U64 | ValueKind::Usize => (u as u64).to_le_bytes().to_vec(),
        _ => u.to_le_bytes().to_vec(),
    }
}

/// Types generated code can rebuild from revealed bytes.
///
/// Decoding never fails: bytes were produced by [`to_bytes`] for the same
/// type, and short input is zero-padded rather than rejected.
pub trait Reveal: Sized {
    fn from_plain_bytes(bytes: Vec<u8>) -> Self;
}

impl Reveal for String {
    fn from_plain_bytes(bytes: Vec<u8>) -> Self {
        String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
}

impl Reveal for bool {
    fn from_plain_bytes(bytes: Vec<u8>) -> Self {
        bytes.first().is_some_and(|b| *b != 0)
    }
}

macro_rules! reveal_le {
    ($($ty:ty => $wire:ty),* $(,)?) => {
        $(
            impl Reveal for $ty {
                fn from_plain_bytes(bytes: Vec<u8>) -> Self {
                    let mut buf = [0u8; size_of::<$wire>()];
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    <$wire>::from_le_bytes(buf) as $ty
                }
            }
        )*
    };
}

reveal_le!(
    i8 => i8,
    i16 => i16,
    i32 => i32,
    i64 => i64,
    i128 => i128,
    isize => i64,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => u64,
    f32 => f32,
    f64 => f64,
);

/// Undo [`Obfuscator::obfuscate`]. Called by generated code.
pub fn reveal<T: Reveal>(data: &[u8], key: &[u8]) -> T {
    T::from_plain_bytes(xor(data, key))
}
