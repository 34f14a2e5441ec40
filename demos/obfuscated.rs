//! Obfuscated secrets example
//!
//! Run `strings` on the built binary: the API key and signing secret do not
//! appear in it, the database URL does.

use envbake::Envbake;

#[allow(dead_code)]
#[derive(Envbake)]
#[envbake(path = "../demos/demo.env", use_constant_case, obfuscate)]
struct Secrets {
    api_key: String,
    signing_secret: String,
    max_connections: u32,

    // Opt a single field out of struct-level obfuscation
    #[envbake(obfuscate = false)]
    database_url: &'static str,
}

#[allow(dead_code)]
#[derive(Envbake)]
#[envbake(path = "../demos/demo.env", use_constant_case, random_seed = 42)]
struct Pinned {
    // Same bytes in every build thanks to the fixed seed
    #[envbake(obfuscate)]
    api_key: String,
}

fn main() {
    // Revealed on first call, cached afterwards
    println!("API key: {}", mask(Secrets::api_key()));
    println!("Signing secret: {}", mask(Secrets::signing_secret()));
    println!("Max connections: {}", Secrets::max_connections());
    println!("Database URL: {}", Secrets::database_url());
    println!("Pinned API key: {}", mask(Pinned::api_key()));
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}{}", visible, "*".repeat(secret.chars().count().saturating_sub(4)))
}
