//! Example demonstrating Option<T> for optional fields

use envbake::Envbake;

#[allow(dead_code)]
#[derive(Envbake)]
#[envbake(path = "../demos/demo.env", use_constant_case, allow_optional_fields)]
struct Env {
    // Required field
    app_name: &'static str,

    // Optional fields: None if not set
    sentry_dsn: Option<&'static str>,
    port: Option<u16>,
    verbose: Option<bool>,

    // Opt out of the struct-level setting and fall back to a default
    #[envbake(optional = false, default = 4)]
    workers: Option<u8>,
}

fn main() {
    println!("Configuration:");
    println!("  App Name: {}", Env::app_name());
    println!("  Sentry DSN: {:?}", Env::sentry_dsn()); // None
    println!("  Port: {:?}", Env::port()); // Some(8080)
    println!("  Verbose: {:?}", Env::verbose()); // None
    println!("  Workers: {:?}", Env::workers()); // Some(4)
}
