//! Basic usage example

use envbake::Envbake;

#[allow(dead_code)]
#[derive(Envbake)]
#[envbake(path = "../demos/demo.env", require_env_file, use_constant_case)]
struct Env {
    // Required field: baked from DATABASE_URL
    database_url: &'static str,

    // Present in demo.env, so the default is not used
    #[envbake(default = "127.0.0.1:8080")]
    server_addr: &'static str,

    // Numeric type
    #[envbake(default = 10)]
    max_connections: u32,

    // Boolean type
    #[envbake(default = false)]
    debug_mode: bool,
}

fn main() {
    // No environment is read at runtime; the values are compiled in
    println!("Configuration baked at build time:");
    println!("  Database URL: {}", Env::database_url());
    println!("  Server Address: {}", Env::server_addr());
    println!("  Max Connections: {}", Env::max_connections());
    println!("  Debug Mode: {}", Env::debug_mode());
}
