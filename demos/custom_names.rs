//! Custom env variable names example

use envbake::Envbake;

#[allow(dead_code)]
#[derive(Envbake)]
#[envbake(path = "../demos/demo.env", name = "Env", use_constant_case)]
struct EnvDecl {
    // Baked from POSTGRES_CONNECTION_STRING
    #[envbake(var_name = "POSTGRES_CONNECTION_STRING")]
    database_url: &'static str,

    // Baked from REDIS_ENDPOINT
    #[envbake(var_name = "REDIS_ENDPOINT")]
    cache_url: &'static str,

    // Baked from SERVER_PORT, which demo.env does not set
    #[envbake(default = 8080)]
    server_port: u16,
}

fn main() {
    // `name = "Env"` generated a separate unit struct carrying the accessors
    println!("Configuration with custom env names:");
    println!("  Database URL: {}", Env::database_url());
    println!("  Cache URL: {}", Env::cache_url());
    println!("  Server Port: {}", Env::server_port());
}
