//! Example demonstrating the prefix attribute

use envtag::Populate;

#[derive(Debug, Default, Populate)]
#[conf(prefix = "MYAPP_")]
struct Config {
    // Environment variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_PORT, ...
    #[conf("DATABASE_URL,default=postgres://localhost/db")]
    pub database_url: String,

    #[conf("PORT,default=8080")]
    pub port: isize,

    #[conf("DEBUG,default=0")]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_PORT", "3000");

    let config = Config::from_env()?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
