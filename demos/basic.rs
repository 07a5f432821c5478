//! Basic usage example

use envtag::Populate;

#[derive(Debug, Default, Populate)]
struct Config {
    // Loaded from SERVER_ADDR, "127.0.0.1:8080" when unset or empty
    #[conf("SERVER_ADDR,default=127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[conf("MAX_CONNECTIONS,default=10")]
    pub max_connections: isize,

    // Boolean type
    #[conf("DEBUG_MODE,default=false")]
    pub debug_mode: bool,

    // Never touched by envtag
    #[conf("-")]
    pub build_id: String,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");
    std::env::set_var("DEBUG_MODE", "t");

    // Populate an existing value in place
    let mut config = Config {
        build_id: "local".to_string(),
        ..Default::default()
    };
    envtag::populate(&mut config)?;

    println!("Configuration loaded:");
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Build ID: {}", config.build_id);

    Ok(())
}
