//! Lading Server CLI
//!
//! Starts the HTTP server for shipping-document extraction.

use lading_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Pick up GEMINI_API_KEY and friends from a local .env, if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default development configuration");
        eprintln!("Usage: lading-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_dev_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Lading Server - Shipping Document Extraction");
    println!();
    println!("USAGE:");
    println!("    lading-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    lading-server --config config/lading.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - api_key: Extraction model API key (GEMINI_API_KEY env wins)");
    println!("    - models: Ordered model chain, first success wins");
    println!("    - [extractor]: token_threshold, chars_per_token, pages_per_batch");
    println!();
}
