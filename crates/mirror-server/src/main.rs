//! Mirror Server CLI
//!
//! Starts the HTTP server for the text-verification pipeline.

use mirror_server::{config::ServerConfig, start_server, ServerError};
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
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        // Load from specified config file
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        // Fall back to the environment (ASI_API_KEY, USE_LOCAL_DKG, ...)
        ServerConfig::from_env()
    };

    // Start the server
    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Mirror Server - Text Verification Pipeline");
    println!();
    println!("USAGE:");
    println!("    mirror-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("Without --config, settings are read from the environment:");
    println!("    PORT                        HTTP port (default: 3000)");
    println!("    ASI_API_KEY                 Oracle API key");
    println!("    ASI_BASE_URL                Oracle gateway base URL");
    println!("    USE_LOCAL_DKG               'true' to use a local edge node");
    println!("    DKG_ENDPOINT, DKG_PORT      Local edge node address");
    println!("    PUBLISH_WALLET_PUBLIC_KEY   Wallet for DKG publishing");
    println!("    PUBLISH_WALLET_PRIVATE_KEY  Wallet for DKG publishing");
    println!();
    println!("Missing credentials degrade the matching pipeline stage");
    println!("(neutral scores, synthetic facts, unpublished results) instead");
    println!("of failing startup.");
}
