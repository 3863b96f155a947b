use clap::Parser;
use std::path::PathBuf;

use proofpress::config::Config;
use proofpress::server;

/// Proofpress - product mockup compositing service
#[derive(Parser, Debug)]
#[command(name = "proofpress")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging subsystem
    proofpress::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration from file
    let config = Config::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if args.test {
        println!("Configuration OK");
        return;
    }

    tracing::info!(
        config_file = %args.config.display(),
        server_address = %config.server.address,
        server_port = config.server.port,
        placements = config.placement_table().len(),
        store_folder = %config.store.folder,
        "Configuration loaded successfully"
    );

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "Server terminated unexpectedly");
        std::process::exit(1);
    }
}
