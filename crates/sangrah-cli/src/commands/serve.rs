//! Start the HTTP server from the CLI.

use clap::Args;

use sangrah_core::config::StoreBackend;
use sangrah_core::error::AppError;
use sangrah_database::Stores;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Use the in-memory backend regardless of configuration
    #[arg(long)]
    pub memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.versioning.backend = StoreBackend::Memory;
    }

    let stores = Stores::connect(&config).await?;
    sangrah_api::run_server(config, stores).await
}
