//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use sangrah_core::config::StoreBackend;
use sangrah_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Load and check the configuration
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Validate => {
            let config = super::load_config(config_path)?;

            if config.versioning.backend == StoreBackend::Postgres
                && config.database.url.trim().is_empty()
            {
                return Err(AppError::configuration(
                    "database.url must be set when the postgres backend is selected",
                ));
            }

            match format {
                OutputFormat::Json => output::print_json(&config.versioning),
                OutputFormat::Table => {
                    output::print_success(&format!("Configuration '{config_path}' is valid"));
                    output::print_kv(
                        "Server",
                        &format!("{}:{}", config.server.host, config.server.port),
                    );
                    output::print_kv("Backend", &format!("{:?}", config.versioning.backend));
                    output::print_kv(
                        "Retries",
                        &config.versioning.max_append_retries.to_string(),
                    );
                    output::print_kv("Log format", &config.logging.format);
                }
            }
        }
    }

    Ok(())
}
