mod cli;
mod share;

use std::path::Path;

use siren_common::ConfigError;
use siren_config::SirenConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

/// Load the config before logging is up; the caller reports any error.
fn load_config(path: Option<&Path>) -> (SirenConfig, Option<ConfigError>) {
    let result = match path {
        Some(path) => siren_config::toml_loader::load_from_path(path).and_then(|config| {
            siren_config::validation::validate(&config)?;
            Ok(config)
        }),
        None => siren_config::load_config(),
    };
    match result {
        Ok(config) => (config, None),
        Err(e) => (SirenConfig::default(), Some(e)),
    }
}

#[tokio::main]
async fn main() {
    let args = cli::parse();
    let (config, config_err) = load_config(args.config.as_deref());

    // Initialize logging
    let log_directive = args
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.directive());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "siren=info".parse().unwrap()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Siren v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_err {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let result = match args.command {
        Command::Config => {
            println!("{}", siren_config::config_to_json(&config));
            Ok(())
        }
        Command::Share(ref share_args) => share::run(&config, share_args).await,
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
