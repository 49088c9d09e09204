use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use schemesconnect::{
    app::load_config,
    cli::{handle_command, Cli},
    constants::PREF_SERVICE_URL,
    runtime::{InteractiveRunner, OneShotRunner},
    service::HttpAnswerService,
    store::{JsonFileStore, KeyValueStore},
    utils::{init_logger, PortalError},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        let toml_str = std::fs::read_to_string(config_path)?;
        toml::from_str(&toml_str)
            .map_err(|e| PortalError::ConfigError(format!("{}: {}", config_path.display(), e)))?
    } else {
        match load_config() {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load config: {}. Using defaults.", e);
                schemesconnect::Config::default()
            }
        }
    };

    // Determine service URL (CLI arg > saved preference > config)
    let mut store = JsonFileStore::open_default().ok();
    let service_url = if let Some(url) = &cli.service_url {
        // Remember an explicitly chosen service for next time
        if let Some(store) = store.as_mut() {
            if let Err(e) = store.set(PREF_SERVICE_URL, url) {
                eprintln!("Failed to save service preference: {}", e);
            }
        }
        url.clone()
    } else if let Some(url) = store.as_ref().and_then(|s| s.get(PREF_SERVICE_URL)) {
        url
    } else {
        config.service.base_url.clone()
    };

    // Handle subcommands
    if let Some(command) = &cli.command {
        if handle_command(command, &config, &service_url).await? {
            return Ok(()); // Command handled, exit
        }
        // Continue to chat for Commands::Chat
    }

    let service = Arc::new(HttpAnswerService::new(
        &service_url,
        config.service.timeout_secs,
    )?);

    if let Some(question) = &cli.question {
        // One-shot mode
        let mut runner = OneShotRunner::new(service, service_url);
        let result = runner.execute(question).await?;
        println!("{}", runner.format_result(&result, cli.output_format));

        if !result.ok {
            std::process::exit(1);
        }
        Ok(())
    } else {
        // Interactive chat loop
        InteractiveRunner::new(service, service_url, &config).run().await
    }
}
