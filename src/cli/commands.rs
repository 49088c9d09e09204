use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    constants::PREF_SERVICE_URL,
    service::{AnswerService, HttpAnswerService},
    store::{JsonFileStore, KeyValueStore},
};

use super::Commands;

/// Handle CLI subcommands.
///
/// Returns true when the command was fully handled and the process should
/// exit, false to continue into the chat interface.
pub async fn handle_command(command: &Commands, config: &Config, service_url: &str) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing SchemesConnect configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Questions => {
            list_questions(config);
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config, service_url).await?;
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to chat interface
    }
}

/// Print the suggested quick questions
pub fn list_questions(config: &Config) {
    println!("Suggested questions:");
    for (i, question) in config.assistant.suggested_questions.iter().enumerate() {
        println!("  {}. {}", i + 1, question.green());
    }
}

/// Show version information
pub fn show_version() {
    println!("SchemesConnect v{}", env!("CARGO_PKG_VERSION"));
    println!("   Your one-stop portal for government schemes & citizen services");
}

/// Show status of the answer service and local configuration
async fn show_status(config: &Config, service_url: &str) -> Result<()> {
    println!("SchemesConnect Status:");
    println!();

    // Check the answer service
    let service = HttpAnswerService::new(service_url, config.service.timeout_secs)?;
    if service.health().await {
        println!("  [OK] Answer service: Reachable at {}", service_url);
    } else {
        println!("  [ERROR] Answer service: Not reachable at {}", service_url);
    }

    // Check configuration
    match get_config_dir() {
        Ok(dir) => {
            let config_path = dir.join("config.toml");
            if config_path.exists() {
                println!("  [OK] Configuration: {}", config_path.display());
            } else {
                println!("  [WARNING] Configuration: Not found (using defaults)");
            }
        }
        Err(_) => println!("  [ERROR] Configuration: No config directory available"),
    }

    // Saved preferences
    match JsonFileStore::open_default() {
        Ok(store) => match store.get(PREF_SERVICE_URL) {
            Some(url) => println!("  [OK] Saved service URL: {}", url),
            None => println!("  [WARNING] Saved service URL: None"),
        },
        Err(_) => println!("  [WARNING] Preferences: Not readable"),
    }

    // Environment variables
    println!("\n  Environment:");
    if std::env::var("SCHEMESCONNECT_SERVICE__BASE_URL").is_ok() {
        println!("    • SCHEMESCONNECT_SERVICE__BASE_URL: Set");
    }
    if std::env::var("RUST_LOG").is_ok() {
        println!("    • RUST_LOG: Set");
    }

    println!();
    Ok(())
}
