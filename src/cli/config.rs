//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Key to show or change, e.g. "backend.url"
    pub key: Option<String>,

    /// New value for the key
    #[arg(requires = "key")]
    pub value: Option<String>,

    /// Print where the config file lives
    #[arg(long, conflicts_with_all = ["key", "reset"])]
    pub path: bool,

    /// Overwrite the config file with defaults
    #[arg(long, conflicts_with = "key")]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    // Environment overrides are left out so `config` shows what's on disk
    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;

    let Some(key) = args.key else {
        show_all_config(&config);
        return Ok(());
    };

    match args.value {
        Some(value) => {
            config.set(&key, &value)?;
            config.save_to(&path)?;
            println!("{} = {}", key, value);
        }
        None => match config.get(&key) {
            Some(value) => println!("{}", value),
            None if Config::available_keys().contains(&key.as_str()) => println!("(unset)"),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::available_keys().join(", ")
                )))
            }
        },
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[backend]");
    println!("url = \"{}\"", config.backend.url);
    println!("timeout_secs = {}", config.backend.timeout_secs);
    println!();

    println!("[maps]");
    if config.maps_key().is_some() {
        println!("embed_api_key = \"***\" # configured");
    } else {
        println!("embed_api_key = \"\" # not configured, map hidden");
    }
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[location]");
    println!("source = \"{}\"", config.location.source);
    if let Some(lat) = config.location.lat {
        println!("lat = {}", lat);
    }
    if let Some(lng) = config.location.lng {
        println!("lng = {}", lng);
    }
}
