//! Configuration management for ntfy-notify
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer built-in defaults, an `ntfy-notify.toml` file,
//! environment variables and command-line arguments, in that order.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::core::CallbackUrl;

/// The config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ntfy-notify.toml";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// The externally reachable root of the web UI. Click-through links
    /// in notifications are built relative to it.
    pub public_url: String,
    /// Configuration for the ntfy service.
    pub ntfy: NtfyConfig,
}

/// Configuration for the ntfy service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NtfyConfig {
    /// The root URL of the ntfy server, e.g. `https://ntfy.sh`.
    pub base_url: String,
}

impl Config {
    /// Loads the application configuration, layering defaults, the TOML
    /// file, environment variables (e.g. `NTFY_NOTIFY_NTFY__BASE_URL`) and
    /// the parsed command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        match &cli.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!(
                        "Config file not found at specified path: {}",
                        path.display()
                    );
                }
                figment = figment.merge(Toml::file(path));
            }
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        let config: Config = figment
            .merge(Env::prefixed("NTFY_NOTIFY_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl CallbackUrl for Config {
    fn callback_url(&self, path: &str) -> String {
        format!("{}{}", self.public_url.trim_end_matches('/'), path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            public_url: "http://localhost:8081".to_string(),
            ntfy: NtfyConfig {
                base_url: "https://ntfy.sh".to_string(),
            },
        }
    }
}
