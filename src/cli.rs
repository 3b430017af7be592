//! Command-Line Interface (CLI) argument parsing.
//!
//! The arguments are parsed at startup and merged over the configuration
//! from `ntfy-notify.toml` and environment variables.

use crate::message::Message;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::{Path, PathBuf};

/// Sends a single notification to an ntfy topic.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root URL of the ntfy server.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Public URL of the web UI used for click-through links.
    #[arg(long, value_name = "URL")]
    pub public_url: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Send a test notification.
    Test {
        /// The ntfy topic to publish to.
        topic: String,
    },
    /// Send a verification code.
    Verify {
        /// The ntfy topic to publish to.
        topic: String,
        /// The code to include in the message.
        code: u32,
    },
    /// Send a message read from a JSON file (`-` for stdin).
    Send {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        if let Some(url) = &self.public_url {
            dict.insert("public_url".into(), Value::from(url.clone()));
        }

        if let Some(url) = &self.base_url {
            let mut ntfy = Dict::new();
            ntfy.insert("base_url".into(), Value::from(url.clone()));
            dict.insert("ntfy".into(), Value::Dict(Tag::Default, ntfy));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}

/// Reads a JSON-encoded `Message` from `path`, or from stdin when `path` is `-`.
pub fn read_message(path: &Path) -> Result<Message> {
    let raw = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Failed to read message from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message from {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Failed to parse message JSON")
}
