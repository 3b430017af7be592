//! ntfy-notify - send a single notification to an ntfy topic
//!
//! Loads the layered configuration, renders the requested message and
//! publishes it. Ctrl-C aborts an in-flight delivery.

use anyhow::Result;
use clap::Parser;
use ntfy_notify::{
    cli::{read_message, Cli, Command},
    config::Config,
    Destination, Message, NtfySender, Sender,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli).unwrap_or_else(|err| {
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("ntfy Base URL: {}", config.ntfy.base_url);
    info!("Public URL: {}", config.public_url);

    let msg = match &cli.command {
        Command::Test { topic } => Message::Test {
            dest: Destination::new(topic.as_str()),
        },
        Command::Verify { topic, code } => Message::Verification {
            dest: Destination::new(topic.as_str()),
            code: *code,
        },
        Command::Send { path } => read_message(path)?,
    };

    let sender = NtfySender::new(Arc::new(config))?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, cancelling delivery.");
                cancel.cancel();
            }
        });
    }

    match sender.send(&cancel, &msg).await {
        Ok(_) => {
            info!("Sent {} to '{}'.", msg.message_type(), msg.destination());
            Ok(())
        }
        Err(e) => {
            error!("Failed to send notification: {}", e);
            Err(e.into())
        }
    }
}
