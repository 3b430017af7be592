//! A sender that publishes notifications to an ntfy server.

use crate::config::Config;
use crate::core::Sender;
use crate::message::{Destination, Message, SentMessage};
use crate::notification::payload::{build_payload, Payload};
use crate::notification::SendError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Upper bound on a single delivery, from building the request to the response.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Publishes messages to `{base_url}/{topic}` on an ntfy server.
pub struct NtfySender {
    client: reqwest::Client,
    config: Arc<Config>,
    timeout: Duration,
}

impl NtfySender {
    /// Creates a new `NtfySender` using the ntfy and public URLs from `config`.
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            config,
            timeout: DELIVERY_TIMEOUT,
        })
    }

    /// Posts `payload` to the topic `dest`.
    ///
    /// The message text is the request body; title, priority, tags and
    /// click URL travel as headers. Any 2xx status counts as delivered.
    /// Gives up with `DeliveryTimeout` once the delivery timeout elapses.
    pub async fn deliver(&self, dest: &Destination, payload: &Payload) -> Result<(), SendError> {
        tokio::time::timeout(self.timeout, self.post(dest, payload))
            .await
            .map_err(|_| SendError::DeliveryTimeout)?
    }

    async fn post(&self, dest: &Destination, payload: &Payload) -> Result<(), SendError> {
        let url = topic_url(&self.config.ntfy.base_url, dest)?;

        let mut headers = HeaderMap::new();
        headers.insert("title", header_value("Title", &payload.title)?);
        headers.insert("priority", HeaderValue::from_static(payload.priority.as_str()));
        headers.insert("tags", header_value("Tags", &payload.tags.join(","))?);
        headers.insert("click", header_value("Click", &payload.click)?);

        let request = self
            .client
            .post(url)
            .headers(headers)
            .body(payload.message.clone())
            .build()
            .map_err(|e| SendError::RequestConstruction(e.to_string()))?;

        let response = self.client.execute(request).await.map_err(classify)?;
        response.error_for_status().map_err(classify)?;
        Ok(())
    }
}

#[async_trait]
impl Sender for NtfySender {
    /// Renders and delivers `msg`. Fails fast on unsupported messages, and
    /// gives up once the delivery timeout elapses or `cancel` fires.
    #[instrument(skip_all, fields(message_type = %msg.message_type(), dest = %msg.destination()))]
    async fn send(
        &self,
        cancel: &CancellationToken,
        msg: &Message,
    ) -> Result<SentMessage, SendError> {
        let payload = build_payload(msg, self.config.as_ref())?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SendError::Cancelled),
            result = self.deliver(msg.destination(), &payload) => {
                result?;
                debug!(priority = %payload.priority, "Delivered notification to ntfy");
                Ok(SentMessage::sent())
            }
        }
    }
}

/// Joins the topic onto the base URL. Topics containing `.` or `..` path
/// segments are rejected, since URL parsing would resolve them away.
fn topic_url(base_url: &str, dest: &Destination) -> Result<Url, SendError> {
    if dest.as_str().split('/').any(is_dot_segment) {
        return Err(SendError::RequestConstruction(format!(
            "destination '{}' contains a dot path segment",
            dest
        )));
    }
    let raw = format!("{}/{}", base_url, dest);
    Url::parse(&raw).map_err(|e| SendError::RequestConstruction(format!("invalid url '{}': {}", raw, e)))
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, SendError> {
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|e| SendError::RequestConstruction(format!("invalid {} header: {}", name, e)))
}

fn classify(e: reqwest::Error) -> SendError {
    if e.is_timeout() {
        SendError::DeliveryTimeout
    } else if e.is_builder() {
        SendError::RequestConstruction(e.to_string())
    } else {
        SendError::DeliveryFailed(e)
    }
}
