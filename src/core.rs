//! Core service traits for ntfy-notify
//!
//! This module defines the trait contracts between the sender, its
//! configuration, and the routing layer that invokes it.

use crate::message::{Message, SentMessage};
use crate::notification::SendError;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Builds absolute click-through URLs for paths inside the web UI.
pub trait CallbackUrl: Send + Sync {
    /// Returns the absolute URL for `path`, which must start with `/`.
    fn callback_url(&self, path: &str) -> String;
}

/// A notification channel capable of delivering a `Message`.
#[async_trait]
pub trait Sender: Send + Sync {
    /// Delivers `msg`, aborting early if `cancel` fires.
    async fn send(
        &self,
        cancel: &CancellationToken,
        msg: &Message,
    ) -> Result<SentMessage, SendError>;
}
