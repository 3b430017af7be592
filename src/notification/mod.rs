//! Delivery of notification messages to external push services.
//!
//! A sender first renders a `Message` into a normalized `Payload` and then
//! hands it to a delivery client. Both stages report failures through
//! `SendError`; nothing is logged or retried here, that is left to the caller.
pub mod ntfy;
pub mod payload;

pub use ntfy::NtfySender;
pub use payload::{build_payload, Payload, Priority};

use crate::message::MessageType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("message type '{0}' not supported")]
    UnsupportedVariant(MessageType),

    #[error("failed to build request: {0}")]
    RequestConstruction(String),

    #[error("delivery timed out")]
    DeliveryTimeout,

    #[error("delivery failed: {0}")]
    DeliveryFailed(#[source] reqwest::Error),

    #[error("delivery cancelled")]
    Cancelled,
}
