//! ntfy-notify - Push notifications for on-call alerting via ntfy
//!
//! This library renders alerting notifications (alerts, status updates,
//! on-call rosters, verification codes) and publishes them to ntfy topics.

pub mod cli;
pub mod config;
pub mod core;
pub mod message;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;
pub use message::{Destination, Message, MessageType, SentMessage, User};
pub use notification::{NtfySender, SendError};
