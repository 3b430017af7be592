//! Notification message types handed to senders by the routing layer.
//!
//! A `Message` is a closed set of variants. Each variant carries the
//! destination it is addressed to along with the fields needed to render it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An opaque destination identifier (for ntfy, the topic name).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Destination(pub String);

impl Destination {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user referenced by an on-call notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A notification to be delivered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Test {
        dest: Destination,
    },
    Verification {
        dest: Destination,
        code: u32,
    },
    Alert {
        dest: Destination,
        alert_id: i64,
        summary: String,
        details: String,
    },
    AlertBundle {
        dest: Destination,
        service_id: String,
        service_name: String,
        count: usize,
    },
    AlertStatus {
        dest: Destination,
        alert_id: i64,
        log_entry: String,
    },
    ScheduleOnCallUsers {
        dest: Destination,
        schedule_id: String,
        schedule_name: String,
        schedule_url: String,
        users: Vec<User>,
    },
    /// A free-form signal carrying arbitrary parameters. Not every sender
    /// knows how to render one.
    Signal {
        dest: Destination,
        #[serde(default)]
        params: BTreeMap<String, String>,
    },
}

impl Message {
    /// The destination this message is addressed to.
    pub fn destination(&self) -> &Destination {
        match self {
            Message::Test { dest }
            | Message::Verification { dest, .. }
            | Message::Alert { dest, .. }
            | Message::AlertBundle { dest, .. }
            | Message::AlertStatus { dest, .. }
            | Message::ScheduleOnCallUsers { dest, .. }
            | Message::Signal { dest, .. } => dest,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Test { .. } => MessageType::Test,
            Message::Verification { .. } => MessageType::Verification,
            Message::Alert { .. } => MessageType::Alert,
            Message::AlertBundle { .. } => MessageType::AlertBundle,
            Message::AlertStatus { .. } => MessageType::AlertStatus,
            Message::ScheduleOnCallUsers { .. } => MessageType::ScheduleOnCallUsers,
            Message::Signal { .. } => MessageType::Signal,
        }
    }
}

/// The kind of a `Message`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Test,
    Verification,
    Alert,
    AlertBundle,
    AlertStatus,
    ScheduleOnCallUsers,
    Signal,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageType::Test => "MessageTypeTest",
            MessageType::Verification => "MessageTypeVerification",
            MessageType::Alert => "MessageTypeAlert",
            MessageType::AlertBundle => "MessageTypeAlertBundle",
            MessageType::AlertStatus => "MessageTypeAlertStatus",
            MessageType::ScheduleOnCallUsers => "MessageTypeScheduleOnCallUsers",
            MessageType::Signal => "MessageTypeSignalMessage",
        };
        f.write_str(name)
    }
}

/// The delivery state reported back to the routing layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageState {
    Sent,
}

/// Marker returned after a message was accepted by the remote service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentMessage {
    pub state: MessageState,
}

impl SentMessage {
    pub fn sent() -> Self {
        Self {
            state: MessageState::Sent,
        }
    }
}
