//! Renders messages into the normalized payload pushed to ntfy.

use crate::core::CallbackUrl;
use crate::message::Message;
use crate::notification::SendError;
use std::fmt;

/// Message priority as understood by ntfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Default,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Default => "default",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered notification, ready to be delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub title: String,
    pub priority: Priority,
    /// Emoji short codes shown as icons by ntfy clients.
    pub tags: Vec<String>,
    pub message: String,
    /// Absolute URL opened when the notification is tapped.
    pub click: String,
}

impl Payload {
    fn new(
        title: impl Into<String>,
        priority: Priority,
        tag: &str,
        message: impl Into<String>,
        click: String,
    ) -> Self {
        Self {
            title: title.into(),
            priority,
            tags: vec![tag.to_string()],
            message: message.into(),
            click,
        }
    }
}

/// Builds the payload for `msg`, with click-through links resolved by `urls`.
pub fn build_payload(msg: &Message, urls: &dyn CallbackUrl) -> Result<Payload, SendError> {
    let payload = match msg {
        Message::Test { .. } => Payload::new(
            "Test Notification",
            Priority::Default,
            "toolbox",
            "This is a test notification from GoAlert.",
            urls.callback_url("/"),
        ),
        Message::Verification { code, .. } => Payload::new(
            "Verification",
            Priority::Default,
            "computer",
            format!("Your verification code is {}.", code),
            urls.callback_url("/verify"),
        ),
        Message::Alert {
            alert_id,
            summary,
            details,
            ..
        } => Payload::new(
            summary.as_str(),
            Priority::Urgent,
            "rotating_light",
            details.as_str(),
            urls.callback_url(&format!("/alerts/{}", alert_id)),
        ),
        Message::AlertBundle {
            service_id,
            service_name,
            count,
            ..
        } => Payload::new(
            service_name.as_str(),
            Priority::Urgent,
            "rotating_light",
            format!("{}\n{} alerts", service_name, count),
            urls.callback_url(&format!("/services/{}/alerts", service_id)),
        ),
        Message::AlertStatus {
            alert_id,
            log_entry,
            ..
        } => {
            let title = format!("Alert Status: {}", alert_id);
            let message = format!("{}\n{}", title, log_entry);
            Payload::new(
                title,
                Priority::Default,
                "page_with_curl",
                message,
                urls.callback_url(&format!("/alerts/{}", alert_id)),
            )
        }
        Message::ScheduleOnCallUsers {
            schedule_id,
            schedule_name,
            schedule_url,
            users,
            ..
        } => {
            let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
            let title = format!("On Call: {}", schedule_name);
            let message = format!(
                "{}\nUsers on call: {}\n{}",
                title,
                names.join(","),
                schedule_url
            );
            Payload::new(
                title,
                Priority::Default,
                "calendar",
                message,
                urls.callback_url(&format!("/schedules/{}", schedule_id)),
            )
        }
        Message::Signal { .. } => return Err(SendError::UnsupportedVariant(msg.message_type())),
    };

    Ok(payload)
}
