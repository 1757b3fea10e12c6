//! Message model.
//!
//! Open field set: the known fields below plus a flattened map for
//! anything else a producer attaches, so a message round-trips as a plain
//! field-to-value mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier, assigned by the cache on first write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Channel the message was posted to.
    #[serde(default)]
    pub channel: Option<String>,

    /// Sender handle.
    #[serde(default)]
    pub sender: Option<String>,

    /// Message body.
    pub content: String,

    /// When the message was sent.
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,

    /// Fields the core does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Create a new message with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            channel: None,
            sender: None,
            content: content.into(),
            sent_at: None,
            extra: Map::new(),
        }
    }

    /// Set the channel (builder pattern).
    #[must_use]
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the sender (builder pattern).
    #[must_use]
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Set the sent timestamp (builder pattern).
    #[must_use]
    pub fn sent_at(mut self, at: DateTime<Utc>) -> Self {
        self.sent_at = Some(at);
        self
    }

    /// Attach an uninterpreted field.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.extra.insert(name.into(), value);
    }

    /// Look up an uninterpreted field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

impl Entity for Message {
    const NAMESPACE: &'static str = "message";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
