//! Live event payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator of the keep-alive message.
pub const HEARTBEAT: &str = "heartbeat";

/// Discriminator of the event pushed when a sale is recorded.
pub const SALE: &str = "sale";

/// A notification pushed to dashboards.
///
/// Serializes as a flat JSON object whose `type` field carries the
/// discriminator, e.g. `{"type":"sale","amount":42}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Event {
    /// Create an event with no associated data.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: Map::new(),
        }
    }

    /// The keep-alive message, `{"type":"heartbeat"}`.
    pub fn heartbeat() -> Self {
        Self::new(HEARTBEAT)
    }

    /// Attach a field to the event.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
