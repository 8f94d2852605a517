//! Acknowledgment bodies returned to the notification sender.

use serde::{Deserialize, Serialize};

/// Body of a `200` acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckBody {
    pub status: String,
    pub message: String,
    pub api: String,
    #[serde(rename = "type")]
    pub change_kind: String,
    pub timestamp: String,
}

/// Body of a `500` failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Ack(AckBody),
    Error(ErrorBody),
}

/// Response handed back to the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl WebhookResponse {
    pub const CONTENT_TYPE: &'static str = "application/json";

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Serialize the body to a JSON string.
    pub fn body_json(&self) -> String {
        // Plain string fields only; serialization cannot fail.
        serde_json::to_string(&self.body).unwrap_or_default()
    }
}
