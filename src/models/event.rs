//! Inbound change notification.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of change reported by the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    #[serde(rename = "new")]
    Created,
    #[serde(rename = "edit")]
    Updated,
    #[serde(rename = "delete")]
    Deleted,
}

impl ChangeKind {
    /// Wire name used by the content store.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "new",
            ChangeKind::Updated => "edit",
            ChangeKind::Deleted => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Before/after snapshots of the changed item. Passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
}

/// A change notification delivered by the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Originating content service
    pub service: String,

    /// Content type (API endpoint name), e.g. `blog` or `category`
    #[serde(rename = "api")]
    pub resource: String,

    /// Changed content item, when the store reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// What happened to the item
    #[serde(rename = "type")]
    pub change_kind: ChangeKind,

    /// Snapshot payload
    #[serde(rename = "contents", default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ContentSnapshots>,
}

impl NotificationEvent {
    /// The item id, treating an empty string as absent.
    pub fn item_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_event() {
        let json = r#"{
            "service": "novelty",
            "api": "blog",
            "id": "42",
            "type": "edit",
            "contents": { "new": { "title": "after" }, "old": { "title": "before" } }
        }"#;
        let event: NotificationEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.service, "novelty");
        assert_eq!(event.resource, "blog");
        assert_eq!(event.item_id(), Some("42"));
        assert_eq!(event.change_kind, ChangeKind::Updated);
        let payload = event.payload.unwrap();
        assert_eq!(payload.new.unwrap()["title"], "after");
    }

    #[test]
    fn test_parse_minimal_event() {
        let json = r#"{"service": "cms", "api": "category", "type": "new"}"#;
        let event: NotificationEvent = serde_json::from_str(json).unwrap();
        assert!(event.id.is_none());
        assert!(event.payload.is_none());
        assert_eq!(event.change_kind, ChangeKind::Created);
    }

    #[test]
    fn test_rejects_unknown_change_kind() {
        let json = r#"{"service": "cms", "api": "blog", "type": "publish"}"#;
        assert!(serde_json::from_str::<NotificationEvent>(json).is_err());
    }

    #[test]
    fn test_rejects_missing_service() {
        let json = r#"{"api": "blog", "type": "delete"}"#;
        assert!(serde_json::from_str::<NotificationEvent>(json).is_err());
    }

    #[test]
    fn test_empty_id_is_absent() {
        let json = r#"{"service": "cms", "api": "blog", "type": "delete", "id": ""}"#;
        let event: NotificationEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.item_id(), None);
    }
}
