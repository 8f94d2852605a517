// src/pipeline/trigger.rs

//! Rebuild trigger.

use serde::Serialize;

use crate::error::DeliveryError;
use crate::models::{NotificationEvent, PipelineConfig};
use crate::services::{Dispatcher, OutboundRequest};

use super::StepOutcome;

/// `source` value sent to the build hook.
pub const REBUILD_SOURCE: &str = "cms-webhook";

/// Body posted to the build hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildPayload<'a> {
    pub source: &'static str,
    pub api: &'a str,
    #[serde(rename = "type")]
    pub change_kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub timestamp: &'a str,
}

impl<'a> RebuildPayload<'a> {
    pub fn new(event: &'a NotificationEvent, timestamp: &'a str) -> Self {
        Self {
            source: REBUILD_SOURCE,
            api: &event.resource,
            change_kind: event.change_kind.as_str(),
            id: event.id.as_deref(),
            timestamp,
        }
    }
}

/// Ask the build hook to rebuild the site.
///
/// Skipped when no endpoint is configured. Delivery failures come back as
/// [`StepOutcome::Failed`].
pub async fn trigger_rebuild(
    dispatcher: &dyn Dispatcher,
    config: &PipelineConfig,
    event: &NotificationEvent,
    timestamp: &str,
) -> StepOutcome {
    let Some(endpoint) = config.rebuild_endpoint.as_deref() else {
        return StepOutcome::Skipped;
    };

    let body = match serde_json::to_value(RebuildPayload::new(event, timestamp)) {
        Ok(body) => body,
        Err(err) => return StepOutcome::Failed(DeliveryError::Transport(err.to_string())),
    };

    dispatcher
        .post_json(OutboundRequest::new(endpoint, body))
        .await
        .into()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::ChangeKind;

    fn event(id: Option<&str>) -> NotificationEvent {
        NotificationEvent {
            service: "cms".to_string(),
            resource: "blog".to_string(),
            id: id.map(str::to_string),
            change_kind: ChangeKind::Updated,
            payload: None,
        }
    }

    #[test]
    fn test_payload_shape() {
        let event = event(Some("42"));
        let payload = serde_json::to_value(RebuildPayload::new(&event, "2025-01-01T00:00:00.000Z"))
            .unwrap();
        assert_eq!(
            payload,
            json!({
                "source": "cms-webhook",
                "api": "blog",
                "type": "edit",
                "id": "42",
                "timestamp": "2025-01-01T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_payload_omits_missing_id() {
        let event = event(None);
        let payload = serde_json::to_value(RebuildPayload::new(&event, "t")).unwrap();
        assert!(payload.get("id").is_none());
    }
}
