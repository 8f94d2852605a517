// src/pipeline/respond.rs

//! Response composer.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::AppError;
use crate::models::{AckBody, ErrorBody, NotificationEvent, ResponseBody, WebhookResponse};

pub const SUCCESS_MESSAGE: &str = "Webhook processed successfully";
pub const FAILURE_ERROR: &str = "Webhook processing failed";

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `200` acknowledgment for a parsed event.
///
/// Independent of whether the event was relevant and of how the rebuild
/// and purge went.
pub fn acknowledge(event: &NotificationEvent, timestamp: &str) -> WebhookResponse {
    WebhookResponse {
        status: 200,
        body: ResponseBody::Ack(AckBody {
            status: "success".to_string(),
            message: SUCCESS_MESSAGE.to_string(),
            api: event.resource.clone(),
            change_kind: event.change_kind.as_str().to_string(),
            timestamp: timestamp.to_string(),
        }),
    }
}

/// `500` failure for a request whose body could not be processed.
pub fn reject(error: &AppError, timestamp: &str) -> WebhookResponse {
    let message = error.to_string();
    let message = if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    };

    WebhookResponse {
        status: 500,
        body: ResponseBody::Error(ErrorBody {
            error: FAILURE_ERROR.to_string(),
            message,
            timestamp: timestamp.to_string(),
        }),
    }
}
