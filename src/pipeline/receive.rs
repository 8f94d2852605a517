// src/pipeline/receive.rs

//! Notification receiver.
//!
//! Filters inbound requests to the notification route and parses the body.

use crate::error::AppError;
use crate::models::{InboundRequest, NotificationEvent};
use crate::utils::path_matches_route;

/// What the receiver made of a request.
#[derive(Debug)]
pub enum Receipt {
    /// Not ours; the platform should handle the request as usual
    PassThrough,
    /// A well-formed notification
    Event(NotificationEvent),
    /// Addressed to us but the body is malformed
    Rejected(AppError),
}

/// Examine a request and parse it when it targets the notification route.
///
/// Only `POST` requests whose path contains `route` are parsed; everything
/// else passes through without touching the body.
pub fn receive(request: &InboundRequest, route: &str) -> Receipt {
    if !request.is_post() || !path_matches_route(&request.path, route) {
        return Receipt::PassThrough;
    }

    match parse_event(&request.body) {
        Ok(event) => Receipt::Event(event),
        Err(err) => Receipt::Rejected(err),
    }
}

/// Parse a notification body.
pub fn parse_event(body: &str) -> Result<NotificationEvent, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::parse("request body is empty"));
    }
    serde_json::from_str(body).map_err(AppError::parse)
}
