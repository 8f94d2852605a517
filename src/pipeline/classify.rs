// src/pipeline/classify.rs

//! Event classifier.

use crate::models::{NotificationEvent, RouteConfig};

/// Published content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Has a listing entry and its own detail page
    Article,
    /// Appears on listing pages only
    Category,
}

/// Map an event's content type to the published pages it affects.
///
/// `None` means the event is irrelevant to the site and needs no action.
pub fn classify(event: &NotificationEvent, routes: &RouteConfig) -> Option<ContentKind> {
    content_kind(&event.resource, routes)
}

pub fn content_kind(resource: &str, routes: &RouteConfig) -> Option<ContentKind> {
    if resource == routes.article_resource {
        Some(ContentKind::Article)
    } else if resource == routes.category_resource {
        Some(ContentKind::Category)
    } else {
        None
    }
}
