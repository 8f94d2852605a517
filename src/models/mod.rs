// src/models/mod.rs

//! Domain models for the webhook handler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod content;
mod event;
mod request;
mod response;

// Re-export all public types
pub use config::{
    Capabilities, CdnConfig, Config, ContentApiConfig, ContentConfig, HttpConfig, PipelineConfig,
    PurgeCredentials, RouteConfig,
};
pub use content::{Article, Category, Eyecatch, ListResponse};
pub use event::{ChangeKind, ContentSnapshots, NotificationEvent};
pub use request::InboundRequest;
pub use response::{AckBody, ErrorBody, ResponseBody, WebhookResponse};
