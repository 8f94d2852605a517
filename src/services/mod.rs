//! Service layer for the webhook handler.
//!
//! This module contains the outbound clients:
//! - JSON delivery to the build hook and purge API (`Dispatcher`, `HttpDispatcher`)
//! - Read-only content store access (`ContentClient`)

pub mod content;
pub mod dispatcher;

pub use content::ContentClient;
pub use dispatcher::{Dispatcher, HttpDispatcher, OutboundRequest};
