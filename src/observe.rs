// src/observe.rs

//! Structured pipeline events and the sinks that receive them.
//!
//! The pipeline never logs directly. Each stage reports a [`PipelineEvent`]
//! to an injected [`EventSink`]; production uses [`TracingSink`], tests and
//! dry runs use [`MemorySink`].

use std::sync::Mutex;

use tracing::{debug, error, info, warn};

use crate::models::ChangeKind;

/// Something worth recording about one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Request path did not match the notification route
    PassedThrough { method: String, path: String },

    /// Body could not be parsed
    ParseFailed { message: String },

    /// Notification parsed
    Received {
        service: String,
        resource: String,
        change_kind: ChangeKind,
        id: Option<String>,
    },

    /// Content type does not map to a published page
    Ignored { resource: String },

    RebuildSkipped,
    RebuildTriggered { status: u16 },
    RebuildFailed { reason: String },

    PurgeSkipped,
    PurgeCompleted { urls: Vec<String> },
    PurgeFailed { urls: Vec<String>, reason: String },
}

/// Receiver of pipeline events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::PassedThrough { method, path } => {
                debug!(%method, %path, "Request passed through");
            }
            PipelineEvent::ParseFailed { message } => {
                error!(%message, "Webhook processing error");
            }
            PipelineEvent::Received {
                service,
                resource,
                change_kind,
                id,
            } => {
                info!(
                    %service,
                    api = %resource,
                    %change_kind,
                    id = id.as_deref().unwrap_or(""),
                    "Webhook received"
                );
            }
            PipelineEvent::Ignored { resource } => {
                info!(api = %resource, "No rebuild needed for this content type");
            }
            PipelineEvent::RebuildSkipped => debug!("Build hook not configured, skipping rebuild"),
            PipelineEvent::RebuildTriggered { status } => {
                info!(status, "Build triggered successfully");
            }
            PipelineEvent::RebuildFailed { reason } => {
                error!(%reason, "Failed to trigger build");
            }
            PipelineEvent::PurgeSkipped => debug!("Purge credentials not configured, skipping purge"),
            PipelineEvent::PurgeCompleted { urls } => {
                info!(?urls, "Cache purged successfully");
            }
            PipelineEvent::PurgeFailed { urls, reason } => {
                warn!(?urls, %reason, "Failed to purge cache");
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit(PipelineEvent::RebuildSkipped);
        sink.emit(PipelineEvent::PurgeSkipped);
        assert_eq!(
            sink.events(),
            vec![PipelineEvent::RebuildSkipped, PipelineEvent::PurgeSkipped]
        );
    }
}
