// src/pipeline/pipeline.rs

//! Notification pipeline: receive, classify, trigger and purge, respond.

use std::sync::Arc;

use chrono::Utc;

use crate::models::{Config, InboundRequest, NotificationEvent, PipelineConfig, WebhookResponse};
use crate::observe::{EventSink, PipelineEvent};
use crate::services::Dispatcher;

use super::classify::{ContentKind, classify};
use super::purge::{PurgeReport, purge_cache};
use super::receive::{Receipt, receive};
use super::respond::{acknowledge, format_timestamp, reject};
use super::trigger::trigger_rebuild;
use super::StepOutcome;

/// Everything one invocation needs: the request and the environment
/// configuration read for it.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request: InboundRequest,
    pub config: PipelineConfig,
}

impl InvocationContext {
    pub fn new(request: InboundRequest, config: PipelineConfig) -> Self {
        Self { request, config }
    }
}

/// Side-effect results for a processed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    /// Published content type, `None` for irrelevant events
    pub content_kind: Option<ContentKind>,
    pub rebuild: StepOutcome,
    pub purge: PurgeReport,
}

impl InvocationReport {
    fn ignored() -> Self {
        Self {
            content_kind: None,
            rebuild: StepOutcome::Skipped,
            purge: PurgeReport::skipped(),
        }
    }

    /// True when at least one attempted side effect failed.
    pub fn has_failures(&self) -> bool {
        self.rebuild.is_failed() || self.purge.outcome.is_failed()
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Request was not for this handler
    PassThrough,
    /// Body could not be parsed
    Rejected { response: WebhookResponse },
    /// Notification accepted
    Processed {
        response: WebhookResponse,
        report: InvocationReport,
    },
}

impl HandlerOutcome {
    /// Response to send, or `None` when the request passes through.
    pub fn response(&self) -> Option<&WebhookResponse> {
        match self {
            HandlerOutcome::PassThrough => None,
            HandlerOutcome::Rejected { response } => Some(response),
            HandlerOutcome::Processed { response, .. } => Some(response),
        }
    }

    pub fn report(&self) -> Option<&InvocationReport> {
        match self {
            HandlerOutcome::Processed { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// The webhook handler.
///
/// Holds only read-only collaborators, so one instance can serve concurrent
/// invocations.
#[derive(Clone)]
pub struct WebhookPipeline {
    settings: Arc<Config>,
    dispatcher: Arc<dyn Dispatcher>,
    sink: Arc<dyn EventSink>,
}

impl WebhookPipeline {
    pub fn new(
        settings: Arc<Config>,
        dispatcher: Arc<dyn Dispatcher>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            settings,
            dispatcher,
            sink,
        }
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    /// Handle one inbound request.
    pub async fn handle(&self, context: InvocationContext) -> HandlerOutcome {
        let timestamp = format_timestamp(Utc::now());

        let event = match receive(&context.request, &self.settings.routes.webhook_route) {
            Receipt::PassThrough => {
                self.sink.emit(PipelineEvent::PassedThrough {
                    method: context.request.method.clone(),
                    path: context.request.path.clone(),
                });
                return HandlerOutcome::PassThrough;
            }
            Receipt::Rejected(err) => {
                self.sink.emit(PipelineEvent::ParseFailed {
                    message: err.to_string(),
                });
                return HandlerOutcome::Rejected {
                    response: reject(&err, &timestamp),
                };
            }
            Receipt::Event(event) => event,
        };

        self.sink.emit(PipelineEvent::Received {
            service: event.service.clone(),
            resource: event.resource.clone(),
            change_kind: event.change_kind,
            id: event.id.clone(),
        });

        let report = self.process(&event, &context.config, &timestamp).await;

        HandlerOutcome::Processed {
            response: acknowledge(&event, &timestamp),
            report,
        }
    }

    async fn process(
        &self,
        event: &NotificationEvent,
        config: &PipelineConfig,
        timestamp: &str,
    ) -> InvocationReport {
        let Some(kind) = classify(event, &self.settings.routes) else {
            self.sink.emit(PipelineEvent::Ignored {
                resource: event.resource.clone(),
            });
            return InvocationReport::ignored();
        };

        let dispatcher = self.dispatcher.as_ref();
        let (rebuild, purge) = tokio::join!(
            trigger_rebuild(dispatcher, config, event, timestamp),
            purge_cache(
                dispatcher,
                config,
                &self.settings.routes,
                &self.settings.cdn,
                event
            ),
        );

        self.sink.emit(match &rebuild {
            StepOutcome::Skipped => PipelineEvent::RebuildSkipped,
            StepOutcome::Delivered { status } => PipelineEvent::RebuildTriggered { status: *status },
            StepOutcome::Failed(err) => PipelineEvent::RebuildFailed {
                reason: err.to_string(),
            },
        });

        self.sink.emit(match &purge.outcome {
            StepOutcome::Skipped => PipelineEvent::PurgeSkipped,
            StepOutcome::Delivered { .. } => PipelineEvent::PurgeCompleted {
                urls: purge.urls.clone(),
            },
            StepOutcome::Failed(err) => PipelineEvent::PurgeFailed {
                urls: purge.urls.clone(),
                reason: err.to_string(),
            },
        });

        InvocationReport {
            content_kind: Some(kind),
            rebuild,
            purge,
        }
    }
}
