// src/pipeline/purge.rs

//! Cache invalidator.
//!
//! Computes the URLs a change affects and asks the delivery network to
//! drop them from its cache.

use serde_json::json;

use crate::models::{CdnConfig, NotificationEvent, PipelineConfig, RouteConfig};
use crate::services::{Dispatcher, OutboundRequest};
use crate::utils::{absolute_url, join_path};

use super::StepOutcome;
use super::classify::{ContentKind, content_kind};

/// Ordered, duplicate-free set of site-relative paths to invalidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeSet {
    paths: Vec<String>,
}

impl PurgeSet {
    /// Compute the purge set for a change to `resource`/`id`.
    ///
    /// Always the site root and the listing page; the article detail page
    /// is added only for articles with a non-empty id.
    pub fn compute(resource: &str, id: Option<&str>, routes: &RouteConfig) -> Self {
        let mut set = Self { paths: Vec::new() };
        set.insert("/".to_string());
        set.insert(routes.listing_path.clone());

        let id = id.filter(|id| !id.is_empty());
        if let (Some(ContentKind::Article), Some(id)) = (content_kind(resource, routes), id) {
            set.insert(join_path(&routes.listing_path, id));
        }
        set
    }

    pub fn for_event(event: &NotificationEvent, routes: &RouteConfig) -> Self {
        Self::compute(&event.resource, event.id.as_deref(), routes)
    }

    fn insert(&mut self, path: String) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Absolute `https://{domain}{path}` URLs, in order.
    pub fn absolute_urls(&self, domain: &str) -> Vec<String> {
        self.paths.iter().map(|p| absolute_url(domain, p)).collect()
    }
}

/// What the invalidator attempted and how it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    /// URLs sent to the purge API; empty when skipped
    pub urls: Vec<String>,
    pub outcome: StepOutcome,
}

impl PurgeReport {
    pub fn skipped() -> Self {
        Self {
            urls: Vec::new(),
            outcome: StepOutcome::Skipped,
        }
    }
}

/// Purge API endpoint for a zone.
pub fn purge_endpoint(api_base: &str, zone_id: &str) -> String {
    format!("{}/zones/{}/purge_cache", api_base.trim_end_matches('/'), zone_id)
}

/// Invalidate the cached pages affected by `event`.
///
/// Skipped unless both zone id and API token are configured. Issues one
/// request carrying every URL.
pub async fn purge_cache(
    dispatcher: &dyn Dispatcher,
    config: &PipelineConfig,
    routes: &RouteConfig,
    cdn: &CdnConfig,
    event: &NotificationEvent,
) -> PurgeReport {
    let Some(credentials) = config.purge_credentials() else {
        return PurgeReport::skipped();
    };

    let domain = config.site_domain_or(&cdn.default_site_domain);
    let urls = PurgeSet::for_event(event, routes).absolute_urls(domain);

    let request = OutboundRequest::new(
        purge_endpoint(&cdn.api_base, credentials.zone_id),
        json!({ "files": urls }),
    )
    .with_bearer(credentials.api_token);

    let outcome = dispatcher.post_json(request).await.into();
    PurgeReport { urls, outcome }
}
