//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Static settings that rarely change between deployments. Credentials and
/// per-deployment endpoints live in [`PipelineConfig`] and are read from the
/// environment instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Inbound route and content-type to page mapping
    #[serde(default)]
    pub routes: RouteConfig,

    /// Delivery network API settings
    #[serde(default)]
    pub cdn: CdnConfig,

    /// Content API settings
    #[serde(default)]
    pub content: ContentApiConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override settings from environment variables, if present.
    ///
    /// - `WEBHOOK_ROUTE`: inbound route segment
    /// - `HTTP_TIMEOUT_SECS`: outbound request timeout
    /// - `CDN_API_BASE`: delivery network API base URL
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Same as [`Config::apply_env_overrides`] with an explicit lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(route) = lookup("WEBHOOK_ROUTE").filter(|v| !v.trim().is_empty()) {
            self.routes.webhook_route = route;
        }

        if let Some(timeout) = lookup("HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.trim().parse() {
                self.http.timeout_secs = secs;
            }
        }

        if let Some(base) = lookup("CDN_API_BASE").filter(|v| !v.trim().is_empty()) {
            self.cdn.api_base = base;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if !self.routes.webhook_route.starts_with('/') {
            return Err(AppError::validation(
                "routes.webhook_route must start with '/'",
            ));
        }
        if self.routes.article_resource.is_empty() || self.routes.category_resource.is_empty() {
            return Err(AppError::validation("routes resource names must not be empty"));
        }
        if !self.routes.listing_path.starts_with('/') || self.routes.listing_path == "/" {
            return Err(AppError::validation(
                "routes.listing_path must be a non-root path starting with '/'",
            ));
        }
        Url::parse(&self.cdn.api_base)
            .map_err(|e| AppError::validation(format!("cdn.api_base: {e}")))?;
        if self.cdn.default_site_domain.trim().is_empty() {
            return Err(AppError::validation("cdn.default_site_domain is empty"));
        }
        if !self.content.api_base_template.contains("{service}") {
            return Err(AppError::validation(
                "content.api_base_template must contain {service}",
            ));
        }
        Ok(())
    }
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for outbound requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Inbound route and the content types that map to published pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Path segment that identifies a notification request
    #[serde(default = "defaults::webhook_route")]
    pub webhook_route: String,

    /// Content type whose items each have a detail page
    #[serde(default = "defaults::article_resource")]
    pub article_resource: String,

    /// Content type rendered on listing pages only
    #[serde(default = "defaults::category_resource")]
    pub category_resource: String,

    /// Path of the article listing page
    #[serde(default = "defaults::listing_path")]
    pub listing_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            webhook_route: defaults::webhook_route(),
            article_resource: defaults::article_resource(),
            category_resource: defaults::category_resource(),
            listing_path: defaults::listing_path(),
        }
    }
}

/// Delivery network API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Base URL of the zone API
    #[serde(default = "defaults::cdn_api_base")]
    pub api_base: String,

    /// Hostname used when `SITE_DOMAIN` is not set
    #[serde(default = "defaults::site_domain")]
    pub default_site_domain: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::cdn_api_base(),
            default_site_domain: defaults::site_domain(),
        }
    }
}

/// Content API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentApiConfig {
    /// API base URL; `{service}` is replaced by the service domain
    #[serde(default = "defaults::content_api_base")]
    pub api_base_template: String,

    /// Page size used when listing categories
    #[serde(default = "defaults::category_page_size")]
    pub category_page_size: u32,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            api_base_template: defaults::content_api_base(),
            category_page_size: defaults::category_page_size(),
        }
    }
}

/// Per-invocation settings read from the execution environment.
///
/// Every field is optional; a missing value disables the step that needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Build hook to call on relevant changes (`BUILD_HOOK_URL`)
    pub rebuild_endpoint: Option<String>,

    /// Zone whose cache is purged (`CLOUDFLARE_ZONE_ID`)
    pub cdn_zone_id: Option<String>,

    /// Bearer token for the purge API (`CLOUDFLARE_API_TOKEN`)
    pub cdn_api_token: Option<String>,

    /// Public hostname of the site (`SITE_DOMAIN`)
    pub site_domain: Option<String>,
}

/// Credentials for the purge API, present only when both halves are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeCredentials<'a> {
    pub zone_id: &'a str,
    pub api_token: &'a str,
}

/// Which optional steps an invocation will perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub rebuild: bool,
    pub purge: bool,
}

impl PipelineConfig {
    pub const REBUILD_ENDPOINT_VAR: &'static str = "BUILD_HOOK_URL";
    pub const ZONE_ID_VAR: &'static str = "CLOUDFLARE_ZONE_ID";
    pub const API_TOKEN_VAR: &'static str = "CLOUDFLARE_API_TOKEN";
    pub const SITE_DOMAIN_VAR: &'static str = "SITE_DOMAIN";

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            rebuild_endpoint: read(Self::REBUILD_ENDPOINT_VAR),
            cdn_zone_id: read(Self::ZONE_ID_VAR),
            cdn_api_token: read(Self::API_TOKEN_VAR),
            site_domain: read(Self::SITE_DOMAIN_VAR),
        }
    }

    /// Purge credentials, if both zone and token are configured.
    pub fn purge_credentials(&self) -> Option<PurgeCredentials<'_>> {
        match (self.cdn_zone_id.as_deref(), self.cdn_api_token.as_deref()) {
            (Some(zone_id), Some(api_token)) => Some(PurgeCredentials { zone_id, api_token }),
            _ => None,
        }
    }

    /// Site hostname, falling back to `default` when unset.
    pub fn site_domain_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.site_domain.as_deref().unwrap_or(default)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            rebuild: self.rebuild_endpoint.is_some(),
            purge: self.purge_credentials().is_some(),
        }
    }

    /// Report configuration problems.
    ///
    /// Used by tooling only; invocations never fail on configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.rebuild_endpoint {
            let url = Url::parse(endpoint)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(AppError::config(format!(
                    "{} must be an http(s) URL, got scheme '{}'",
                    Self::REBUILD_ENDPOINT_VAR,
                    url.scheme()
                )));
            }
        }

        match (&self.cdn_zone_id, &self.cdn_api_token) {
            (Some(_), None) => Err(AppError::config(format!(
                "{} is set but {} is missing",
                Self::ZONE_ID_VAR,
                Self::API_TOKEN_VAR
            ))),
            (None, Some(_)) => Err(AppError::config(format!(
                "{} is set but {} is missing",
                Self::API_TOKEN_VAR,
                Self::ZONE_ID_VAR
            ))),
            _ => Ok(()),
        }
    }
}

/// Credentials for the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Service subdomain (`MICROCMS_SERVICE_DOMAIN`)
    pub service_domain: String,

    /// Read-only API key (`MICROCMS_API_KEY`)
    pub api_key: String,
}

impl ContentConfig {
    pub const SERVICE_DOMAIN_VAR: &'static str = "MICROCMS_SERVICE_DOMAIN";
    pub const API_KEY_VAR: &'static str = "MICROCMS_API_KEY";

    /// Read content API credentials from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::config(format!("{key} is not set")))
        };

        Ok(Self {
            service_domain: require(Self::SERVICE_DOMAIN_VAR)?,
            api_key: require(Self::API_KEY_VAR)?,
        })
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        concat!("cms-webhook/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Route defaults
    pub fn webhook_route() -> String {
        "/api/webhook".into()
    }
    pub fn article_resource() -> String {
        "blog".into()
    }
    pub fn category_resource() -> String {
        "category".into()
    }
    pub fn listing_path() -> String {
        "/blog".into()
    }

    // CDN defaults
    pub fn cdn_api_base() -> String {
        "https://api.cloudflare.com/client/v4".into()
    }
    pub fn site_domain() -> String {
        "novelty.pages.dev".into()
    }

    // Content defaults
    pub fn content_api_base() -> String {
        "https://{service}.microcms.io/api/v1".into()
    }
    pub fn category_page_size() -> u32 {
        100
    }
}
