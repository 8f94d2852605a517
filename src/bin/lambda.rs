//! AWS Lambda entry point for the CMS webhook handler
//!
//! Deploy with `cargo lambda build --release --features lambda` behind a
//! function URL.
//!
//! ## Environment Variables
//!
//! - `BUILD_HOOK_URL`: build hook called on relevant changes
//! - `CLOUDFLARE_ZONE_ID` / `CLOUDFLARE_API_TOKEN`: cache purge credentials
//! - `SITE_DOMAIN`: public hostname used for purge URLs
//! - `WEBHOOK_CONFIG_PATH`: optional TOML settings file
//! - `WEBHOOK_ROUTE`, `HTTP_TIMEOUT_SECS`, `CDN_API_BASE`: setting overrides
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use std::sync::Arc;

use cms_webhook::config::load_lambda_settings;
use cms_webhook::lambda::{FunctionUrlRequest, handler};
use cms_webhook::observe::TracingSink;
use cms_webhook::pipeline::WebhookPipeline;
use cms_webhook::services::HttpDispatcher;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("CMS webhook handler starting...");

    let settings = load_lambda_settings()?;
    let dispatcher = HttpDispatcher::from_config(&settings.http)?;
    let pipeline = WebhookPipeline::new(
        Arc::new(settings),
        Arc::new(dispatcher),
        Arc::new(TracingSink),
    );
    let pipeline = &pipeline;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<FunctionUrlRequest>| async move { handler(pipeline, event).await },
    ))
    .await
}
