//! CMS webhook CLI
//!
//! Local entry point for replaying notifications, previewing purge sets and
//! browsing the content store. For AWS Lambda, use `cms-webhook-lambda`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use cms_webhook::{
    config::load_settings,
    error::{AppError, Result},
    models::{ContentConfig, InboundRequest, PipelineConfig},
    observe::TracingSink,
    pipeline::{HandlerOutcome, InvocationContext, PurgeSet, WebhookPipeline, classify},
    services::{ContentClient, HttpDispatcher},
    utils::http,
};
use tokio::io::AsyncReadExt;

/// CMS webhook - rebuild and cache purge trigger
#[derive(Parser, Debug)]
#[command(
    name = "cms-webhook",
    version,
    about = "Content change webhook: rebuild trigger and CDN cache purge"
)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "webhook.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a notification through the live pipeline
    Handle {
        /// JSON body file, `-` for stdin
        #[arg(default_value = "-")]
        body: PathBuf,

        /// Request path
        #[arg(long, default_value = "/api/webhook")]
        path: String,

        /// Request method
        #[arg(long, default_value = "POST")]
        method: String,
    },

    /// Print the URLs that would be purged for a change
    PurgeSet {
        /// Content type (API name)
        #[arg(long)]
        api: String,

        /// Content item id
        #[arg(long)]
        id: Option<String>,
    },

    /// Validate the settings file and environment
    Validate,

    /// Show which steps are enabled in this environment
    Info,

    /// List articles, newest first
    Articles {
        #[arg(long, default_value_t = 10)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show a single article
    Article { id: String },

    /// List categories
    Categories,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn read_body(source: &Path) -> Result<String> {
    if source == Path::new("-") {
        let mut body = String::new();
        tokio::io::stdin().read_to_string(&mut body).await?;
        Ok(body)
    } else {
        Ok(tokio::fs::read_to_string(source).await?)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(Some(&cli.config))?;
    let env = PipelineConfig::from_env();

    match cli.command {
        Command::Handle { body, path, method } => {
            let body = read_body(&body).await?;
            let dispatcher = HttpDispatcher::from_config(&settings.http)?;
            let pipeline = WebhookPipeline::new(
                Arc::new(settings),
                Arc::new(dispatcher),
                Arc::new(TracingSink),
            );

            let request = InboundRequest::new(method, path, body);
            let outcome = pipeline.handle(InvocationContext::new(request, env)).await;

            match &outcome {
                HandlerOutcome::PassThrough => {
                    log::warn!("Request does not target the webhook route; nothing to do.");
                }
                HandlerOutcome::Rejected { response } | HandlerOutcome::Processed { response, .. } => {
                    log::info!("HTTP {}", response.status);
                    println!("{}", response.body_json());
                }
            }

            if let Some(report) = outcome.report() {
                log::info!("Rebuild: {:?}", report.rebuild);
                log::info!("Purge: {:?} {:?}", report.purge.outcome, report.purge.urls);
                if report.has_failures() {
                    log::warn!("Notification acknowledged, but a side effect failed.");
                }
            }
        }

        Command::PurgeSet { api, id } => {
            if classify::content_kind(&api, &settings.routes).is_none() {
                log::info!("'{}' does not map to a published page; nothing would be purged.", api);
                return Ok(());
            }

            let set = PurgeSet::compute(&api, id.as_deref(), &settings.routes);
            let domain = env.site_domain_or(&settings.cdn.default_site_domain);
            for url in set.absolute_urls(domain) {
                println!("{url}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            // load_settings already validated the file
            log::info!("✓ Settings OK ({})", cli.config.display());

            if let Err(e) = env.validate() {
                log::error!("Environment validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Environment OK");

            log::info!("All validations passed!");
        }

        Command::Info => {
            let caps = env.capabilities();
            log::info!("Webhook route: {}", settings.routes.webhook_route);
            log::info!(
                "Rebuild trigger: {}",
                if caps.rebuild { "enabled" } else { "disabled (BUILD_HOOK_URL unset)" }
            );
            log::info!(
                "Cache purge: {}",
                if caps.purge {
                    "enabled"
                } else {
                    "disabled (CLOUDFLARE_ZONE_ID / CLOUDFLARE_API_TOKEN unset)"
                }
            );
            log::info!(
                "Site domain: {}",
                env.site_domain_or(&settings.cdn.default_site_domain)
            );
        }

        Command::Articles { limit, offset } => {
            let page = content_client(&settings)?.list_articles(limit, offset).await?;
            log::info!(
                "{} of {} articles (offset {})",
                page.items.len(),
                page.total_count,
                page.offset
            );
            print_json(&page)?;
        }

        Command::Article { id } => {
            let article = content_client(&settings)?.get_article(&id).await?;
            print_json(&article)?;
        }

        Command::Categories => {
            let categories = content_client(&settings)?.list_categories().await?;
            print_json(&categories)?;
        }
    }

    Ok(())
}

fn content_client(settings: &cms_webhook::models::Config) -> Result<ContentClient> {
    let credentials = ContentConfig::from_env().map_err(|e| {
        AppError::config(format!("Content API credentials missing: {e}"))
    })?;
    let client = http::create_async_client(&settings.http)?;
    Ok(ContentClient::new(client, &settings.content, &credentials))
}
