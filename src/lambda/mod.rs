// src/lambda/mod.rs

//! AWS Lambda handler for function URL invocations.
//!
//! This module:
//! 1. Maps the function URL payload to an `InboundRequest`
//! 2. Reads `PipelineConfig` from the environment for this invocation
//! 3. Runs the webhook pipeline
//! 4. Maps the outcome back to a function URL response

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::models::{InboundRequest, PipelineConfig, WebhookResponse};
use crate::pipeline::respond::{format_timestamp, reject};
use crate::pipeline::{HandlerOutcome, InvocationContext, WebhookPipeline};

/// Function URL request payload (format 2.0), reduced to what we read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUrlRequest {
    #[serde(default)]
    pub raw_path: String,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub is_base64_encoded: bool,

    #[serde(default)]
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: HttpContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: String,
}

/// Function URL response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUrlResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl FunctionUrlResponse {
    fn json(response: &WebhookResponse) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            WebhookResponse::CONTENT_TYPE.to_string(),
        );
        Self {
            status_code: response.status,
            headers,
            body: response.body_json(),
        }
    }

    /// There is no downstream route behind the function URL.
    fn not_handled() -> Self {
        Self {
            status_code: 404,
            headers: HashMap::new(),
            body: String::new(),
        }
    }
}

impl FunctionUrlRequest {
    /// Convert to the platform-neutral request, decoding base64 bodies.
    pub fn into_inbound(self) -> Result<InboundRequest, AppError> {
        let raw = self.body.unwrap_or_default();
        let body = if self.is_base64_encoded {
            let bytes = STANDARD
                .decode(raw.as_bytes())
                .map_err(|e| AppError::parse(format!("invalid base64 body: {e}")))?;
            String::from_utf8(bytes)
                .map_err(|e| AppError::parse(format!("body is not valid UTF-8: {e}")))?
        } else {
            raw
        };

        Ok(InboundRequest::new(
            self.request_context.http.method,
            self.raw_path,
            body,
        ))
    }
}

/// Map a pipeline outcome to the function URL response.
pub fn to_response(outcome: &HandlerOutcome) -> FunctionUrlResponse {
    match outcome.response() {
        Some(response) => FunctionUrlResponse::json(response),
        None => FunctionUrlResponse::not_handled(),
    }
}

/// Main Lambda handler function.
#[instrument(skip(pipeline, event))]
pub async fn handler(
    pipeline: &WebhookPipeline,
    event: LambdaEvent<FunctionUrlRequest>,
) -> std::result::Result<FunctionUrlResponse, LambdaError> {
    let (request, _context) = event.into_parts();
    Ok(handle_request(pipeline, request, PipelineConfig::from_env()).await)
}

/// Handle one function URL request with an explicit configuration.
pub async fn handle_request(
    pipeline: &WebhookPipeline,
    request: FunctionUrlRequest,
    config: PipelineConfig,
) -> FunctionUrlResponse {
    let method = request.request_context.http.method.clone();
    let path = request.raw_path.clone();

    match request.into_inbound() {
        Ok(inbound) => {
            let outcome = pipeline
                .handle(InvocationContext::new(inbound, config))
                .await;
            to_response(&outcome)
        }
        Err(err) => {
            let inbound = InboundRequest::new(method, path, "");
            let route = &pipeline.settings().routes.webhook_route;
            if inbound.is_post() && crate::utils::path_matches_route(&inbound.path, route) {
                tracing::error!("Webhook processing error: {}", err);
                FunctionUrlResponse::json(&reject(&err, &format_timestamp(chrono::Utc::now())))
            } else {
                FunctionUrlResponse::not_handled()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Config;
    use crate::observe::MemorySink;
    use crate::services::HttpDispatcher;

    fn pipeline() -> WebhookPipeline {
        let settings = Config::default();
        let dispatcher = HttpDispatcher::from_config(&settings.http).unwrap();
        WebhookPipeline::new(
            Arc::new(settings),
            Arc::new(dispatcher),
            Arc::new(MemorySink::new()),
        )
    }

    fn request(path: &str, body: &str, base64: bool) -> FunctionUrlRequest {
        let json = serde_json::json!({
            "rawPath": path,
            "body": body,
            "isBase64Encoded": base64,
            "requestContext": { "http": { "method": "POST" } }
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_request_payload_parses() {
        let req = request("/api/webhook", "{}", false);
        let inbound = req.into_inbound().unwrap();
        assert_eq!(inbound.method, "POST");
        assert_eq!(inbound.path, "/api/webhook");
        assert_eq!(inbound.body, "{}");
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let encoded = STANDARD.encode(r#"{"service":"cms"}"#);
        let inbound = request("/api/webhook", &encoded, true).into_inbound().unwrap();
        assert_eq!(inbound.body, r#"{"service":"cms"}"#);
    }

    #[tokio::test]
    async fn test_unrelated_path_is_not_handled() {
        let response =
            handle_request(&pipeline(), request("/", "", false), PipelineConfig::default()).await;
        assert_eq!(response.status_code, 404);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base64_on_route_is_500() {
        let response = handle_request(
            &pipeline(),
            request("/api/webhook", "%%%", true),
            PipelineConfig::default(),
        )
        .await;
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_irrelevant_event_returns_json_ack() {
        let response = handle_request(
            &pipeline(),
            request(
                "/api/webhook",
                r#"{"service":"cms","api":"news","type":"edit"}"#,
                false,
            ),
            PipelineConfig::default(),
        )
        .await;
        assert_eq!(response.status_code, 200);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["api"], "news");
    }
}
