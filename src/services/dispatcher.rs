// src/services/dispatcher.rs

//! Outbound JSON delivery.
//!
//! The pipeline talks to the build hook and the purge API through the
//! [`Dispatcher`] trait so the transport can be swapped in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{DeliveryError, Result};
use crate::models::HttpConfig;
use crate::utils::http::create_async_client;

/// A single outbound `POST` with a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub bearer_token: Option<String>,
    pub body: Value,
}

impl OutboundRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            bearer_token: None,
            body,
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Sends outbound requests.
///
/// Returns the 2xx status on success. Non-2xx answers and transport
/// failures are both reported as [`DeliveryError`].
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn post_json(&self, request: OutboundRequest) -> std::result::Result<u16, DeliveryError>;
}

/// `reqwest`-backed dispatcher.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: Client,
}

impl HttpDispatcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a dispatcher with a client configured from `config`.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn post_json(&self, request: OutboundRequest) -> std::result::Result<u16, DeliveryError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DeliveryError::Status {
                status: status.as_u16(),
            })
        }
    }
}
