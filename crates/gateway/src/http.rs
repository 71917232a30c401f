//! `reqwest`-backed gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use switchboard_config::ApiConfig;
use switchboard_groups::{GatewayError, GatewayResult, RequestGateway};
use tracing::debug;

use crate::error::{network_error, service_error};

/// Performs remote calls against the Switchboard API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(network_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<Value> {
        let request = match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(GatewayError::from)
    }
}

#[async_trait]
impl RequestGateway for HttpGateway {
    async fn get(&self, path: &str) -> GatewayResult<Value> {
        debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: Value) -> GatewayResult<Value> {
        debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(&body)).await
    }

    async fn put(&self, path: &str, body: Value) -> GatewayResult<Value> {
        debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(&body)).await
    }

    async fn delete(&self, path: &str) -> GatewayResult<Value> {
        debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path))).await
    }
}
