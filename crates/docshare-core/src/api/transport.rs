use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::{ApiError, ApiResponse, RequestDescriptor};
use crate::config::ClientConfig;

/// Sends a prepared request. Non-2xx responses are returned as `Ok`;
/// only a missing response is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(&self, request: RequestDescriptor) -> Result<ApiResponse, ApiError>;
}

/// Transport backed by reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.api_base_url.trim_end_matches('/');
        reqwest::Url::parse(base_url).map_err(|e| {
            ApiError::Config(format!("Invalid API base URL {:?}: {}", config.api_base_url, e))
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(&self, request: RequestDescriptor) -> Result<ApiResponse, ApiError> {
        let url = self.resolve(&request.path);
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(&request.path, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(&request.path, e))?;
        debug!(status = status.as_u16(), url = %url, "Received response");

        Ok(ApiResponse {
            status,
            url: request.path,
            body: body.to_vec(),
        })
    }
}
