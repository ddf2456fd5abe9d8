//! API client for the docshare REST API.
//!
//! Every call runs `prepare_request -> Transport::dispatch -> status check`.
//! Failures are handed to the `SessionPolicy` before being returned, so
//! session expiry and server outages are handled in one place.

use std::sync::Arc;

use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::{is_exempt_endpoint, CredentialStore};
use crate::config::ClientConfig;
use crate::session::{SessionHooks, SessionLatches, SessionPolicy};

use super::{ApiError, ApiResponse, RequestDescriptor, ReqwestTransport, Transport};

/// API client for the docshare backend.
/// Clone is cheap and clones share the session latches.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    policy: Arc<SessionPolicy>,
}

impl ApiClient {
    /// Create a client that talks to the configured backend over reqwest.
    ///
    /// The client owns its session latches and every clone shares them.
    /// Build one client per process, or use `with_latches` to share latches
    /// between separately built clients.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        hooks: SessionHooks,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), credentials, hooks))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        hooks: SessionHooks,
    ) -> Self {
        Self::with_latches(
            transport,
            credentials,
            hooks,
            Arc::new(SessionLatches::new()),
        )
    }

    /// Build a client whose session latches are shared with other clients.
    pub fn with_latches(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        hooks: SessionHooks,
        latches: Arc<SessionLatches>,
    ) -> Self {
        let policy = SessionPolicy::new(Arc::clone(&credentials), hooks, latches);
        Self {
            transport,
            credentials,
            policy: Arc::new(policy),
        }
    }

    pub(crate) fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub(crate) fn hooks(&self) -> &SessionHooks {
        self.policy.hooks()
    }

    pub fn latches(&self) -> &SessionLatches {
        self.policy.latches()
    }

    /// Re-arm session-expiry handling. Call after a successful login.
    pub fn reset_session_expiry_flag(&self) {
        self.latches().reset_session_expiry();
    }

    /// Re-arm server-error handling. Call after a successful login.
    pub fn reset_server_error_flag(&self) {
        self.latches().reset_server_error();
    }

    /// Attach the bearer token unless the target is an auth endpoint.
    pub async fn prepare_request(
        &self,
        mut request: RequestDescriptor,
    ) -> Result<RequestDescriptor, ApiError> {
        let token = self.credentials.get().await?;
        if let Some(token) = token {
            if !is_exempt_endpoint(&request.path) {
                let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))?;
                value.set_sensitive(true);
                request.headers.insert(header::AUTHORIZATION, value);
            }
        }
        Ok(request)
    }

    /// Send a request and return the raw response if its status is 2xx.
    pub async fn send(&self, request: RequestDescriptor) -> Result<ApiResponse, ApiError> {
        let request = self.prepare_request(request).await?;
        let path = request.path.clone();

        let outcome = match self.transport.dispatch(request).await {
            Ok(response) => Self::check_response(response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => Ok(response),
            Err(e) => {
                debug!(path = %path, error = %e, "Request failed");
                Err(self.policy.handle_response_error(e).await)
            }
        }
    }

    /// Turn a non-2xx response into an error carrying status and body.
    fn check_response(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.status.is_success() {
            Ok(response)
        } else {
            debug!(
                status = response.status.as_u16(),
                body = %ApiError::truncate_body(&response.text()),
                "Error response"
            );
            Err(ApiError::from_status(response.status, &response.url, &response.body))
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut request = RequestDescriptor::new(method, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.send(request).await?.json()
    }

    fn to_body<B: Serialize>(path: &str, body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|e| {
            ApiError::InvalidRequest(format!("Failed to serialize body for {}: {}", path, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::to_body(path, body)?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::to_body(path, body)?;
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::to_body(path, body)?;
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }
}
