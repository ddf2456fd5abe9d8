use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::CredentialError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status} from {url}")]
    Status {
        status: StatusCode,
        url: String,
        body: Option<serde_json::Value>,
    },

    #[error("Network error on {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Credential storage error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: StatusCode, url: &str, body: &[u8]) -> Self {
        ApiError::Status {
            status,
            url: url.to_string(),
            body: serde_json::from_slice(body).ok(),
        }
    }

    pub fn network<E>(url: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ApiError::Network {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    /// HTTP status of the failed response. `None` when no response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed JSON body of the failed response, if it had one.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Path or URL of the request that failed.
    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Status { url, .. }
            | ApiError::Network { url, .. }
            | ApiError::Decode { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Server-provided error message, for screens that show field-level errors.
    pub fn server_message(&self) -> Option<&str> {
        self.body()?.get("message")?.as_str()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// True for 5xx responses and for requests that got no response at all.
    pub fn is_server_failure(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => status.is_server_error(),
            ApiError::Network { .. } => true,
            _ => false,
        }
    }
}
