use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use super::ApiError;

/// An outgoing request before it reaches the transport.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the API base URL, or an absolute URL.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response as the transport received it, whatever its status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let bytes: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
        serde_json::from_slice(bytes).map_err(|source| ApiError::Decode {
            url: self.url.clone(),
            source,
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ack {
        ok: bool,
    }

    fn response(body: &str) -> ApiResponse {
        ApiResponse {
            status: StatusCode::OK,
            url: "/api/documents/7".to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_descriptor_with_body() {
        let request = RequestDescriptor::new(Method::POST, "/api/documents/7/ratings")
            .with_body(serde_json::json!({"stars": 5}));
        assert_eq!(request.method, Method::POST);
        assert!(request.headers.is_empty());
        assert_eq!(request.body.unwrap()["stars"], 5);
    }

    #[test]
    fn test_json_decodes_body() {
        let ack: Ack = response(r#"{"ok":true}"#).json().expect("decode");
        assert_eq!(ack, Ack { ok: true });
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        response("").json::<()>().expect("decode unit");
        let maybe: Option<Ack> = response("").json().expect("decode option");
        assert!(maybe.is_none());
    }

    #[test]
    fn test_decode_error_keeps_url() {
        let err = response("not json").json::<Ack>().unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert_eq!(err.url(), Some("/api/documents/7"));
    }
}
