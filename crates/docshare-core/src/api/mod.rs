//! REST API client module for the docshare backend.
//!
//! This module provides the `ApiClient` that every screen goes through.
//! It attaches the stored bearer token to outgoing requests and hands
//! failed responses to the `SessionPolicy` before returning them.

pub mod auth;
pub mod client;
pub mod documents;
pub mod error;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::{ApiResponse, RequestDescriptor};
pub use transport::{ReqwestTransport, Transport};
