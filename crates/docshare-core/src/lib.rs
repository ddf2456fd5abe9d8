//! Core library for docshare.
//!
//! Provides the authenticated API client used by every front end, the
//! session-failure policy behind it, credential storage, configuration,
//! and the API data models.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, Config};
