//! Authentication module for credential storage and endpoint classification.
//!
//! This module provides:
//! - `CredentialStore`: async access to the persisted bearer token
//! - `KeyringCredentialStore`: OS keychain implementation via keyring
//! - `is_exempt_endpoint`: which paths never carry or react to credentials

pub mod credentials;
pub mod endpoints;

pub use credentials::{CredentialError, CredentialStore, KeyringCredentialStore, TOKEN_KEY};
pub use endpoints::{is_exempt_endpoint, EXEMPT_ENDPOINTS};
