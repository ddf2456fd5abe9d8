use async_trait::async_trait;
use keyring::Entry;
use thiserror::Error;

const SERVICE_NAME: &str = "docshare";

/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "access_token";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent storage for the session's bearer token.
///
/// The HTTP client only reads and removes the token; `store` is used by the
/// login flow.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current token, or `None` when no session exists.
    async fn get(&self) -> Result<Option<String>, CredentialError>;

    async fn store(&self, token: &str) -> Result<(), CredentialError>;

    /// Remove the token. Removing an absent token succeeds.
    async fn remove(&self) -> Result<(), CredentialError>;
}

/// Token storage in the OS keychain (Keychain, Credential Manager or
/// Secret Service). Keychain calls block, so they run on tokio's blocking pool.
pub struct KeyringCredentialStore {
    service: String,
    key: String,
}

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self::with_names(SERVICE_NAME, TOKEN_KEY)
    }

    pub fn with_names(service: &str, key: &str) -> Self {
        Self {
            service: service.to_string(),
            key: key.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn with_entry<T, F>(&self, op: F) -> Result<T, CredentialError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, CredentialError> + Send + 'static,
    {
        let service = self.service.clone();
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || op(Entry::new(&service, &key)?))
            .await
            .map_err(|e| CredentialError::Unavailable(format!("Keychain task failed: {}", e)))?
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A missing entry means no session.
fn read_token(result: keyring::Result<String>) -> Result<Option<String>, CredentialError> {
    match result {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Deleting an entry that is already gone succeeds.
fn removed(result: keyring::Result<()>) -> Result<(), CredentialError> {
    match result {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn get(&self) -> Result<Option<String>, CredentialError> {
        self.with_entry(|entry| read_token(entry.get_password()))
            .await
    }

    async fn store(&self, token: &str) -> Result<(), CredentialError> {
        let token = token.to_string();
        self.with_entry(move |entry| Ok(entry.set_password(&token)?))
            .await
    }

    async fn remove(&self) -> Result<(), CredentialError> {
        self.with_entry(|entry| removed(entry.delete_credential()))
            .await
    }
}
