use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::auth::{is_exempt_endpoint, CredentialStore};

use super::{SessionHooks, SessionLatches};

/// Route shown after the session expires.
pub const LOGIN_ROUTE: &str = "/(public)/login";

/// Route shown when the server fails while the user is logged in.
pub const SERVER_ERROR_ROUTE: &str = "/(public)/server-error";

pub const SESSION_EXPIRED_TITLE: &str = "Phiên đăng nhập đã hết hạn";
pub const SESSION_EXPIRED_MESSAGE: &str = "Vui lòng đăng nhập lại.";

/// Reacts to failed requests with the global logout / server-error sequence.
///
/// The policy only adds side effects. Every error it is handed comes back
/// unchanged so the caller can still react to it.
pub struct SessionPolicy {
    credentials: Arc<dyn CredentialStore>,
    hooks: SessionHooks,
    latches: Arc<SessionLatches>,
}

impl SessionPolicy {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hooks: SessionHooks,
        latches: Arc<SessionLatches>,
    ) -> Self {
        Self {
            credentials,
            hooks,
            latches,
        }
    }

    pub fn latches(&self) -> &SessionLatches {
        &self.latches
    }

    pub fn hooks(&self) -> &SessionHooks {
        &self.hooks
    }

    pub async fn handle_response_error(&self, error: ApiError) -> ApiError {
        let url = error.url().unwrap_or_default();
        if is_exempt_endpoint(url) {
            debug!(url, status = ?error.status(), "Auth endpoint failed, no session handling");
            return error;
        }

        if error.is_unauthorized() {
            self.on_session_expired(url).await;
        } else if error.is_server_failure() {
            self.on_server_failure(url).await;
        }

        error
    }

    async fn on_session_expired(&self, url: &str) {
        if !self.latches.session_expiry.trigger() {
            debug!(url, "Session already marked expired");
            return;
        }
        info!(url, "Session expired, logging out");

        if let Err(e) = self.credentials.remove().await {
            warn!(error = %e, "Failed to clear stored credential");
        }
        if let Err(e) = self.hooks.notifier.notify().await {
            warn!(error = %e, "Logout notifier failed");
        }
        self.hooks
            .alerts
            .show(SESSION_EXPIRED_TITLE, SESSION_EXPIRED_MESSAGE);
        if let Err(e) = self.hooks.navigator.replace_current_screen(LOGIN_ROUTE) {
            warn!(error = %e, route = LOGIN_ROUTE, "Navigation failed");
        }
    }

    async fn on_server_failure(&self, url: &str) {
        let logged_in = match self.credentials.get().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Could not read credential, treating as logged out");
                false
            }
        };
        if !logged_in {
            debug!(url, "Server failure while logged out");
            return;
        }
        if !self.latches.server_error.trigger() {
            debug!(url, "Server error already reported");
            return;
        }
        info!(url, "Server unavailable, redirecting");

        if let Err(e) = self.hooks.navigator.replace_current_screen(SERVER_ERROR_ROUTE) {
            warn!(error = %e, route = SERVER_ERROR_ROUTE, "Navigation failed");
        }
    }
}
