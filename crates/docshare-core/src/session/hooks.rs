//! Application-side collaborators the session policy drives.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Tells the rest of the application that the user is logged out.
#[async_trait]
pub trait LogoutNotifier: Send + Sync {
    async fn notify(&self) -> Result<(), HookError>;
}

/// Replaces the current screen with the given route.
pub trait Navigator: Send + Sync {
    fn replace_current_screen(&self, route: &str) -> Result<(), HookError>;
}

/// Shows a modal notice to the user.
pub trait AlertPresenter: Send + Sync {
    fn show(&self, title: &str, message: &str);
}

#[derive(Clone)]
pub struct SessionHooks {
    pub notifier: Arc<dyn LogoutNotifier>,
    pub navigator: Arc<dyn Navigator>,
    pub alerts: Arc<dyn AlertPresenter>,
}

impl SessionHooks {
    pub fn new(
        notifier: Arc<dyn LogoutNotifier>,
        navigator: Arc<dyn Navigator>,
        alerts: Arc<dyn AlertPresenter>,
    ) -> Self {
        Self {
            notifier,
            navigator,
            alerts,
        }
    }
}
