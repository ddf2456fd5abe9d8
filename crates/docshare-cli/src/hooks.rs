//! Terminal implementations of the session hooks.

use async_trait::async_trait;
use docshare_core::session::{
    AlertPresenter, HookError, LogoutNotifier, Navigator, LOGIN_ROUTE, SERVER_ERROR_ROUTE,
};
use tracing::info;

pub struct ConsoleNotifier;

#[async_trait]
impl LogoutNotifier for ConsoleNotifier {
    async fn notify(&self) -> Result<(), HookError> {
        info!("User logged out");
        Ok(())
    }
}

/// There are no screens in a terminal; each route becomes a hint.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn replace_current_screen(&self, route: &str) -> Result<(), HookError> {
        match route {
            LOGIN_ROUTE => eprintln!("Run `docshare login` to sign in again."),
            SERVER_ERROR_ROUTE => {
                eprintln!("The server is unavailable right now. Please try again later.")
            }
            other => return Err(HookError::new(format!("Unknown route: {}", other))),
        }
        Ok(())
    }
}

pub struct ConsoleAlerts;

impl AlertPresenter for ConsoleAlerts {
    fn show(&self, title: &str, message: &str) {
        eprintln!("{}\n{}", title, message);
    }
}
