//! Session-failure handling shared by every request.
//!
//! When a request fails because the session expired (401) or the server is
//! unreachable (5xx or no response), the `SessionPolicy` runs a one-time
//! logout or redirect sequence through the `SessionHooks`. One-shot latches
//! keep concurrent failures from repeating that sequence until a reset.

pub mod hooks;
pub mod latch;
pub mod policy;

pub use hooks::{AlertPresenter, HookError, LogoutNotifier, Navigator, SessionHooks};
pub use latch::{OneShotLatch, SessionLatches};
pub use policy::{
    SessionPolicy, LOGIN_ROUTE, SERVER_ERROR_ROUTE, SESSION_EXPIRED_MESSAGE, SESSION_EXPIRED_TITLE,
};
