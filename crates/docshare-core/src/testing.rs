//! In-memory collaborators for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::{ApiError, ApiResponse, RequestDescriptor, Transport};
use crate::auth::{CredentialError, CredentialStore};
use crate::session::{AlertPresenter, HookError, LogoutNotifier, Navigator, SessionHooks};

#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
    pub fail_reads: AtomicBool,
    pub fail_removes: AtomicBool,
    pub removals: AtomicUsize,
}

impl MemoryCredentialStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.lock().unwrap() = Some(token.to_string());
        store
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<String>, CredentialError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CredentialError::Unavailable("storage offline".to_string()));
        }
        Ok(self.token())
    }

    async fn store(&self, token: &str) -> Result<(), CredentialError> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialError> {
        self.removals.fetch_add(1, Ordering::SeqCst);
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(CredentialError::Unavailable("storage offline".to_string()));
        }
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl LogoutNotifier for RecordingNotifier {
    async fn notify(&self) -> Result<(), HookError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent requests interleave here
        tokio::task::yield_now().await;
        if self.fail.load(Ordering::SeqCst) {
            return Err(HookError::new("auth context gone"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace_current_screen(&self, route: &str) -> Result<(), HookError> {
        self.routes.lock().unwrap().push(route.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(HookError::new("screen unmounted"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub shown: Mutex<Vec<(String, String)>>,
}

impl RecordingAlerts {
    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().unwrap().clone()
    }
}

impl AlertPresenter for RecordingAlerts {
    fn show(&self, title: &str, message: &str) {
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

/// Replies from a queue; once the queue is empty, repeats `fallback`.
pub struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    pub requests: Mutex<Vec<RequestDescriptor>>,
}

#[derive(Clone)]
pub enum Reply {
    Status(u16, &'static str),
    NetworkError,
}

impl FakeTransport {
    pub fn always(reply: Reply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RequestDescriptor {
        self.requests().pop().expect("no request dispatched")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn dispatch(&self, request: RequestDescriptor) -> Result<ApiResponse, ApiError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        tokio::task::yield_now().await;
        match reply {
            Reply::Status(code, body) => Ok(ApiResponse {
                status: StatusCode::from_u16(code).unwrap(),
                url: path,
                body: body.as_bytes().to_vec(),
            }),
            Reply::NetworkError => Err(ApiError::network(
                &path,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        }
    }
}

pub struct Harness {
    pub store: Arc<MemoryCredentialStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub alerts: Arc<RecordingAlerts>,
}

impl Harness {
    pub fn new(store: MemoryCredentialStore) -> Self {
        Self {
            store: Arc::new(store),
            notifier: Arc::new(RecordingNotifier::default()),
            navigator: Arc::new(RecordingNavigator::default()),
            alerts: Arc::new(RecordingAlerts::default()),
        }
    }

    pub fn logged_in(token: &str) -> Self {
        Self::new(MemoryCredentialStore::with_token(token))
    }

    pub fn logged_out() -> Self {
        Self::new(MemoryCredentialStore::default())
    }

    pub fn hooks(&self) -> SessionHooks {
        SessionHooks::new(
            self.notifier.clone(),
            self.navigator.clone(),
            self.alerts.clone(),
        )
    }

    pub fn notifications(&self) -> usize {
        self.notifier.calls.load(Ordering::SeqCst)
    }

    pub fn removals(&self) -> usize {
        self.store.removals.load(Ordering::SeqCst)
    }
}
