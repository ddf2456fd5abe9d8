use std::sync::atomic::{AtomicBool, Ordering};

/// A flag that lets a side-effect sequence run once until re-armed.
#[derive(Debug, Default)]
pub struct OneShotLatch {
    triggered: AtomicBool,
}

impl OneShotLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move from armed to triggered. Returns true only for the caller that
    /// made the transition.
    pub fn trigger(&self) -> bool {
        self.triggered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn arm(&self) {
        self.triggered.store(false, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

/// The two latches guarding session-expiry and server-error handling.
#[derive(Debug, Default)]
pub struct SessionLatches {
    pub session_expiry: OneShotLatch,
    pub server_error: OneShotLatch,
}

impl SessionLatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_session_expiry(&self) {
        self.session_expiry.arm();
    }

    pub fn reset_server_error(&self) {
        self.server_error.arm();
    }

    pub fn reset_all(&self) {
        self.reset_session_expiry();
        self.reset_server_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_latch_triggers_once() {
        let latch = OneShotLatch::new();
        assert!(!latch.is_triggered());
        assert!(latch.trigger());
        assert!(latch.is_triggered());
        assert!(!latch.trigger());
        assert!(!latch.trigger());
    }

    #[test]
    fn test_latch_rearm() {
        let latch = OneShotLatch::new();
        assert!(latch.trigger());
        latch.arm();
        assert!(!latch.is_triggered());
        assert!(latch.trigger());
    }

    #[test]
    fn test_latches_are_independent() {
        let latches = SessionLatches::new();
        assert!(latches.session_expiry.trigger());
        assert!(!latches.server_error.is_triggered());

        assert!(latches.server_error.trigger());
        latches.reset_session_expiry();
        assert!(!latches.session_expiry.is_triggered());
        assert!(latches.server_error.is_triggered());

        latches.reset_all();
        assert!(!latches.server_error.is_triggered());
    }

    #[test]
    fn test_latch_single_winner_across_threads() {
        let latch = Arc::new(OneShotLatch::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || latch.trigger())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
