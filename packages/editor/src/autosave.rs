//! # Autosave Debounce
//!
//! Deadline tracking for debounced saves. Time is a [`Duration`] since an
//! arbitrary origin chosen by the caller, so no clock is read here and the
//! same code runs natively and under wasm.

use std::time::Duration;

/// Default quiet period before a save
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record activity at `now`; pushes the deadline out by the full delay
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// True exactly once when the quiet period has elapsed
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Clear the deadline regardless of time; true if one was pending
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
