//! Window-by-reset submission limiter, keyed by client identifier.
//!
//! Not a true sliding window: the first request for a key (or the first
//! after the stored reset point passes) starts a fresh fixed-duration
//! window with count 1. Within a window the counter increments until the
//! ceiling; requests beyond it are rejected without incrementing further.
//!
//! State is process-local, so the guarantee is best-effort per instance -
//! acceptable for abuse mitigation, not billing-grade accounting. The two
//! near-simultaneous-requests race under the ceiling is tolerated. A
//! shared-counter backend can replace the map behind the same interface if
//! the service is ever deployed across instances.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::warn;

/// Default ceiling: 50 submissions per window.
pub const DEFAULT_SUBMISSION_CEILING: u32 = 50;

/// Default window duration: 1 hour.
pub const DEFAULT_SUBMISSION_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Per-client window state.
#[derive(Debug)]
struct SubmissionWindow {
    /// Requests observed in the current window.
    count: u32,
    /// When the window rolls over. The window is replaced, not decremented.
    reset_at: Instant,
}

/// Process-local submission limiter.
///
/// Windows are created lazily on a key's first request and replaced once
/// their reset point passes.
pub struct SubmissionLimiter {
    windows: Mutex<HashMap<String, SubmissionWindow>>,
    ceiling: u32,
    window: Duration,
}

impl SubmissionLimiter {
    /// Create a limiter with the default ceiling and window.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SUBMISSION_CEILING, DEFAULT_SUBMISSION_WINDOW)
    }

    /// Create a limiter with a custom ceiling and window duration.
    pub fn with_config(ceiling: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            ceiling,
            window,
        }
    }

    /// Lock the window map, recovering from poison if necessary.
    ///
    /// Worst case after recovery is a slightly incorrect count, which is
    /// better than panicking a request thread.
    fn lock_windows(&self) -> MutexGuard<'_, HashMap<String, SubmissionWindow>> {
        self.windows.lock().unwrap_or_else(|poisoned| {
            warn!("Submission limiter mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Record a request from `client_id` and report whether it is allowed.
    ///
    /// Exceeding the ceiling is a terminal rejection for this window; the
    /// caller maps it to HTTP 429 and never retries on the client's behalf.
    pub fn check(&self, client_id: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.lock_windows();

        match windows.get_mut(client_id) {
            Some(window) if now <= window.reset_at => {
                if window.count >= self.ceiling {
                    return false;
                }
                window.count += 1;
                true
            }
            _ => {
                // First request for this key, or the window expired
                windows.insert(
                    client_id.to_string(),
                    SubmissionWindow {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }

    /// Requests remaining for `client_id` in its current window.
    pub fn remaining(&self, client_id: &str) -> u32 {
        let now = Instant::now();
        let windows = self.lock_windows();

        match windows.get(client_id) {
            Some(window) if now <= window.reset_at => {
                self.ceiling.saturating_sub(window.count)
            }
            _ => self.ceiling,
        }
    }

    #[cfg(test)]
    fn expire_window(&self, client_id: &str) {
        let mut windows = self.lock_windows();
        if let Some(window) = windows.get_mut(client_id) {
            window.reset_at = Instant::now() - Duration::from_secs(1);
        }
    }
}

impl Default for SubmissionLimiter {
    fn default() -> Self {
        Self::new()
    }
}
