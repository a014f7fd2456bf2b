//! Keyed series gate
//!
//! Advisory mutual exclusion by string identity: passes sharing a key run
//! one at a time. Waiters poll at a fixed interval rather than queueing, so
//! there is no fairness guarantee — ties are broken by poll timing. The
//! key is released through an RAII guard, so a panicking critical section
//! still clears it.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Default interval between polls of a busy key.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Keyed advisory lock with busy-wait acquisition.
#[derive(Debug)]
pub struct SeriesGate {
    running: Mutex<HashSet<String>>,
    poll_interval: Duration,
}

impl SeriesGate {
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    /// Gate with a custom poll interval (tests use a short one).
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            running: Mutex::new(HashSet::new()),
            poll_interval,
        }
    }

    /// Run `critical` once no other holder of `key` is active.
    ///
    /// Distinct keys never block each other.
    pub fn run<T>(&self, key: &str, critical: impl FnOnce() -> T) -> T {
        loop {
            let mut running = self
                .running
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if running.insert(key.to_string()) {
                break;
            }
            drop(running);
            thread::sleep(self.poll_interval);
        }

        let _release = ReleaseGuard { gate: self, key };
        critical()
    }

    /// Returns true while some caller holds `key`.
    pub fn is_running(&self, key: &str) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

impl Default for SeriesGate {
    fn default() -> Self {
        Self::new()
    }
}

struct ReleaseGuard<'a> {
    gate: &'a SeriesGate,
    key: &'a str,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.gate
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.key);
    }
}
