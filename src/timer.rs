//! Named performance timers.
//!
//! Each `start` hands back a [`TimerId`], so overlapping timers with the same
//! label (two requests to one endpoint, say) are tracked separately. Timers
//! are purely observational: an unknown id logs a warning and never affects
//! the caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Handle for one running timer
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Registry of running timers
#[derive(Debug, Default)]
pub struct Timers {
    running: Mutex<HashMap<u64, (String, Instant)>>,
    next_id: AtomicU64,
    /// Log start/stop events at info level
    debug: bool,
}

impl Timers {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    /// Start a timer labelled `label`.
    pub fn start(&self, label: impl Into<String>) -> TimerId {
        let label = label.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if self.debug {
            tracing::info!(timer = %label, "Started timer");
        }
        self.running.lock().insert(id, (label, Instant::now()));
        TimerId(id)
    }

    /// Stop a timer and return how long it ran.
    pub fn stop(&self, id: TimerId) -> Option<Duration> {
        let Some((label, started)) = self.running.lock().remove(&id.0) else {
            tracing::warn!(timer = id.0, "Timer does not exist");
            return None;
        };

        let elapsed = started.elapsed();
        if self.debug {
            tracing::info!(
                timer = %label,
                elapsed_ms = format!("{:.2}", elapsed.as_secs_f64() * 1000.0),
                "Timer completed"
            );
        }
        Some(elapsed)
    }

    /// Number of timers currently running
    pub fn running(&self) -> usize {
        self.running.lock().len()
    }
}
