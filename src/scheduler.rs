//! Frame-driven tick timing.
//!
//! The host calls [`Scheduler::poll`] once per displayed frame with the
//! current time. A tick fires when at least the current interval has elapsed
//! since the previous one, so the interval can change between ticks without
//! restarting anything.

/// Elapsed-time tick source. Times are milliseconds on any monotonic clock.
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    last_tick_ms: Option<f64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin counting from `now_ms`. The first tick fires one interval later.
    pub fn start(&mut self, now_ms: f64) {
        self.last_tick_ms = Some(now_ms);
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    /// Returns `true` when a tick is due, and resets the baseline to `now_ms`.
    pub fn poll(&mut self, now_ms: f64, interval_ms: u32) -> bool {
        let Some(last) = self.last_tick_ms else {
            return false;
        };
        if now_ms - last < f64::from(interval_ms) {
            return false;
        }
        self.last_tick_ms = Some(now_ms);
        true
    }
}
