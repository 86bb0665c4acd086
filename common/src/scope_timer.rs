use std::time::{Duration, Instant};

/// Logs the time spent in a scope at `info` level when dropped.
#[derive(Debug)]
pub struct ScopeTimer {
    title: &'static str,
    start: Instant,
}

impl ScopeTimer {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn title(&self) -> &'static str {
        self.title
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "{}", self.title);
    }
}
