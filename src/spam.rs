use crate::config::Config;
use crate::session::Session;

/// Trailing sliding-window burst detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpamDetector {
    threshold: usize,
    window_seconds: f64,
}

impl SpamDetector {
    pub fn new(threshold: usize, window_seconds: f64) -> Self {
        Self {
            threshold: threshold.max(1),
            window_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.spam_threshold, config.spam_window_seconds)
    }

    /// Records one observation at `now` and reports whether the window now
    /// holds at least `threshold` of them.
    pub fn observe(&self, session: &mut Session, now: f64) -> bool {
        let timestamps = &mut session.prompt_timestamps;
        let now = timestamps.back().map_or(now, |last| now.max(*last));
        timestamps.push_back(now);

        let cutoff = now - self.window_seconds;
        while timestamps.front().is_some_and(|t| *t < cutoff) {
            timestamps.pop_front();
        }

        timestamps.len() >= self.threshold
    }
}
