//! Rate-limited progress reporting.

use std::time::{Duration, Instant};

/// Snapshot handed to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Complete tours evaluated since the episode was created.
    pub tours_evaluated: u64,
    /// Search nodes visited since the episode was created.
    pub nodes_expanded: u64,
    /// Wall-clock time since the episode was created.
    pub elapsed: Duration,
}

impl Progress {
    /// Tours per second, or 0 before any time has passed.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.tours_evaluated as f64 / secs
        } else {
            0.0
        }
    }
}

/// Receives periodic progress from a running search.
///
/// Called inline from the search; implementations must return quickly.
/// Any `FnMut(&Progress)` closure is a sink.
pub trait ProgressSink {
    fn report(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressSink for F {
    fn report(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// A sink that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: &Progress) {}
}

/// Lets a report through at most once per interval.
#[derive(Debug, Clone)]
pub(crate) struct ProgressThrottle {
    interval: Duration,
    last: Instant,
}

impl ProgressThrottle {
    pub(crate) fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub(crate) fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns `true` and restarts the window if `interval` has passed.
    pub(crate) fn ready(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last) > self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate() {
        let p = Progress {
            tours_evaluated: 500,
            nodes_expanded: 9_000,
            elapsed: Duration::from_secs(2),
        };
        assert!((p.rate() - 250.0).abs() < 1e-10);
        let p = Progress {
            tours_evaluated: 5,
            nodes_expanded: 40,
            elapsed: Duration::ZERO,
        };
        assert_eq!(p.rate(), 0.0);
    }

    #[test]
    fn test_throttle() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(Duration::from_millis(100), start);
        assert!(!throttle.ready(start + Duration::from_millis(50)));
        assert!(throttle.ready(start + Duration::from_millis(150)));
        assert!(!throttle.ready(start + Duration::from_millis(200)));
        assert!(throttle.ready(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: &Progress| seen.push(p.tours_evaluated);
            sink.report(&Progress {
                tours_evaluated: 3,
                nodes_expanded: 12,
                elapsed: Duration::ZERO,
            });
        }
        assert_eq!(seen, vec![3]);
    }
}
