//! Accuracy and words-per-minute accounting.
//!
//! ## Learning: RAII for "Always Call end()"
//!
//! A session must be closed even when the edit loop bails out with `?`.
//! `SessionGuard` calls `end()` from `Drop`, so the closing timestamp is
//! recorded on every exit path:
//!
//! ```rust,ignore
//! let mut monitor = PerformanceMonitor::new();
//! {
//!     let mut session = monitor.session();   // resume()
//!     editor.run(&mut keys, &mut *session)?; // early return still ends
//! }                                          // end()
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

/// Correct and attempted word counts over a timed session.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitor {
    correct: u64,
    attempted: u64,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Timing ====================

    /// Starts the clock now.
    pub fn begin(&mut self) {
        self.begin_at(Instant::now());
    }

    /// Starts the clock at a given instant.
    pub fn begin_at(&mut self, at: Instant) {
        self.started_at = Some(at);
        self.ended_at = None;
        tracing::info!("Typing session started");
    }

    /// Stops the clock now.
    pub fn end(&mut self) {
        self.end_at(Instant::now());
    }

    /// Stops the clock at a given instant.
    pub fn end_at(&mut self, at: Instant) {
        self.ended_at = Some(at);
        tracing::info!(
            "Typing session ended: {}/{} correct",
            self.correct,
            self.attempted
        );
    }

    /// Starts the clock on first use; afterwards only reopens it, keeping
    /// the original start time.
    pub fn resume(&mut self) {
        if self.started_at.is_some() {
            self.ended_at = None;
        } else {
            self.begin();
        }
    }

    /// Resumes the session and ends it again when the guard is dropped.
    pub fn session(&mut self) -> SessionGuard<'_> {
        self.resume();
        SessionGuard { monitor: self }
    }

    /// Returns true once `end()` has been called after `begin()`.
    pub fn is_finalized(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Elapsed time: live while running, fixed once ended, zero before begin.
    pub fn duration(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => start.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    // ==================== Counting ====================

    /// Records one submitted word. Only an exact match counts as correct.
    pub fn record(&mut self, entered: &str, expected: &str) {
        if entered == expected {
            self.correct += 1;
        }
        self.attempted += 1;
        tracing::debug!(
            "Recorded {:?} against {:?} ({}/{})",
            entered,
            expected,
            self.correct,
            self.attempted
        );
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn attempted(&self) -> u64 {
        self.attempted
    }

    /// Fraction of attempts that were correct; 0 before any attempt.
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempted as f64
        }
    }

    /// Correct words per minute; 0 for a zero-length session.
    pub fn wpm(&self) -> f64 {
        self.wpm_over(self.duration())
    }

    fn wpm_over(&self, duration: Duration) -> f64 {
        if duration.is_zero() {
            0.0
        } else {
            self.correct as f64 / duration.as_secs_f64() * 60.0
        }
    }

    /// Snapshot of the current numbers.
    pub fn report(&self) -> PerformanceReport {
        let duration = self.duration();
        PerformanceReport {
            correct: self.correct,
            attempted: self.attempted,
            accuracy: self.accuracy(),
            wpm: self.wpm_over(duration),
            duration_secs: duration.as_secs_f64(),
        }
    }
}

/// Ends the session on drop.
pub struct SessionGuard<'a> {
    monitor: &'a mut PerformanceMonitor,
}

impl Deref for SessionGuard<'_> {
    type Target = PerformanceMonitor;

    fn deref(&self) -> &Self::Target {
        self.monitor
    }
}

impl DerefMut for SessionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.monitor
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.monitor.end();
    }
}

/// Numbers shown to the user during and after a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub correct: u64,
    pub attempted: u64,
    pub accuracy: f64,
    pub wpm: f64,
    pub duration_secs: f64,
}

impl std::fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Correct:   {}", self.correct)?;
        writeln!(f, "Attempted: {}", self.attempted)?;
        writeln!(f, "Accuracy:  {:.2}%", self.accuracy * 100.0)?;
        writeln!(f, "Duration:  {:.1}s", self.duration_secs)?;
        write!(f, "WPM:       {:.1}", self.wpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record("cat", "cat");
        monitor.record("Cat", "cat");
        monitor.record("ca", "cat");
        monitor.record("dog", "dog");
        assert_eq!(monitor.attempted(), 4);
        assert_eq!(monitor.correct(), 2);
    }

    #[test]
    fn test_accuracy() {
        let mut monitor = PerformanceMonitor::new();
        assert_eq!(monitor.accuracy(), 0.0);

        for (entered, expected) in [("a", "a"), ("b", "b"), ("c", "c"), ("x", "d")] {
            monitor.record(entered, expected);
        }
        assert_eq!(monitor.accuracy(), 0.75);
    }

    #[test]
    fn test_wpm_zero_without_duration() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record("a", "a");
        assert_eq!(monitor.duration(), Duration::ZERO);
        assert_eq!(monitor.wpm(), 0.0);

        let now = Instant::now();
        monitor.begin_at(now);
        monitor.end_at(now);
        assert_eq!(monitor.wpm(), 0.0);
    }

    #[test]
    fn test_wpm_finalized() {
        let mut monitor = PerformanceMonitor::new();
        let start = Instant::now();
        monitor.begin_at(start);
        for _ in 0..30 {
            monitor.record("w", "w");
        }
        monitor.end_at(start + Duration::from_secs(30));

        assert!(monitor.is_finalized());
        assert_eq!(monitor.duration(), Duration::from_secs(30));
        assert_eq!(monitor.wpm(), 60.0);

        let report = monitor.report();
        assert_eq!(report.correct, 30);
        assert_eq!(report.wpm, 60.0);
        assert_eq!(report.duration_secs, 30.0);
    }

    #[test]
    fn test_live_duration_grows() {
        let mut monitor = PerformanceMonitor::new();
        monitor.begin_at(Instant::now() - Duration::from_secs(5));
        assert!(!monitor.is_finalized());
        assert!(monitor.duration() >= Duration::from_secs(5));
    }

    #[test]
    fn test_guard_ends_on_early_return() {
        fn fails(monitor: &mut PerformanceMonitor) -> Result<(), &'static str> {
            let mut session = monitor.session();
            session.record("x", "y");
            let read: Result<(), &'static str> = Err("input closed");
            read?;
            Ok(())
        }

        let mut monitor = PerformanceMonitor::new();
        assert!(fails(&mut monitor).is_err());
        assert!(monitor.is_finalized());
        assert_eq!(monitor.attempted(), 1);
    }

    #[test]
    fn test_second_session_keeps_start_time() {
        let mut monitor = PerformanceMonitor::new();
        let start = Instant::now() - Duration::from_secs(10);
        monitor.begin_at(start);
        monitor.end_at(start + Duration::from_secs(4));

        drop(monitor.session());

        assert!(monitor.is_finalized());
        assert!(monitor.duration() >= Duration::from_secs(10));
    }

    #[test]
    fn test_report_display() {
        let report = PerformanceReport {
            correct: 3,
            attempted: 4,
            accuracy: 0.75,
            wpm: 42.0,
            duration_secs: 12.5,
        };
        let text = report.to_string();
        assert!(text.contains("Correct:   3"));
        assert!(text.contains("Accuracy:  75.00%"));
        assert!(text.contains("WPM:       42.0"));
    }
}
