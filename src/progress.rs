// src/progress.rs

//! Progress reporting for long inventory scans
//!
//! Reading thousands of recipes or archives takes a while, so the scanning
//! stages report through the [`ProgressTracker`] trait. Implementations:
//! - [`BarProgress`]: terminal progress bar using indicatif
//! - [`LogProgress`]: periodic tracing lines
//! - [`SilentProgress`]: no output
//!
//! # Example
//!
//! ```ignore
//! use pkggraph::progress::{BarProgress, ProgressTracker};
//!
//! let progress = BarProgress::new("built packages scanned", archives.len() as u64);
//! for archive in &archives {
//!     // ... scan ...
//!     progress.increment(1);
//! }
//! progress.finish_with_message("scan complete");
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{info, warn};

/// Core trait for progress tracking
///
/// Scans update progress from rayon worker threads, so implementations must
/// be `Send + Sync`.
pub trait ProgressTracker: Send + Sync {
    /// Set the current status message
    fn set_message(&self, message: &str);

    /// Increment progress by the given amount
    fn increment(&self, amount: u64);

    /// Set the total (length) of the progress
    fn set_length(&self, length: u64);

    /// Get current position
    fn position(&self) -> u64;

    /// Get total length
    fn length(&self) -> u64;

    /// Finish progress successfully with a message
    fn finish_with_message(&self, message: &str);

    /// Finish progress with an error/abandonment message
    fn finish_with_error(&self, message: &str);

    /// Check if progress is finished
    fn is_finished(&self) -> bool;
}

/// Silent progress tracker (no-op)
#[derive(Debug, Default)]
pub struct SilentProgress {
    position: AtomicU64,
    length: AtomicU64,
    finished: AtomicBool,
}

impl SilentProgress {
    /// Create a new silent progress tracker
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressTracker for SilentProgress {
    fn set_message(&self, _message: &str) {}

    fn increment(&self, amount: u64) {
        self.position.fetch_add(amount, Ordering::Relaxed);
    }

    fn set_length(&self, length: u64) {
        self.length.store(length, Ordering::Relaxed);
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn length(&self) -> u64 {
        self.length.load(Ordering::Relaxed)
    }

    fn finish_with_message(&self, _message: &str) {
        self.finished.store(true, Ordering::Relaxed);
    }

    fn finish_with_error(&self, _message: &str) {
        self.finished.store(true, Ordering::Relaxed);
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Logging progress tracker
///
/// Logs at info level roughly every tenth of the total, which keeps logs
/// readable for scans over thousands of files.
#[derive(Debug)]
pub struct LogProgress {
    name: String,
    position: AtomicU64,
    length: AtomicU64,
    finished: AtomicBool,
}

impl LogProgress {
    /// Create a new logging progress tracker
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            position: AtomicU64::new(0),
            length: AtomicU64::new(length),
            finished: AtomicBool::new(false),
        }
    }

    fn log_interval(&self) -> u64 {
        std::cmp::max(1, self.length.load(Ordering::Relaxed) / 10)
    }
}

impl ProgressTracker for LogProgress {
    fn set_message(&self, message: &str) {
        info!("{}: {}", self.name, message);
    }

    fn increment(&self, amount: u64) {
        let old_pos = self.position.fetch_add(amount, Ordering::Relaxed);
        let new_pos = old_pos + amount;
        let length = self.length.load(Ordering::Relaxed);

        if length > 0 {
            let interval = self.log_interval();
            if new_pos / interval > old_pos / interval {
                info!("{}: {}/{}", self.name, new_pos, length);
            }
        }
    }

    fn set_length(&self, length: u64) {
        self.length.store(length, Ordering::Relaxed);
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn length(&self) -> u64 {
        self.length.load(Ordering::Relaxed)
    }

    fn finish_with_message(&self, message: &str) {
        self.finished.store(true, Ordering::Relaxed);
        info!("{}: {}", self.name, message);
    }

    fn finish_with_error(&self, message: &str) {
        self.finished.store(true, Ordering::Relaxed);
        warn!("{}: {}", self.name, message);
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Terminal progress bar
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Create a bar labelled `name` with `length` steps
    pub fn new(name: &str, length: u64) -> Self {
        let bar = ProgressBar::new(length);
        // Template is a constant; fall back to the default style if it ever fails
        let style = ProgressStyle::default_bar()
            .template("{msg} {pos}/{len} [{bar:40.cyan/dim}] {percent}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        bar.set_message(name.to_string());
        Self { bar }
    }
}

impl ProgressTracker for BarProgress {
    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    fn set_length(&self, length: u64) {
        self.bar.set_length(length);
    }

    fn position(&self) -> u64 {
        self.bar.position()
    }

    fn length(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    fn finish_with_error(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

/// Which tracker a pipeline stage gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    #[default]
    Silent,
    Log,
    Bar,
}

impl ProgressMode {
    /// Create a tracker labelled `name`
    pub fn tracker(self, name: &str, length: u64) -> Box<dyn ProgressTracker> {
        match self {
            Self::Silent => Box::new(SilentProgress::new()),
            Self::Log => Box::new(LogProgress::new(name, length)),
            Self::Bar => Box::new(BarProgress::new(name, length)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_mode_tracker() {
        let tracker = ProgressMode::Log.tracker("recipes", 10);
        tracker.increment(2);
        assert_eq!(tracker.position(), 2);
        assert_eq!(tracker.length(), 10);

        let silent = ProgressMode::default().tracker("ignored", 10);
        silent.increment(1);
        assert_eq!(silent.position(), 1);
    }

    #[test]
    fn test_silent_progress() {
        let progress = SilentProgress::new();
        progress.set_length(100);

        progress.set_message("test");
        progress.increment(10);
        assert_eq!(progress.position(), 10);
        assert_eq!(progress.length(), 100);

        assert!(!progress.is_finished());
        progress.finish_with_message("done");
        assert!(progress.is_finished());
    }

    #[test]
    fn test_log_progress() {
        let progress = LogProgress::new("test", 100);

        progress.increment(25);
        assert_eq!(progress.position(), 25);

        progress.increment(25);
        assert_eq!(progress.position(), 50);

        progress.finish_with_error("aborted");
        assert!(progress.is_finished());
    }

    #[test]
    fn test_bar_progress_hidden_terminal() {
        let progress = BarProgress::new("scan", 4);
        progress.increment(3);
        assert_eq!(progress.position(), 3);
        assert_eq!(progress.length(), 4);

        progress.finish_with_message("done");
        assert!(progress.is_finished());
    }
}
