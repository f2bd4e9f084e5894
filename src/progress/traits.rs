//! Progress sink trait definition.
//!
//! Algorithms never print. They report a completed fraction through the
//! [`ExecutionContext`](crate::execution::ExecutionContext), which forwards it
//! to whatever [`ProgressSink`] the caller installed.
//!
//! # Thread Safety
//!
//! All `ProgressSink` implementations must be `Send + Sync`. The candidate
//! scan runs on a rayon pool and sinks are shared behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use movemap::progress::traits::ProgressSink;
//!
//! struct LoggingProgressSink;
//!
//! impl ProgressSink for LoggingProgressSink {
//!     fn report(&self, stage: &str, fraction: f64) {
//!         log::info!("{}: {:.0}%", stage, fraction * 100.0);
//!     }
//!
//!     fn start_stage(&self, name: &str) {
//!         log::info!("Starting: {}", name);
//!     }
//!
//!     fn complete_stage(&self, name: &str) {
//!         log::info!("Complete: {}", name);
//!     }
//!
//!     fn warn(&self, message: &str) {
//!         log::warn!("{}", message);
//!     }
//! }
//! ```

/// Receives progress updates.
///
/// Methods may be called from several threads and must not block or panic,
/// even on a fraction outside [0, 1].
pub trait ProgressSink: Send + Sync + 'static {
    /// Report the completed fraction of a named stage.
    fn report(&self, stage: &str, fraction: f64);

    /// Called once before a stage (usually one algorithm run) starts.
    fn start_stage(&self, name: &str);

    /// Called when a stage finishes, successfully or not.
    fn complete_stage(&self, name: &str);

    /// Report a warning without interrupting progress.
    fn warn(&self, message: &str);
}
