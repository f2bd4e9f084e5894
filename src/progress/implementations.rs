//! Progress sink implementations for different output modes.
//!
//! - [`SilentProgressSink`]: no-op, for library callers and benchmarks
//! - [`CliProgressSink`]: plain stderr lines
//! - [`RecordingProgressSink`]: captures events for tests
//! - [`BarProgressSink`]: an `indicatif` bar per stage
//!
//! # Example: Using RecordingProgressSink in Tests
//!
//! ```rust
//! use movemap::progress::implementations::{ProgressEvent, RecordingProgressSink};
//! use movemap::progress::traits::ProgressSink;
//!
//! let recorder = RecordingProgressSink::new();
//!
//! recorder.start_stage("MRI");
//! recorder.report("MRI", 0.5);
//! recorder.complete_stage("MRI");
//!
//! let events = recorder.events();
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[0], ProgressEvent::StartStage { .. }));
//! ```

use super::traits::ProgressSink;
use super::{ProgressConfig, ProgressManager, PROGRESS_RESOLUTION, TEMPLATE_ALGORITHM};
use indicatif::ProgressBar;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// No-op sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentProgressSink;

impl ProgressSink for SilentProgressSink {
    #[inline]
    fn report(&self, _stage: &str, _fraction: f64) {}

    #[inline]
    fn start_stage(&self, _name: &str) {}

    #[inline]
    fn complete_stage(&self, _name: &str) {}

    #[inline]
    fn warn(&self, _message: &str) {}
}

/// CLI progress sink - simple stderr output.
///
/// # Output Format
///
/// ```text
/// MRI
/// MRI: 25%
/// MRI: 100%
/// MRI complete
///
/// Warning: Some warning message
/// ```
///
/// In quiet mode only warnings are written.
#[derive(Clone, Debug, Default)]
pub struct CliProgressSink {
    quiet: bool,
}

impl CliProgressSink {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressSink for CliProgressSink {
    fn report(&self, stage: &str, fraction: f64) {
        if !self.quiet {
            eprint!("\r{}: {:.0}%", stage, fraction.clamp(0.0, 1.0) * 100.0);
            let _ = std::io::stderr().flush();
        }
    }

    fn start_stage(&self, name: &str) {
        if !self.quiet {
            eprintln!("\n{}", name);
        }
    }

    fn complete_stage(&self, name: &str) {
        if !self.quiet {
            eprintln!("\n{} complete", name);
        }
    }

    fn warn(&self, message: &str) {
        // Warnings survive quiet mode
        eprintln!("\nWarning: {}", message);
    }
}

/// Progress event recorded by [`RecordingProgressSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Report { stage: String, fraction: f64 },
    StartStage { name: String },
    CompleteStage { name: String },
    Warn { message: String },
}

/// Records every event behind a shared mutex.
///
/// Clones share the same event list. Event order across threads is not
/// deterministic, but reports from one algorithm run arrive in order because
/// units are processed sequentially.
#[derive(Clone, Debug, Default)]
pub struct RecordingProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProgressEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.lock().clone()
    }

    /// Names of started stages, in order.
    pub fn stages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::StartStage { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn completed_stages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::CompleteStage { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Fractions reported for one stage, in arrival order.
    pub fn fractions(&self, stage: &str) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Report { stage: s, fraction } if s == stage => Some(fraction),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Warn { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }
}

impl ProgressSink for RecordingProgressSink {
    fn report(&self, stage: &str, fraction: f64) {
        self.lock().push(ProgressEvent::Report {
            stage: stage.to_string(),
            fraction,
        });
    }

    fn start_stage(&self, name: &str) {
        self.lock().push(ProgressEvent::StartStage {
            name: name.to_string(),
        });
    }

    fn complete_stage(&self, name: &str) {
        self.lock().push(ProgressEvent::CompleteStage {
            name: name.to_string(),
        });
    }

    fn warn(&self, message: &str) {
        self.lock().push(ProgressEvent::Warn {
            message: message.to_string(),
        });
    }
}

/// Renders one `indicatif` bar per stage.
///
/// Bars are hidden when stderr is not a terminal or quiet mode is on, so the
/// sink is safe to install unconditionally.
pub struct BarProgressSink {
    manager: ProgressManager,
    bar: Mutex<Option<ProgressBar>>,
}

impl BarProgressSink {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            manager: ProgressManager::new(config),
            bar: Mutex::new(None),
        }
    }

    /// Removes finished bars before the report is printed.
    pub fn clear(&self) -> std::io::Result<()> {
        self.manager.clear()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressSink for BarProgressSink {
    fn report(&self, _stage: &str, fraction: f64) {
        if let Some(bar) = self.slot().as_ref() {
            let position = (fraction.clamp(0.0, 1.0) * PROGRESS_RESOLUTION as f64).round() as u64;
            bar.set_position(position);
        }
    }

    fn start_stage(&self, name: &str) {
        let bar = self.manager.create_bar(PROGRESS_RESOLUTION, TEMPLATE_ALGORITHM);
        bar.set_message(name.to_string());
        if let Some(previous) = self.slot().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn complete_stage(&self, name: &str) {
        if let Some(bar) = self.slot().take() {
            bar.set_position(PROGRESS_RESOLUTION);
            bar.finish_with_message(format!("{} complete", name));
        }
    }

    fn warn(&self, message: &str) {
        match self.slot().as_ref() {
            Some(bar) if !bar.is_hidden() => bar.println(format!("Warning: {}", message)),
            _ => {
                if !self.manager.is_quiet() {
                    eprintln!("Warning: {}", message);
                }
            }
        }
    }
}
