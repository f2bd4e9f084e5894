//! Progress feedback for algorithm runs.
//!
//! # Progress Behavior
//!
//! - **Quiet Mode**: No progress output (respects `MOVEMAP_QUIET` env var and `--quiet` flag)
//! - **Non-TTY**: Bars are hidden in CI and piped output
//! - **Verbosity Levels**:
//!   - Level 0 (default): One bar per algorithm
//!   - Level 1 (-v): Info logging alongside the bars
//!   - Level 2 (-vv): Per-unit debug logging
//!
//! # Examples
//!
//! ```rust,no_run
//! use movemap::progress::{ProgressConfig, ProgressManager, TEMPLATE_ALGORITHM};
//!
//! let manager = ProgressManager::new(ProgressConfig::from_env(false));
//! let progress = manager.create_bar(100, TEMPLATE_ALGORITHM);
//! progress.set_message("MRI");
//! progress.inc(100);
//! progress.finish_with_message("MRI complete");
//! ```

pub mod implementations;
pub mod traits;

pub use implementations::{
    BarProgressSink, CliProgressSink, ProgressEvent, RecordingProgressSink, SilentProgressSink,
};
pub use traits::ProgressSink;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;

pub const TEMPLATE_ALGORITHM: &str = "🔎 {msg} [{bar:40}] {percent}% - {elapsed_precise}";

/// Bar length used to map fractional progress onto integer positions.
pub const PROGRESS_RESOLUTION: u64 = 1000;

/// Environment variable that forces quiet mode.
pub const QUIET_ENV_VAR: &str = "MOVEMAP_QUIET";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var(QUIET_ENV_VAR).is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
        }
    }

    /// Determine if progress bars should be displayed
    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

/// Coordinates the bars of one process
#[derive(Clone)]
pub struct ProgressManager {
    multi: Arc<MultiProgress>,
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            multi: Arc::new(MultiProgress::new()),
            config,
        }
    }

    /// Create a progress bar with the given length and template
    ///
    /// Returns a hidden progress bar if progress should not be shown
    pub fn create_bar(&self, len: u64, template: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ");
        let pb = self.multi.add(ProgressBar::new(len));
        pb.set_style(style);
        pb
    }

    pub fn is_quiet(&self) -> bool {
        self.config.quiet_mode
    }

    /// Clear all progress bars before printing final output.
    pub fn clear(&self) -> std::io::Result<()> {
        self.multi.clear()
    }
}
