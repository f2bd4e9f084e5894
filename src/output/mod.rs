//! Rendering of analysis results.
//!
//! `text` is the colored terminal report, `json` is machine readable and
//! `plain` is the line-oriented text form with one `#` header per section.

pub mod json;
pub mod plain;
pub mod terminal;

pub use json::render_json;
pub use plain::render_plain;
pub use terminal::render_text;

use crate::algorithm::AlgorithmResult;
use crate::errors::Result;
use crate::refactoring::{combine_results, sort_by_accuracy, Refactoring};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Plain,
}

/// Results of one analysis, ready to render.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub results: Vec<AlgorithmResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<Vec<Refactoring>>,
}

impl AnalysisReport {
    /// Applies the accuracy floor to every result and, when asked, adds the
    /// proposals all successful algorithms agree on.
    pub fn new(results: Vec<AlgorithmResult>, min_accuracy: f64, combine: bool) -> Self {
        let results: Vec<AlgorithmResult> = results
            .into_iter()
            .map(|result| result.with_min_accuracy(min_accuracy))
            .collect();
        let combined = combine.then(|| {
            let mut combined = combine_results(&results);
            sort_by_accuracy(&mut combined);
            combined
        });
        Self { results, combined }
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| !r.is_success())
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(render_text(self)),
            OutputFormat::Json => render_json(self),
            OutputFormat::Plain => render_plain(self),
        }
    }
}

/// Writes to `output_file`, creating parent directories, or to stdout.
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        None => print!("{content}"),
    }
    Ok(())
}
