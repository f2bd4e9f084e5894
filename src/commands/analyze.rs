use crate::algorithm::{run_algorithms, AlgorithmKind, RunOptions};
use crate::config::{load_config, load_config_from, MovemapConfig};
use crate::entity::{EntityRecords, EntitySearchResult};
use crate::execution::CancellationToken;
use crate::output::{write_output, AnalysisReport, OutputFormat};
use crate::progress::{BarProgressSink, ProgressConfig, ProgressSink};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub algorithms: Vec<AlgorithmKind>,
    pub enable_field_refactorings: bool,
    pub jobs: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub min_accuracy: Option<f64>,
    pub combine: bool,
    pub scope: Option<String>,
    pub quiet: bool,
}

/// Settings of one run after command-line flags are layered over the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub algorithms: Vec<AlgorithmKind>,
    pub options: RunOptions,
    pub min_accuracy: f64,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let file_config = match &config.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    let settings = resolve_settings(&config, &file_config)?;

    let entities = load_entities(&config.input, &file_config)?;

    let progress = Arc::new(BarProgressSink::new(ProgressConfig::from_env(config.quiet)));
    let sink: Arc<dyn ProgressSink> = progress.clone();
    let results = run_algorithms(
        Arc::new(entities),
        &settings.algorithms,
        &settings.options,
        sink,
        CancellationToken::new(),
    );
    progress.clear()?;

    let report = AnalysisReport::new(results, settings.min_accuracy, config.combine);
    if report.has_failures() {
        log::warn!("At least one algorithm failed; see the report");
    }
    if config.output.is_some() {
        colored::control::set_override(false);
    }
    let rendered = report.render(config.format)?;
    write_output(&rendered, config.output.as_deref())?;
    Ok(())
}

/// Command-line values win; the config file fills in the rest.
pub fn resolve_settings(config: &AnalyzeConfig, file_config: &MovemapConfig) -> Result<ResolvedSettings> {
    let algorithms = if config.algorithms.is_empty() {
        file_config.algorithms.enabled.clone()
    } else {
        config.algorithms.clone()
    };

    let min_accuracy = config
        .min_accuracy
        .unwrap_or(file_config.output.min_accuracy);
    if !(0.0..=1.0).contains(&min_accuracy) {
        anyhow::bail!("--min-accuracy must be within [0, 1], got {}", min_accuracy);
    }

    let threads = config
        .jobs
        .unwrap_or_else(|| file_config.parallel.effective_concurrency());

    Ok(ResolvedSettings {
        algorithms,
        options: RunOptions {
            enable_field_refactorings: config.enable_field_refactorings
                || file_config.algorithms.enable_field_refactorings,
            threads,
            scope: config.scope.clone(),
        },
        min_accuracy,
    })
}

fn load_entities(input: &Path, file_config: &MovemapConfig) -> Result<EntitySearchResult> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open entity records {}", input.display()))?;
    let records = EntityRecords::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse entity records {}", input.display()))?;
    let entities = records.prepare(file_config.normalization.policy)?;
    log::info!(
        "Prepared {} classes, {} methods, {} fields with {} metrics",
        entities.classes().len(),
        entities.methods().len(),
        entities.fields().len(),
        entities.registry().ids().len()
    );
    Ok(entities)
}
