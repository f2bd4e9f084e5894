// Export modules for library usage
pub mod algorithm;
pub mod cli;
pub mod commands;
pub mod config;
pub mod distance;
pub mod entity;
pub mod errors;
pub mod execution;
pub mod output;
pub mod progress;
pub mod refactoring;
pub mod scoring;

// Re-export commonly used types
pub use crate::algorithm::{
    run_algorithms, Algorithm, AlgorithmKind, AlgorithmResult, Ari, Mri, Rmmr, RunOptions,
};

pub use crate::entity::{
    ClassEntity, CodeEntity, EntityRecords, EntitySearchResult, FieldEntity, MethodEntity,
    NormalizationPolicy, RelevantProperties,
};

pub use crate::errors::{Error, Result};

pub use crate::execution::{CancellationToken, ExecutionContext};

pub use crate::progress::{ProgressSink, RecordingProgressSink, SilentProgressSink};

pub use crate::refactoring::{
    combine_results, filter_by_accuracy, parse_text_form, sort_by_accuracy, to_text_form,
    Refactoring, TextFormRefactoring,
};

pub use crate::config::MovemapConfig;

pub use crate::output::{AnalysisReport, OutputFormat};
