use crate::errors::Error;
use crate::refactoring::{filter_by_accuracy, sort_by_accuracy, Refactoring};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Output of one algorithm run plus the metadata needed to report it.
///
/// A failed run carries its error and no refactorings.
#[derive(Debug)]
pub struct AlgorithmResult {
    refactorings: Vec<Refactoring>,
    algorithm_name: String,
    execution_time: Duration,
    threads_used: usize,
    error: Option<Error>,
}

impl AlgorithmResult {
    pub fn success(
        algorithm_name: impl Into<String>,
        refactorings: Vec<Refactoring>,
        execution_time: Duration,
        threads_used: usize,
    ) -> Self {
        Self {
            refactorings,
            algorithm_name: algorithm_name.into(),
            execution_time,
            threads_used,
            error: None,
        }
    }

    pub fn failure(
        algorithm_name: impl Into<String>,
        error: Error,
        execution_time: Duration,
        threads_used: usize,
    ) -> Self {
        Self {
            refactorings: Vec::new(),
            algorithm_name: algorithm_name.into(),
            execution_time,
            threads_used,
            error: Some(error),
        }
    }

    pub fn refactorings(&self) -> &[Refactoring] {
        &self.refactorings
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    pub fn threads_used(&self) -> usize {
        self.threads_used
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn was_cancelled(&self) -> bool {
        self.error.as_ref().is_some_and(Error::is_cancellation)
    }

    /// Drops proposals below `min_accuracy` and orders the rest for reporting.
    pub fn with_min_accuracy(mut self, min_accuracy: f64) -> Self {
        self.refactorings = filter_by_accuracy(self.refactorings, min_accuracy);
        sort_by_accuracy(&mut self.refactorings);
        self
    }

    /// Human-readable summary of the run.
    pub fn report(&self) -> String {
        let mut report = format!(
            "Results of {} running\n  Found {} refactorings\n  Execution time: {} ms\n  Threads used: {}",
            self.algorithm_name,
            self.refactorings.len(),
            self.execution_time.as_millis(),
            self.threads_used
        );
        if let Some(error) = &self.error {
            report.push_str(&format!("\n  Failed: {}", error));
        }
        report
    }
}

impl fmt::Display for AlgorithmResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

impl Serialize for AlgorithmResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AlgorithmResult", 6)?;
        state.serialize_field("algorithm", &self.algorithm_name)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("execution_time_ms", &(self.execution_time.as_millis() as u64))?;
        state.serialize_field("threads_used", &self.threads_used)?;
        state.serialize_field("error", &self.error.as_ref().map(ToString::to_string))?;
        state.serialize_field("refactorings", &self.refactorings)?;
        state.end()
    }
}
