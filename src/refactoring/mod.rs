//! Refactoring proposals and the list operations built on them.

pub mod features;
pub mod text_form;

pub use features::RefactoringFeatures;
pub use text_form::{
    parse_text_form, refactoring_of_method, refactorings_to_class, to_text_form,
    TextFormRefactoring,
};

use crate::algorithm::AlgorithmResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A proposal to move `source` into the class `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refactoring {
    source: String,
    target: String,
    accuracy: f64,
    is_field: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl Refactoring {
    /// Accuracy is clamped to [0, 1]; NaN becomes 0.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        accuracy: f64,
        is_field: bool,
    ) -> Self {
        let accuracy = if accuracy.is_nan() {
            0.0
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        Self {
            source: source.into(),
            target: target.into(),
            accuracy,
            is_field,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<&str>) -> Self {
        self.scope = scope.map(str::to_string);
        self
    }

    /// Qualified name of the member to move; a full signature for methods.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn is_field(&self) -> bool {
        self.is_field
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl fmt::Display for Refactoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({:.3})", self.source, self.target, self.accuracy)
    }
}

/// Keeps proposals whose accuracy is at least `min_accuracy`.
pub fn filter_by_accuracy(refactorings: Vec<Refactoring>, min_accuracy: f64) -> Vec<Refactoring> {
    refactorings
        .into_iter()
        .filter(|r| r.accuracy >= min_accuracy)
        .collect()
}

/// Proposals every successful algorithm agrees on, with averaged accuracy.
///
/// Agreement means the same source and the same target. The order follows the
/// first successful result. Failed results are ignored; with no successful
/// result the list is empty.
pub fn combine_results(results: &[AlgorithmResult]) -> Vec<Refactoring> {
    let successful: Vec<&AlgorithmResult> = results.iter().filter(|r| r.is_success()).collect();
    let Some((first, rest)) = successful.split_first() else {
        return Vec::new();
    };

    let others: Vec<HashMap<(&str, &str), f64>> = rest
        .iter()
        .map(|result| {
            result
                .refactorings()
                .iter()
                .map(|r| ((r.source(), r.target()), r.accuracy()))
                .collect()
        })
        .collect();

    let voters = successful.len() as f64;
    first
        .refactorings()
        .iter()
        .filter_map(|r| {
            let key = (r.source(), r.target());
            let mut total = r.accuracy();
            for other in &others {
                total += other.get(&key)?;
            }
            Some(Refactoring {
                accuracy: total / voters,
                ..r.clone()
            })
        })
        .collect()
}

/// Orders by descending accuracy, then by source name.
pub fn sort_by_accuracy(refactorings: &mut [Refactoring]) {
    refactorings.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.source.cmp(&b.source))
    });
}
