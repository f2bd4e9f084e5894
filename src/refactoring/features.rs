//! Features describing a move-method proposal, for offline analysis of
//! which proposals developers accept.

use super::Refactoring;
use crate::entity::{owner_class_of, CodeEntity, EntitySearchResult};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactoringFeatures {
    pub method: String,
    pub target_class: String,
    pub method_metrics: Vec<MetricValue>,
    pub target_class_metrics: Vec<MetricValue>,
    /// Distinct fields of the method's own class that it accesses.
    pub same_class_fields_accessed: usize,
    /// Distinct fields of the target class that the method accesses.
    pub target_class_fields_accessed: usize,
}

impl RefactoringFeatures {
    /// Collects features of a move-method proposal.
    ///
    /// Metric values are the normalized vector entries, keyed by registry id.
    pub fn extract(refactoring: &Refactoring, entities: &EntitySearchResult) -> Result<Self> {
        if refactoring.is_field() {
            return Err(Error::Unsupported(
                "features are only extracted for move method refactorings".to_string(),
            ));
        }
        let method = entities.method(refactoring.source()).ok_or_else(|| {
            Error::invalid_input(format!("unknown method {}", refactoring.source()))
        })?;
        let target = entities.class(refactoring.target()).ok_or_else(|| {
            Error::invalid_input(format!("unknown target class {}", refactoring.target()))
        })?;

        let metric_values = |vector: &[f64]| -> Vec<MetricValue> {
            entities
                .registry()
                .ids()
                .iter()
                .zip(vector)
                .map(|(id, value)| MetricValue {
                    id: id.clone(),
                    value: *value,
                })
                .collect()
        };
        let fields_of = |class: &str| {
            method
                .properties()
                .fields()
                .filter(|field| owner_class_of(field) == class)
                .count()
        };

        Ok(Self {
            method: method.signature().to_string(),
            target_class: target.name().to_string(),
            method_metrics: metric_values(method.vector()),
            target_class_metrics: metric_values(target.vector()),
            same_class_fields_accessed: fields_of(method.class_name()),
            target_class_fields_accessed: fields_of(target.name()),
        })
    }
}
