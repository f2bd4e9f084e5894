//! Metric dimension registry and run-wide vector normalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps metric identifiers to feature vector indices for one run.
///
/// Indices follow the sorted order of identifiers, so two runs over the same
/// metric set agree on the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricRegistry {
    ids: Vec<String>,
    #[serde(skip)]
    index: BTreeMap<String, usize>,
}

impl MetricRegistry {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        ids.sort();
        ids.dedup();
        let index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        Self { ids, index }
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn dimension(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Builds a dense vector from sparse metric values; absent metrics are 0.
    pub fn assemble(&self, metrics: &BTreeMap<String, f64>) -> Vec<f64> {
        let mut vector = vec![0.0; self.dimension()];
        for (id, value) in metrics {
            match self.index_of(id) {
                Some(i) => vector[i] = *value,
                None => log::debug!("Metric {} is not registered, ignoring", id),
            }
        }
        vector
    }

    /// Reads one metric back out of a vector laid out by this registry.
    pub fn value(&self, vector: &[f64], id: &str) -> Option<f64> {
        self.index_of(id).and_then(|i| vector.get(i).copied())
    }
}

/// How feature vectors are rescaled, per dimension, across all entities of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationPolicy {
    /// Divide by the largest absolute value of the dimension
    #[default]
    MaxScale,
    /// Map the dimension onto [0, 1]
    MinMax,
    /// Subtract the mean and divide by the standard deviation
    ZScore,
    /// Leave raw values untouched
    None,
}

impl NormalizationPolicy {
    /// Normalizes every dimension over the whole set of vectors in place.
    ///
    /// All vectors must share `dimension`; shorter vectors are left alone past
    /// their end.
    pub fn apply(self, vectors: &mut [Vec<f64>], dimension: usize) {
        if vectors.is_empty() || self == NormalizationPolicy::None {
            return;
        }
        for d in 0..dimension {
            let column: Vec<f64> = vectors.iter().filter_map(|v| v.get(d).copied()).collect();
            let Some(transform) = self.column_transform(&column) else {
                continue;
            };
            for value in vectors.iter_mut().filter_map(|v| v.get_mut(d)) {
                *value = transform.apply(*value);
            }
        }
    }

    fn column_transform(self, column: &[f64]) -> Option<Affine> {
        if column.is_empty() {
            return None;
        }
        match self {
            NormalizationPolicy::None => None,
            NormalizationPolicy::MaxScale => {
                let max = column.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
                (max > 0.0).then_some(Affine::scale(0.0, max))
            }
            NormalizationPolicy::MinMax => {
                let min = column.iter().copied().fold(f64::INFINITY, f64::min);
                let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                Some(Affine::scale(min, max - min))
            }
            NormalizationPolicy::ZScore => {
                let n = column.len() as f64;
                let mean = column.iter().sum::<f64>() / n;
                let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                Some(Affine::scale(mean, variance.sqrt()))
            }
        }
    }
}

/// `(v - offset) / divisor`, collapsing to 0 when the divisor is not positive.
#[derive(Debug, Clone, Copy)]
struct Affine {
    offset: f64,
    divisor: f64,
}

impl Affine {
    fn scale(offset: f64, divisor: f64) -> Self {
        Self { offset, divisor }
    }

    fn apply(self, value: f64) -> f64 {
        if self.divisor > 0.0 {
            (value - self.offset) / self.divisor
        } else {
            0.0
        }
    }
}
