//! Distance functions between movable units and candidate classes.
//!
//! All distances live in [0, 1] for well-formed input: 0 means identical,
//! 1 means nothing in common.

use crate::entity::{CodeEntity, RelevantProperties};
use crate::errors::{Error, Result};
use std::collections::HashSet;

/// Distance used when a term cannot be computed (empty union, zero norm).
pub const FALLBACK_DISTANCE: f64 = 1.0;

/// Weighted Jaccard-like distance: `1 - |A ∩ B| / |A ∪ B|`.
///
/// Returns [`FALLBACK_DISTANCE`] when the union size is not positive.
pub fn set_overlap_distance(a: &RelevantProperties, b: &RelevantProperties) -> f64 {
    let union = a.size_of_union(b);
    if union <= 0 {
        return FALLBACK_DISTANCE;
    }
    1.0 - a.size_of_intersection(b) as f64 / union as f64
}

/// [`set_overlap_distance`] between two entities' property sets.
pub fn entity_distance(unit: &dyn CodeEntity, candidate: &dyn CodeEntity) -> f64 {
    set_overlap_distance(unit.properties(), candidate.properties())
}

/// Unweighted Jaccard distance over the classes two property sets reference.
pub fn class_set_distance(a: &RelevantProperties, b: &RelevantProperties) -> f64 {
    let left: HashSet<&str> = a.classes().collect();
    let right: HashSet<&str> = b.classes().collect();
    let union = left.union(&right).count();
    if union == 0 {
        return FALLBACK_DISTANCE;
    }
    1.0 - left.intersection(&right).count() as f64 / union as f64
}

pub fn dot_product(v1: &[f64], v2: &[f64]) -> Result<f64> {
    if v1.len() != v2.len() {
        return Err(Error::DimensionMismatch {
            left: v1.len(),
            right: v2.len(),
        });
    }
    Ok(v1.iter().zip(v2).map(|(a, b)| a * b).sum())
}

pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Contextual distance `1 - cos(v1, v2)`.
///
/// Fails on a dimension mismatch. A zero-norm vector yields
/// [`FALLBACK_DISTANCE`] instead of dividing by zero.
pub fn cosine_distance(v1: &[f64], v2: &[f64]) -> Result<f64> {
    let dot = dot_product(v1, v2)?;
    let denominator = norm(v1) * norm(v2);
    if denominator == 0.0 {
        return Ok(FALLBACK_DISTANCE);
    }
    Ok(1.0 - dot / denominator)
}
