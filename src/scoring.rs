//! Confidence scoring for refactoring proposals.
//!
//! Gap-based accuracy rewards a winner that is both close in absolute terms
//! and well separated from the runner-up. The remaining functions are the
//! heuristic adjustments RMMR layers on top of its own blended score.

/// Class name fragments that mark helper classes which attract many methods.
pub const HELPER_CLASS_MARKERS: [&str; 3] = ["Util", "Factory", "Builder"];

/// Above this, accuracy for helper classes is halved.
pub const HELPER_HIGH_ACCURACY: f64 = 0.75;

/// Below this, accuracy for helper classes is doubled.
pub const HELPER_LOW_ACCURACY: f64 = 0.25;

/// Smallest distance the separation term divides by, so a vanishing gap
/// drives accuracy to zero even for an exact match.
pub const MIN_SEPARATION_SCALE: f64 = 1e-3;

/// Confidence in [0, 1] from the winning distance and the smallest gap to a
/// competing candidate.
///
/// `(1 - d_min) * gap / (gap + max(d_min, MIN_SEPARATION_SCALE))`: tends to
/// zero with the gap whatever the winning distance, grows with the gap and
/// shrinks as the winning distance grows. An infinite gap (no competitor)
/// leaves only the proximity term.
pub fn gap_based_accuracy(min_distance: f64, gap: f64) -> f64 {
    if gap.is_nan() || gap <= 0.0 || min_distance.is_nan() {
        return 0.0;
    }
    let proximity = (1.0 - min_distance).clamp(0.0, 1.0);
    let separation = if gap.is_infinite() {
        1.0
    } else {
        gap / (gap + min_distance.max(MIN_SEPARATION_SCALE))
    };
    (proximity * separation).clamp(0.0, 1.0)
}

/// Discount for classes with few methods: `1 - 1 / (factor * n^2)`.
///
/// A class with no methods is not discounted.
pub fn size_coefficient(method_count: usize, factor: f64) -> f64 {
    if method_count == 0 {
        return 1.0;
    }
    let n = method_count as f64;
    1.0 - 1.0 / (factor * n * n)
}

/// `1 - 1 / (2 * c)` where `c` is how many classes a method references.
///
/// A method that references no class gets no confidence at all.
pub fn power_coefficient(referenced_classes: usize) -> f64 {
    if referenced_classes == 0 {
        return 0.0;
    }
    1.0 - 1.0 / (2.0 * referenced_classes as f64)
}

pub fn is_helper_class(class_name: &str) -> bool {
    HELPER_CLASS_MARKERS
        .iter()
        .any(|marker| class_name.contains(marker))
}

/// Pulls extreme scores of methods living in helper classes toward the middle.
pub fn helper_class_adjustment(class_name: &str, accuracy: f64) -> f64 {
    if !is_helper_class(class_name) {
        return accuracy;
    }
    if accuracy > HELPER_HIGH_ACCURACY {
        accuracy / 2.0
    } else if accuracy < HELPER_LOW_ACCURACY {
        accuracy * 2.0
    } else {
        accuracy
    }
}

/// Entry points rarely belong anywhere else.
pub fn entry_point_adjustment(method_simple_name: &str, accuracy: f64) -> f64 {
    if method_simple_name == "main" {
        accuracy / 2.0
    } else {
        accuracy
    }
}
