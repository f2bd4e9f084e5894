//! Nearest-class scan shared by the move algorithms.

use crate::entity::ClassEntity;
use crate::errors::Result;
use crate::execution::ExecutionContext;

/// Running minimum of one candidate scan.
///
/// `gap` is the smallest separation seen between the winning distance and any
/// other candidate. A tie leaves the earlier candidate in front with a zero
/// gap.
#[derive(Debug, Clone, Copy)]
pub struct NearestClass<'a> {
    pub distance: f64,
    pub gap: f64,
    pub candidate: Option<&'a ClassEntity>,
}

impl Default for NearestClass<'_> {
    fn default() -> Self {
        Self {
            distance: f64::INFINITY,
            gap: f64::INFINITY,
            candidate: None,
        }
    }
}

impl<'a> NearestClass<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one candidate distance into the running minimum.
    pub fn observe(mut self, distance: f64, candidate: &'a ClassEntity) -> Self {
        if distance < self.distance {
            self.gap = self.distance - distance;
            self.distance = distance;
            self.candidate = Some(candidate);
        } else if distance - self.distance < self.gap {
            self.gap = distance - self.distance;
        }
        self
    }

    /// Merges two partial scans; `first` covers the earlier candidates.
    ///
    /// The closer side wins and its gap shrinks to the distance between the
    /// two minima if that is smaller. Grouping changes only floating-point
    /// rounding of the gap, which is accepted for advisory scores.
    pub fn combine(first: Self, second: Self) -> Self {
        let (mut winner, loser) = if first.distance > second.distance {
            (second, first)
        } else {
            (first, second)
        };
        winner.gap = winner.gap.min(loser.distance - winner.distance);
        winner
    }
}

/// Scans `classes` in parallel for the one nearest to a unit.
pub fn nearest_class<'a, D>(
    ctx: &ExecutionContext,
    classes: &'a [ClassEntity],
    distance: D,
) -> Result<NearestClass<'a>>
where
    D: Fn(&ClassEntity) -> Result<f64> + Sync + Send,
{
    ctx.run_parallel(
        classes,
        NearestClass::new,
        |class, nearest| Ok(nearest.observe(distance(class)?, class)),
        NearestClass::combine,
    )
}
