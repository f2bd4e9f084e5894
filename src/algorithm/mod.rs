//! Move-method/field recommendation algorithms.
//!
//! Every algorithm walks the movable units of an [`EntitySearchResult`]
//! sequentially and scans candidate classes for each unit in parallel:
//!
//! - [`Mri`]: pure set-overlap distance; an accepted method move updates class
//!   membership before the next unit is considered.
//! - [`Ari`]: pure set-overlap distance against unmodified classes.
//! - [`Rmmr`]: methods only; blends a conceptual distance with the cosine
//!   distance of statistic vectors and applies heuristic adjustments.
//!
//! [`EntitySearchResult`]: crate::entity::EntitySearchResult

pub mod ari;
pub mod mri;
pub mod result;
pub mod rmmr;
pub mod runner;
pub mod scan;

pub use ari::Ari;
pub use mri::Mri;
pub use result::AlgorithmResult;
pub use rmmr::Rmmr;
pub use runner::{run_algorithms, RunOptions};
pub use scan::{nearest_class, NearestClass};

use crate::errors::{Error, Result};
use crate::execution::ExecutionContext;
use crate::refactoring::Refactoring;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::time::Instant;

pub trait Algorithm: Send + Sync {
    /// Stable name used in reports and configuration.
    fn name(&self) -> &'static str;

    /// Computes proposals over `ctx.entities()`.
    ///
    /// Must poll `ctx.check_canceled()` at least once per unit.
    fn calculate_refactorings(
        &self,
        ctx: &ExecutionContext,
        enable_field_refactorings: bool,
    ) -> Result<Vec<Refactoring>>;

    /// Runs the algorithm, capturing errors and panics into the result.
    fn run(&self, ctx: &ExecutionContext, enable_field_refactorings: bool) -> AlgorithmResult {
        let name = self.name();
        log::info!("Starting {}", name);
        ctx.progress().start_stage(name);
        let start = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.calculate_refactorings(ctx, enable_field_refactorings)
        }))
        .unwrap_or_else(|payload| {
            Err(Error::AlgorithmPanicked {
                algorithm: name.to_string(),
                message: panic_message(payload.as_ref()),
            })
        });

        let elapsed = start.elapsed();
        ctx.progress().complete_stage(name);

        match outcome {
            Ok(refactorings) => {
                log::info!(
                    "{} finished in {:?} with {} refactorings",
                    name,
                    elapsed,
                    refactorings.len()
                );
                AlgorithmResult::success(name, refactorings, elapsed, ctx.threads_used())
            }
            Err(error) => {
                if error.is_cancellation() {
                    log::info!("{} cancelled after {:?}", name, elapsed);
                } else {
                    log::error!("{} failed: {}", name, error);
                }
                AlgorithmResult::failure(name, error, elapsed, ctx.threads_used())
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Selectable algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum AlgorithmKind {
    Mri,
    Ari,
    Rmmr,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [AlgorithmKind::Mri, AlgorithmKind::Ari, AlgorithmKind::Rmmr];

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Mri => mri::NAME,
            AlgorithmKind::Ari => ari::NAME,
            AlgorithmKind::Rmmr => rmmr::NAME,
        }
    }

    pub fn create(self) -> Box<dyn Algorithm> {
        match self {
            AlgorithmKind::Mri => Box::new(Mri),
            AlgorithmKind::Ari => Box::new(Ari),
            AlgorithmKind::Rmmr => Box::new(Rmmr),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::configuration(format!("unknown algorithm '{}'", s)))
    }
}

impl Serialize for AlgorithmKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name().to_ascii_lowercase())
    }
}

impl<'de> Deserialize<'de> for AlgorithmKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
