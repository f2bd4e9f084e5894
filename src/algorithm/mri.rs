//! MRI: nearest class by set-overlap distance, with membership updates.
//!
//! Units are processed in list order. When a method is proposed for a move,
//! the class arena is replaced by a snapshot where the method already lives in
//! its target, so later units see the updated partition. Reordering units can
//! therefore change the result.

use super::scan::nearest_class;
use super::Algorithm;
use crate::distance::entity_distance;
use crate::entity::{ClassArena, CodeEntity, EntityKind};
use crate::errors::{Error, Result};
use crate::execution::ExecutionContext;
use crate::refactoring::Refactoring;
use crate::scoring::gap_based_accuracy;

pub const NAME: &str = "MRI";

#[derive(Debug, Clone, Copy, Default)]
pub struct Mri;

impl Algorithm for Mri {
    fn name(&self) -> &'static str {
        NAME
    }

    fn calculate_refactorings(
        &self,
        ctx: &ExecutionContext,
        enable_field_refactorings: bool,
    ) -> Result<Vec<Refactoring>> {
        let entities = ctx.entities();
        let fields = if enable_field_refactorings {
            entities.fields()
        } else {
            &[]
        };
        let units: Vec<&dyn CodeEntity> = entities
            .methods()
            .iter()
            .map(|m| m as &dyn CodeEntity)
            .chain(fields.iter().map(|f| f as &dyn CodeEntity))
            .filter(|unit| unit.is_movable())
            .collect();

        let mut arena = ClassArena::from_result(entities);
        let mut refactorings = Vec::new();

        for (done, unit) in units.iter().enumerate() {
            ctx.check_canceled()?;
            if arena.len() < 2 {
                ctx.report_progress((done + 1) as f64 / units.len() as f64);
                continue;
            }

            let nearest = nearest_class(ctx, arena.classes(), |class| {
                Ok(entity_distance(*unit, class))
            })?;
            ctx.report_progress((done + 1) as f64 / units.len() as f64);

            let Some(target) = nearest.candidate else {
                log::warn!("{}", Error::missing_target(unit.identifier()));
                continue;
            };
            if target.name() == unit.class_name() {
                log::debug!("{} is already in its nearest class", unit.identifier());
                continue;
            }

            let target_name = target.name().to_string();
            let accuracy = gap_based_accuracy(nearest.distance, nearest.gap);
            log::debug!(
                "{} -> {} (distance {:.3}, gap {:.3})",
                unit.identifier(),
                target_name,
                nearest.distance,
                nearest.gap
            );
            refactorings.push(
                Refactoring::new(unit.identifier(), &target_name, accuracy, unit.is_field())
                    .with_scope(ctx.scope()),
            );
            if unit.kind() == EntityKind::Method {
                arena = arena.apply_move(unit.identifier(), unit.class_name(), &target_name);
            }
        }

        Ok(refactorings)
    }
}
