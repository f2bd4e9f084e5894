//! ARI: nearest class by set-overlap distance against unmodified classes.

use super::scan::nearest_class;
use super::Algorithm;
use crate::distance::entity_distance;
use crate::entity::CodeEntity;
use crate::errors::{Error, Result};
use crate::execution::ExecutionContext;
use crate::refactoring::Refactoring;
use crate::scoring::gap_based_accuracy;

pub const NAME: &str = "ARI";

#[derive(Debug, Clone, Copy, Default)]
pub struct Ari;

impl Algorithm for Ari {
    fn name(&self) -> &'static str {
        NAME
    }

    fn calculate_refactorings(
        &self,
        ctx: &ExecutionContext,
        enable_field_refactorings: bool,
    ) -> Result<Vec<Refactoring>> {
        let entities = ctx.entities();
        let classes = entities.classes();
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
            .collect();

        let total = units.len();
        let mut refactorings = Vec::new();
        for (done, unit) in units.into_iter().enumerate() {
            ctx.check_canceled()?;
            let proposal = if unit.is_movable() && classes.len() >= 2 {
                find_refactoring(ctx, unit)?
            } else {
                None
            };
            ctx.report_progress((done + 1) as f64 / total as f64);
            refactorings.extend(proposal);
        }
        Ok(refactorings)
    }
}

fn find_refactoring(ctx: &ExecutionContext, unit: &dyn CodeEntity) -> Result<Option<Refactoring>> {
    let nearest = nearest_class(ctx, ctx.entities().classes(), |class| {
        Ok(entity_distance(unit, class))
    })?;

    let Some(target) = nearest.candidate else {
        log::warn!("{}", Error::missing_target(unit.identifier()));
        return Ok(None);
    };
    if target.name() == unit.class_name() {
        return Ok(None);
    }

    Ok(Some(
        Refactoring::new(
            unit.identifier(),
            target.name(),
            gap_based_accuracy(nearest.distance, nearest.gap),
            unit.is_field(),
        )
        .with_scope(ctx.scope()),
    ))
}
