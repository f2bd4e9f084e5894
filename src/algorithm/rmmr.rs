//! RMMR: recommendation of move method refactorings.
//!
//! The distance from a method to a class blends a conceptual term (mean
//! class-set distance to the methods the class owns) with a contextual term
//! (cosine distance between the method's statistic vector and the class's).
//! Confidence rewards a method that is far from its own class and close to
//! the target, discounted for small classes and for methods that reference
//! few classes.

use super::Algorithm;
use crate::distance::{class_set_distance, cosine_distance, FALLBACK_DISTANCE};
use crate::entity::{ClassEntity, CodeEntity, MethodEntity};
use crate::errors::{Error, Result};
use crate::execution::ExecutionContext;
use crate::refactoring::Refactoring;
use crate::scoring::{
    entry_point_adjustment, helper_class_adjustment, power_coefficient, size_coefficient,
};
use std::collections::HashMap;

pub const NAME: &str = "RMMR";

/// Proposals below this accuracy are dropped.
pub const MIN_ACCURACY: f64 = 0.01;

const CONCEPTUAL_WEIGHT: f64 = 0.4;
const CONTEXTUAL_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, Copy, Default)]
pub struct Rmmr;

/// A candidate class with the methods it owns at the start of the run.
struct Candidate<'a> {
    class: &'a ClassEntity,
    methods: Vec<&'a MethodEntity>,
}

/// Running minimum plus the distance to the unit's own class.
#[derive(Clone, Copy)]
struct Scan<'a> {
    distance: f64,
    candidate: Option<&'a Candidate<'a>>,
    source: Option<(f64, &'a Candidate<'a>)>,
}

impl<'a> Scan<'a> {
    fn new() -> Self {
        Self {
            distance: f64::INFINITY,
            candidate: None,
            source: None,
        }
    }

    fn observe(mut self, unit: &MethodEntity, distance: f64, candidate: &'a Candidate<'a>) -> Self {
        if self.source.is_none() && candidate.class.name() == unit.class_name() {
            self.source = Some((distance, candidate));
        }
        if distance < self.distance {
            self.distance = distance;
            self.candidate = Some(candidate);
        }
        self
    }

    fn combine(first: Self, second: Self) -> Self {
        let source = first.source.or(second.source);
        let mut winner = if first.distance > second.distance {
            second
        } else {
            first
        };
        winner.source = source;
        winner
    }
}

impl Algorithm for Rmmr {
    fn name(&self) -> &'static str {
        NAME
    }

    fn calculate_refactorings(
        &self,
        ctx: &ExecutionContext,
        enable_field_refactorings: bool,
    ) -> Result<Vec<Refactoring>> {
        if enable_field_refactorings {
            log::error!("Field refactorings are not supported by {}, only methods are evaluated", NAME);
            ctx.warn("RMMR does not support field refactorings");
        }

        let entities = ctx.entities();
        let candidates = candidates(entities.classes(), entities.methods());
        let units = entities.methods();

        let mut refactorings = Vec::new();
        for (done, unit) in units.iter().enumerate() {
            ctx.report_progress((done + 1) as f64 / units.len() as f64);
            ctx.check_canceled()?;
            if !unit.is_movable() || candidates.len() < 2 {
                continue;
            }
            if let Some(refactoring) = find_refactoring(ctx, unit, &candidates)? {
                refactorings.push(refactoring);
            }
        }
        Ok(refactorings)
    }
}

/// Pairs every class with the methods it owns.
///
/// A method is attributed to the first class carrying its class name; any
/// other number of matches is logged.
fn candidates<'a>(classes: &'a [ClassEntity], methods: &'a [MethodEntity]) -> Vec<Candidate<'a>> {
    let mut first_by_name: HashMap<&str, usize> = HashMap::new();
    let mut matches: HashMap<&str, usize> = HashMap::new();
    for (i, class) in classes.iter().enumerate() {
        first_by_name.entry(class.name()).or_insert(i);
        *matches.entry(class.name()).or_default() += 1;
    }

    let mut owned: Vec<Vec<&MethodEntity>> = vec![Vec::new(); classes.len()];
    for method in methods {
        match matches.get(method.class_name()).copied().unwrap_or(0) {
            0 => log::warn!("No class owns method {}", method.signature()),
            1 => {}
            n => log::error!("Found {} classes that own method {}", n, method.signature()),
        }
        if let Some(&i) = first_by_name.get(method.class_name()) {
            owned[i].push(method);
        }
    }

    classes
        .iter()
        .zip(owned)
        .map(|(class, methods)| Candidate { class, methods })
        .collect()
}

fn find_refactoring(
    ctx: &ExecutionContext,
    unit: &MethodEntity,
    candidates: &[Candidate<'_>],
) -> Result<Option<Refactoring>> {
    let scan = ctx.run_parallel(
        candidates,
        Scan::new,
        |candidate, scan| Ok(scan.observe(unit, distance(unit, candidate)?, candidate)),
        Scan::combine,
    )?;

    let Some(target) = scan.candidate else {
        log::warn!("{}", Error::missing_target(unit.signature()));
        return Ok(None);
    };

    let min_distance = scan.distance;
    let (source_distance, source_methods) = scan
        .source
        .map(|(d, source)| (d, source.methods.len()))
        .unwrap_or((FALLBACK_DISTANCE, 0));
    let source_difference = source_distance - min_distance;
    let accuracy = blended_accuracy(
        unit,
        source_distance,
        min_distance,
        source_methods,
        target.methods.len(),
    );

    log::debug!(
        "{}: nearest {} at {:.3}, own class at {:.3}, accuracy {:.3}",
        unit.signature(),
        target.class.name(),
        min_distance,
        source_distance,
        accuracy
    );

    if !is_reportable(unit, target.class, source_difference, accuracy) {
        return Ok(None);
    }
    Ok(Some(
        Refactoring::new(unit.signature(), target.class.name(), accuracy, false)
            .with_scope(ctx.scope()),
    ))
}

/// Score of moving `unit` to a class at `min_distance` from a source class at
/// `source_distance`, before the accuracy floor.
///
/// Since the source is itself a candidate, `min_distance <= source_distance`
/// and the blended term is at least 0.3.
fn blended_accuracy(
    unit: &MethodEntity,
    source_distance: f64,
    min_distance: f64,
    source_methods: usize,
    target_methods: usize,
) -> f64 {
    let mut accuracy = (0.6 * source_distance
        + 0.3 * (1.0 - min_distance)
        + 0.1 * (source_distance - min_distance))
        * power_coefficient(unit.properties().number_of_classes());
    accuracy *= size_coefficient(source_methods, 2.0) * size_coefficient(target_methods, 4.0);
    accuracy = helper_class_adjustment(unit.class_name(), accuracy);
    entry_point_adjustment(unit.simple_name(), accuracy)
}

/// A proposal must improve on the own class, clear [`MIN_ACCURACY`] and leave
/// the class it starts in.
fn is_reportable(unit: &MethodEntity, target: &ClassEntity, source_difference: f64, accuracy: f64) -> bool {
    source_difference != 0.0 && accuracy >= MIN_ACCURACY && target.name() != unit.class_name()
}

/// `0.4 * conceptual + 0.6 * contextual`.
fn distance(unit: &MethodEntity, candidate: &Candidate<'_>) -> Result<f64> {
    let statistic = candidate.class.statistic_vector();
    let contextual = if statistic.is_empty() {
        FALLBACK_DISTANCE
    } else {
        cosine_distance(unit.statistic_vector(), statistic)?
    };
    Ok(CONCEPTUAL_WEIGHT * conceptual_distance(unit, candidate) + CONTEXTUAL_WEIGHT * contextual)
}

/// Mean class-set distance to the other methods of the class, 1 when it has none.
fn conceptual_distance(unit: &MethodEntity, candidate: &Candidate<'_>) -> f64 {
    let distances: Vec<f64> = candidate
        .methods
        .iter()
        .filter(|other| other.signature() != unit.signature())
        .map(|other| class_set_distance(unit.properties(), other.properties()))
        .collect();
    if distances.is_empty() {
        FALLBACK_DISTANCE
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntitySearchResult, RelevantProperties};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn method(signature: &str, classes: &[&str], vector: Vec<f64>) -> MethodEntity {
        let properties = classes
            .iter()
            .fold(RelevantProperties::new(), |props, class| props.with_class(*class, 1));
        MethodEntity::new(signature, properties, vector)
    }

    fn class(name: &str) -> ClassEntity {
        ClassEntity::new(name, RelevantProperties::new().with_class(name, 1), vec![])
    }

    fn run(entities: EntitySearchResult, fields: bool) -> Result<Vec<Refactoring>> {
        let ctx = ExecutionContext::new(Arc::new(entities), 2)?;
        Rmmr.calculate_refactorings(&ctx, fields)
    }

    #[test]
    fn test_conceptual_distance_excludes_the_unit() {
        let unit = method("p.A.m()", &["p.B"], vec![]);
        let peer = method("p.A.n()", &["p.A", "p.B"], vec![]);
        let class = class("p.A");
        let candidate = Candidate {
            class: &class,
            methods: vec![&unit, &peer],
        };
        assert!((conceptual_distance(&unit, &candidate) - 0.5).abs() < 1e-12);

        let lonely = Candidate {
            class: &class,
            methods: vec![&unit],
        };
        assert_eq!(conceptual_distance(&unit, &lonely), FALLBACK_DISTANCE);
    }

    #[test]
    fn test_methods_are_attributed_to_first_matching_class() {
        let classes = vec![class("p.A"), class("p.A"), class("p.B")];
        let methods = vec![
            method("p.A.m()", &[], vec![]),
            method("p.B.n()", &[], vec![]),
            method("p.C.o()", &[], vec![]),
        ];
        let candidates = candidates(&classes, &methods);
        assert_eq!(candidates[0].methods.len(), 1);
        assert!(candidates[1].methods.is_empty());
        assert_eq!(candidates[2].methods.len(), 1);
    }

    #[test]
    fn test_dimension_mismatch_fails_the_run() {
        let entities = EntitySearchResult::new(
            vec![class("p.A"), class("p.B")],
            vec![
                method("p.A.m()", &["p.B"], vec![1.0, 0.0]),
                method("p.B.n()", &["p.B"], vec![1.0]),
            ],
            vec![],
            0,
        )
        .unwrap();
        assert!(matches!(run(entities, false), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_method_without_class_references_is_never_moved() {
        let entities = EntitySearchResult::new(
            vec![class("p.A"), class("p.B")],
            vec![
                method("p.A.m()", &[], vec![0.0, 1.0]),
                method("p.B.n()", &["p.B"], vec![0.0, 1.0]),
                method("p.B.o()", &["p.B"], vec![0.0, 1.0]),
            ],
            vec![],
            0,
        )
        .unwrap();
        assert!(run(entities, false).unwrap().is_empty());
    }

    #[test]
    fn test_accuracy_floor_drops_weak_proposals() {
        let unit = method("p.A.m()", &["p.B"], vec![]);
        let target = class("p.B");
        assert!(!is_reportable(&unit, &target, 0.2, 0.009));
        assert!(!is_reportable(&unit, &target, 0.2, 0.0));
        assert!(!is_reportable(&unit, &target, 0.2, f64::NAN));
        assert!(is_reportable(&unit, &target, 0.2, MIN_ACCURACY));
    }

    #[test]
    fn test_no_improvement_or_own_class_is_not_reported() {
        let unit = method("p.A.m()", &["p.B"], vec![]);
        assert!(!is_reportable(&unit, &class("p.B"), 0.0, 0.5));
        assert!(!is_reportable(&unit, &class("p.A"), 0.2, 0.5));
    }

    #[test]
    fn test_weakest_combination_stays_above_floor() {
        // One referenced class, singleton source and target, entry point.
        let unit = method("p.A.main()", &["p.B"], vec![]);
        let accuracy = blended_accuracy(&unit, 0.0, 0.0, 1, 1);
        assert!((accuracy - 0.3 * 0.5 * 0.5 * 0.75 * 0.5).abs() < 1e-12);
        assert!(accuracy > MIN_ACCURACY);
    }

    fn signatures() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "p.A.m()",
            "p.A.main()",
            "p.StringUtils.trim()",
            "p.QueryBuilder.main()",
        ])
    }

    proptest! {
        #[test]
        fn prop_method_with_class_references_clears_floor(
            signature in signatures(),
            references in 1usize..4,
            min_distance in 0.0f64..1.6,
            extra in 0.0f64..0.4,
            source_methods in 0usize..5,
            target_methods in 0usize..5,
        ) {
            let referenced: Vec<String> = (0..references).map(|i| format!("p.R{}", i)).collect();
            let referenced: Vec<&str> = referenced.iter().map(String::as_str).collect();
            let unit = method(signature, &referenced, vec![]);
            let accuracy = blended_accuracy(
                &unit,
                min_distance + extra,
                min_distance,
                source_methods,
                target_methods,
            );
            prop_assert!(accuracy >= MIN_ACCURACY);
        }
    }
}
