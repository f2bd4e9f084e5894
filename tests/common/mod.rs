// Shared fixtures for movemap integration tests
#![allow(dead_code)]

use movemap::{
    AlgorithmKind, AlgorithmResult, ClassEntity, EntitySearchResult, ExecutionContext,
    MethodEntity, RelevantProperties,
};
use std::sync::Arc;

pub const CLASS_A: &str = "p.ClassA";
pub const CLASS_B: &str = "p.ClassB";
pub const ENVIOUS_METHOD: &str = "p.ClassA.envy()";

/// Builds a property set from `(kind, name)` pairs, all with weight 1.
///
/// Kinds are `c` (class), `f` (field) and `m` (non-override method).
pub fn props(entries: &[(&str, &str)]) -> RelevantProperties {
    entries
        .iter()
        .fold(RelevantProperties::new(), |props, (kind, name)| match *kind {
            "c" => props.with_class(*name, 1),
            "f" => props.with_field(*name, 1),
            "m" => props.with_method(*name, 1),
            other => panic!("unknown property kind {}", other),
        })
}

pub fn class(name: &str, entries: &[(&str, &str)]) -> ClassEntity {
    ClassEntity::new(name, props(entries), vec![])
}

pub fn method(signature: &str, entries: &[(&str, &str)], vector: Vec<f64>) -> MethodEntity {
    MethodEntity::new(signature, props(entries), vector)
}

/// Two classes; `p.ClassA.envy()` uses only members of `p.ClassB`.
///
/// Statistic vectors: `stay` leans on the first metric, every other method on
/// the second.
pub fn envy_project() -> EntitySearchResult {
    EntitySearchResult::new(
        vec![
            class(
                CLASS_A,
                &[
                    ("c", CLASS_A),
                    ("f", "p.ClassA.a"),
                    ("m", "p.ClassA.stay()"),
                    ("m", ENVIOUS_METHOD),
                ],
            ),
            class(
                CLASS_B,
                &[
                    ("c", CLASS_B),
                    ("f", "p.ClassB.b"),
                    ("m", "p.ClassB.work()"),
                    ("m", "p.ClassB.helper()"),
                ],
            ),
        ],
        vec![
            method(
                "p.ClassA.stay()",
                &[("c", CLASS_A), ("f", "p.ClassA.a"), ("m", "p.ClassA.stay()")],
                vec![1.0, 0.0],
            ),
            method(
                ENVIOUS_METHOD,
                &[
                    ("c", CLASS_B),
                    ("f", "p.ClassB.b"),
                    ("m", "p.ClassB.work()"),
                    ("m", ENVIOUS_METHOD),
                ],
                vec![0.0, 1.0],
            ),
            method(
                "p.ClassB.work()",
                &[("c", CLASS_B), ("f", "p.ClassB.b"), ("m", "p.ClassB.work()")],
                vec![0.0, 1.0],
            ),
            method(
                "p.ClassB.helper()",
                &[
                    ("c", CLASS_B),
                    ("f", "p.ClassB.b"),
                    ("m", "p.ClassB.helper()"),
                    ("m", "p.ClassB.work()"),
                ],
                vec![0.0, 1.0],
            ),
        ],
        vec![],
        0,
    )
    .unwrap()
}

/// Same classes without the envious method; every method already sits well.
pub fn balanced_project() -> EntitySearchResult {
    EntitySearchResult::new(
        vec![
            class(CLASS_A, &[("c", CLASS_A), ("f", "p.ClassA.a"), ("m", "p.ClassA.stay()")]),
            class(
                CLASS_B,
                &[
                    ("c", CLASS_B),
                    ("f", "p.ClassB.b"),
                    ("m", "p.ClassB.work()"),
                    ("m", "p.ClassB.helper()"),
                ],
            ),
        ],
        vec![
            method(
                "p.ClassA.stay()",
                &[("c", CLASS_A), ("f", "p.ClassA.a"), ("m", "p.ClassA.stay()")],
                vec![1.0, 0.0],
            ),
            method(
                "p.ClassB.work()",
                &[("c", CLASS_B), ("f", "p.ClassB.b"), ("m", "p.ClassB.work()")],
                vec![0.0, 1.0],
            ),
            method(
                "p.ClassB.helper()",
                &[
                    ("c", CLASS_B),
                    ("f", "p.ClassB.b"),
                    ("m", "p.ClassB.helper()"),
                    ("m", "p.ClassB.work()"),
                ],
                vec![0.0, 1.0],
            ),
        ],
        vec![],
        0,
    )
    .unwrap()
}

/// Three classes where moving `p.Z.a()` first drags `p.Z.b()` along.
///
/// `reversed` lists `b` before `a`.
pub fn order_sensitive_project(reversed: bool) -> EntitySearchResult {
    let a = method(
        "p.Z.a()",
        &[("c", "p.X"), ("f", "p.X.f"), ("m", "p.Z.a()")],
        vec![],
    );
    let b = method(
        "p.Z.b()",
        &[("m", "p.Z.a()"), ("m", "p.X.x()"), ("m", "p.Z.b()")],
        vec![],
    );
    let methods = if reversed { vec![b, a] } else { vec![a, b] };
    EntitySearchResult::new(
        vec![
            class("p.X", &[("c", "p.X"), ("f", "p.X.f"), ("m", "p.X.x()")]),
            class("p.Y", &[("c", "p.Y"), ("f", "p.Y.g"), ("m", "p.Y.y()")]),
            class("p.Z", &[("c", "p.Z"), ("m", "p.Z.a()"), ("m", "p.Z.b()")]),
        ],
        methods,
        vec![],
        0,
    )
    .unwrap()
}

pub fn run(kind: AlgorithmKind, entities: EntitySearchResult, fields: bool) -> AlgorithmResult {
    let ctx = ExecutionContext::new(Arc::new(entities), 2)
        .unwrap()
        .with_stage(kind.name());
    kind.create().run(&ctx, fields)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
