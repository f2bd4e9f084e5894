use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use movemap::{
    AlgorithmKind, ClassEntity, EntitySearchResult, ExecutionContext, MethodEntity,
    RelevantProperties,
};
use std::hint::black_box;
use std::sync::Arc;

const METRICS: usize = 8;

/// `classes` classes of `methods_per_class` methods each. Every method uses
/// its own class and one neighbour, so some of them look envious.
fn synthetic_project(classes: usize, methods_per_class: usize) -> EntitySearchResult {
    let class_name = |i: usize| format!("bench.C{}", i % classes);
    let mut class_entities = Vec::with_capacity(classes);
    let mut methods = Vec::with_capacity(classes * methods_per_class);

    for c in 0..classes {
        let name = class_name(c);
        let neighbour = class_name(c + 1);
        let mut class_props = RelevantProperties::new()
            .with_class(name.clone(), 1)
            .with_field(format!("{name}.state"), 1);

        for m in 0..methods_per_class {
            let signature = format!("{name}.m{m}()");
            class_props.add_not_override_method(signature.clone());

            let envious = m % 3 == 0;
            let home = if envious { &neighbour } else { &name };
            let props = RelevantProperties::new()
                .with_class(home.clone(), 2)
                .with_class(name.clone(), 1)
                .with_field(format!("{home}.state"), 1)
                .with_method(signature.clone(), 1)
                .with_method(format!("{home}.m{}()", (m + 1) % methods_per_class), 1);
            let vector = (0..METRICS)
                .map(|k| ((c * 31 + m * 7 + k * 13) % 17) as f64 / 17.0)
                .collect();
            methods.push(MethodEntity::new(signature, props, vector));
        }
        class_entities.push(ClassEntity::new(name, class_props, vec![]));
    }

    EntitySearchResult::new(class_entities, methods, vec![], 0).unwrap()
}

fn benchmark_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");
    group.sample_size(10);

    for size in [20usize, 60] {
        let entities = Arc::new(synthetic_project(size, 8));
        for kind in AlgorithmKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &entities, |b, entities| {
                let ctx = ExecutionContext::new(entities.clone(), 0).unwrap();
                let algorithm = kind.create();
                b.iter(|| black_box(algorithm.calculate_refactorings(&ctx, false).unwrap()));
            });
        }
    }
    group.finish();
}

fn benchmark_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ari_threads");
    group.sample_size(10);
    let entities = Arc::new(synthetic_project(80, 8));

    for threads in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let ctx = ExecutionContext::new(entities.clone(), threads).unwrap();
            let algorithm = AlgorithmKind::Ari.create();
            b.iter(|| black_box(algorithm.calculate_refactorings(&ctx, false).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_algorithms, benchmark_thread_scaling);
criterion_main!(benches);
