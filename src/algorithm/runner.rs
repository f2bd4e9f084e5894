use super::{AlgorithmKind, AlgorithmResult};
use crate::entity::EntitySearchResult;
use crate::execution::{CancellationToken, ExecutionContext};
use crate::progress::ProgressSink;
use std::sync::Arc;
use std::time::Duration;

/// Options shared by every algorithm of one analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub enable_field_refactorings: bool,
    /// Worker threads per algorithm; 0 means available parallelism.
    pub threads: usize,
    pub scope: Option<String>,
}

/// Runs each selected algorithm in order over the same entities.
///
/// Each algorithm gets its own [`ExecutionContext`]. A failing or panicking
/// algorithm yields a failed result and the next one still runs. Once the
/// token is cancelled, the current and all remaining algorithms report
/// cancellation.
pub fn run_algorithms(
    entities: Arc<EntitySearchResult>,
    kinds: &[AlgorithmKind],
    options: &RunOptions,
    progress: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
) -> Vec<AlgorithmResult> {
    log::info!(
        "Running {} algorithm(s) over {} classes, {} methods, {} fields",
        kinds.len(),
        entities.classes().len(),
        entities.methods().len(),
        entities.fields().len()
    );

    kinds
        .iter()
        .map(|kind| {
            let ctx = match ExecutionContext::new(entities.clone(), options.threads) {
                Ok(ctx) => ctx
                    .with_cancellation(cancel.clone())
                    .with_progress(progress.clone())
                    .with_stage(kind.name())
                    .with_scope(options.scope.clone()),
                Err(error) => {
                    log::error!("Cannot start {}: {}", kind, error);
                    return AlgorithmResult::failure(kind.name(), error, Duration::ZERO, 0);
                }
            };
            kind.create().run(&ctx, options.enable_field_refactorings)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{RecordingProgressSink, SilentProgressSink};

    #[test]
    fn test_each_kind_gets_a_stage_and_a_result() {
        let recorder = RecordingProgressSink::new();
        let results = run_algorithms(
            Arc::new(EntitySearchResult::default()),
            &AlgorithmKind::ALL,
            &RunOptions {
                threads: 2,
                ..Default::default()
            },
            Arc::new(recorder.clone()),
            CancellationToken::new(),
        );

        let names: Vec<&str> = results.iter().map(AlgorithmResult::algorithm_name).collect();
        assert_eq!(names, vec!["MRI", "ARI", "RMMR"]);
        assert!(results.iter().all(AlgorithmResult::is_success));
        assert!(results.iter().all(|r| r.threads_used() == 2));
        assert_eq!(recorder.stages(), vec!["MRI", "ARI", "RMMR"]);
        assert_eq!(recorder.completed_stages(), vec!["MRI", "ARI", "RMMR"]);
    }

    #[test]
    fn test_cancelled_token_fails_every_run_with_units() {
        use crate::entity::{ClassEntity, MethodEntity, RelevantProperties};

        let entities = EntitySearchResult::new(
            vec![
                ClassEntity::new("p.A", RelevantProperties::new(), vec![]),
                ClassEntity::new("p.B", RelevantProperties::new(), vec![]),
            ],
            vec![MethodEntity::new("p.A.m()", RelevantProperties::new(), vec![])],
            vec![],
            0,
        )
        .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let results = run_algorithms(
            Arc::new(entities),
            &AlgorithmKind::ALL,
            &RunOptions::default(),
            Arc::new(SilentProgressSink),
            cancel,
        );
        assert!(results.iter().all(AlgorithmResult::was_cancelled));
        assert!(results.iter().all(|r| r.refactorings().is_empty()));
    }
}
