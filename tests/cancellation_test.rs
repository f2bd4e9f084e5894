mod common;

use common::*;
use movemap::progress::{ProgressSink, RecordingProgressSink};
use movemap::{run_algorithms, AlgorithmKind, CancellationToken, RunOptions};
use std::sync::Arc;

/// Cancels the run as soon as the first unit reports progress.
struct CancelOnFirstReport {
    token: CancellationToken,
    inner: RecordingProgressSink,
}

impl ProgressSink for CancelOnFirstReport {
    fn report(&self, stage: &str, fraction: f64) {
        self.token.cancel();
        self.inner.report(stage, fraction);
    }

    fn start_stage(&self, name: &str) {
        self.inner.start_stage(name);
    }

    fn complete_stage(&self, name: &str) {
        self.inner.complete_stage(name);
    }

    fn warn(&self, message: &str) {
        self.inner.warn(message);
    }
}

#[test]
fn test_cancellation_mid_run_discards_partial_results() {
    let token = CancellationToken::new();
    let recorder = RecordingProgressSink::new();
    let sink = Arc::new(CancelOnFirstReport {
        token: token.clone(),
        inner: recorder.clone(),
    });

    let results = run_algorithms(
        Arc::new(envy_project()),
        &AlgorithmKind::ALL,
        &RunOptions {
            threads: 2,
            ..Default::default()
        },
        sink,
        token.clone(),
    );

    assert!(token.is_cancelled());
    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(result.was_cancelled(), "{}", result);
        assert!(result.refactorings().is_empty());
    }
    // Every stage is closed even when it ends early
    assert_eq!(recorder.completed_stages(), vec!["MRI", "ARI", "RMMR"]);
    assert_eq!(recorder.fractions("MRI").len(), 1);
}

#[test]
fn test_cancelled_before_start_runs_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let result = {
        let ctx = movemap::ExecutionContext::new(Arc::new(envy_project()), 2)
            .unwrap()
            .with_cancellation(token);
        AlgorithmKind::Ari.create().run(&ctx, false)
    };
    assert!(result.was_cancelled());
    assert_eq!(result.to_string().lines().last(), Some("  Failed: Operation cancelled"));
}
