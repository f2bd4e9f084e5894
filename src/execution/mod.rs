//! Execution context shared by one algorithm run.
//!
//! The context owns the worker pool, the cancellation token and the progress
//! sink. Algorithms walk their units sequentially and hand the candidate scan
//! of each unit to [`ExecutionContext::run_parallel`], which blocks until the
//! scan is reduced. Work therefore never overlaps across units.

pub mod cancel;

pub use cancel::CancellationToken;

use crate::entity::EntitySearchResult;
use crate::errors::{Error, Result};
use crate::progress::{ProgressSink, SilentProgressSink};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

#[derive(Clone)]
pub struct ExecutionContext {
    entities: Arc<EntitySearchResult>,
    cancel: CancellationToken,
    progress: Arc<dyn ProgressSink>,
    pool: Arc<ThreadPool>,
    stage: String,
    scope: Option<String>,
}

impl ExecutionContext {
    /// Creates a context with its own pool of `threads` workers.
    ///
    /// `threads == 0` lets rayon pick the available parallelism.
    pub fn new(entities: Arc<EntitySearchResult>, threads: usize) -> Result<Self> {
        Ok(Self::with_pool(entities, Arc::new(build_pool(threads)?)))
    }

    pub fn with_pool(entities: Arc<EntitySearchResult>, pool: Arc<ThreadPool>) -> Self {
        Self {
            entities,
            cancel: CancellationToken::new(),
            progress: Arc::new(SilentProgressSink),
            pool,
            stage: String::new(),
            scope: None,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Name under which progress is reported, usually the algorithm name.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn entities(&self) -> &EntitySearchResult {
        &self.entities
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn progress(&self) -> &dyn ProgressSink {
        self.progress.as_ref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn threads_used(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn check_canceled(&self) -> Result<()> {
        self.cancel.check()
    }

    /// Forwards the completed fraction of the current stage, clamped to [0, 1].
    pub fn report_progress(&self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.progress.report(&self.stage, fraction);
    }

    pub fn warn(&self, message: &str) {
        self.progress.warn(message);
    }

    /// Parallel map-reduce over `items`.
    ///
    /// Items are split into one partition per worker. Each partition folds
    /// its items in order into a fresh accumulator from `factory`, polling
    /// cancellation before every item; partition results are then reduced
    /// pairwise with `combiner`, left before right. Empty input returns
    /// `factory()` untouched. The first error, including cancellation,
    /// abandons the whole job.
    pub fn run_parallel<'a, T, A, F, P, C>(
        &self,
        items: &'a [T],
        factory: F,
        processor: P,
        combiner: C,
    ) -> Result<A>
    where
        T: Sync,
        A: Send,
        F: Fn() -> A + Sync + Send,
        P: Fn(&'a T, A) -> Result<A> + Sync + Send,
        C: Fn(A, A) -> A + Sync + Send,
    {
        if items.is_empty() {
            return Ok(factory());
        }
        self.check_canceled()?;

        let partition = partition_size(items.len(), self.threads_used());
        self.pool.install(|| {
            items
                .par_chunks(partition)
                .map(|chunk| {
                    chunk.iter().try_fold(factory(), |acc, item| {
                        self.check_canceled()?;
                        processor(item, acc)
                    })
                })
                .try_reduce(&factory, |left, right| Ok(combiner(left, right)))
        })
    }
}

fn build_pool(threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("movemap-worker-{}", i))
        .build()
        .map_err(|e| Error::Concurrency(e.to_string()))
}

fn partition_size(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1)).max(1)
}
