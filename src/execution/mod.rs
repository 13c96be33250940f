//! Parallel execution of the listing filters.
//!
//! This module sits "above" [`crate::processing`] and provides chunked, multi-threaded filtering
//! on a dedicated rayon pool. Output order always matches input order, so results are
//! indistinguishable from the sequential filters.

mod observer;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::AnalysisResult;
use crate::processing::matches_criteria;
use crate::types::{FilterCriteria, Listing};

pub use observer::{ExecutionEvent, ExecutionObserver, LogExecutionObserver, RunSummary};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads. If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of listings per chunk; `0` is treated as `1`.
    pub chunk_size: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            chunk_size: 4_096,
        }
    }
}

/// A chunked parallel filter engine.
pub struct ExecutionEngine {
    pool: ThreadPool,
    chunk_size: usize,
    observer: Option<Arc<dyn ExecutionObserver>>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    pub fn new(opts: ExecutionOptions) -> AnalysisResult<Self> {
        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;

        Ok(Self {
            pool,
            chunk_size: opts.chunk_size.max(1),
            observer: None,
        })
    }

    /// Attach an observer for execution events.
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Keep listings for which `predicate` returns `true`, preserving input order.
    pub fn filter_parallel<'a, F>(&self, listings: &'a [Listing], predicate: F) -> Vec<&'a Listing>
    where
        F: Fn(&Listing) -> bool + Send + Sync,
    {
        self.pool.install(|| self.filter_parallel_impl(listings, &predicate))
    }

    /// Parallel equivalent of [`crate::processing::apply_criteria`].
    pub fn apply_criteria<'a>(&self, listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
        self.filter_parallel(listings, |l| matches_criteria(l, criteria))
    }

    fn filter_parallel_impl<'a>(
        &self,
        listings: &'a [Listing],
        predicate: &(dyn Fn(&Listing) -> bool + Send + Sync),
    ) -> Vec<&'a Listing> {
        let start = Instant::now();
        let chunks = listings.len().div_ceil(self.chunk_size);
        self.emit(ExecutionEvent::RunStarted {
            rows: listings.len(),
            chunks,
        });

        // Indexed parallel collect keeps chunk order.
        let per_chunk: Vec<Vec<&'a Listing>> = listings
            .par_chunks(self.chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                let kept: Vec<&'a Listing> = chunk.iter().filter(|l| predicate(l)).collect();
                self.emit(ExecutionEvent::ChunkFinished {
                    start_row: idx * self.chunk_size,
                    row_count: chunk.len(),
                    kept: kept.len(),
                });
                kept
            })
            .collect();

        let out: Vec<&'a Listing> = per_chunk.into_iter().flatten().collect();

        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            summary: RunSummary {
                rows_in: listings.len(),
                rows_out: out.len(),
                chunks,
            },
        });

        out
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
