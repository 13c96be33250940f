use std::fmt;
use std::time::Duration;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted { rows: usize, chunks: usize },
    ChunkFinished { start_row: usize, row_count: usize, kept: usize },
    RunFinished { elapsed: Duration, summary: RunSummary },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Logs execution events at `debug` level through the [`log`] facade.
#[derive(Debug, Default)]
pub struct LogExecutionObserver;

impl ExecutionObserver for LogExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunFinished { elapsed, summary } => {
                log::debug!("parallel filter finished in {elapsed:?}: {summary}");
            }
            other => log::trace!("{other:?}"),
        }
    }
}

/// Row counts for one filter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub chunks: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows_in={}, rows_out={}, chunks={}",
            self.rows_in, self.rows_out, self.chunks
        )
    }
}
