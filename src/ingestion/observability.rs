use std::path::PathBuf;

use crate::error::AnalysisError;

use super::unified::SourceFormat;

/// Severity classification used for failure callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The source was reachable but its content was unusable (bad header, malformed CSV).
    Error,
    /// I/O failures: missing file, permission denied, device errors.
    Critical,
}

/// Context about one load attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The source path.
    pub path: PathBuf,
    /// Format used to read it.
    pub format: SourceFormat,
}

/// Stats reported after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of listings loaded.
    pub rows: usize,
    /// Listings with at least one numeric column that did not parse.
    pub rows_with_unparsable_fields: usize,
}

/// Observer interface for load outcomes.
pub trait IngestionObserver: Send + Sync {
    /// Called when the source was read completely.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when the source could not be read.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &AnalysisError) {}

    /// Called when a failure meets the configured alert threshold.
    ///
    /// Forwards to [`Self::on_failure`] unless overridden.
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards load events to the [`log`] facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl IngestionObserver for LogObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        log::info!(
            "loaded {} listings from {} ({:?})",
            stats.rows,
            ctx.path.display(),
            ctx.format
        );
        if stats.rows_with_unparsable_fields > 0 {
            log::warn!(
                "{} of {} listings in {} have unparsable price, bedrooms or rating; filters will skip them",
                stats.rows_with_unparsable_fields,
                stats.rows,
                ctx.path.display()
            );
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        log::error!(
            "[{severity:?}] failed to load {} ({:?}): {error}",
            ctx.path.display(),
            ctx.format
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        log::error!(
            "[ALERT][{severity:?}] listing source {} is unavailable: {error}",
            ctx.path.display()
        );
    }
}
