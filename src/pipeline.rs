//! End-to-end analysis run: load → filter → aggregate → display → render → persist.
//!
//! The pipeline never talks to a terminal or picks file names itself. Filter bounds come from a
//! [`ParameterSource`], statistics go to a [`StatisticsDisplay`], and the rendered report goes to
//! a [`ReportSink`]. [`crate::prompt::Prompter`] implements all three for interactive use;
//! [`Collaborators`] combines independent implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AnalysisResult;
use crate::execution::{ExecutionEngine, ExecutionOptions, LogExecutionObserver};
use crate::ingestion::{ingest_from_path, IngestionOptions};
use crate::processing::{apply_criteria, compute_statistics};
use crate::report::{write_report, ReportFormat};
use crate::types::{FilterCriteria, Listing, Statistics};

/// Supplies the five filter bounds.
pub trait ParameterSource {
    fn filter_criteria(&mut self) -> AnalysisResult<FilterCriteria>;
}

/// Receives statistics as soon as they are computed.
pub trait StatisticsDisplay {
    fn show(&mut self, stats: &Statistics) -> AnalysisResult<()>;
}

/// Persists the rendered report.
pub trait ReportSink {
    fn persist(&mut self, report: &str) -> AnalysisResult<()>;
}

impl ParameterSource for FilterCriteria {
    fn filter_criteria(&mut self) -> AnalysisResult<FilterCriteria> {
        Ok(*self)
    }
}

/// Displays nothing.
impl StatisticsDisplay for () {
    fn show(&mut self, _stats: &Statistics) -> AnalysisResult<()> {
        Ok(())
    }
}

/// Writes the report to a fixed path, overwriting it.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReportSink {
    fn persist(&mut self, report: &str) -> AnalysisResult<()> {
        write_report(&self.path, report)
    }
}

/// Three independent collaborators acting as one.
#[derive(Debug)]
pub struct Collaborators<P, D, S> {
    pub parameters: P,
    pub display: D,
    pub sink: S,
}

impl<P: ParameterSource, D, S> ParameterSource for Collaborators<P, D, S> {
    fn filter_criteria(&mut self) -> AnalysisResult<FilterCriteria> {
        self.parameters.filter_criteria()
    }
}

impl<P, D: StatisticsDisplay, S> StatisticsDisplay for Collaborators<P, D, S> {
    fn show(&mut self, stats: &Statistics) -> AnalysisResult<()> {
        self.display.show(stats)
    }
}

impl<P, D, S: ReportSink> ReportSink for Collaborators<P, D, S> {
    fn persist(&mut self, report: &str) -> AnalysisResult<()> {
        self.sink.persist(report)
    }
}

/// Configuration for a full analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// How the listing source is read.
    pub ingestion: IngestionOptions,
    /// If set, filtering runs on a parallel [`ExecutionEngine`]; otherwise sequentially.
    pub execution: Option<ExecutionOptions>,
    /// Layout of the persisted report.
    pub report_format: ReportFormat,
}

/// Filter `listings` and aggregate the survivors.
pub fn analyze(
    listings: &[Listing],
    criteria: &FilterCriteria,
    execution: Option<&ExecutionOptions>,
) -> AnalysisResult<Statistics> {
    let filtered = match execution {
        Some(opts) => ExecutionEngine::new(opts.clone())?
            .with_observer(Arc::new(LogExecutionObserver))
            .apply_criteria(listings, criteria),
        None => apply_criteria(listings, criteria),
    };
    log::debug!(
        "{} of {} listings match {:?}",
        filtered.len(),
        listings.len(),
        criteria
    );
    Ok(compute_statistics(filtered))
}

/// Run the whole analysis against the listing file at `source`.
///
/// Failing to load the source aborts before any parameter is requested. Statistics are shown
/// before the report is persisted, so a failing sink still leaves them displayed. Returns the
/// computed statistics on success.
pub fn run_analysis<C>(source: impl AsRef<Path>, session: &mut C, options: &AnalysisOptions) -> AnalysisResult<Statistics>
where
    C: ParameterSource + StatisticsDisplay + ReportSink + ?Sized,
{
    let listings = ingest_from_path(source, &options.ingestion)?;
    let criteria = session.filter_criteria()?;
    let stats = analyze(&listings, &criteria, options.execution.as_ref())?;
    session.show(&stats)?;

    let report = options.report_format.render(&stats)?;
    session.persist(&report)?;
    log::info!(
        "report written: {} listings, {} hosts",
        stats.total_listings,
        stats.ranked_hosts.len()
    );
    Ok(stats)
}
