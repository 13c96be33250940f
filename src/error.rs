use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across loading, filtering and reporting.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The stage of an analysis run an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and parsing the listing source.
    Load,
    /// Acquiring the five filter parameters.
    Parameters,
    /// Filtering and aggregating listings.
    Filter,
    /// Surfacing statistics to the display collaborator.
    Display,
    /// Rendering or persisting the report.
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "loading data",
            Stage::Parameters => "reading filter parameters",
            Stage::Filter => "filtering listings",
            Stage::Display => "displaying statistics",
            Stage::Report => "exporting report",
        };
        f.write_str(name)
    }
}

/// Error type returned by every fallible operation in this crate.
///
/// Unparsable numeric cells are *not* errors: they load as missing values and are excluded by
/// the filters (see [`crate::types::Listing`]).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The delimited source could not be read (missing file, permission denied, malformed CSV).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Statistics could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source header lacks one of the columns listings are built from.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A filter parameter is not a number of the required kind.
    #[error("invalid value for {name}: {message} (raw='{raw}')")]
    InvalidParameter {
        name: String,
        raw: String,
        message: String,
    },

    /// The worker pool for parallel filtering could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Interactive input could not be read (e.g. stdin closed before an answer).
    #[error("failed to read answer to '{question}': {source}")]
    Prompt {
        stage: Stage,
        question: String,
        #[source]
        source: std::io::Error,
    },

    /// Statistics could not be written to the display.
    #[error("failed to display statistics: {0}")]
    DisplayOutput(#[source] std::io::Error),

    /// The report could not be written to its destination.
    #[error("failed to write report to {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendered report text does not follow the report layout.
    #[error("malformed report at line {line}: {message}")]
    MalformedReport { line: usize, message: String },
}

impl AnalysisError {
    /// Classify this error by the stage that produced it.
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisError::Csv(_) | AnalysisError::SchemaMismatch { .. } => Stage::Load,
            AnalysisError::InvalidParameter { .. } => Stage::Parameters,
            AnalysisError::Prompt { stage, .. } => *stage,
            AnalysisError::ThreadPool(_) => Stage::Filter,
            AnalysisError::DisplayOutput(_) => Stage::Display,
            AnalysisError::Json(_)
            | AnalysisError::ReportWrite { .. }
            | AnalysisError::MalformedReport { .. } => Stage::Report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisError, Stage};

    #[test]
    fn stage_classification() {
        let schema = AnalysisError::SchemaMismatch {
            message: "missing required column 'price'".to_string(),
        };
        assert_eq!(schema.stage(), Stage::Load);

        let param = AnalysisError::InvalidParameter {
            name: "minimum price".to_string(),
            raw: "abc".to_string(),
            message: "expected a number".to_string(),
        };
        assert_eq!(param.stage(), Stage::Parameters);
        assert_eq!(
            param.to_string(),
            "invalid value for minimum price: expected a number (raw='abc')"
        );

        let write = AnalysisError::ReportWrite {
            path: "out/report.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(write.stage(), Stage::Report);
        assert!(write.to_string().contains("out/report.txt"));
    }
}
