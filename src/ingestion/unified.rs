//! Path-based loading entrypoint.
//!
//! [`ingest_from_path`] picks the delimiter from the file extension (or from
//! [`IngestionOptions::format`]) and reports the outcome to an optional
//! [`IngestionObserver`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::Listing;

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported delimited-text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl SourceFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }

    /// Infer the format of `path`, falling back to CSV for unknown or missing extensions.
    pub fn infer(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    /// Field delimiter byte.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Options controlling how the listing source is read.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<SourceFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Load every listing in the file at `path`.
///
/// When an observer is configured, this reports `on_success` with row stats, or `on_failure`
/// followed by `on_alert` when the failure severity is at or above `options.alert_at_or_above`.
///
/// ```no_run
/// use rental_listing_stats::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), rental_listing_stats::AnalysisError> {
/// let listings = ingest_from_path("listings.csv", &IngestionOptions::default())?;
/// println!("listings={}", listings.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> AnalysisResult<Vec<Listing>> {
    let path = path.as_ref();
    let format = options.format.unwrap_or_else(|| SourceFormat::infer(path));
    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format,
    };

    let result = csv::ingest_listings_from_path(path, format.delimiter());

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(listings) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: listings.len(),
                    rows_with_unparsable_fields: listings.iter().filter(|l| l.has_unparsable_fields()).count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &AnalysisError) -> IngestionSeverity {
    match e {
        AnalysisError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        _ => IngestionSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::SourceFormat;

    #[test]
    fn format_inference_by_extension() {
        assert_eq!(SourceFormat::infer(Path::new("a/listings.csv")), SourceFormat::Csv);
        assert_eq!(SourceFormat::infer(Path::new("listings.TSV")), SourceFormat::Tsv);
        assert_eq!(SourceFormat::infer(Path::new("listings.tab")), SourceFormat::Tsv);
        assert_eq!(SourceFormat::infer(Path::new("listings")), SourceFormat::Csv);
        assert_eq!(SourceFormat::infer(Path::new("listings.txt")), SourceFormat::Csv);
    }

    #[test]
    fn delimiters() {
        assert_eq!(SourceFormat::Csv.delimiter(), b',');
        assert_eq!(SourceFormat::Tsv.delimiter(), b'\t');
    }
}
