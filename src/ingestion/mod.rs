//! Listing loading.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - picks the delimiter from the file extension (or you can force it via [`IngestionOptions`])
//! - parses every row into a [`crate::types::Listing`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Lower-level readers live in [`csv`].

pub mod csv;
pub mod observability;
pub mod unified;

pub use observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, LogObserver};
pub use unified::{ingest_from_path, IngestionOptions, SourceFormat};
