//! `rental-listing-stats` loads rental listings from a delimited text file, keeps the ones inside
//! user-supplied price, bedroom and rating bounds, and reports how many remain, their average
//! price, and which hosts own the most of them.
//!
//! ## Pipeline
//!
//! ```text
//! listings.csv ─▶ ingestion ─▶ Vec<Listing> ─▶ processing::apply_criteria ─▶ Vec<&Listing>
//!                                                                              │
//!       report file ◀─ ReportSink ◀─ report::render_report ◀─ Statistics ◀─────┘
//! ```
//!
//! The columns `price`, `bedrooms`, `review_scores_rating` and `host_id` are required; any other
//! columns are kept on [`types::Listing::extra`] untouched. A cell that is not a number loads as
//! `None` and simply fails every filter on that column, so a single messy row never aborts a run.
//!
//! ## Example
//!
//! ```no_run
//! use rental_listing_stats::pipeline::{run_analysis, AnalysisOptions, Collaborators, FileReportSink};
//! use rental_listing_stats::types::FilterCriteria;
//!
//! # fn main() -> Result<(), rental_listing_stats::AnalysisError> {
//! let mut session = Collaborators {
//!     parameters: FilterCriteria {
//!         min_price: 50.0,
//!         max_price: 200.0,
//!         min_rooms: 1,
//!         max_rooms: 3,
//!         min_rating: 90.0,
//!     },
//!     display: (),
//!     sink: FileReportSink::new("report.txt"),
//! };
//! let stats = run_analysis("listings.csv", &mut session, &AnalysisOptions::default())?;
//! println!("listings={}", stats.total_listings);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: reading CSV/TSV sources into listings
//! - [`types`]: listings, filter bounds and statistics
//! - [`processing`]: filters and aggregation
//! - [`execution`]: optional parallel filtering
//! - [`report`]: text/JSON rendering, parsing and persistence
//! - [`pipeline`]: the end-to-end run and its collaborator traits
//! - [`prompt`]: the interactive terminal collaborator
//! - [`error`]: error types shared by all of the above

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod prompt;
pub mod report;
pub mod types;

pub use error::{AnalysisError, AnalysisResult, Stage};
