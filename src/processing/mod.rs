//! In-memory listing transformations.
//!
//! - [`filter`]: range predicates, applied price → rooms → rating by [`apply_criteria`]
//! - [`aggregate`]: listing count, average price and host ranking
//!
//! ## Example: filter → aggregate
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use rental_listing_stats::processing::{apply_criteria, compute_statistics};
//! use rental_listing_stats::types::{FilterCriteria, Listing};
//!
//! let listing = |host: &str, price: f64, rooms: i64, rating: f64| Listing {
//!     host_id: host.to_string(),
//!     price: Some(price),
//!     bedrooms: Some(rooms),
//!     review_scores_rating: Some(rating),
//!     extra: BTreeMap::new(),
//! };
//! let listings = vec![
//!     listing("A", 100.0, 1, 90.0),
//!     listing("B", 250.0, 2, 80.0),
//!     listing("A", 400.0, 3, 70.0),
//! ];
//! let criteria = FilterCriteria {
//!     min_price: 100.0,
//!     max_price: 300.0,
//!     min_rooms: 1,
//!     max_rooms: 2,
//!     min_rating: 75.0,
//! };
//!
//! let filtered = apply_criteria(&listings, &criteria);
//! let stats = compute_statistics(filtered);
//! assert_eq!(stats.total_listings, 2);
//! assert_eq!(stats.average_price, Some(175.0));
//! assert_eq!(stats.ranked_hosts[0].host_id, "A");
//! ```

pub mod aggregate;
pub mod filter;

pub use aggregate::{average_price, compute_statistics, rank_hosts};
pub use filter::{apply_criteria, filter, filter_by_price, filter_by_rating, filter_by_rooms, matches_criteria};
