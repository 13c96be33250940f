//! Core data model: parsed listings, filter bounds and aggregate statistics.
//!
//! Listings are built from [`RawRow`]s (column name → raw text) produced by ingestion. Numeric
//! columns that fail to parse are stored as `None`, which every range comparison in
//! [`crate::processing::filter`] treats as "does not match".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Column holding the nightly price, e.g. `$1,250.00`.
pub const PRICE_COLUMN: &str = "price";
/// Column holding the bedroom count.
pub const BEDROOMS_COLUMN: &str = "bedrooms";
/// Column holding the review score.
pub const RATING_COLUMN: &str = "review_scores_rating";
/// Column holding the host identifier.
pub const HOST_ID_COLUMN: &str = "host_id";

/// Columns every listing source must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [PRICE_COLUMN, BEDROOMS_COLUMN, RATING_COLUMN, HOST_ID_COLUMN];

/// One source row before interpretation: column name → raw cell text.
pub type RawRow = BTreeMap<String, String>;

/// One parsed rental listing.
///
/// A listing is immutable once built; filters hand out references to it rather than copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Opaque host identifier, only ever compared for equality.
    pub host_id: String,
    /// Nightly price; `None` when the source text is not a number.
    pub price: Option<f64>,
    /// Bedroom count; `None` when the source text is not a number.
    pub bedrooms: Option<i64>,
    /// Review score on whatever scale the source uses; `None` when not a number.
    pub review_scores_rating: Option<f64>,
    /// Every other column of the source row, uninterpreted.
    pub extra: BTreeMap<String, String>,
}

impl Listing {
    /// Build a listing from a raw row.
    ///
    /// Never fails: absent or unparsable numeric cells become `None` and an absent host id
    /// becomes the empty string.
    pub fn from_raw(row: &RawRow) -> Self {
        let cell = |name: &str| row.get(name).map(String::as_str).unwrap_or("");

        let extra = row
            .iter()
            .filter(|(k, _)| !REQUIRED_COLUMNS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            host_id: cell(HOST_ID_COLUMN).trim().to_owned(),
            price: parse_price(cell(PRICE_COLUMN)),
            bedrooms: parse_count(cell(BEDROOMS_COLUMN)),
            review_scores_rating: parse_decimal(cell(RATING_COLUMN)),
            extra,
        }
    }

    /// `true` when at least one numeric column failed to parse.
    pub fn has_unparsable_fields(&self) -> bool {
        self.price.is_none() || self.bedrooms.is_none() || self.review_scores_rating.is_none()
    }
}

/// Parse a price, dropping one leading currency symbol and any thousands separators.
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = match trimmed.chars().next() {
        Some(c) if is_currency_symbol(c) => &trimmed[c.len_utf8()..],
        _ => trimmed,
    };
    parse_decimal(&unsigned.replace(',', ""))
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '€' | '£' | '¥' | '₹')
}

/// Parse a finite decimal number.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whole count; decimal text is truncated toward zero.
pub fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        parse_decimal(trimmed)
            .map(f64::trunc)
            .filter(|v| *v >= i64::MIN as f64 && *v <= i64::MAX as f64)
            .map(|v| v as i64)
    })
}

/// Inclusive bounds applied by the filter pipeline.
///
/// No ordering between minimum and maximum is enforced; inverted bounds simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub min_price: f64,
    pub max_price: f64,
    pub min_rooms: i64,
    pub max_rooms: i64,
    pub min_rating: f64,
}

impl FilterCriteria {
    /// Human-readable names of the five parameters, in acquisition order.
    pub const PARAMETER_NAMES: [&'static str; 5] = [
        "minimum price",
        "maximum price",
        "minimum rooms",
        "maximum rooms",
        "minimum rating",
    ];

    /// Parse the five parameters from text, in the order of [`Self::PARAMETER_NAMES`].
    ///
    /// Prices accept a leading currency symbol like the listing data does.
    pub fn from_inputs(inputs: [&str; 5]) -> AnalysisResult<Self> {
        let [min_price, max_price, min_rooms, max_rooms, min_rating] = inputs;
        let names = Self::PARAMETER_NAMES;
        Ok(Self {
            min_price: require(names[0], min_price, parse_price, "expected a price")?,
            max_price: require(names[1], max_price, parse_price, "expected a price")?,
            min_rooms: require(names[2], min_rooms, parse_count, "expected a whole number")?,
            max_rooms: require(names[3], max_rooms, parse_count, "expected a whole number")?,
            min_rating: require(names[4], min_rating, parse_decimal, "expected a number")?,
        })
    }
}

fn require<T>(
    name: &str,
    raw: &str,
    parse: fn(&str) -> Option<T>,
    message: &str,
) -> AnalysisResult<T> {
    parse(raw).ok_or_else(|| AnalysisError::InvalidParameter {
        name: name.to_owned(),
        raw: raw.to_owned(),
        message: message.to_owned(),
    })
}

/// Listing count for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCount {
    pub host_id: String,
    pub count: usize,
}

/// Summary of a filtered listing sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of listings aggregated.
    pub total_listings: usize,
    /// Mean price; `None` when there was nothing to average.
    pub average_price: Option<f64>,
    /// Hosts by descending listing count; ties keep first-encounter order.
    pub ranked_hosts: Vec<HostCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn price_strips_currency_and_grouping() {
        assert_eq!(parse_price("$100"), Some(100.0));
        assert_eq!(parse_price(" $1,250.50 "), Some(1250.5));
        assert_eq!(parse_price("€80"), Some(80.0));
        assert_eq!(parse_price("42"), Some(42.0));
        assert_eq!(parse_price("$$5"), None);
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("NaN"), None);
    }

    #[test]
    fn count_accepts_integers_and_truncates_decimals() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count(" 2.0 "), Some(2));
        assert_eq!(parse_count("2.9"), Some(2));
        assert_eq!(parse_count("studio"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn listing_from_raw_keeps_unparsable_fields_as_none() {
        let row = raw(&[
            ("host_id", "H1"),
            ("price", "n/a"),
            ("bedrooms", "2"),
            ("review_scores_rating", "95.5"),
            ("name", "Loft"),
        ]);
        let listing = Listing::from_raw(&row);
        assert_eq!(listing.host_id, "H1");
        assert_eq!(listing.price, None);
        assert_eq!(listing.bedrooms, Some(2));
        assert_eq!(listing.review_scores_rating, Some(95.5));
        assert_eq!(listing.extra.get("name").map(String::as_str), Some("Loft"));
        assert!(!listing.extra.contains_key("price"));
        assert!(listing.has_unparsable_fields());
    }

    #[test]
    fn listing_from_raw_tolerates_missing_columns() {
        let listing = Listing::from_raw(&raw(&[("price", "$10")]));
        assert_eq!(listing.host_id, "");
        assert_eq!(listing.price, Some(10.0));
        assert_eq!(listing.bedrooms, None);
        assert_eq!(listing.review_scores_rating, None);
    }

    #[test]
    fn criteria_from_inputs_parses_all_five() {
        let c = FilterCriteria::from_inputs(["$100", "300", "1", "2", "75"]).unwrap();
        assert_eq!(
            c,
            FilterCriteria {
                min_price: 100.0,
                max_price: 300.0,
                min_rooms: 1,
                max_rooms: 2,
                min_rating: 75.0,
            }
        );
    }

    #[test]
    fn criteria_from_inputs_names_the_bad_parameter() {
        let err = FilterCriteria::from_inputs(["100", "300", "one", "2", "75"]).unwrap_err();
        match err {
            AnalysisError::InvalidParameter { name, raw, .. } => {
                assert_eq!(name, "minimum rooms");
                assert_eq!(raw, "one");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
