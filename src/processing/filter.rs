//! Range filters over listings.
//!
//! Every filter borrows its input and returns the surviving listings, by reference and in their
//! original relative order. A listing whose filtered column failed to parse never matches.

use crate::types::{FilterCriteria, Listing};

/// Keep listings for which `predicate` returns `true`.
pub fn filter<'a, I, F>(listings: I, mut predicate: F) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
    F: FnMut(&Listing) -> bool,
{
    listings.into_iter().filter(|l| predicate(l)).collect()
}

/// Keep listings with `min_price <= price <= max_price`.
pub fn filter_by_price<'a, I>(listings: I, min_price: f64, max_price: f64) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    filter(listings, |l| price_matches(l, min_price, max_price))
}

/// Keep listings with `min_rooms <= bedrooms <= max_rooms`.
pub fn filter_by_rooms<'a, I>(listings: I, min_rooms: i64, max_rooms: i64) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    filter(listings, |l| rooms_match(l, min_rooms, max_rooms))
}

/// Keep listings with `review_scores_rating >= min_rating`.
pub fn filter_by_rating<'a, I>(listings: I, min_rating: f64) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    filter(listings, |l| rating_matches(l, min_rating))
}

/// Apply all three filters in the order price, rooms, rating.
pub fn apply_criteria<'a, I>(listings: I, criteria: &FilterCriteria) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let by_price = filter_by_price(listings, criteria.min_price, criteria.max_price);
    let by_rooms = filter_by_rooms(by_price, criteria.min_rooms, criteria.max_rooms);
    filter_by_rating(by_rooms, criteria.min_rating)
}

/// Single-pass equivalent of [`apply_criteria`] for one listing.
pub fn matches_criteria(listing: &Listing, criteria: &FilterCriteria) -> bool {
    price_matches(listing, criteria.min_price, criteria.max_price)
        && rooms_match(listing, criteria.min_rooms, criteria.max_rooms)
        && rating_matches(listing, criteria.min_rating)
}

fn price_matches(listing: &Listing, min: f64, max: f64) -> bool {
    listing.price.is_some_and(|p| p >= min && p <= max)
}

fn rooms_match(listing: &Listing, min: i64, max: i64) -> bool {
    listing.bedrooms.is_some_and(|r| r >= min && r <= max)
}

fn rating_matches(listing: &Listing, min: f64) -> bool {
    listing.review_scores_rating.is_some_and(|r| r >= min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn listing(host: &str, price: Option<f64>, bedrooms: Option<i64>, rating: Option<f64>) -> Listing {
        Listing {
            host_id: host.to_string(),
            price,
            bedrooms,
            review_scores_rating: rating,
            extra: BTreeMap::new(),
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("A", Some(100.0), Some(1), Some(90.0)),
            listing("B", Some(250.0), Some(2), Some(80.0)),
            listing("A", Some(400.0), Some(3), Some(70.0)),
            listing("C", None, Some(2), Some(99.0)),
            listing("D", Some(150.0), None, None),
        ]
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria {
            min_price: 100.0,
            max_price: 300.0,
            min_rooms: 1,
            max_rooms: 2,
            min_rating: 75.0,
        }
    }

    fn hosts(out: &[&Listing]) -> Vec<String> {
        out.iter().map(|l| l.host_id.clone()).collect()
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let ds = sample();
        let out = filter_by_price(&ds, 100.0, 250.0);
        assert_eq!(hosts(&out), vec!["A", "B", "D"]);
    }

    #[test]
    fn rooms_bounds_are_inclusive() {
        let ds = sample();
        let out = filter_by_rooms(&ds, 2, 3);
        assert_eq!(hosts(&out), vec!["B", "A", "C"]);
    }

    #[test]
    fn rating_has_no_upper_bound() {
        let ds = sample();
        let out = filter_by_rating(&ds, 80.0);
        assert_eq!(hosts(&out), vec!["A", "B", "C"]);
    }

    #[test]
    fn unparsable_price_never_matches_even_with_infinite_bounds() {
        let ds = sample();
        let out = filter_by_price(&ds, f64::NEG_INFINITY, f64::INFINITY);
        assert!(out.iter().all(|l| l.host_id != "C"));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn every_survivor_satisfies_all_predicates() {
        let ds = sample();
        let c = criteria();
        let out = apply_criteria(&ds, &c);
        assert_eq!(hosts(&out), vec!["A", "B"]);
        assert!(out.iter().all(|l| matches_criteria(l, &c)));
    }

    #[test]
    fn filter_order_does_not_change_result() {
        let ds = sample();
        let c = criteria();
        let forward = apply_criteria(&ds, &c);

        let by_rating = filter_by_rating(&ds, c.min_rating);
        let by_rooms = filter_by_rooms(by_rating, c.min_rooms, c.max_rooms);
        let reverse = filter_by_price(by_rooms, c.min_price, c.max_price);

        assert_eq!(forward, reverse);
    }

    #[test]
    fn inverted_bounds_yield_empty_result() {
        let ds = sample();
        assert!(filter_by_price(&ds, 300.0, 100.0).is_empty());
        assert!(filter_by_rooms(&ds, 3, 1).is_empty());
    }

    #[test]
    fn input_is_left_untouched() {
        let ds = sample();
        let before = ds.clone();
        let out = apply_criteria(&ds, &criteria());
        assert_eq!(out.len(), 2);
        assert_eq!(ds, before);
        assert!(std::ptr::eq(out[0], &ds[0]));
    }
}
