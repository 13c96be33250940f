//! Summary statistics over a listing sequence.

use std::collections::HashMap;

use crate::types::{HostCount, Listing, Statistics};

/// Reduce a (possibly empty) listing sequence to [`Statistics`].
///
/// - `total_listings` is the number of listings.
/// - `average_price` is `None` when no listing carries a price.
/// - `ranked_hosts` is sorted by descending count; equal counts keep the order in which each
///   host was first seen.
pub fn compute_statistics<'a, I>(listings: I) -> Statistics
where
    I: IntoIterator<Item = &'a Listing>,
{
    let listings: Vec<&Listing> = listings.into_iter().collect();
    Statistics {
        total_listings: listings.len(),
        average_price: average_price(listings.iter().copied()),
        ranked_hosts: rank_hosts(listings.iter().copied()),
    }
}

/// Mean of all parsed prices, or `None` when there are none.
///
/// After [`crate::processing::filter_by_price`] every listing has a price, so this is the plain
/// sum divided by the listing count.
pub fn average_price<'a, I>(listings: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let (sum, n) = listings
        .into_iter()
        .filter_map(|l| l.price)
        .fold((0.0_f64, 0_usize), |(sum, n), p| (sum + p, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Count listings per host and order hosts by descending count.
pub fn rank_hosts<'a, I>(listings: I) -> Vec<HostCount>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<HostCount> = Vec::new();
    for listing in listings {
        match slots.get(listing.host_id.as_str()) {
            Some(&idx) => ranked[idx].count += 1,
            None => {
                slots.insert(listing.host_id.as_str(), ranked.len());
                ranked.push(HostCount {
                    host_id: listing.host_id.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable: ties stay in first-encounter order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}
