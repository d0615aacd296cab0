//! Reconstructs the canonical stop visit patterns implied by the trips table.
//!
//! Real-world services commonly run one long "full" variant and several
//! shorter express or partial variants of the same line. Grouping trips by
//! the maximal distinct stop sequences avoids showing a near-duplicate group
//! per variant while still surfacing every genuinely different stopping
//! pattern.
//!
//! Subsumption is subsequence containment (gaps allowed), checked with a
//! two-pointer greedy scan. That is O(n·m) per pair of sequences, which is
//! fine at the few-hundred-trips scale this engine targets but would need
//! revisiting for much larger feeds.

use gtfs_feed::{time, Feed, Trip};
use rustc_hash::FxHashSet;

/// A maximal distinct ordered sequence of stops, together with every trip
/// whose own visit order it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The stop ids of the pattern, in visit order
    pub stops: Vec<String>,
    /// Trips grouped under this pattern, in display order
    pub trip_ids: Vec<String>,
}

/// Derives the pattern set from a snapshot of the tables.
///
/// Patterns are recomputed on every call and hold no references into the
/// feed; the result is ordered by stop sequence so repeated calls over the
/// same snapshot agree.
pub fn extract_patterns(feed: &Feed) -> Vec<Pattern> {
    let orders: Vec<(&Trip, Vec<&str>)> = feed
        .trips
        .values()
        .map(|trip| (trip, distinct_visit_order(trip)))
        .filter(|(_, order)| !order.is_empty())
        .collect();

    let mut unique: Vec<&[&str]> = Vec::new();
    let mut seen: FxHashSet<&[&str]> = FxHashSet::default();
    for (_, order) in &orders {
        if seen.insert(order.as_slice()) {
            unique.push(order.as_slice());
        }
    }

    // keep only the maximal sequences; pairwise non-comparable ones all stay
    let maximal: Vec<&[&str]> = unique
        .iter()
        .filter(|a| !unique.iter().any(|b| b != *a && is_subsequence(a, b)))
        .copied()
        .collect();

    let mut patterns: Vec<Pattern> = maximal
        .into_iter()
        .map(|stops| {
            let mut members: Vec<&Trip> = orders
                .iter()
                .filter(|(_, order)| is_subsequence(order, stops))
                .map(|(trip, _)| *trip)
                .collect();
            sort_for_display(&mut members, stops[0]);
            Pattern {
                stops: stops.iter().map(|s| s.to_string()).collect(),
                trip_ids: members.into_iter().map(|t| t.id.clone()).collect(),
            }
        })
        .collect();
    patterns.sort_by(|a, b| a.stops.cmp(&b.stops));
    patterns
}

/// The trip's stop ids in visit order, first occurrence kept, repeats
/// dropped. Rows are already sorted by `stop_sequence`.
fn distinct_visit_order(trip: &Trip) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    trip.stop_times
        .iter()
        .map(|st| st.stop_id.as_str())
        .filter(|stop_id| seen.insert(*stop_id))
        .collect()
}

/// True iff `needle` appears within `haystack` in the same relative order,
/// gaps allowed.
fn is_subsequence(needle: &[&str], haystack: &[&str]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|wanted| rest.any(|seen| seen == wanted))
}

/// Display order within a pattern: `service_id`, then the time recorded at
/// the pattern's first stop (blank sorts last), then `trip_id`.
fn sort_for_display(members: &mut [&Trip], first_stop: &str) {
    members.sort_by_key(|trip| {
        let seconds = time_at_stop(trip, first_stop);
        (
            trip.service_id.clone(),
            seconds.is_none(),
            seconds.unwrap_or(0),
            trip.id.clone(),
        )
    });
}

/// Departure falling back to arrival of the trip's first row at `stop_id`;
/// `None` when the trip does not serve the stop or the cell is blank or
/// unparseable.
fn time_at_stop(trip: &Trip, stop_id: &str) -> Option<u32> {
    let row = trip.stop_times.iter().find(|st| st.stop_id == stop_id)?;
    time::parse_seconds(&row.departure_time).or_else(|| time::parse_seconds(&row.arrival_time))
}
