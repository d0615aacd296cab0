//! Materializes restriction rules into export-ready trips and stop times.
//!
//! The editable tables are never touched; compilation reads a snapshot of
//! the feed and the rule store and emits a fresh, disjoint table pair. A
//! trip whose rules are at most pickup/dropoff compiles to one output trip
//! with translated flags. A trip carrying a `custom` rule represents a
//! vehicle that changes boarding rules partway and compiles into exactly two
//! derived trips overlapping on the custom-marked span, so that itinerary
//! construction downstream still sees the boundary stop on both sides.

use crate::restrictions::{RestrictionMode, RestrictionStore};
use gtfs_feed::{time, ExportStopTime, ExportTrip, Feed, PickupDropOffType, StopTime, Trip};
use log::warn;
use rustc_hash::FxHashMap;

/// Suffix of the derived trip covering the head of a custom-marked run.
pub const SEGMENT_A_SUFFIX: &str = "__segA";
/// Suffix of the derived trip covering the tail of a custom-marked run.
pub const SEGMENT_B_SUFFIX: &str = "__segB";

/// The export-ready table pair produced by one compilation pass.
#[derive(Debug, Default)]
pub struct CompiledFeed {
    /// Output trips table
    pub trips: Vec<ExportTrip>,
    /// Output stop times table, densely resequenced per trip
    pub stop_times: Vec<ExportStopTime>,
}

/// Compiles the whole trips table against the rule store.
///
/// Source trips are processed in id order so the output is stable across
/// runs over the same snapshot.
pub fn compile(feed: &Feed, restrictions: &RestrictionStore) -> CompiledFeed {
    let mut out = CompiledFeed::default();
    let mut trip_ids: Vec<&String> = feed.trips.keys().collect();
    trip_ids.sort();
    for trip_id in trip_ids {
        compile_trip(&feed.trips[trip_id], restrictions, &mut out);
    }
    renumber(&mut out.stop_times);
    out
}

fn compile_trip(trip: &Trip, restrictions: &RestrictionStore, out: &mut CompiledFeed) {
    // a trip with no rows at all has nothing to run and is not exported
    if trip.stop_times.is_empty() {
        return;
    }

    let modes: Vec<RestrictionMode> = trip
        .stop_times
        .iter()
        .map(|row| restrictions.mode(&trip.id, &row.stop_id))
        .collect();

    let first_custom = modes.iter().position(|m| *m == RestrictionMode::Custom);
    match first_custom {
        None => {
            emit_segment(
                trip,
                trip.id.clone(),
                &trip.stop_times,
                &modes,
                RestrictionMode::Normal,
                out,
            );
        }
        Some(first) => {
            // both derived trips cover the full span between the first and
            // last custom mark, so each still contains the boundary stops
            let last = modes
                .iter()
                .rposition(|m| *m == RestrictionMode::Custom)
                .unwrap_or(first);
            emit_segment(
                trip,
                format!("{}{}", trip.id, SEGMENT_A_SUFFIX),
                &trip.stop_times[..=last],
                &modes[..=last],
                RestrictionMode::Pickup,
                out,
            );
            emit_segment(
                trip,
                format!("{}{}", trip.id, SEGMENT_B_SUFFIX),
                &trip.stop_times[first..],
                &modes[first..],
                RestrictionMode::Dropoff,
                out,
            );
        }
    }
}

/// Emits one output trip and its surviving stop time rows.
///
/// `custom_as` is what a custom-marked row means inside this segment:
/// boarding-only on the way in, alighting-only on the way out.
fn emit_segment(
    trip: &Trip,
    out_trip_id: String,
    rows: &[StopTime],
    modes: &[RestrictionMode],
    custom_as: RestrictionMode,
    out: &mut CompiledFeed,
) {
    if !time::is_non_decreasing(
        rows.iter()
            .flat_map(|row| [row.arrival_time.as_str(), row.departure_time.as_str()]),
    ) {
        warn!(
            "stop times of trip {} are not in chronological order",
            out_trip_id
        );
    }

    out.trips.push(ExportTrip {
        route_id: trip.route_id.clone(),
        service_id: trip.service_id.clone(),
        trip_id: out_trip_id.clone(),
        trip_headsign: trip.trip_headsign.clone(),
        shape_id: trip.shape_id.clone(),
        direction_id: trip.direction_id,
    });

    let mut sequence = 0u32;
    for (row, mode) in rows.iter().zip(modes) {
        // rows with both times blank are editing placeholders
        if row.is_placeholder() {
            continue;
        }
        let mode = match mode {
            RestrictionMode::Custom => custom_as,
            other => *other,
        };
        let (pickup_type, drop_off_type) = translate_mode(mode);
        sequence += 1;
        out.stop_times.push(ExportStopTime {
            trip_id: out_trip_id.clone(),
            arrival_time: time::to_export(&row.arrival_time),
            departure_time: time::to_export(&row.departure_time),
            stop_id: row.stop_id.clone(),
            stop_sequence: sequence,
            pickup_type,
            drop_off_type,
        });
    }
}

/// Mode to flag translation: a pickup-only stop forbids alighting, a
/// dropoff-only stop forbids boarding.
fn translate_mode(mode: RestrictionMode) -> (PickupDropOffType, PickupDropOffType) {
    match mode {
        RestrictionMode::Normal => (PickupDropOffType::Regular, PickupDropOffType::Regular),
        RestrictionMode::Pickup => (PickupDropOffType::Regular, PickupDropOffType::NotAvailable),
        RestrictionMode::Dropoff => (PickupDropOffType::NotAvailable, PickupDropOffType::Regular),
        // custom rows are rewritten to Pickup/Dropoff before translation
        RestrictionMode::Custom => (PickupDropOffType::Regular, PickupDropOffType::Regular),
    }
}

/// Final pass: rebuild `stop_sequence` densely per output trip in emission
/// order, guaranteeing the contiguous 1..N invariant across every group even
/// though intermediate numbering was derived per segment.
fn renumber(rows: &mut [ExportStopTime]) {
    let mut counters: FxHashMap<String, u32> = FxHashMap::default();
    for row in rows {
        let counter = counters.entry(row.trip_id.clone()).or_insert(0);
        *counter += 1;
        row.stop_sequence = *counter;
    }
}
