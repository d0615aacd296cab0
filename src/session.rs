//! The editing session: exclusive owner of the tables and the rule store.
//!
//! Structural removals cascade here so the two stores can never disagree:
//! deleting a trip prunes its rules, deleting a route walks its trips, and
//! removing a single stop time row drops the rule keyed to that exact pair.
//! Everything derived (patterns, filters, compiled exports) is computed from
//! the current snapshot on demand and holds no references back into the
//! session.

use crate::compiler::{compile, CompiledFeed};
use crate::patterns::{extract_patterns, Pattern};
use crate::query::matches_expression;
use crate::restrictions::{MergeOutcome, OverrideDocument, Restriction, RestrictionStore};
use gtfs_feed::{time, Feed, Trip};

/// One editing session over a loaded feed.
pub struct EditSession {
    /// The editable tables
    pub feed: Feed,
    /// The per-(trip, stop) override rules
    pub restrictions: RestrictionStore,
}

impl EditSession {
    /// Starts a session over freshly loaded tables with no rules.
    pub fn new(feed: Feed) -> EditSession {
        EditSession {
            feed,
            restrictions: RestrictionStore::default(),
        }
    }

    /// Absorbs an external override document, dropping rules that no longer
    /// resolve against the loaded tables.
    pub fn merge_overrides(&mut self, document: OverrideDocument) -> MergeOutcome {
        self.restrictions.merge(document, &self.feed)
    }

    /// Attaches a rule to a (trip, stop) pair. Refused when the pair does
    /// not exist in the tables, so the store can never hold an orphan.
    pub fn set_restriction(
        &mut self,
        trip_id: &str,
        stop_id: &str,
        restriction: Restriction,
    ) -> bool {
        if !self.feed.has_visit(trip_id, stop_id) {
            return false;
        }
        self.restrictions.set(trip_id, stop_id, restriction);
        true
    }

    /// Removes the rule of a pair, returning it if present.
    pub fn clear_restriction(&mut self, trip_id: &str, stop_id: &str) -> Option<Restriction> {
        self.restrictions.remove(trip_id, stop_id)
    }

    /// Deletes a trip, its stop time rows and every rule keyed to it, in one
    /// logical step.
    pub fn delete_trip(&mut self, trip_id: &str) -> bool {
        match self.feed.remove_trip(trip_id) {
            Some(_) => {
                self.restrictions.remove_trip(trip_id);
                true
            }
            None => false,
        }
    }

    /// Deletes a route, cascading through its trips.
    pub fn delete_route(&mut self, route_id: &str) -> bool {
        match self.feed.remove_route(route_id) {
            Some((_, removed_trips)) => {
                for trip in &removed_trips {
                    self.restrictions.remove_trip(&trip.id);
                }
                true
            }
            None => false,
        }
    }

    /// Removes one stop time row, identified by its authored sequence
    /// number, and the rule keyed to its (trip, stop) pair.
    pub fn delete_stop_time(&mut self, trip_id: &str, stop_sequence: u32) -> bool {
        match self.feed.remove_stop_time(trip_id, stop_sequence) {
            Some(removed) => {
                self.restrictions.remove(trip_id, &removed.stop_id);
                true
            }
            None => false,
        }
    }

    /// Applies a display-form time edit to a cell, storing the canonical
    /// form. `None` leaves the respective cell untouched.
    pub fn edit_stop_time_cell(
        &mut self,
        trip_id: &str,
        stop_sequence: u32,
        arrival: Option<&str>,
        departure: Option<&str>,
    ) -> bool {
        let Some(trip) = self.feed.trips.get_mut(trip_id) else {
            return false;
        };
        let Some(row) = trip
            .stop_times
            .iter_mut()
            .find(|st| st.stop_sequence == stop_sequence)
        else {
            return false;
        };
        if let Some(arrival) = arrival {
            row.arrival_time = time::to_stored(arrival);
        }
        if let Some(departure) = departure {
            row.departure_time = time::to_stored(departure);
        }
        true
    }

    /// Trips matching a filter expression, in id order.
    pub fn filter_trips(&self, expr: &str) -> Vec<&Trip> {
        let mut matched: Vec<&Trip> = self
            .feed
            .trips
            .values()
            .filter(|trip| matches_expression(expr, *trip))
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        matched
    }

    /// The pattern grouping implied by the current tables.
    pub fn patterns(&self) -> Vec<Pattern> {
        extract_patterns(&self.feed)
    }

    /// Compiles the current snapshot into an export-ready table pair.
    pub fn compile(&self) -> CompiledFeed {
        compile(&self.feed, &self.restrictions)
    }
}
