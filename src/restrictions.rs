//! Per-(trip, stop) pickup/drop-off override rules.
//!
//! Rules live outside the stop time rows so that the editable tables stay
//! untouched until export; the compiler materializes them into flags and
//! derived trips. Rules are keyed `"<trip_id>::<stop_id>"`.

use gtfs_feed::Feed;
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Separator between the two id halves of a rule key. Ids may contain almost
/// any character, so the separator is multi-character to keep keys
/// deconstructible.
pub const KEY_SEPARATOR: &str = "::";

/// Builds the store key for a (trip, stop) pair.
pub fn restriction_key(trip_id: &str, stop_id: &str) -> String {
    format!("{}{}{}", trip_id, KEY_SEPARATOR, stop_id)
}

/// What riders may do at one (trip, stop) visit.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionMode {
    /// Board and alight normally
    #[default]
    Normal,
    /// Riders may board but not alight
    Pickup,
    /// Riders may alight but not board
    Dropoff,
    /// Interchange-style rule: the trip is compiled into two derived trips
    /// split around this stop
    Custom,
}

/// One override rule.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    /// The rule kind
    pub mode: RestrictionMode,
    /// Advisory stop list carried by `custom` rules; round-tripped for
    /// external tools, never read by the compiler
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub board_stops: Vec<String>,
    /// Advisory stop list carried by `custom` rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alight_stops: Vec<String>,
}

impl Restriction {
    /// A plain rule with no advisory lists.
    pub fn with_mode(mode: RestrictionMode) -> Self {
        Restriction {
            mode,
            ..Restriction::default()
        }
    }
}

/// The external override document: `{ "rules": { "<trip>::<stop>": {..} } }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OverrideDocument {
    /// Rules keyed by (trip, stop) pair
    pub rules: FxHashMap<String, Restriction>,
}

/// Counters reported by [RestrictionStore::merge] for caller-level display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Rules accepted into the store
    pub merged: usize,
    /// Rules dropped because their key matches no loaded (trip, stop) pair
    pub skipped: usize,
}

/// The keyed rule map. Pure key/value semantics; referential hygiene against
/// the tables happens in [merge](RestrictionStore::merge) and in the cascade
/// entry points the session calls on structural deletes.
#[derive(Debug, Default)]
pub struct RestrictionStore {
    rules: FxHashMap<String, Restriction>,
}

impl RestrictionStore {
    /// The rule for a pair, if any.
    pub fn get(&self, trip_id: &str, stop_id: &str) -> Option<&Restriction> {
        self.rules.get(&restriction_key(trip_id, stop_id))
    }

    /// The effective mode for a pair; pairs without a rule are normal.
    pub fn mode(&self, trip_id: &str, stop_id: &str) -> RestrictionMode {
        self.get(trip_id, stop_id)
            .map(|r| r.mode)
            .unwrap_or_default()
    }

    /// Inserts or replaces the rule for a pair.
    pub fn set(&mut self, trip_id: &str, stop_id: &str, restriction: Restriction) {
        self.rules
            .insert(restriction_key(trip_id, stop_id), restriction);
    }

    /// Removes the rule for a pair, returning it if present.
    pub fn remove(&mut self, trip_id: &str, stop_id: &str) -> Option<Restriction> {
        self.rules.remove(&restriction_key(trip_id, stop_id))
    }

    /// Number of rules currently held.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are held.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the held rules in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Restriction)> {
        self.rules.iter()
    }

    /// Absorbs an external override document.
    ///
    /// Entries whose key does not name a currently loaded (trip, stop) pair
    /// are dropped and counted, never kept as orphans.
    pub fn merge(&mut self, document: OverrideDocument, feed: &Feed) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for (key, rule) in document.rules {
            let resolves = key
                .split_once(KEY_SEPARATOR)
                .map(|(trip_id, stop_id)| feed.has_visit(trip_id, stop_id))
                .unwrap_or(false);
            if resolves {
                self.rules.insert(key, rule);
                outcome.merged += 1;
            } else {
                outcome.skipped += 1;
            }
        }
        if outcome.skipped > 0 {
            warn!(
                "dropped {} override rules with no matching (trip, stop) pair",
                outcome.skipped
            );
        }
        outcome
    }

    /// Removes every rule keyed to `trip_id`, returning how many went.
    pub fn remove_trip(&mut self, trip_id: &str) -> usize {
        let prefix = format!("{}{}", trip_id, KEY_SEPARATOR);
        let before = self.rules.len();
        self.rules.retain(|key, _| !key.starts_with(&prefix));
        before - self.rules.len()
    }

    /// Snapshots the held rules back into a document, so a session can be
    /// saved alongside its feed.
    pub fn to_document(&self) -> OverrideDocument {
        OverrideDocument {
            rules: self.rules.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtfs_feed::{StopTime, Trip};

    fn feed_with_visit(trip_id: &str, stop_ids: &[&str]) -> Feed {
        let mut feed = Feed::default();
        let trip = Trip {
            id: trip_id.to_owned(),
            stop_times: stop_ids
                .iter()
                .enumerate()
                .map(|(i, stop_id)| StopTime {
                    trip_id: trip_id.to_owned(),
                    stop_id: stop_id.to_string(),
                    stop_sequence: (i + 1) as u32,
                    ..StopTime::default()
                })
                .collect(),
            ..Trip::default()
        };
        feed.trips.insert(trip.id.clone(), trip);
        feed
    }

    #[test]
    fn merge_keeps_resolvable_rules_and_counts_the_rest() {
        let feed = feed_with_visit("T1", &["X", "Y"]);
        let document: OverrideDocument = serde_json::from_str(
            r#"{"rules": {
                "T1::Y": {"mode": "pickup"},
                "T1::Z": {"mode": "dropoff"},
                "ghost::X": {"mode": "custom"},
                "unseparated": {"mode": "normal"}
            }}"#,
        )
        .unwrap();

        let mut store = RestrictionStore::default();
        let outcome = store.merge(document, &feed);
        assert_eq!(1, outcome.merged);
        assert_eq!(3, outcome.skipped);
        assert_eq!(RestrictionMode::Pickup, store.mode("T1", "Y"));
        assert_eq!(RestrictionMode::Normal, store.mode("T1", "Z"));
        assert_eq!(1, store.len());
    }

    #[test]
    fn remove_trip_only_touches_that_trip() {
        let mut store = RestrictionStore::default();
        store.set("T1", "X", Restriction::with_mode(RestrictionMode::Pickup));
        store.set("T1", "Y", Restriction::with_mode(RestrictionMode::Custom));
        store.set("T10", "X", Restriction::with_mode(RestrictionMode::Dropoff));

        assert_eq!(2, store.remove_trip("T1"));
        assert!(store.get("T1", "X").is_none());
        // "T10" must not be caught by the "T1" prefix
        assert_eq!(RestrictionMode::Dropoff, store.mode("T10", "X"));
    }

    #[test]
    fn custom_advisory_lists_round_trip() {
        let source = r#"{"rules": {"T1::Y": {
            "mode": "custom",
            "board_stops": ["A", "B"],
            "alight_stops": ["C"]
        }}}"#;
        let document: OverrideDocument = serde_json::from_str(source).unwrap();
        let feed = feed_with_visit("T1", &["Y"]);
        let mut store = RestrictionStore::default();
        store.merge(document, &feed);

        let rule = store.get("T1", "Y").unwrap();
        assert_eq!(vec!["A", "B"], rule.board_stops);

        let saved = serde_json::to_value(store.to_document()).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(source).unwrap(),
            saved
        );
    }

    #[test]
    fn plain_rules_serialize_without_advisory_lists() {
        let text =
            serde_json::to_string(&Restriction::with_mode(RestrictionMode::Pickup)).unwrap();
        assert_eq!(r#"{"mode":"pickup"}"#, text);
    }
}
