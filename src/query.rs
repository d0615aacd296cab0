//! A small boolean expression language for filtering table rows.
//!
//! The grammar is a flat two-tier OR-of-ANDs with no parentheses and no
//! precedence beyond the two tiers:
//!
//! ```text
//! expr      := orGroup ("||" orGroup)*
//! orGroup   := condition ("&&" condition)*
//! condition := IDENT COMPARATOR VALUE
//! ```
//!
//! An expression matches a record iff at least one OR-group is fully
//! satisfied. A condition that fails to parse makes its own group
//! unsatisfiable but never poisons the rest of the expression. An expression
//! containing no comparator token at all is a free-text filter matched
//! case-insensitively against every field of the record.

use gtfs_feed::{Route, Stop, StopTime, Trip};
use std::cmp::Ordering;

/// A comparison between a record field and a literal value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparator {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEq,
    /// `<=`
    LessEq,
    /// `~=` — case-insensitive substring containment
    Contains,
    /// `!~=` — negated containment
    NotContains,
}

/// Token table ordered so that at a shared start position the longer token is
/// preferred (`!~=` before `!=`, `>=` before `>`).
const COMPARATORS: [(&str, Comparator); 8] = [
    ("!~=", Comparator::NotContains),
    ("~=", Comparator::Contains),
    (">=", Comparator::GreaterEq),
    ("<=", Comparator::LessEq),
    ("==", Comparator::Eq),
    ("!=", Comparator::NotEq),
    (">", Comparator::Greater),
    ("<", Comparator::Less),
];

/// A row that can be filtered by field name.
///
/// Absent fields read as the empty string in comparisons and are skipped by
/// the free-text fallback.
pub trait Record {
    /// The field names this record kind exposes, used by the free-text
    /// fallback.
    fn fields(&self) -> &'static [&'static str];
    /// The string form of one field, `None` when the field is absent.
    fn field(&self, name: &str) -> Option<String>;
}

/// Evaluates a filter expression against one record.
pub fn matches_expression<R: Record>(expr: &str, record: &R) -> bool {
    if !contains_comparator(expr) {
        return free_text_matches(expr, record);
    }
    expr.split("||")
        .any(|group| group.split("&&").all(|c| evaluate_condition(c, record)))
}

fn contains_comparator(expr: &str) -> bool {
    COMPARATORS.iter().any(|(token, _)| expr.contains(token))
}

fn free_text_matches<R: Record>(query: &str, record: &R) -> bool {
    let needle = query.trim().to_lowercase();
    record.fields().iter().any(|name| {
        record
            .field(name)
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

fn evaluate_condition<R: Record>(condition: &str, record: &R) -> bool {
    match parse_condition(condition) {
        Some((field, comparator, value)) => {
            let actual = record.field(field).unwrap_or_default();
            compare(&actual, comparator, value)
        }
        // fail closed: an unparseable condition can never be satisfied
        None => false,
    }
}

/// Splits a condition at its earliest comparator occurrence.
fn parse_condition(condition: &str) -> Option<(&str, Comparator, &str)> {
    let mut best: Option<(usize, &str, Comparator)> = None;
    for (token, comparator) in COMPARATORS {
        if let Some(pos) = condition.find(token) {
            let better = match best {
                None => true,
                Some((best_pos, best_token, _)) => {
                    pos < best_pos || (pos == best_pos && token.len() > best_token.len())
                }
            };
            if better {
                best = Some((pos, token, comparator));
            }
        }
    }
    let (pos, token, comparator) = best?;
    let field = condition[..pos].trim();
    if field.is_empty() {
        return None;
    }
    let value = strip_quotes(condition[pos + token.len()..].trim());
    Some((field, comparator, value))
}

/// Strips one pair of matching single or double quotes, if present.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Compares one field value against a literal. Ordering comparators go
/// through the numeric path when both sides parse as finite numbers,
/// otherwise they compare lexicographically.
fn compare(left: &str, comparator: Comparator, right: &str) -> bool {
    match comparator {
        Comparator::Contains => contains_ci(left, right),
        Comparator::NotContains => !contains_ci(left, right),
        _ => {
            let ordering = match (left.parse::<f64>(), right.parse::<f64>()) {
                (Ok(l), Ok(r)) if l.is_finite() && r.is_finite() => l.partial_cmp(&r),
                _ => Some(left.cmp(right)),
            };
            let Some(ordering) = ordering else {
                return false;
            };
            match comparator {
                Comparator::Eq => ordering == Ordering::Equal,
                Comparator::NotEq => ordering != Ordering::Equal,
                Comparator::Greater => ordering == Ordering::Greater,
                Comparator::Less => ordering == Ordering::Less,
                Comparator::GreaterEq => ordering != Ordering::Less,
                Comparator::LessEq => ordering != Ordering::Greater,
                Comparator::Contains | Comparator::NotContains => false,
            }
        }
    }
}

impl Record for Stop {
    fn fields(&self) -> &'static [&'static str] {
        &[
            "stop_id",
            "stop_code",
            "stop_name",
            "stop_desc",
            "stop_lat",
            "stop_lon",
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "stop_id" => Some(self.id.clone()),
            "stop_code" => self.code.clone(),
            "stop_name" => Some(self.name.clone()),
            "stop_desc" => Some(self.description.clone()),
            "stop_lat" => self.latitude.map(|v| v.to_string()),
            "stop_lon" => self.longitude.map(|v| v.to_string()),
            _ => None,
        }
    }
}

impl Record for Route {
    fn fields(&self) -> &'static [&'static str] {
        &[
            "route_id",
            "agency_id",
            "route_short_name",
            "route_long_name",
            "route_type",
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "route_id" => Some(self.id.clone()),
            "agency_id" => self.agency_id.clone(),
            "route_short_name" => Some(self.short_name.clone()),
            "route_long_name" => Some(self.long_name.clone()),
            "route_type" => Some(self.route_type.code().to_string()),
            _ => None,
        }
    }
}

impl Record for Trip {
    fn fields(&self) -> &'static [&'static str] {
        &[
            "trip_id",
            "route_id",
            "service_id",
            "shape_id",
            "trip_headsign",
            "direction_id",
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "trip_id" => Some(self.id.clone()),
            "route_id" => Some(self.route_id.clone()),
            "service_id" => Some(self.service_id.clone()),
            "shape_id" => self.shape_id.clone(),
            "trip_headsign" => self.trip_headsign.clone(),
            "direction_id" => self.direction_id.map(|d| d.code().to_string()),
            _ => None,
        }
    }
}

impl Record for StopTime {
    fn fields(&self) -> &'static [&'static str] {
        &[
            "trip_id",
            "arrival_time",
            "departure_time",
            "stop_id",
            "stop_sequence",
            "stop_headsign",
            "pickup_type",
            "drop_off_type",
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "trip_id" => Some(self.trip_id.clone()),
            "arrival_time" => Some(self.arrival_time.clone()),
            "departure_time" => Some(self.departure_time.clone()),
            "stop_id" => Some(self.stop_id.clone()),
            "stop_sequence" => Some(self.stop_sequence.to_string()),
            "stop_headsign" => self.stop_headsign.clone(),
            "pickup_type" => Some(self.pickup_type.code().to_string()),
            "drop_off_type" => Some(self.drop_off_type.code().to_string()),
            _ => None,
        }
    }
}
