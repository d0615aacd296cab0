//! Export-ready row types.
//!
//! These are the exact column sets the serializer boundary writes; field
//! order is column order. They are produced by the compiler in the editing
//! crate and never fed back into the editable tables.
use crate::enums::{DirectionType, PickupDropOffType};
use serde::{Deserialize, Serialize};

/// A row of the exported trips table.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportTrip {
    /// The route the trip runs along
    pub route_id: String,
    /// The service calendar the trip runs on
    pub service_id: String,
    /// Trip identifier; derived trips carry a segment suffix
    pub trip_id: String,
    /// Destination signage text
    pub trip_headsign: Option<String>,
    /// Geometry reference, if any
    pub shape_id: Option<String>,
    /// Direction of travel
    pub direction_id: Option<DirectionType>,
}

/// A row of the exported stop times table. Times are in `HH:MM:SS` form and
/// `stop_sequence` is dense per trip, starting at 1.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportStopTime {
    /// The exported trip this row belongs to
    pub trip_id: String,
    /// Arrival time, blank when unset
    pub arrival_time: String,
    /// Departure time, blank when unset
    pub departure_time: String,
    /// The stop visited
    pub stop_id: String,
    /// Dense 1-based order of this visit within the exported trip
    pub stop_sequence: u32,
    /// Whether riders may board at this visit
    pub pickup_type: PickupDropOffType,
    /// Whether riders may alight at this visit
    pub drop_off_type: PickupDropOffType,
}
