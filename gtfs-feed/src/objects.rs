pub use crate::enums::*;
use crate::serde_helpers::*;
use chrono::{Datelike, NaiveDate, Weekday};
use rgb::RGB8;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Objects that have an identifier implement this trait.
///
/// Those identifiers are technical and should not be shown to travellers.
pub trait Id {
    /// Identifier of the object
    fn id(&self) -> &str;
}

/// A physical stop. Identity is immutable; the name and coordinate are
/// editable.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Stop {
    /// Unique technical identifier of the stop
    #[serde(rename = "stop_id")]
    pub id: String,
    /// Short text or number that identifies the location for riders
    #[serde(rename = "stop_code")]
    pub code: Option<String>,
    /// Name of the location as riders know it
    #[serde(rename = "stop_name")]
    pub name: String,
    /// Free-form description of the location
    #[serde(default, rename = "stop_desc")]
    pub description: String,
    /// Latitude of the stop; blank while the user has not placed it yet
    #[serde(
        deserialize_with = "de_with_optional_float",
        serialize_with = "serialize_float_as_str",
        rename = "stop_lat",
        default
    )]
    pub latitude: Option<f64>,
    /// Longitude of the stop
    #[serde(
        deserialize_with = "de_with_optional_float",
        serialize_with = "serialize_float_as_str",
        rename = "stop_lon",
        default
    )]
    pub longitude: Option<f64>,
}

impl Id for Stop {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A commercial line. There can be several stop patterns for the same route.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Route {
    /// Unique technical identifier of the route
    #[serde(rename = "route_id")]
    pub id: String,
    /// Short, abstract rider-facing identifier like "32" or "Green"
    #[serde(default, rename = "route_short_name")]
    pub short_name: String,
    /// Full, usually destination-bearing name of the route
    #[serde(default, rename = "route_long_name")]
    pub long_name: String,
    /// The kind of vehicle serving the route
    #[serde(default)]
    pub route_type: RouteType,
    /// Agency operating the route, if listed
    pub agency_id: Option<String>,
    /// Route color matching public facing material
    #[serde(
        deserialize_with = "deserialize_route_color",
        serialize_with = "serialize_color",
        rename = "route_color",
        default = "default_route_color"
    )]
    pub color: RGB8,
    /// Legible color for text drawn against [Route::color]
    #[serde(
        deserialize_with = "deserialize_route_text_color",
        serialize_with = "serialize_color",
        rename = "route_text_color",
        default
    )]
    pub text_color: RGB8,
}

impl Id for Route {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.long_name.is_empty() {
            write!(f, "{}", self.long_name)
        } else {
            write!(f, "{}", self.short_name)
        }
    }
}

/// A vehicle run following a sequence of [StopTime] rows on certain days.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Trip {
    /// Unique technical identifier of the trip
    #[serde(rename = "trip_id")]
    pub id: String,
    /// The [Route] this trip runs along
    pub route_id: String,
    /// The service calendar this trip runs on
    pub service_id: String,
    /// Geometry drawn for this trip, if any
    #[serde(default)]
    pub shape_id: Option<String>,
    /// Destination signage text shown to riders
    #[serde(default)]
    pub trip_headsign: Option<String>,
    /// Direction of travel, used to split timetables for display
    #[serde(default)]
    pub direction_id: Option<DirectionType>,
    /// The timed stop visits of this trip, kept sorted by `stop_sequence`.
    /// Not a column of the trips table; populated when tables are assembled.
    #[serde(skip)]
    pub stop_times: Vec<StopTime>,
}

impl Id for Trip {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route id: {}, service id: {}",
            self.route_id, self.service_id
        )
    }
}

/// One timed visit of a trip at a stop.
///
/// Times are kept as raw strings (`""` = unset) so that malformed input
/// survives an editing session verbatim; see [crate::time] for the codec.
/// `stop_sequence` is the uniqueness key within a trip — the same `stop_id`
/// may legitimately appear again at a later sequence.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct StopTime {
    /// The [Trip] this row belongs to
    pub trip_id: String,
    /// Arrival time in stored form, blank when unset
    #[serde(default)]
    pub arrival_time: String,
    /// Departure time in stored form, blank when unset
    #[serde(default)]
    pub departure_time: String,
    /// The [Stop] visited
    pub stop_id: String,
    /// 1-based order of this visit within the trip
    pub stop_sequence: u32,
    /// Signage text overriding the trip headsign from this stop on
    #[serde(default)]
    pub stop_headsign: Option<String>,
    /// Whether riders may board at this visit
    #[serde(default)]
    pub pickup_type: PickupDropOffType,
    /// Whether riders may alight at this visit
    #[serde(default)]
    pub drop_off_type: PickupDropOffType,
}

impl StopTime {
    /// A row with both times blank is an editing placeholder; it is dropped
    /// at export.
    pub fn is_placeholder(&self) -> bool {
        self.arrival_time.is_empty() && self.departure_time.is_empty()
    }
}

/// A single point of the line geometry drawn for trips referencing it.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct ShapePoint {
    /// Identifier shared by all points of one shape
    #[serde(rename = "shape_id")]
    pub id: String,
    /// Latitude of the point
    #[serde(rename = "shape_pt_lat", default)]
    pub latitude: f64,
    /// Longitude of the point
    #[serde(rename = "shape_pt_lon", default)]
    pub longitude: f64,
    /// Order in which the points connect to form the shape
    #[serde(rename = "shape_pt_sequence")]
    pub sequence: usize,
}

impl Id for ShapePoint {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The agency running the network.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Agency {
    /// Unique technical identifier of the agency; optional when the feed has
    /// only one
    #[serde(rename = "agency_id")]
    pub id: Option<String>,
    /// Full name of the transit agency
    #[serde(rename = "agency_name")]
    pub name: String,
    /// URL of the agency's web site
    #[serde(rename = "agency_url")]
    pub url: String,
    /// Timezone the agency's times are expressed in
    #[serde(rename = "agency_timezone")]
    pub timezone: String,
}

impl Id for Agency {
    fn id(&self) -> &str {
        match &self.id {
            None => "",
            Some(id) => id,
        }
    }
}

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A service calendar describing on which days trips referencing it run.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Calendar {
    /// Unique technical identifier of this calendar
    #[serde(rename = "service_id")]
    pub id: String,
    /// Does the service run on mondays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub monday: bool,
    /// Does the service run on tuesdays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub tuesday: bool,
    /// Does the service run on wednesdays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub wednesday: bool,
    /// Does the service run on thursdays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub thursday: bool,
    /// Does the service run on fridays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub friday: bool,
    /// Does the service run on saturdays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub saturday: bool,
    /// Does the service run on sundays
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub sunday: bool,
    /// First service day of the interval
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub start_date: NaiveDate,
    /// Last service day of the interval, included
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub end_date: NaiveDate,
}

impl Id for Calendar {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}—{}", self.start_date, self.end_date)
    }
}

impl Calendar {
    /// Returns true if the service runs on the weekday of `date`.
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}
