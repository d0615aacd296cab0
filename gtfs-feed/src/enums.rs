//! Enumerated field values, serialized as the integer strings the tabular
//! format uses.
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

fn serialize_i32_as_str<S: Serializer>(s: S, value: i32) -> Result<S::Ok, S::Error> {
    s.serialize_str(&value.to_string())
}

/// Whether riders may board or alight at a given stop visit.
///
/// The compiler only ever emits [PickupDropOffType::Regular] and
/// [PickupDropOffType::NotAvailable]; the other arms exist so imported rows
/// round-trip without loss.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum PickupDropOffType {
    /// Riders may board/alight normally
    #[default]
    Regular,
    /// Boarding/alighting is not available at this visit
    NotAvailable,
    /// Must phone the agency to arrange
    ArrangeByPhone,
    /// Must coordinate with the driver
    CoordinateWithDriver,
    /// Any other imported value
    Unknown(i32),
}

impl PickupDropOffType {
    /// The integer code this value carries in the tables.
    pub fn code(&self) -> i32 {
        match self {
            PickupDropOffType::Regular => 0,
            PickupDropOffType::NotAvailable => 1,
            PickupDropOffType::ArrangeByPhone => 2,
            PickupDropOffType::CoordinateWithDriver => 3,
            PickupDropOffType::Unknown(i) => *i,
        }
    }
}

impl<'de> Deserialize<'de> for PickupDropOffType {
    fn deserialize<D>(deserializer: D) -> Result<PickupDropOffType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "" | "0" => PickupDropOffType::Regular,
            "1" => PickupDropOffType::NotAvailable,
            "2" => PickupDropOffType::ArrangeByPhone,
            "3" => PickupDropOffType::CoordinateWithDriver,
            s => PickupDropOffType::Unknown(s.parse().map_err(|_| {
                serde::de::Error::custom(format!(
                    "invalid value for PickupDropOffType, must be an integer: {}",
                    s
                ))
            })?),
        })
    }
}

impl Serialize for PickupDropOffType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_i32_as_str(serializer, self.code())
    }
}

/// Direction of travel of a [crate::Trip], used to separate timetables by
/// direction when displaying them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DirectionType {
    /// Travel in one direction (e.g. outbound travel)
    #[default]
    Outbound,
    /// Travel in the opposite direction (e.g. inbound travel)
    Inbound,
}

impl DirectionType {
    /// The integer code this value carries in the tables.
    pub fn code(&self) -> i32 {
        match self {
            DirectionType::Outbound => 0,
            DirectionType::Inbound => 1,
        }
    }
}

impl<'de> Deserialize<'de> for DirectionType {
    fn deserialize<D>(deserializer: D) -> Result<DirectionType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        match s.as_str() {
            "0" => Ok(DirectionType::Outbound),
            "1" => Ok(DirectionType::Inbound),
            s => Err(serde::de::Error::custom(format!(
                "invalid value for DirectionType, expected 0 or 1: {}",
                s
            ))),
        }
    }
}

impl Serialize for DirectionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_i32_as_str(serializer, self.code())
    }
}

/// The kind of transportation used on a [crate::Route].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// Any light rail or street level system within a metropolitan area
    Tramway,
    /// Underground rail
    Subway,
    /// Intercity or long-distance rail
    Rail,
    /// Short- and long-distance bus routes
    #[default]
    Bus,
    /// Short- and long-distance boat service
    Ferry,
    /// Street-level rail cars where the cable runs beneath the vehicle
    CableCar,
    /// Aerial lift, suspended cable car
    Gondola,
    /// Any rail system designed for steep inclines
    Funicular,
    /// (extended) Intercity coach services
    Coach,
    /// (extended) Any other value
    Other(i32),
}

impl RouteType {
    /// The integer code this value carries in the tables.
    pub fn code(&self) -> i32 {
        match self {
            RouteType::Tramway => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::CableCar => 5,
            RouteType::Gondola => 6,
            RouteType::Funicular => 7,
            RouteType::Coach => 200,
            RouteType::Other(i) => *i,
        }
    }
}

impl<'de> Deserialize<'de> for RouteType {
    fn deserialize<D>(deserializer: D) -> Result<RouteType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        let i: i32 = s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid value for RouteType, must be an integer: {}",
                s
            ))
        })?;
        // 2xx values come from the extended route types
        Ok(match i {
            0 => RouteType::Tramway,
            1 => RouteType::Subway,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableCar,
            6 => RouteType::Gondola,
            7 => RouteType::Funicular,
            200..=299 => RouteType::Coach,
            _ => RouteType::Other(i),
        })
    }
}

impl Serialize for RouteType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_i32_as_str(serializer, self.code())
    }
}
