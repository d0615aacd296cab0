use chrono::NaiveDate;
use rgb::RGB8;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::Serializer;

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&s, "%Y%m%d").map_err(de::Error::custom)
}

pub fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format("%Y%m%d").to_string())
}

pub fn de_with_optional_float<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).and_then(|s| {
        if s.is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some).map_err(de::Error::custom)
        }
    })
}

pub fn serialize_float_as_str<S>(float: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match float {
        None => serializer.serialize_str(""),
        Some(f) => serializer.serialize_str(&f.to_string()),
    }
}

pub fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    match s.as_str() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(de::Error::custom(format!(
            "invalid value `{}`, expected 0 or 1",
            s
        ))),
    }
}

pub fn serialize_bool<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "1" } else { "0" })
}

pub fn parse_color(s: &str, default: impl std::ops::FnOnce() -> RGB8) -> Result<RGB8, String> {
    if s.is_empty() {
        return Ok(default());
    }
    if s.len() != 6 {
        return Err(format!("'{}' is not a valid RRGGBB color", s));
    }
    let r = u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?;
    let g = u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?;
    let b = u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?;
    Ok(RGB8::new(r, g, b))
}

pub fn deserialize_route_color<'de, D>(de: D) -> Result<RGB8, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de)
        .and_then(|s| parse_color(&s, default_route_color).map_err(de::Error::custom))
}

pub fn deserialize_route_text_color<'de, D>(de: D) -> Result<RGB8, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).and_then(|s| parse_color(&s, RGB8::default).map_err(de::Error::custom))
}

pub fn serialize_color<S>(color: &RGB8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b))
}

pub fn default_route_color() -> RGB8 {
    RGB8::new(255, 255, 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct ColorRow {
        #[serde(
            deserialize_with = "deserialize_route_color",
            serialize_with = "serialize_color"
        )]
        color: RGB8,
    }

    #[test]
    fn color_round_trip() {
        let data_in = "color\n3F7C2A\n";
        let parsed: ColorRow = csv::Reader::from_reader(data_in.as_bytes())
            .deserialize()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(RGB8::new(0x3F, 0x7C, 0x2A), parsed.color);

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&parsed).unwrap();
        let data_out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(data_in, data_out);
    }

    #[test]
    fn blank_color_takes_default() {
        assert_eq!(
            default_route_color(),
            parse_color("", default_route_color).unwrap()
        );
        assert!(parse_color("12345", default_route_color).is_err());
    }
}
