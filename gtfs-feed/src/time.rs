//! Conversions between the two textual clock forms the tables use.
//!
//! Stored values look like `H:MM:SS` or `HH:MM:SS`; hours may exceed 23 to
//! express post-midnight service (`25:10:00` is ten past one on the following
//! night). Display values look like `HH:MM`. The empty string denotes "unset"
//! in both forms.
//!
//! Every function here is total: a value that does not parse is passed
//! through unchanged rather than rejected, so a half-typed cell survives an
//! edit session and is caught by validation at export time instead.

/// Splits a clock string into its hour, minute and optional second digit
/// groups. Minutes and seconds must be exactly two digits; hours one or more.
fn split_clock(s: &str) -> Option<(&str, &str, Option<&str>)> {
    fn digits(part: &str) -> bool {
        !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
    }

    let mut parts = s.split(':');
    let hours = parts.next()?;
    let minutes = parts.next()?;
    let seconds = parts.next();
    if parts.next().is_some() {
        return None;
    }
    if !digits(hours) || minutes.len() != 2 || !digits(minutes) {
        return None;
    }
    if let Some(sec) = seconds {
        if sec.len() != 2 || !digits(sec) {
            return None;
        }
    }
    Some((hours, minutes, seconds))
}

/// Parses a clock string into seconds since midnight.
///
/// Accepts both the stored (`H+:MM:SS`) and the display (`H+:MM`) forms.
/// Returns `None` for blank or malformed values.
pub fn parse_seconds(time: &str) -> Option<u32> {
    let (h, m, s) = split_clock(time.trim())?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    let seconds: u32 = match s {
        Some(sec) => sec.parse().ok()?,
        None => 0,
    };
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Converts a stored time to its display form: hour zero-padded to at least
/// two digits, seconds dropped. A value that does not match `H+:MM(:SS)?` is
/// returned unchanged.
pub fn to_display(stored: &str) -> String {
    match split_clock(stored) {
        Some((h, m, _)) => format!("{:0>2}:{}", h, m),
        None => stored.to_owned(),
    }
}

/// Converts a display time to its stored form.
///
/// Blank input becomes the empty string. An `H:MM` or `HH:MM` value gets a
/// zero-padded hour and `:00` seconds. A value already carrying seconds, or
/// anything unrecognized, is returned unchanged (this supports pasting raw
/// stored values straight into a cell).
pub fn to_stored(display: &str) -> String {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match split_clock(trimmed) {
        Some((h, m, None)) if h.len() <= 2 => format!("{:0>2}:{}:00", h, m),
        _ => display.to_owned(),
    }
}

/// Normalizes a stored time for emission: hour zero-padded to at least two
/// digits, seconds defaulted to `00`. Unparseable values pass through.
pub fn to_export(stored: &str) -> String {
    match split_clock(stored) {
        Some((h, m, s)) => format!("{:0>2}:{}:{}", h, m, s.unwrap_or("00")),
        None => stored.to_owned(),
    }
}

/// Returns false iff some parseable time in the sequence is earlier than the
/// parseable time before it. Blank and malformed entries are skipped, not
/// treated as violations.
pub fn is_non_decreasing<'a, I>(times: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut prev: Option<u32> = None;
    for time in times {
        if let Some(parsed) = parse_seconds(time) {
            if let Some(previous) = prev {
                if parsed < previous {
                    return false;
                }
            }
            prev = Some(parsed);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trip() {
        assert_eq!("09:05:00", to_stored("9:05"));
        assert_eq!("09:05", to_display(&to_stored("9:05")));
        assert_eq!("14:30:00", to_stored("14:30"));
        assert_eq!("14:30", to_display("14:30:00"));
    }

    #[test]
    fn post_midnight_hours_survive() {
        assert_eq!("25:10", to_display("25:10:00"));
        assert_eq!(25 * 3600 + 600, parse_seconds("25:10:00").unwrap());
        // a three digit hour is not a display form, so it passes through
        assert_eq!("125:30", to_stored("125:30"));
    }

    #[test]
    fn malformed_values_pass_through() {
        assert_eq!("later", to_display("later"));
        assert_eq!("later", to_stored("later"));
        assert_eq!("9:5", to_stored("9:5"));
        assert_eq!("", to_stored("   "));
        assert_eq!("", to_display(""));
        assert_eq!(None, parse_seconds("9:5"));
        assert_eq!(None, parse_seconds(""));
    }

    #[test]
    fn pasting_a_stored_value_keeps_it() {
        assert_eq!("08:00:30", to_stored("08:00:30"));
        assert_eq!("8:00:30", to_stored("8:00:30"));
    }

    #[test]
    fn export_form_is_padded() {
        assert_eq!("09:05:00", to_export("9:05:00"));
        assert_eq!("09:05:00", to_export("9:05"));
        assert_eq!("garbage", to_export("garbage"));
    }

    #[test]
    fn monotonicity_skips_unparseable_entries() {
        assert!(is_non_decreasing(["08:00:00", "", "08:10:00"]));
        assert!(is_non_decreasing(["08:00:00", "oops", "08:10:00"]));
        assert!(!is_non_decreasing(["08:10:00", "", "08:00:00"]));
        assert!(is_non_decreasing(["08:00:00", "08:00:00"]));
        assert!(is_non_decreasing([]));
    }
}
