//! Parsing of the localized 12-hour clock strings used by the imsakia,
//! e.g. `"05:15 ص"` (fajr) or `"06:05 م"` (maghrib).

use std::fmt;

/// The period markers used in the schedule data: ص before noon, م after noon.
const BEFORE_NOON: char = 'ص';
const AFTER_NOON: char = 'م';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTimeFormat;

impl fmt::Display for InvalidTimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid time format")
    }
}

impl std::error::Error for InvalidTimeFormat {}

/// Converts a clock-time string into minutes since midnight [0, 1439].
///
/// Hour 12 with the before-noon marker maps to 0; any other hour with the
/// after-noon marker adds 12. Without a marker the hour is taken as written
/// (24-hour form).
pub fn parse_time_to_minutes(input: &str) -> Result<u32, InvalidTimeFormat> {
    let mut parts = input.trim().split_whitespace();
    let clock = parts.next().ok_or(InvalidTimeFormat)?;
    let marker = parts.next().and_then(|m| m.chars().next());

    let (hours_str, minutes_str) = clock.split_once(':').ok_or(InvalidTimeFormat)?;
    let mut hours: u32 = hours_str.parse().map_err(|_| InvalidTimeFormat)?;
    let minutes: u32 = minutes_str.parse().map_err(|_| InvalidTimeFormat)?;

    if minutes > 59 {
        return Err(InvalidTimeFormat);
    }

    match marker {
        Some(AFTER_NOON) if hours != 12 => hours += 12,
        Some(BEFORE_NOON) if hours == 12 => hours = 0,
        Some(AFTER_NOON) | Some(BEFORE_NOON) | None => {}
        Some(_) => return Err(InvalidTimeFormat),
    }

    if hours > 23 {
        return Err(InvalidTimeFormat);
    }

    Ok(hours * 60 + minutes)
}

/// Degradation policy for schedule data: a malformed or missing time reads as
/// midnight rather than crashing the state machine. Warned loudly so broken
/// imsakia uploads are visible in the logs.
pub fn minutes_or_zero(time: Option<&str>) -> u32 {
    match time {
        Some(s) => parse_time_to_minutes(s).unwrap_or_else(|_| {
            tracing::warn!("unparseable schedule time {s:?}, treating as 00:00");
            0
        }),
        None => {
            tracing::warn!("missing schedule time, treating as 00:00");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_before_noon() {
        assert_eq!(parse_time_to_minutes("05:15 ص"), Ok(315));
    }

    #[test]
    fn parses_after_noon() {
        assert_eq!(parse_time_to_minutes("08:30 م"), Ok(1230));
        assert_eq!(parse_time_to_minutes("06:05 م"), Ok(1085));
    }

    #[test]
    fn noon_and_midnight_edges() {
        // 12 with the before-noon marker is midnight
        assert_eq!(parse_time_to_minutes("12:15 ص"), Ok(15));
        // 12 with the after-noon marker stays noon
        assert_eq!(parse_time_to_minutes("12:00 م"), Ok(720));
    }

    #[test]
    fn no_marker_is_24_hour() {
        assert_eq!(parse_time_to_minutes("18:00"), Ok(1080));
        assert_eq!(parse_time_to_minutes("0:00"), Ok(0));
    }

    #[test]
    fn monotonic_over_a_day() {
        let fixtures = ["12:01 ص", "05:15 ص", "11:59 ص", "12:00 م", "06:05 م", "11:59 م"];
        let minutes: Vec<u32> = fixtures
            .iter()
            .map(|s| parse_time_to_minutes(s).unwrap())
            .collect();
        assert!(minutes.windows(2).all(|w| w[0] < w[1]), "{minutes:?}");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_time_to_minutes(""), Err(InvalidTimeFormat));
        assert_eq!(parse_time_to_minutes("noon"), Err(InvalidTimeFormat));
        assert_eq!(parse_time_to_minutes("25:00"), Err(InvalidTimeFormat));
        assert_eq!(parse_time_to_minutes("10:75 ص"), Err(InvalidTimeFormat));
        assert_eq!(parse_time_to_minutes("10-30"), Err(InvalidTimeFormat));
    }

    #[test]
    fn malformed_degrades_to_zero() {
        assert_eq!(minutes_or_zero(Some("garbage")), 0);
        assert_eq!(minutes_or_zero(None), 0);
        assert_eq!(minutes_or_zero(Some("05:15 ص")), 315);
    }
}
