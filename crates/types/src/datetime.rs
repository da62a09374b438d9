//! Datetime text parsing and the zero timestamp.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::TypesError;

/// Rendering format for datetime values.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unix seconds of `0001-01-01 00:00:00 UTC`.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// The zero timestamp, which coerces to FALSE.
pub fn zero() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(ZERO_UNIX_SECONDS, 0)
        .map(|dt| dt.fixed_offset())
        .unwrap_or_default()
}

pub fn is_zero(dt: &DateTime<FixedOffset>) -> bool {
    dt.timestamp() == ZERO_UNIX_SECONDS && dt.timestamp_subsec_nanos() == 0
}

/// Parse datetime text. Text without an explicit offset is interpreted in
/// `location`.
pub fn parse_datetime(text: &str, location: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return Some(dt);
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    location.from_local_datetime(&naive).single()
}

/// Parse a time-zone offset: `UTC`, `Z`, `+09:00`, `-0800` or `+09`.
pub fn parse_offset(text: &str) -> Result<FixedOffset, TypesError> {
    let invalid = || TypesError::InvalidOffset(text.to_string());
    let s = text.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("UTC") || s == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match s.as_bytes()[0] {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().map_err(|_| invalid())?, 0),
        4 => (
            digits[..2].parse::<i32>().map_err(|_| invalid())?,
            digits[2..].parse::<i32>().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn zero_timestamp_is_year_one() {
        let z = zero();
        assert!(is_zero(&z));
        assert_eq!(z.format(DISPLAY_FORMAT).to_string(), "0001-01-01 00:00:00");
    }

    #[test]
    fn parses_naive_forms_in_location() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let dt = parse_datetime("2012-01-01 12:34:56", tokyo).unwrap();
        assert_eq!(dt.offset(), &tokyo);
        assert_eq!(dt.format(DISPLAY_FORMAT).to_string(), "2012-01-01 12:34:56");

        let dt = parse_datetime("2012/01/01 12:34:56.789", utc()).unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 789);

        let dt = parse_datetime("2012-01-01", utc()).unwrap();
        assert_eq!(dt.format(DISPLAY_FORMAT).to_string(), "2012-01-01 00:00:00");
    }

    #[test]
    fn parses_explicit_offsets() {
        let dt = parse_datetime("2012-01-01T12:34:56-08:00", utc()).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -8 * 3600);
        assert_eq!(dt.timestamp(), 1_325_450_096);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("not a date", utc()).is_none());
        assert!(parse_datetime("", utc()).is_none());
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("UTC").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("+09:00").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_offset("-0830").unwrap().local_minus_utc(), -(8 * 3600 + 1800));
        assert_eq!(parse_offset("+05").unwrap().local_minus_utc(), 5 * 3600);
        assert!(parse_offset("Mars/Olympus").is_err());
        assert!(parse_offset("+25:00").is_err());
    }
}
