// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// How email timestamps are stored and compared. Lexicographic order of this
/// format equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// Parses a timestamp given as RFC 3339, an RFC 2822 mail `Date` header, a
/// plain `YYYY-MM-DD[ HH:MM[:SS]]` (space or `T`), or a bare date (midnight).
/// Values with an offset are converted to UTC.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(date) = parse_date_only(input) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// Normalizes a range bound to the stored whole-second format. A bare date
/// used as an upper bound covers that whole day. A lower bound with a
/// fractional second rounds up, so it never admits the second it starts in.
pub fn parse_bound(input: &str, bound: Bound) -> Option<String> {
    let input = input.trim();
    let timestamp = match (parse_date_only(input), bound) {
        (Some(date), Bound::Upper) => date.and_hms_opt(23, 59, 59)?,
        (Some(date), Bound::Lower) => date.and_time(NaiveTime::MIN),
        (None, Bound::Lower) => ceil_to_second(parse_timestamp(input)?)?,
        (None, Bound::Upper) => parse_timestamp(input)?,
    };
    Some(format_timestamp(&timestamp))
}

fn ceil_to_second(timestamp: NaiveDateTime) -> Option<NaiveDateTime> {
    if timestamp.nanosecond() == 0 {
        return Some(timestamp);
    }
    timestamp
        .with_nanosecond(0)?
        .checked_add_signed(TimeDelta::seconds(1))
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_date_only(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(input: &str) -> Option<String> {
        parse_timestamp(input).map(|ts| format_timestamp(&ts))
    }

    #[test]
    fn accepts_common_shapes() {
        assert_eq!(normalized("2024-03-05").as_deref(), Some("2024-03-05 00:00:00"));
        assert_eq!(
            normalized("2024-03-05 14:30:00").as_deref(),
            Some("2024-03-05 14:30:00")
        );
        assert_eq!(
            normalized("2024-03-05T14:30").as_deref(),
            Some("2024-03-05 14:30:00")
        );
        assert_eq!(
            normalized("2024-03-05T14:30:00+02:00").as_deref(),
            Some("2024-03-05 12:30:00")
        );
        assert_eq!(
            normalized("Tue, 5 Mar 2024 14:30:00 -0800").as_deref(),
            Some("2024-03-05 22:30:00")
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(normalized(""), None);
        assert_eq!(normalized("yesterday"), None);
        assert_eq!(normalized("2024-13-40"), None);
    }

    #[test]
    fn fractional_lower_bound_rounds_up() {
        assert_eq!(
            parse_bound("2024-01-03T09:00:00.500Z", Bound::Lower).as_deref(),
            Some("2024-01-03 09:00:01")
        );
        assert_eq!(
            parse_bound("2024-01-03T23:59:59.250+00:00", Bound::Lower).as_deref(),
            Some("2024-01-04 00:00:00")
        );
        assert_eq!(
            parse_bound("2024-01-03T09:00:00Z", Bound::Lower).as_deref(),
            Some("2024-01-03 09:00:00")
        );
        assert_eq!(
            parse_bound("2024-01-03T09:00:00.500Z", Bound::Upper).as_deref(),
            Some("2024-01-03 09:00:00")
        );
    }

    #[test]
    fn bare_upper_bound_spans_the_day() {
        assert_eq!(
            parse_bound("2024-03-05", Bound::Upper).as_deref(),
            Some("2024-03-05 23:59:59")
        );
        assert_eq!(
            parse_bound("2024-03-05", Bound::Lower).as_deref(),
            Some("2024-03-05 00:00:00")
        );
        assert_eq!(
            parse_bound("2024-03-05 08:00:00", Bound::Upper).as_deref(),
            Some("2024-03-05 08:00:00")
        );
        assert_eq!(parse_bound("soon", Bound::Lower), None);
    }
}
