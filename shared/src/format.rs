//! Conversion of raw form input into spreadsheet cell text.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::config::BooleanLabels;
use crate::{Error, Result};

/// Cell format for timestamps.
pub const CELL_DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Value format of an HTML `datetime-local` input.
pub const INPUT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-like date-time into local wall-clock time.
///
/// Inputs without an offset (what `datetime-local` inputs send) are already
/// local. Inputs with an offset are converted to the server's local zone.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::InvalidDateTime(input.to_string()))
}

/// Render a timestamp as `dd/MM/yyyy HH:mm:ss`.
pub fn render_date_time(dt: &NaiveDateTime) -> String {
    dt.format(CELL_DATE_TIME_FORMAT).to_string()
}

/// Parse then render a date-time input.
pub fn format_date_time(input: &str) -> Result<String> {
    parse_date_time(input).map(|dt| render_date_time(&dt))
}

/// Like [`format_date_time`], but absent or empty input gives an empty cell.
pub fn format_optional_date_time(input: Option<&str>) -> Result<String> {
    match input {
        Some(value) if !value.is_empty() => format_date_time(value),
        _ => Ok(String::new()),
    }
}

pub fn format_bool(value: bool, labels: &BooleanLabels) -> String {
    if value {
        labels.yes.clone()
    } else {
        labels.no.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn looks_like_cell_timestamp(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 19
            && bytes.iter().enumerate().all(|(i, b)| match i {
                2 | 5 => *b == b'/',
                10 => *b == b' ',
                13 | 16 => *b == b':',
                _ => b.is_ascii_digit(),
            })
    }

    #[test]
    fn test_datetime_local_input() {
        assert_eq!(format_date_time("2024-03-09T07:05").unwrap(), "09/03/2024 07:05:00");
        assert_eq!(
            format_date_time("2024-03-09T07:05:42").unwrap(),
            "09/03/2024 07:05:42"
        );
        assert_eq!(
            format_date_time("2024-03-09 23:59:59.250").unwrap(),
            "09/03/2024 23:59:59"
        );
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(format_date_time("2024-12-31").unwrap(), "31/12/2024 00:00:00");
    }

    #[test]
    fn test_offset_input_converted_to_local() {
        let expected = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 30, 0)
            .unwrap()
            .with_timezone(&Local)
            .format(CELL_DATE_TIME_FORMAT)
            .to_string();
        assert_eq!(format_date_time("2024-06-01T12:30:00Z").unwrap(), expected);
    }

    #[test]
    fn test_output_shape() {
        for input in [
            "2024-01-01T00:00",
            "1999-12-31T23:59:59",
            "2030-07-14T14:07:00+02:00",
            "2025-02-28",
        ] {
            let out = format_date_time(input).unwrap();
            assert!(looks_like_cell_timestamp(&out), "{} -> {}", input, out);
        }
    }

    #[test]
    fn test_invalid_input() {
        for input in ["", "yesterday", "2024-13-01T10:00", "09/03/2024 07:05"] {
            assert!(matches!(
                format_date_time(input),
                Err(Error::InvalidDateTime(_))
            ));
        }
    }

    #[test]
    fn test_empty_end_date_is_empty_cell() {
        assert_eq!(format_optional_date_time(Some("")).unwrap(), "");
        assert_eq!(format_optional_date_time(None).unwrap(), "");
        assert_eq!(
            format_optional_date_time(Some("2024-03-09T07:35")).unwrap(),
            "09/03/2024 07:35:00"
        );
    }

    #[test]
    fn test_bool_labels() {
        let labels = BooleanLabels::default();
        assert_eq!(format_bool(true, &labels), "OUI");
        assert_eq!(format_bool(false, &labels), "NON");
    }
}
