use crate::error::{Error, Result};

/// Punctuation between the seconds and milliseconds fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `HH:MM:SS,mmm`, as written in SRT documents.
    Comma,
    /// `HH:MM:SS.mmm`, as written in WebVTT documents.
    Dot,
}

impl Separator {
    fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Dot => '.',
        }
    }
}

/// Parse `HH:MM:SS,mmm` or `HH:MM:SS.mmm` into elapsed seconds.
///
/// The millisecond field is optional and defaults to zero. The hour-less
/// `MM:SS.mmm` form allowed by WebVTT is accepted as well. The millisecond
/// field is read as an integer count of milliseconds, so `00:00:01,5` is
/// 1.005 seconds rather than 1.5.
pub fn parse_timestamp(input: &str) -> Result<f64> {
    let malformed = || Error::MalformedTimestamp {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let (clock, millis) = match trimmed.find([',', '.']) {
        Some(pos) => (&trimmed[..pos], Some(&trimmed[pos + 1..])),
        None => (trimmed, None),
    };

    let fields: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (field(h), field(m), field(s)),
        [m, s] => (Some(0), field(m), field(s)),
        _ => return Err(malformed()),
    };
    let millis = match millis {
        Some(ms) => field(ms),
        None => Some(0),
    };

    match (hours, minutes, seconds, millis) {
        (Some(h), Some(m), Some(s), Some(ms)) => {
            Ok(h as f64 * 3600.0 + m as f64 * 60.0 + s as f64 + ms as f64 / 1000.0)
        }
        _ => Err(malformed()),
    }
}

fn field(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Format elapsed seconds as `HH:MM:SS<sep>mmm`, rounding to the nearest
/// millisecond. Negative input is clamped to zero.
pub fn format_timestamp(seconds: f64, separator: Separator) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;
    format!(
        "{hours:02}:{minutes:02}:{secs:02}{}{millis:03}",
        separator.as_char()
    )
}

/// `HH:MM:SS` label used by the transcript list. Sub-second precision is
/// truncated, not rounded.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_both_separators() {
        assert_relative_eq!(parse_timestamp("00:00:01,000").unwrap(), 1.0);
        assert_relative_eq!(parse_timestamp("00:00:01.250").unwrap(), 1.25);
        assert_relative_eq!(parse_timestamp("01:02:03,004").unwrap(), 3723.004);
    }

    #[test]
    fn missing_millis_defaults_to_zero() {
        assert_relative_eq!(parse_timestamp("00:01:05").unwrap(), 65.0);
    }

    #[test]
    fn accepts_hourless_form() {
        assert_relative_eq!(parse_timestamp("01:05.500").unwrap(), 65.5);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_relative_eq!(parse_timestamp("  00:00:02,000\r").unwrap(), 2.0);
    }

    #[test]
    fn rejects_non_integer_fields() {
        for input in ["aa:00:01,000", "00:00:01,xyz", "1:2:3:4", "", "00:00:01,", "-1:00:00,000"] {
            assert!(
                matches!(parse_timestamp(input), Err(Error::MalformedTimestamp { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn formats_with_requested_separator() {
        assert_eq!(format_timestamp(3723.004, Separator::Comma), "01:02:03,004");
        assert_eq!(format_timestamp(1.5, Separator::Dot), "00:00:01.500");
        assert_eq!(format_timestamp(-4.0, Separator::Dot), "00:00:00.000");
    }

    #[test]
    fn clock_label_truncates() {
        assert_eq!(format_clock(61.999), "00:01:01");
        assert_eq!(format_clock(3600.0), "01:00:00");
    }

    #[quickcheck_macros::quickcheck]
    fn prop_format_then_parse_preserves_millis(total_ms: u32) -> bool {
        let seconds = total_ms as f64 / 1000.0;
        let parsed = parse_timestamp(&format_timestamp(seconds, Separator::Comma)).unwrap();
        (parsed * 1000.0).round() as u32 == total_ms
    }
}
