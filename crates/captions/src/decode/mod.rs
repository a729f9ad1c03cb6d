//! Timed-text decoders.
//!
//! The two grammars share nothing but the output type and a couple of line
//! helpers: [`decode_srt`] reads blank-line separated `index / range / text`
//! blocks, [`decode_vtt`] scans cue streams line by line. Neither ever fails
//! as a whole. A malformed block or cue is logged and dropped, and an
//! unusable document decodes to an empty sequence.

mod srt;
mod vtt;

pub use srt::decode_srt;
pub use vtt::decode_vtt;

use crate::error::{Error, Result};
use crate::timestamp::parse_timestamp;
use crate::types::TimedSegment;

pub(crate) const RANGE_DELIMITER: &str = "-->";
const FORMAT_HEADER: &str = "WEBVTT";

/// The two timed-text layouts returned by the transcription service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TimedTextFormat {
    Srt,
    Vtt,
}

impl TimedTextFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }
}

/// Decode `document` with the decoder for `format`.
pub fn decode(format: TimedTextFormat, document: &str) -> Vec<TimedSegment> {
    match format {
        TimedTextFormat::Srt => decode_srt(document),
        TimedTextFormat::Vtt => decode_vtt(document),
    }
}

/// Strip a byte-order mark and fold `\r\n` / bare `\r` line endings to `\n`.
fn normalize(document: &str) -> String {
    document
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// `WEBVTT`, optionally followed by whitespace and a free-form title.
fn is_format_header(line: &str) -> bool {
    line.strip_prefix(FORMAT_HEADER)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Parse `START --> END`. Anything after the end timestamp (WebVTT cue
/// settings such as `align:start`) is ignored.
fn parse_time_range(line: &str) -> Result<(f64, f64)> {
    let (start, rest) =
        line.split_once(RANGE_DELIMITER)
            .ok_or_else(|| Error::MissingTimeRange {
                line: line.to_string(),
            })?;
    let end = rest.split_whitespace().next().unwrap_or_default();
    Ok((parse_timestamp(start)?, parse_timestamp(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("SRT".parse::<TimedTextFormat>().unwrap(), TimedTextFormat::Srt);
        assert_eq!("vtt".parse::<TimedTextFormat>().unwrap(), TimedTextFormat::Vtt);
        assert!("ass".parse::<TimedTextFormat>().is_err());
        assert_eq!(TimedTextFormat::Vtt.to_string(), "VTT");
    }

    #[test]
    fn time_range_ignores_cue_settings() {
        let (start, end) =
            parse_time_range("00:00:01.000 --> 00:00:02.500 align:start position:10%").unwrap();
        assert_relative_eq!(start, 1.0);
        assert_relative_eq!(end, 2.5);
    }

    #[test]
    fn time_range_requires_delimiter() {
        assert!(matches!(
            parse_time_range("00:00:01.000 00:00:02.500"),
            Err(Error::MissingTimeRange { .. })
        ));
        assert!(matches!(
            parse_time_range("00:00:01.000 -->"),
            Err(Error::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn header_detection() {
        assert!(is_format_header("WEBVTT"));
        assert!(is_format_header("WEBVTT - generated"));
        assert!(!is_format_header("WEBVTTX"));
        assert!(!is_format_header("hello WEBVTT"));
    }

    #[test]
    fn normalize_folds_line_endings() {
        assert_eq!(normalize("\u{feff}a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn dispatch_matches_format() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\nHi\n";
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi\n";
        assert_eq!(
            decode(TimedTextFormat::Srt, srt),
            decode(TimedTextFormat::Vtt, vtt)
        );
    }
}
