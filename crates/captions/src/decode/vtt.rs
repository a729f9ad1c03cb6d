use crate::types::TimedSegment;

use super::{RANGE_DELIMITER, is_format_header, normalize, parse_time_range};

/// A cue whose time range has been read but whose text is still arriving.
struct PendingCue {
    index: u32,
    start_seconds: f64,
    end_seconds: f64,
    lines: Vec<String>,
}

impl PendingCue {
    fn finish(self) -> Option<TimedSegment> {
        if self.lines.is_empty() {
            tracing::debug!(cue = self.index, "dropping cue without text");
            return None;
        }
        Some(TimedSegment {
            index: self.index,
            start_seconds: self.start_seconds,
            end_seconds: self.end_seconds,
            text: self.lines.join("\n"),
        })
    }
}

/// Decode a cue-based (WebVTT) document.
///
/// Any line containing `-->` opens a new cue. Declared cue identifiers are
/// ignored and cues are numbered in the order their time ranges appear.
/// Following non-blank lines are the cue text. A blank line closes the cue,
/// which is emitted only if it gathered text. A cue still open at end of input
/// is emitted as well, and so is one interrupted by the next time range
/// without a blank line in between. Lines outside any cue (the `WEBVTT`
/// header, `NOTE` blocks, cue identifiers) are ignored.
pub fn decode_vtt(document: &str) -> Vec<TimedSegment> {
    let normalized = normalize(document);
    let mut segments = Vec::new();
    let mut pending: Option<PendingCue> = None;
    let mut next_index: u32 = 0;

    for (line_no, raw) in normalized.lines().enumerate() {
        let line = raw.trim();

        if line.contains(RANGE_DELIMITER) {
            segments.extend(pending.take().and_then(PendingCue::finish));
            next_index = next_index.saturating_add(1);

            match parse_time_range(line) {
                Ok((start_seconds, end_seconds)) => {
                    pending = Some(PendingCue {
                        index: next_index,
                        start_seconds,
                        end_seconds,
                        lines: Vec::new(),
                    });
                }
                Err(error) => {
                    tracing::debug!(line = line_no + 1, %error, "dropping cue with malformed time range");
                }
            }
        } else if line.is_empty() {
            segments.extend(pending.take().and_then(PendingCue::finish));
        } else if is_format_header(line) {
            continue;
        } else if let Some(cue) = pending.as_mut() {
            cue.lines.push(unescape(line));
        }
    }

    segments.extend(pending.take().and_then(PendingCue::finish));

    tracing::trace!(segments = segments.len(), "decoded vtt document");
    segments
}

/// Resolve the character references a cue payload needs for `<`, `>` and
/// `&`. `&amp;` goes last so `&amp;gt;` stays `&gt;`.
fn unescape(line: &str) -> String {
    line.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
