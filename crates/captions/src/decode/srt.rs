use crate::error::Result;
use crate::types::TimedSegment;

use super::{is_format_header, normalize, parse_time_range};

/// Decode a block-based (SRT) document.
///
/// Blocks are separated by one or more blank lines and must hold an index
/// line, a `START --> END` line and at least one text line. Shorter blocks
/// are skipped. A block whose index line is not an integer is kept and given
/// the index following the previously emitted segment. A block whose time
/// range does not parse is dropped without affecting its neighbours.
pub fn decode_srt(document: &str) -> Vec<TimedSegment> {
    let normalized = normalize(document);
    let mut segments: Vec<TimedSegment> = Vec::new();

    for (ordinal, mut lines) in blocks(&normalized).enumerate() {
        if ordinal == 0 && lines.first().is_some_and(|l| is_format_header(l.trim())) {
            lines.remove(0);
        }

        let previous = segments.last().map(|s| s.index);
        match decode_block(&lines, previous) {
            Ok(Some(segment)) => segments.push(segment),
            Ok(None) => {
                tracing::debug!(block = ordinal + 1, lines = lines.len(), "skipping incomplete block");
            }
            Err(error) => {
                tracing::debug!(block = ordinal + 1, %error, "dropping malformed block");
            }
        }
    }

    tracing::trace!(segments = segments.len(), "decoded srt document");
    segments
}

fn decode_block(lines: &[&str], previous: Option<u32>) -> Result<Option<TimedSegment>> {
    let [index_line, range_line, text_lines @ ..] = lines else {
        return Ok(None);
    };
    if text_lines.is_empty() {
        return Ok(None);
    }

    let (start_seconds, end_seconds) = parse_time_range(range_line)?;

    let text = text_lines.join("\n");
    if text.trim().is_empty() {
        return Ok(None);
    }

    let index = index_line.trim().parse::<u32>().unwrap_or_else(|_| {
        let synthesized = previous.map_or(1, |p| p.saturating_add(1));
        tracing::debug!(line = *index_line, synthesized, "synthesizing block index");
        synthesized
    });

    Ok(Some(TimedSegment {
        index,
        start_seconds,
        end_seconds,
        text,
    }))
}

/// Group lines into blocks separated by whitespace-only lines. Trailing
/// whitespace is trimmed from every line.
fn blocks(document: &str) -> impl Iterator<Item = Vec<&str>> {
    let mut all = Vec::new();
    let mut current = Vec::new();

    for line in document.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !current.is_empty() {
                all.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        all.push(current);
    }

    all.into_iter()
}
