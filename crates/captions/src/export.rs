use crate::decode::{RANGE_DELIMITER, TimedTextFormat};
use crate::timestamp::{Separator, format_timestamp};
use crate::types::TimedSegment;

/// Write segments back out in `format`.
///
/// The output re-decodes to the same count, times (to the millisecond) and
/// text. It is not byte-identical to whatever was originally decoded: blank
/// lines inside a segment's text are removed because both grammars treat
/// them as block terminators.
pub fn encode(format: TimedTextFormat, segments: &[TimedSegment]) -> String {
    match format {
        TimedTextFormat::Srt => encode_srt(segments),
        TimedTextFormat::Vtt => encode_vtt(segments),
    }
}

pub fn encode_srt(segments: &[TimedSegment]) -> String {
    let mut output = String::new();
    for segment in segments {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            segment.index,
            format_timestamp(segment.start_seconds, Separator::Comma),
            format_timestamp(segment.end_seconds, Separator::Comma),
            body(&segment.text),
        ));
    }
    output
}

/// Cue text is escaped: `&` becomes `&amp;` and `-->` becomes `--&gt;`, so a
/// caption line quoting an arrow does not open a new cue when read back.
pub fn encode_vtt(segments: &[TimedSegment]) -> String {
    let mut output = String::from("WEBVTT\n\n");
    for segment in segments {
        output.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_timestamp(segment.start_seconds, Separator::Dot),
            format_timestamp(segment.end_seconds, Separator::Dot),
            vtt_body(&segment.text),
        ));
    }
    output
}

fn body(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cue payloads may not contain `-->`, and `&` starts a character reference.
fn vtt_body(text: &str) -> String {
    body(text)
        .replace('&', "&amp;")
        .replace(RANGE_DELIMITER, "--&gt;")
}

/// Download name for an exported caption file: the video's name with its
/// extension swapped for the caption format's.
///
/// `clip.final.mp4` becomes `clip.final.srt`; a name without an extension
/// just gains one.
pub fn export_file_name(video_name: &str, format: TimedTextFormat) -> String {
    let stem = match video_name.rfind('.') {
        Some(pos) if pos + 1 < video_name.len() && !video_name[pos + 1..].contains('/') => {
            &video_name[..pos]
        }
        _ => video_name,
    };
    format!("{stem}.{}", format.extension())
}
