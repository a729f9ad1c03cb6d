use crate::timestamp::format_clock;
use crate::types::TimedSegment;

/// One line of the transcript list shown beside the video.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRow {
    /// Position in the segment sequence; pass it back to seek.
    pub position: usize,
    pub index: u32,
    pub start_label: String,
    pub end_label: String,
    pub text: String,
    pub is_active: bool,
}

/// Build the transcript list with `HH:MM:SS` labels, marking the row at
/// `active` (a position, as produced by the resolver).
pub fn transcript_rows(segments: &[TimedSegment], active: Option<usize>) -> Vec<TranscriptRow> {
    segments
        .iter()
        .enumerate()
        .map(|(position, segment)| TranscriptRow {
            position,
            index: segment.index,
            start_label: format_clock(segment.start_seconds),
            end_label: format_clock(segment.end_seconds),
            text: segment.text.clone(),
            is_active: active == Some(position),
        })
        .collect()
}
