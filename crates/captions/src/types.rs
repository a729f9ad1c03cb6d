use std::sync::Arc;

use crate::render::Presentation;

/// One timed unit of caption text.
///
/// `index` is the ordinal declared in the source document. It is neither
/// required to be contiguous nor sorted, and the position of a segment in
/// its sequence (declaration order) is what every other API refers to.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TimedSegment {
    pub index: u32,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}

impl TimedSegment {
    /// Inclusive at both ends.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_seconds && t <= self.end_seconds
    }

    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// An immutable, decoded segment sequence in declaration order.
///
/// A new transcription result replaces the whole sequence; nothing mutates
/// it in place, so it is shared by reference count between the controller
/// and any view that lists it.
pub type Segments = Arc<[TimedSegment]>;

/// Complete snapshot of the caption state for one playback instant.
///
/// This is the rendering contract: everything the overlay and the transcript
/// list need for one frame, with no time-dependent work left to the caller.
/// Produced by [`crate::sync::frame_at`] and [`crate::sync::SyncController::tick`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct CaptionFrame {
    pub time_seconds: f64,
    /// Position (not declared index) of the active segment.
    pub active_index: Option<usize>,
    /// `None` while nothing is being spoken.
    pub presentation: Option<Presentation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64) -> TimedSegment {
        TimedSegment {
            index: 1,
            start_seconds: start,
            end_seconds: end,
            text: "x".to_string(),
        }
    }

    #[test]
    fn contains_is_inclusive() {
        let s = segment(1.0, 3.0);
        assert!(s.contains(1.0));
        assert!(s.contains(3.0));
        assert!(!s.contains(3.000_001));
        assert!(!s.contains(0.999));
        assert!(!s.contains(f64::NAN));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&segment(0.5, 1.0)).unwrap();
        assert_eq!(
            json,
            r#"{"index":1,"startSeconds":0.5,"endSeconds":1.0,"text":"x"}"#
        );
    }
}
