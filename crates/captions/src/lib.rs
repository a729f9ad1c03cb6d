pub mod clock;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod interface;
pub mod render;
pub mod resolve;
pub mod style;
pub mod sync;
pub mod timestamp;
pub mod types;
pub mod view;
pub mod words;

pub use clock::{
    DEFAULT_FPS, FrameAdvanced, ListenerId, ManualPlayer, PlayerClock, Subscription,
    frame_to_seconds, seconds_to_frame, validate_fps,
};
pub use config::PlaybackConfig;
pub use decode::{TimedTextFormat, decode, decode_srt, decode_vtt};
pub use error::{Error, Result};
pub use export::{encode, encode_srt, encode_vtt, export_file_name};
pub use interface::{CompositionProps, TranscriptionResponse};
pub use render::{
    Anchor, KaraokeOverlay, KaraokeWord, NewsBarOverlay, Presentation, StandardOverlay, TextStyle,
    render,
};
pub use resolve::{active_segment, resolve};
pub use style::{CaptionMode, DEFAULT_FONT_FAMILY, FONT_FAMILIES, FontSizeClass, Rgb, StyleConfig};
pub use sync::{SyncController, SyncSession, SyncUpdate, frame_at};
pub use timestamp::{Separator, format_clock, format_timestamp, parse_timestamp};
pub use types::{CaptionFrame, Segments, TimedSegment};
pub use view::{TranscriptRow, transcript_rows};
pub use words::{WordPhase, WordProgress, WordState, word_progress};
