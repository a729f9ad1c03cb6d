//! Payloads exchanged with the services around the engine. The engine only
//! reads and builds these; the HTTP calls themselves live elsewhere.

use crate::decode::{TimedTextFormat, decode};
use crate::style::StyleConfig;
use crate::types::TimedSegment;

/// Body returned by the transcription service. Carries the same transcript
/// in both layouts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct TranscriptionResponse {
    pub success: bool,
    pub filename: String,
    pub language: String,
    pub srt: String,
    pub vtt: String,
}

impl TranscriptionResponse {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn document(&self, format: TimedTextFormat) -> &str {
        match format {
            TimedTextFormat::Srt => &self.srt,
            TimedTextFormat::Vtt => &self.vtt,
        }
    }

    pub fn segments(&self, format: TimedTextFormat) -> Vec<TimedSegment> {
        decode(format, self.document(format))
    }
}

/// Input props handed to the server-side video composition. The caption
/// track is burned in only when both the SRT document and a style are set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionProps {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srt_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_style: Option<StyleConfig>,
}

impl CompositionProps {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            srt_content: None,
            caption_style: None,
        }
    }

    pub fn with_captions(mut self, srt_content: impl Into<String>, style: StyleConfig) -> Self {
        self.srt_content = Some(srt_content.into());
        self.caption_style = Some(style);
        self
    }

    pub fn caption_track(&self) -> Option<(Vec<TimedSegment>, &StyleConfig)> {
        match (&self.srt_content, &self.caption_style) {
            (Some(srt), Some(style)) => Some((decode(TimedTextFormat::Srt, srt), style)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
