//! Pure mapping from the active segment and style to a presentation
//! description. Every value the overlay needs is resolved here, so the
//! display layer only paints.

use std::f64::consts::PI;

use crate::style::{CaptionMode, Rgb, StyleConfig};
use crate::types::TimedSegment;
use crate::words::{WordPhase, WordProgress, word_progress};

pub const STANDARD_FADE_SECONDS: f64 = 0.2;
pub const STANDARD_START_SCALE: f64 = 0.9;
pub const NEWS_BAR_SLIDE_SECONDS: f64 = 0.3;

/// How far pending karaoke words are blended toward white.
pub const PENDING_LIGHTEN: f64 = 0.65;
pub const ACTIVE_WORD_PEAK_SCALE: f64 = 1.15;
/// Share of the active word's slice spent ramping up, and again ramping down.
const SCALE_RAMP: f64 = 0.3;
/// Share of the active word's slice covered by the bounce.
const BOUNCE_WINDOW: f64 = 0.2;
const BOUNCE_HEIGHT_PX: f64 = 3.0;

const SPOKEN_OPACITY: f64 = 0.9;
const ACTIVE_OPACITY: f64 = 1.0;
const PENDING_OPACITY: f64 = 0.5;

const BACKGROUND_ALPHA: f64 = 0.8;
const BOTTOM_OFFSET_PERCENT: f64 = 10.0;
const MAX_WIDTH_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anchor {
    /// Horizontally centred, `offset_percent` of the frame height above the
    /// bottom edge.
    #[serde(rename_all = "camelCase")]
    BottomCenter { offset_percent: f64 },
    /// Full-width bar pinned to the top edge.
    TopBar,
}

/// Values shared by every mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub color: Rgb,
    pub background: Rgb,
    pub background_alpha: f64,
    pub font_family: String,
    pub font_size_px: f64,
    pub max_width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct StandardOverlay {
    pub anchor: Anchor,
    pub style: TextStyle,
    pub text: String,
    pub opacity: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct NewsBarOverlay {
    pub anchor: Anchor,
    pub style: TextStyle,
    pub text: String,
    /// Slide-in progress in `[0, 1]`.
    pub progress: f64,
    /// Vertical offset as a percentage of the bar's own height; `-100` is
    /// fully off-screen above the frame.
    pub translate_y_percent: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct KaraokeWord {
    pub word_index: usize,
    pub text: String,
    pub phase: WordPhase,
    pub color: Rgb,
    pub opacity: f64,
    pub scale: f64,
    pub translate_y_px: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct KaraokeOverlay {
    pub anchor: Anchor,
    pub style: TextStyle,
    pub words: Vec<KaraokeWord>,
}

/// One variant per [`CaptionMode`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Presentation {
    Standard(StandardOverlay),
    NewsBar(NewsBarOverlay),
    Karaoke(KaraokeOverlay),
}

impl Presentation {
    pub fn mode(&self) -> CaptionMode {
        match self {
            Self::Standard(_) => CaptionMode::Standard,
            Self::NewsBar(_) => CaptionMode::NewsBar,
            Self::Karaoke(_) => CaptionMode::Karaoke,
        }
    }
}

/// Map the active segment (if any) to what the overlay shows at `t`.
///
/// `words` is consulted only in karaoke mode; pass the result of
/// [`word_progress`] for the same segment and instant, or `None` to have it
/// computed here.
pub fn render(
    active: Option<&TimedSegment>,
    words: Option<&WordProgress>,
    t: f64,
    style: &StyleConfig,
) -> Option<Presentation> {
    let segment = active?;
    let elapsed = t - segment.start_seconds;

    Some(match style.mode {
        CaptionMode::Standard => Presentation::Standard(standard(segment, elapsed, style)),
        CaptionMode::NewsBar => Presentation::NewsBar(news_bar(segment, elapsed, style)),
        CaptionMode::Karaoke => {
            let computed;
            let words = match words {
                Some(words) => Some(words),
                None => {
                    computed = word_progress(segment, t);
                    computed.as_ref()
                }
            };
            Presentation::Karaoke(karaoke(words, style))
        }
    })
}

fn text_style(style: &StyleConfig) -> TextStyle {
    TextStyle {
        color: style.text_color,
        background: style.background_color,
        background_alpha: BACKGROUND_ALPHA,
        font_family: style.font_family().to_string(),
        font_size_px: style.font_size_px(),
        max_width_percent: MAX_WIDTH_PERCENT,
    }
}

fn standard(segment: &TimedSegment, elapsed: f64, style: &StyleConfig) -> StandardOverlay {
    let progress = window_progress(elapsed, STANDARD_FADE_SECONDS);
    StandardOverlay {
        anchor: Anchor::BottomCenter {
            offset_percent: BOTTOM_OFFSET_PERCENT,
        },
        style: text_style(style),
        text: segment.text.clone(),
        opacity: progress,
        scale: lerp(STANDARD_START_SCALE, 1.0, progress),
    }
}

fn news_bar(segment: &TimedSegment, elapsed: f64, style: &StyleConfig) -> NewsBarOverlay {
    let progress = window_progress(elapsed, NEWS_BAR_SLIDE_SECONDS);
    NewsBarOverlay {
        anchor: Anchor::TopBar,
        style: text_style(style),
        text: segment.text.clone(),
        progress,
        translate_y_percent: (1.0 - progress) * -100.0,
    }
}

fn karaoke(words: Option<&WordProgress>, style: &StyleConfig) -> KaraokeOverlay {
    let active_color = style.text_color;
    let pending_color = active_color.lighten(PENDING_LIGHTEN);

    let words = words
        .map(|p| p.words.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|word| {
            let (color, opacity, scale, translate_y_px) = match word.phase {
                WordPhase::Spoken => (active_color, SPOKEN_OPACITY, 1.0, 0.0),
                WordPhase::Active => (
                    active_color,
                    ACTIVE_OPACITY,
                    active_word_scale(word.progress),
                    active_word_bounce(word.progress),
                ),
                WordPhase::Pending => (pending_color, PENDING_OPACITY, 1.0, 0.0),
            };
            KaraokeWord {
                word_index: word.word_index,
                text: word.text.clone(),
                phase: word.phase,
                color,
                opacity,
                scale,
                translate_y_px,
            }
        })
        .collect();

    KaraokeOverlay {
        anchor: Anchor::BottomCenter {
            offset_percent: BOTTOM_OFFSET_PERCENT,
        },
        style: text_style(style),
        words,
    }
}

/// Scale envelope of the active word: eases up to the peak over the first
/// ramp, holds, and eases back to 1.0 over the last ramp.
pub fn active_word_scale(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let envelope = if p < SCALE_RAMP {
        ease_in_out(p / SCALE_RAMP)
    } else if p > 1.0 - SCALE_RAMP {
        ease_in_out((1.0 - p) / SCALE_RAMP)
    } else {
        1.0
    };
    lerp(1.0, ACTIVE_WORD_PEAK_SCALE, envelope)
}

/// Upward hop at the start of the active word's slice, in pixels (negative
/// is up).
pub fn active_word_bounce(progress: f64) -> f64 {
    if (0.0..BOUNCE_WINDOW).contains(&progress) {
        -BOUNCE_HEIGHT_PX * (progress / BOUNCE_WINDOW * PI).sin()
    } else {
        0.0
    }
}

fn window_progress(elapsed: f64, window: f64) -> f64 {
    (elapsed / window).clamp(0.0, 1.0)
}

fn ease_in_out(x: f64) -> f64 {
    0.5 - 0.5 * (x.clamp(0.0, 1.0) * PI).cos()
}

fn lerp(from: f64, to: f64, amount: f64) -> f64 {
    from + (to - from) * amount
}
