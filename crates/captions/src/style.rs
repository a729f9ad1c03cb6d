use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Fonts offered by the style controls.
pub const FONT_FAMILIES: &[&str] = &[
    "Poppins",
    "Lato",
    "Cinzel Decorative",
    "Tangerine",
    "Sacramento",
    "Great Vibes",
    "Source Code Pro",
    "IBM Plex Mono",
    "Noto Sans Devanagari",
    "Hind",
];

pub const DEFAULT_FONT_FAMILY: &str = "Poppins";

/// Base caption size the `fontSizeClass` ladder scales.
const BASE_FONT_SIZE_PX: f64 = 24.0;

/// 8-bit sRGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb` and the `#rgb` shorthand, with or without `#`.
    pub fn from_hex(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            input: value.to_string(),
        };

        let digits = value.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let double = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::new(double(0)?, double(1)?, double(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend toward white; `0.0` keeps the color, `1.0` is white.
    pub fn lighten(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f64 + (255.0 - c as f64) * factor).round() as u8;
        Self::new(mix(self.r), mix(self.g), mix(self.b))
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Serde adapter for hex-string colors in style configuration.
mod hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Rgb;

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let value = String::deserialize(deserializer)?;
        Rgb::from_hex(&value).map_err(serde::de::Error::custom)
    }
}

/// Presentation style. Unknown labels fall back to [`CaptionMode::Standard`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "kebab-case")]
pub enum CaptionMode {
    Karaoke,
    NewsBar,
    #[default]
    Standard,
}

impl CaptionMode {
    /// Accepts the style-picker labels (`"Karaoke Style"`,
    /// `"News Style (Top Bar)"`, `"Standard (Bottom Centered)"`) and the
    /// short names (`karaoke`, `news-bar`, `standard`).
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        if label.starts_with("karaoke") {
            Self::Karaoke
        } else if label.starts_with("news") {
            Self::NewsBar
        } else {
            Self::Standard
        }
    }
}

impl From<String> for CaptionMode {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<CaptionMode> for String {
    fn from(mode: CaptionMode) -> Self {
        mode.to_string()
    }
}

/// Size ladder of the style controls. Unknown values fall back to
/// [`FontSizeClass::Md`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum FontSizeClass {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl FontSizeClass {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "xs" => Self::Xs,
            "sm" => Self::Sm,
            "lg" => Self::Lg,
            "xl" => Self::Xl,
            _ => Self::Md,
        }
    }

    /// Same ratios as the picker's rem ladder, applied to the 24 px base.
    pub fn pixels(&self) -> f64 {
        let ratio = match self {
            Self::Xs => 0.75,
            Self::Sm => 0.875,
            Self::Md => 1.0,
            Self::Lg => 1.125,
            Self::Xl => 1.25,
        };
        BASE_FONT_SIZE_PX * ratio
    }
}

impl From<String> for FontSizeClass {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<FontSizeClass> for String {
    fn from(size: FontSizeClass) -> Self {
        size.to_string()
    }
}

fn default_text_color() -> Rgb {
    Rgb::WHITE
}

fn default_background_color() -> Rgb {
    Rgb::BLACK
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// Caption style chosen by the user. Passed explicitly into every render
/// call; missing fields take the defaults of the style controls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default)]
    pub mode: CaptionMode,
    #[serde(default = "default_text_color", with = "hex")]
    pub text_color: Rgb,
    #[serde(default = "default_background_color", with = "hex")]
    pub background_color: Rgb,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub font_size_class: FontSizeClass,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            mode: CaptionMode::default(),
            text_color: default_text_color(),
            background_color: default_background_color(),
            font_family: default_font_family(),
            font_size_class: FontSizeClass::default(),
        }
    }
}

impl StyleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_mode(mut self, mode: CaptionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured family, or the default one when left blank. Known
    /// families are matched case-insensitively and returned with their
    /// canonical spelling; anything else passes through.
    pub fn font_family(&self) -> &str {
        match self.font_family.trim() {
            "" => DEFAULT_FONT_FAMILY,
            family => FONT_FAMILIES
                .iter()
                .copied()
                .find(|known| known.eq_ignore_ascii_case(family))
                .unwrap_or(family),
        }
    }

    pub fn has_known_font_family(&self) -> bool {
        FONT_FAMILIES.contains(&self.font_family())
    }

    pub fn font_size_px(&self) -> f64 {
        self.font_size_class.pixels()
    }
}
