use captions::{CaptionMode, TimedTextFormat};

#[derive(Clone, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Fixture {
    #[strum(serialize = "interview-srt")]
    #[value(name = "interview-srt")]
    InterviewSrt,
    #[strum(serialize = "interview-vtt")]
    #[value(name = "interview-vtt")]
    InterviewVtt,
}

impl Fixture {
    pub fn format(&self) -> TimedTextFormat {
        match self {
            Self::InterviewSrt => TimedTextFormat::Srt,
            Self::InterviewVtt => TimedTextFormat::Vtt,
        }
    }

    pub fn document(&self) -> &'static str {
        match self {
            Self::InterviewSrt => include_str!("../../data/interview.srt"),
            Self::InterviewVtt => include_str!("../../data/interview.vtt"),
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    Karaoke,
    NewsBar,
    Standard,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Self::Karaoke => Self::NewsBar,
            Self::NewsBar => Self::Standard,
            Self::Standard => Self::Karaoke,
        }
    }
}

impl From<Mode> for CaptionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Karaoke => CaptionMode::Karaoke,
            Mode::NewsBar => CaptionMode::NewsBar,
            Mode::Standard => CaptionMode::Standard,
        }
    }
}
