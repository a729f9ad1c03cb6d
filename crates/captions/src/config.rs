use serde::Deserialize;

use crate::clock::{DEFAULT_FPS, validate_fps};

const ENV_PREFIX: &str = "CAPTIONS_";

fn default_fps() -> f64 {
    DEFAULT_FPS
}

/// Playback settings read from `CAPTIONS_`-prefixed environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_fps")]
    pub fps: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl PlaybackConfig {
    pub fn new(fps: f64) -> crate::Result<Self> {
        Ok(Self {
            fps: validate_fps(fps)?,
        })
    }

    pub fn from_env() -> crate::Result<Self> {
        envy::prefixed(ENV_PREFIX).from_env::<Self>()?.validated()
    }

    pub fn from_vars<I>(vars: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?.validated()
    }

    fn validated(self) -> crate::Result<Self> {
        Self::new(self.fps)
    }
}
