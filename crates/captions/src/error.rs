#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed timestamp: {input:?}")]
    MalformedTimestamp { input: String },
    #[error("line is not a time range: {line:?}")]
    MissingTimeRange { line: String },
    #[error("invalid color: {input:?}")]
    InvalidColor { input: String },
    #[error("frame rate must be finite and positive, got {fps}")]
    InvalidFps { fps: f64 },
    #[error("no segment at position {index}")]
    UnknownSegment { index: usize },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Env(#[from] envy::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
