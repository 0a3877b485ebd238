use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackSelError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    TomlError(#[from] toml::de::Error),
}

pub type TrackSelResult<T> = Result<T, TrackSelError>;
