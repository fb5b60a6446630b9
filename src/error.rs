use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoicepackError {
    #[error("Audio extraction failed: {0}")]
    AudioExtraction(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VoicepackError>;
