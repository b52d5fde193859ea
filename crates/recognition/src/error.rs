use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognizer not available: {0}")]
    Unavailable(String),

    #[error("recognizer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("recognition timed out after {0} ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, RecognitionError>;
