use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The session task has stopped; the handle is no longer usable.
    #[error("drawing session is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, SessionError>;
