//! Error types for ink construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InkError {
    /// Strokes always hold at least the pointer-down point.
    #[error("stroke must contain at least one point")]
    EmptyStroke,
}
