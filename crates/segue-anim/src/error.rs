//! Error types for the animation engine.

use thiserror::Error;

/// Result type for animation operations.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Errors that can occur while running a timeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Timeline does not have the two keyframes needed to interpolate.
    #[error("timeline '{name}' needs at least two keyframes, found {found}")]
    EmptyTimeline { name: String, found: usize },

    /// Frame clock configured with a non-positive or non-finite rate.
    #[error("invalid frame rate: {0}")]
    InvalidFrameRate(f64),
}
