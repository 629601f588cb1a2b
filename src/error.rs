//! Error types for chained voronoi generation

use std::fmt;

use crate::geometry::PixelRect;

/// Errors that can occur while configuring a generator or filling a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// The requested rectangle does not fit inside the target buffer
    OutOfBounds {
        /// Rectangle that was requested
        rect: PixelRect,
        /// Extent covered by the target buffer
        buffer: PixelRect,
    },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            ChainError::OutOfBounds { rect, buffer } => {
                write!(f, "rect {} is out of bounds of buffer {}", rect, buffer)
            }
        }
    }
}

impl std::error::Error for ChainError {}

/// Result type alias for chained voronoi operations
pub type Result<T> = std::result::Result<T, ChainError>;
