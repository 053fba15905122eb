//! # Mesh Errors
//!
//! Error types for solid construction and CSG operations.

use thiserror::Error;

/// Errors that can occur while building or combining solids.
#[derive(Debug, Clone, Error)]
pub enum MeshError {
    /// Invalid mesh topology (out-of-range indices, malformed buffers)
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Degenerate geometry (non-positive extents, collinear/coplanar points)
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Boolean operation failed
    #[error("Boolean operation failed: {message}")]
    BooleanFailed { message: String },

    /// Too many faces
    #[error("Too many faces: {count} (max: {max})")]
    TooManyFaces { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::boolean_failed("coplanar split");
        assert!(err.to_string().contains("Boolean operation failed"));
        assert!(err.to_string().contains("coplanar split"));
    }

    #[test]
    fn test_too_many_faces_display() {
        let err = MeshError::TooManyFaces { count: 12, max: 10 };
        assert_eq!(err.to_string(), "Too many faces: 12 (max: 10)");
    }
}
