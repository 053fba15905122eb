//! # Collar Errors
//!
//! Error types for parameter validation and assembly.

use solid_mesh::MeshError;
use thiserror::Error;

/// Errors that stop a build.
///
/// Individual feature failures are not errors; they are recorded in the
/// build report and the pipeline carries on.
#[derive(Debug, Clone, Error)]
pub enum CollarError {
    /// A design parameter is out of range
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    /// The base body could not be built
    #[error("Base construction failed: {0}")]
    Base(#[source] MeshError),

    /// A part that has no fallback could not be authored
    #[error("Authoring failed for {feature}: {source}")]
    Authoring {
        feature: String,
        #[source]
        source: MeshError,
    },

    /// Part lookup by an unknown name
    #[error("Unknown part '{name}' (available: {available})")]
    UnknownPart { name: String, available: String },

    /// Preset number outside the known design iterations
    #[error("Unknown design iteration {0} (expected 1-4)")]
    UnknownIteration(u32),
}

impl CollarError {
    /// Creates an invalid parameter error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an authoring error.
    pub fn authoring(feature: impl Into<String>, source: MeshError) -> Self {
        Self::Authoring {
            feature: feature.into(),
            source,
        }
    }
}
