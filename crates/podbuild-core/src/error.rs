//! Error types for loading pod specifications.

use std::path::PathBuf;

/// Errors that can occur while loading a specification.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// JSON deserialization or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading a podspec file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Podspec file not found.
    #[error("podspec not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A platform id outside the known set.
    #[error("unknown platform: '{name}'")]
    UnknownPlatform {
        /// The unrecognized id.
        name: String,
    },
}

/// Result type for specification operations.
pub type Result<T> = std::result::Result<T, SpecError>;
