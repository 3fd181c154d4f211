//! Error types for loading build options.

use std::path::PathBuf;

/// Errors that can occur while loading or saving build options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading an options file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file not found.
    #[error("options file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for options operations.
pub type Result<T> = std::result::Result<T, OptionsError>;
