use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostcardError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    // Mesh-related errors
    #[error("Mesh has no Float32x3 position attribute")]
    MissingVertexPositions,

    #[error("Failed to generate tangents: {reason}")]
    TangentGeneration { reason: String },

    #[error("Failed to build text mesh: {reason}")]
    TextMesh { reason: String },

    #[error("Font at {path} could not be parsed: {reason}")]
    InvalidFont { path: PathBuf, reason: String },

    #[error("Font unavailable at {path}: {source}")]
    FontUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for all fallible operations
pub type PostcardResult<T> = Result<T, PostcardError>;
