// src/error.rs

use thiserror::Error;

/// Failures reported by a scene host while manipulating objects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("object {0} not found")]
    UnknownObject(u64),

    #[error("container {0} not found")]
    UnknownContainer(u64),

    #[error("object {0} is not a container")]
    NotAContainer(u64),

    #[error("an object named '{0}' already exists")]
    DuplicateName(String),

    #[error("host error: {0}")]
    Host(String),
}

/// Top-level error for generation, configuration and export.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A host failure, passed through unchanged.
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid parameter file: {0}")]
    Json(#[from] serde_json::Error),
}
