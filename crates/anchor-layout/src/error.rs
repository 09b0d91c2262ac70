//! Error types for layout and placement operations.

use crate::scene::SceneError;

/// Error types surfaced by the placement engine.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed anchor event: {0}")]
    MalformedEvent(String),

    #[error("Scene collaborator failed: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
