//! CLI error types.

use std::path::PathBuf;

use expose_layout::ConfigError;
use thiserror::Error;

/// Errors that can occur during CLI execution.
#[derive(Debug, Error)]
pub enum CliError {
    /// The scene file could not be read.
    #[error("Failed to read scene file {}: {source}", path.display())]
    SceneRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene file is not a valid scene.
    #[error("Failed to parse scene file {}: {source}", path.display())]
    SceneParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
