//! Errors raised while reading or writing scene files.
//!
//! Geometry operations never fail; only scene I/O returns these.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The file could not be read or written.
    #[error("Failed to access scene file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid scene JSON.
    #[error("Malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An edge entry did not hold exactly two points.
    #[error("Edge {index} has {len} points, expected 2")]
    InvalidEdge { index: usize, len: usize },
}

/// Result type for scene I/O.
pub type SceneResult<T> = Result<T, SceneError>;
