//! Error types for the engine core.

use std::io;
use std::path::PathBuf;

use revolt_mdl::DecodeError;
use thiserror::Error;

/// The error type for engine operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// A legacy model failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A scene file could not be loaded.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system access failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An image could not be written.
    #[error("failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Failure to turn a scene file into a scene.
///
/// Individual objects that fail to load never produce this error; they are
/// skipped with a warning.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse scene {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
