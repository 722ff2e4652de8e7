//! Error types for glTF loading and writing.

use thiserror::Error;

/// Errors that can occur while loading, writing, or decoding a glTF asset.
///
/// Structural document failures (missing required fields, malformed arrays,
/// invalid enum strings) and container corruption are folded into [`Io`]
/// together with file and JSON failures: a broken document and an unreadable
/// file are the same thing to a caller, and loading is all-or-nothing either
/// way.
///
/// [`Io`]: GltfError::Io
#[derive(Debug, Error)]
pub enum GltfError {
    /// The caller passed something unusable: an empty path, an out-of-range
    /// mesh index, and similar.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File I/O failure, GLB container corruption, JSON parse failure, or a
    /// structurally malformed document.
    #[error("{0}")]
    Io(String),

    /// A layout the codec does not handle: a non-triangle primitive mode or
    /// an accessor whose declared type does not match the requested
    /// semantic.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A referenced resource is absent (e.g. a texture without a source).
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for GltfError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GltfError {
    fn from(e: serde_json::Error) -> Self {
        Self::Io(format!("JSON error: {e}"))
    }
}

impl GltfError {
    pub(crate) fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub(crate) fn malformed(what: impl std::fmt::Display) -> Self {
        Self::Io(format!("malformed glTF document: {what}"))
    }
}
