//! Error types for host-facing analysis operations.
//!
//! Resolution itself never fails; these only report bad caller input.

use thiserror::Error;

use crate::base::{FileId, TextSize};

/// Errors returned when a caller names something the host does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No file with this id is loaded.
    #[error("Unknown file: {0:?}")]
    UnknownFile(FileId),

    /// No file with this path is loaded.
    #[error("Unknown path: {0}")]
    UnknownPath(String),

    /// Offset lies past the end of the file.
    #[error("Offset {offset:?} is out of range for {file:?}")]
    OffsetOutOfRange { file: FileId, offset: TextSize },
}

impl AnalysisError {
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath(path.into())
    }
}
