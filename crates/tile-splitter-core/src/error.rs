use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("Image {width}x{height} is too small to split into {rows}x{cols} tiles")]
    ImageTooSmall {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
    #[error("Source image not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Cannot read image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Cannot write {}: {reason}", path.display())]
    OutputWriteFailure { path: PathBuf, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SplitError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::OutputWriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
