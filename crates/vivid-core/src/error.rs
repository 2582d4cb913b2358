use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VividError {
    #[error("Input not found or unreadable: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f32 },

    #[error("Failed to write output {}: {reason}", path.display())]
    OutputWrite { path: PathBuf, reason: String },

    #[error("Invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

/// Error taxonomy exposed to callers of the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InputNotFound,
    UnsupportedFormat,
    ProcessingError,
    OutputWriteError,
}

impl VividError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputNotFound { .. } => ErrorKind::InputNotFound,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::MalformedFrame(_) | Self::NonFiniteParameter { .. } | Self::Config { .. } => {
                ErrorKind::ProcessingError
            }
            Self::OutputWrite { .. } => ErrorKind::OutputWriteError,
            Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::InputNotFound,
            Self::Io(_) => ErrorKind::OutputWriteError,
            Self::ImageError(image::ImageError::Unsupported(_))
            | Self::ImageError(image::ImageError::Decoding(_)) => ErrorKind::UnsupportedFormat,
            Self::ImageError(_) => ErrorKind::OutputWriteError,
        }
    }

    pub(crate) fn output_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotFound => write!(f, "InputNotFound"),
            Self::UnsupportedFormat => write!(f, "UnsupportedFormat"),
            Self::ProcessingError => write!(f, "ProcessingError"),
            Self::OutputWriteError => write!(f, "OutputWriteError"),
        }
    }
}

pub type Result<T> = std::result::Result<T, VividError>;
