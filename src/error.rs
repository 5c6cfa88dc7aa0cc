use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {}", .path.display(), .source)]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {}", .path.display(), .source)]
    DecodeError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{record} {field} is required")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    #[error("Navigation failed: {0}")]
    NavigationError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript error: {0}")]
    JsError(String),

    #[error("CDP error: {0}")]
    CdpError(#[from] chromiumoxide::error::CdpError),

    #[error("Screenshot failed: {0}")]
    ScreenshotError(String),

    #[error("failed to write {}: {}", .path.display(), .source)]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The phase of a run an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Decode,
    Validation,
    Automation,
    Capture,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ReadError { .. } => ErrorKind::Io,
            Error::DecodeError { .. } => ErrorKind::Decode,
            Error::MissingField { .. } => ErrorKind::Validation,
            Error::LaunchError(_)
            | Error::NavigationError(_)
            | Error::ElementNotFound(_)
            | Error::Timeout(_)
            | Error::JsError(_)
            | Error::CdpError(_) => ErrorKind::Automation,
            Error::ScreenshotError(_) | Error::WriteError { .. } => ErrorKind::Capture,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
