use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BumpError>;

#[derive(Debug, Error)]
pub enum BumpError {
    #[error("No `version = \"...\"` line found in '{}'", path.display())]
    MissingVersionLine { path: PathBuf },

    #[error("Malformed version '{value}': {reason}")]
    MalformedVersion { value: String, reason: String },

    #[error("Invalid release URL prefix '{url}'")]
    InvalidReleaseUrl {
        url: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to access '{}'", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BumpError {
    pub(crate) fn malformed(value: &str, reason: impl Into<String>) -> Self {
        BumpError::MalformedVersion {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BumpError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
