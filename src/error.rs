// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinemarkError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LinemarkError>;

// Bare `?` on an io::Error has no path to attach; callers that know the
// path should go through `LinemarkError::io` instead.
impl From<std::io::Error> for LinemarkError {
    fn from(source: std::io::Error) -> Self {
        LinemarkError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for LinemarkError {
    fn from(e: walkdir::Error) -> Self {
        LinemarkError::Other(e.to_string())
    }
}

impl From<toml::de::Error> for LinemarkError {
    fn from(e: toml::de::Error) -> Self {
        LinemarkError::Config(e.to_string())
    }
}

impl LinemarkError {
    /// Wraps an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(source: std::io::Error, path: &std::path::Path) -> Self {
        LinemarkError::Io {
            source,
            path: path.to_path_buf(),
        }
    }
}
