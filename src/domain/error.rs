use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failures surfaced by the analysis API.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Missing path, or wrong kind of filesystem entry for the operation
    #[error("Invalid path: {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("Error reading file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}")]
    Parse { file: String },

    #[error("No Java files found in the directory: {}", path.display())]
    NoSources { path: PathBuf },

    /// A worker task panicked or was cancelled
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Stable classification of an [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidPath,
    IoFailure,
    ParseFailure,
    NoSources,
    Runtime,
}

impl AnalysisError {
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Parse failure for `path`, named by its file name.
    pub fn parse(path: &std::path::Path) -> Self {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::Parse { file }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidPath { .. } => ErrorKind::InvalidPath,
            AnalysisError::Io { .. } => ErrorKind::IoFailure,
            AnalysisError::Parse { .. } => ErrorKind::ParseFailure,
            AnalysisError::NoSources { .. } => ErrorKind::NoSources,
            AnalysisError::Runtime(_) => ErrorKind::Runtime,
        }
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::Runtime(format!("task join error: {err}"))
    }
}
