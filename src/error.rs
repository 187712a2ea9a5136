//! Error types for content loading

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`ContentError`], used by callers that
/// translate failures into user-visible behavior (HTTP status, exit code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Requested file or content directory does not exist
    NotFound,
    /// Frontmatter could not be parsed
    ParseError,
    /// Any other I/O failure
    Io,
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid frontmatter in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("frontmatter in {} must be a mapping, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ContentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::NotFound { .. } => ErrorKind::NotFound,
            ContentError::Parse { .. } | ContentError::NotAMapping { .. } => ErrorKind::ParseError,
            ContentError::Io { .. } | ContentError::Walk(_) => ErrorKind::Io,
        }
    }

    /// Wrap an I/O error, mapping `NotFound` onto the loader's own variant
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ContentError::NotFound { path }
        } else {
            ContentError::Io { path, source }
        }
    }

    /// Attach the file path to a parse failure raised while splitting frontmatter
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match self {
            ContentError::Parse { source, .. } => ContentError::Parse { path, source },
            ContentError::NotAMapping { found, .. } => ContentError::NotAMapping { path, found },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
