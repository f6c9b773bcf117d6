//! Error taxonomy shared by the resolver, scanner, renderers and session.

use crate::export::ExportKind;
use std::path::PathBuf;
use thiserror::Error;

/// A user-supplied path that does not point at anything reachable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPathError {
    #[error("Invalid or inaccessible mapped drive path: {0}")]
    MappedDrive(String),
    #[error("Invalid or inaccessible UNC path: {0}")]
    Unc(String),
    #[error("Invalid or inaccessible local path: {0}")]
    Local(String),
}

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("Base path does not exist: {0}")]
    PathNotFound(String),
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Metadata for a single file could not be read. Recovered by the scanner.
#[derive(Debug, Error)]
#[error("cannot read metadata for {path:?}: {source}")]
pub struct FileAccessError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{kind} export failed: {message}")]
    Failed { kind: ExportKind, message: String },
    #[error("{0} export is not available in this build")]
    Unsupported(ExportKind),
}

impl RenderError {
    pub(crate) fn failed(kind: ExportKind, err: anyhow::Error) -> Self {
        RenderError::Failed {
            kind,
            message: format!("{err:#}"),
        }
    }

    pub fn kind(&self) -> ExportKind {
        match self {
            RenderError::Failed { kind, .. } => *kind,
            RenderError::Unsupported(kind) => *kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format: {0:?} (expected excel, word or pdf)")]
pub struct UnknownExportKind(pub String);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),
    #[error(transparent)]
    Enumerate(#[from] EnumerateError),
    #[error("no directory has been opened")]
    NoListing,
    #[error("file index {index} is out of range for {len} listed files")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no listed file is named {0:?}")]
    UnknownFile(String),
}
