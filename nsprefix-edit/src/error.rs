//! Error types for nsprefix-edit.
//!
//! Every variant carries the path it concerns so callers can turn it into a
//! per-file outcome instead of aborting the run.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Read or write failure on an existing path.
    #[error("{op} {path}")]
    Io {
        op: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid UTF-8 and the strict decode policy is active.
    #[error("{path} is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    Decode {
        path: Utf8PathBuf,
        valid_up_to: usize,
    },

    /// The backup read back from disk differs from the bytes written.
    #[error("backup {path} does not match the original content")]
    BackupMismatch { path: Utf8PathBuf },

    /// No backup exists for a file being restored.
    #[error("no backup at {path}")]
    BackupMissing { path: Utf8PathBuf },
}

impl EditError {
    pub(crate) fn io(op: &'static str, path: &Utf8Path, source: std::io::Error) -> Self {
        EditError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
