//! Filesystem side of nsprefix.
//!
//! Responsibilities:
//! - Resolve the configured file set into loaded source files.
//! - Snapshot originals to sibling backups and restore them.
//! - Write transformed content back, strictly after a verified backup.
//! - Generate a unified diff preview for check mode.

pub mod backup;
pub mod error;
pub mod resolver;

pub use backup::{BackupManager, DEFAULT_BACKUP_SUFFIX, RestoreOptions};
pub use error::{EditError, EditResult};
pub use resolver::{DEFAULT_FILE_SET, DecodePolicy, FileSet, Resolved, Resolver, decode};

use diffy::PatchFormatter;
use fs_err as fs;
use nsprefix_types::source::{BackupRecord, SourceFile};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Result of writing one changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub backup: BackupRecord,
    pub sha256_after: String,
}

/// Back up and overwrite `file` if the engine changed it.
///
/// Returns `Ok(None)` for unchanged files: no backup, no write. The original
/// is only overwritten after [`BackupManager::snapshot`] succeeded.
pub fn commit(file: &SourceFile, backups: &BackupManager) -> EditResult<Option<Committed>> {
    if !file.changed {
        return Ok(None);
    }

    let backup = backups.snapshot(file)?;

    let bytes = file.transformed.as_bytes();
    fs::write(&file.abs_path, bytes).map_err(|e| EditError::io("write", &file.abs_path, e))?;
    debug!(path = %file.abs_path, bytes = bytes.len(), "wrote namespaced content");

    Ok(Some(Committed {
        backup,
        sha256_after: sha256_hex(bytes),
    }))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Unified diff between the original and transformed text of one file.
/// Empty when the file is unchanged.
pub fn render_patch(file: &SourceFile) -> String {
    if !file.changed {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", file.path));

    let patch = diffy::create_patch(&file.original, &file.transformed);
    let formatted = PatchFormatter::new().fmt_patch(&patch).to_string();
    // diffy emits its own ---/+++ header; keep only the hunks.
    let hunks = formatted
        .split_once("\n@@")
        .map(|(_, rest)| format!("@@{rest}"))
        .unwrap_or_default();
    out.push_str(&hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
