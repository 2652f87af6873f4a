//! Sibling-file backups and restore.
//!
//! A backup lives next to the file it protects, at `<path><suffix>`. It holds
//! the exact bytes read from disk, so it stays faithful even when the text
//! was decoded leniently.

use crate::error::{EditError, EditResult};
use crate::sha256_hex;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use nsprefix_types::source::{BackupRecord, SourceFile};
use tracing::{debug, info};

pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    /// Delete the backup once the original has been restored.
    pub remove_backup: bool,
}

#[derive(Debug, Clone)]
pub struct BackupManager {
    suffix: String,
}

impl Default for BackupManager {
    fn default() -> Self {
        Self::new(DEFAULT_BACKUP_SUFFIX)
    }
}

impl BackupManager {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn backup_path(&self, original: &Utf8Path) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}{}", original, self.suffix))
    }

    /// Persist the untouched bytes of `file` and verify them by reading back.
    ///
    /// An existing backup from an earlier run is overwritten.
    pub fn snapshot(&self, file: &SourceFile) -> EditResult<BackupRecord> {
        let path = self.backup_path(&file.abs_path);
        fs::write(&path, &file.raw).map_err(|e| EditError::io("write backup", &path, e))?;

        let written = fs::read(&path).map_err(|e| EditError::io("read backup", &path, e))?;
        let sha256 = sha256_hex(&file.raw);
        if sha256_hex(&written) != sha256 {
            return Err(EditError::BackupMismatch { path });
        }

        debug!(backup = %path, bytes = file.raw.len(), "backup written");
        Ok(BackupRecord {
            source: file.path.clone(),
            original_path: file.abs_path.clone(),
            path,
            sha256,
            bytes: file.raw.len() as u64,
        })
    }

    /// Describe the backup for `original`, if one exists.
    pub fn find(&self, source: &Utf8Path, original: &Utf8Path) -> EditResult<Option<BackupRecord>> {
        let path = self.backup_path(original);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|e| EditError::io("read backup", &path, e))?;
        Ok(Some(BackupRecord {
            source: source.to_path_buf(),
            original_path: original.to_path_buf(),
            path,
            sha256: sha256_hex(&bytes),
            bytes: bytes.len() as u64,
        }))
    }

    /// Copy the backup over its original and return the restored file.
    ///
    /// Fails with [`EditError::BackupMismatch`] when the backup no longer
    /// matches the record, leaving the original untouched.
    pub fn restore(&self, record: &BackupRecord, opts: &RestoreOptions) -> EditResult<SourceFile> {
        if !record.path.is_file() {
            return Err(EditError::BackupMissing {
                path: record.path.clone(),
            });
        }
        let raw =
            fs::read(&record.path).map_err(|e| EditError::io("read backup", &record.path, e))?;
        if sha256_hex(&raw) != record.sha256 {
            return Err(EditError::BackupMismatch {
                path: record.path.clone(),
            });
        }

        fs::write(&record.original_path, &raw)
            .map_err(|e| EditError::io("write", &record.original_path, e))?;
        info!(path = %record.original_path, "restored from backup");

        if opts.remove_backup {
            fs::remove_file(&record.path)
                .map_err(|e| EditError::io("remove backup", &record.path, e))?;
        }

        let original = String::from_utf8_lossy(&raw).into_owned();
        let lossy = std::str::from_utf8(&raw).is_err();
        Ok(SourceFile::new(
            record.source.clone(),
            record.original_path.clone(),
            raw,
            original,
            lossy,
        ))
    }
}
