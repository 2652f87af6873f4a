//! Clap-free settings for the namespace and restore pipelines.

use camino::Utf8PathBuf;
use nsprefix_edit::{DEFAULT_BACKUP_SUFFIX, DecodePolicy, FileSet};

/// Settings for the namespace pipeline.
#[derive(Debug, Clone)]
pub struct NamespaceSettings {
    /// Directory the configured file paths are resolved against.
    pub root: Utf8PathBuf,
    pub files: FileSet,

    // Decoding
    pub decode: DecodePolicy,

    // Backups
    pub backup_suffix: String,

    /// Check mode: transform and report, write nothing.
    pub dry_run: bool,
}

impl Default for NamespaceSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            files: FileSet::default(),
            decode: DecodePolicy::default(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

/// Settings for the restore pipeline.
#[derive(Debug, Clone)]
pub struct RestoreSettings {
    pub root: Utf8PathBuf,
    pub files: FileSet,
    pub backup_suffix: String,
    pub remove_backups: bool,
}

impl Default for RestoreSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            files: FileSet::default(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            remove_backups: false,
        }
    }
}
