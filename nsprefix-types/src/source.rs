use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A file loaded from the configured file set.
///
/// `raw` and `original` are fixed once read. `transformed` starts as a copy of
/// `original` and is replaced by the rewrite result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as configured, relative to the run root.
    pub path: Utf8PathBuf,
    /// Absolute (root-joined) path used for I/O.
    pub abs_path: Utf8PathBuf,
    /// Exact bytes read from disk.
    pub raw: Vec<u8>,
    /// Decoded text the engine operates on.
    pub original: String,
    /// True when invalid UTF-8 was replaced during decoding.
    pub lossy: bool,
    pub transformed: String,
    pub changed: bool,
}

impl SourceFile {
    pub fn new(
        path: Utf8PathBuf,
        abs_path: Utf8PathBuf,
        raw: Vec<u8>,
        original: String,
        lossy: bool,
    ) -> Self {
        let transformed = original.clone();
        Self {
            path,
            abs_path,
            raw,
            original,
            lossy,
            transformed,
            changed: false,
        }
    }

    /// Record the engine output for this file.
    pub fn record_rewrite(&mut self, content: String, changed: bool) {
        self.transformed = content;
        self.changed = changed;
    }
}

/// Restore point written next to a changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Configured (root-relative) path of the backed-up file.
    pub source: Utf8PathBuf,
    /// Absolute path of the file the backup belongs to.
    pub original_path: Utf8PathBuf,
    /// Location of the backup (original path + suffix).
    pub path: Utf8PathBuf,
    /// sha256 of the backed-up bytes.
    pub sha256: String,
    pub bytes: u64,
}
