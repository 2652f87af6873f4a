//! Port traits abstracting output away from the pipeline.

use camino::Utf8Path;
use nsprefix_types::report::FileOutcome;

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}

/// Per-file progress, reported while the namespace run is still going.
///
/// `file_started` fires after a file is loaded and before it is rewritten,
/// backed up or written. `file_finished` fires once its outcome is final,
/// including missing files, which never start.
pub trait ProgressPort {
    fn file_started(&self, path: &Utf8Path);
    fn file_finished(&self, outcome: &FileOutcome);
}
