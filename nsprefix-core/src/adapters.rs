//! Default port implementations.

use crate::ports::{ProgressPort, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use nsprefix_render::{render_file_outcome, render_file_start};
use nsprefix_types::report::FileOutcome;
use std::io::Write;

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        std::fs::write(path, contents).with_context(|| format!("write {}", path))
    }
}

/// Prints each file's console lines to stdout as the run reaches it.
#[derive(Debug, Clone)]
pub struct ConsoleProgress {
    root: Utf8PathBuf,
}

impl ConsoleProgress {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn emit(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // Best effort: a failed progress write never fails the run.
        if out.write_all(text.as_bytes()).is_ok() {
            let _ = out.flush();
        }
    }
}

impl ProgressPort for ConsoleProgress {
    fn file_started(&self, path: &Utf8Path) {
        self.emit(&render_file_start(self.root.as_str(), path.as_str()));
    }

    fn file_finished(&self, outcome: &FileOutcome) {
        self.emit(&render_file_outcome(self.root.as_str(), outcome));
    }
}

/// Discards progress; for embedders that only want the final report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressPort for SilentProgress {
    fn file_started(&self, _path: &Utf8Path) {}

    fn file_finished(&self, _outcome: &FileOutcome) {}
}
