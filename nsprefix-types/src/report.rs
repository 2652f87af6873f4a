use crate::ToolInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post-transformation occurrence counts of the namespaced prefixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceCounts {
    /// `soloud_ma_` occurrences.
    pub lowercase: u64,
    /// `SOLOUD_MA_` occurrences.
    pub uppercase: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Backed up and rewritten.
    Changed,
    /// Read and transformed, nothing to rewrite.
    Unchanged,
    /// Check mode: the file would be rewritten.
    Pending,
    /// Configured path does not exist.
    Missing,
    /// Read, decode, backup or write error.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: String,
    pub status: FileStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<NamespaceCounts>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub lossy_decode: bool,

    /// Unified diff, recorded in check mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

impl FileOutcome {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            message: None,
            backup_path: None,
            sha256_before: None,
            sha256_after: None,
            counts: None,
            lossy_decode: false,
            patch: None,
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, FileStatus::Missing)
    }

    pub fn failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut outcome = Self::new(path, FileStatus::Failed);
        outcome.message = Some(reason.into());
        outcome
    }
}

/// Aggregate counters; a pure projection of the per-file outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_total: u64,
    pub files_processed: u64,
    pub files_changed: u64,
    pub files_unchanged: u64,
    pub files_pending: u64,
    pub files_missing: u64,
    pub files_failed: u64,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = RunSummary {
            files_total: outcomes.len() as u64,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.status {
                FileStatus::Changed => summary.files_changed += 1,
                FileStatus::Unchanged => summary.files_unchanged += 1,
                FileStatus::Pending => summary.files_pending += 1,
                FileStatus::Missing => summary.files_missing += 1,
                FileStatus::Failed => summary.files_failed += 1,
            }
        }
        summary.files_processed =
            summary.files_changed + summary.files_unchanged + summary.files_pending;
        summary
    }

    /// True when at least one file was (or in check mode, would be) rewritten.
    pub fn changes_made(&self) -> bool {
        self.files_changed > 0 || self.files_pending > 0
    }

    /// Missing files never affect the status.
    pub fn status(&self) -> RunStatus {
        if self.files_failed == 0 {
            RunStatus::Success
        } else if self.files_processed > 0 {
            RunStatus::PartialFailure
        } else {
            RunStatus::Failure
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    PartialFailure,
    Failure,
}

/// Full record of one namespacing run, written as `--report` JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub root: String,
    pub backup_suffix: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    pub status: RunStatus,
    pub summary: RunSummary,

    #[serde(default)]
    pub files: Vec<FileOutcome>,
}

impl NamespaceReport {
    pub fn new(
        tool: ToolInfo,
        root: impl Into<String>,
        backup_suffix: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            schema: crate::schema::NSPREFIX_REPORT_V1.to_string(),
            tool,
            root: root.into(),
            backup_suffix: backup_suffix.into(),
            dry_run,
            started_at: Utc::now(),
            ended_at: None,
            status: RunStatus::Success,
            summary: RunSummary::default(),
            files: vec![],
        }
    }

    /// Append a per-file outcome, keeping summary and status in sync.
    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
        self.summary = RunSummary::from_outcomes(&self.files);
        self.status = self.summary.status();
    }

    pub fn finish(&mut self) {
        self.ended_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStatus {
    Restored,
    NoBackup,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreOutcome {
    pub path: String,
    pub backup_path: String,
    pub status: RestoreStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub backup_removed: bool,
}

/// Result of a `restore` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub root: String,

    #[serde(default)]
    pub files: Vec<RestoreOutcome>,
}

impl RestoreReport {
    pub fn new(tool: ToolInfo, root: impl Into<String>) -> Self {
        Self {
            schema: crate::schema::NSPREFIX_RESTORE_V1.to_string(),
            tool,
            root: root.into(),
            files: vec![],
        }
    }

    pub fn restored(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == RestoreStatus::Restored)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == RestoreStatus::Failed)
            .count()
    }
}
