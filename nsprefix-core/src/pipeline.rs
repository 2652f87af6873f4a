//! Namespace and restore pipelines, extracted from the CLI.
//!
//! Files are processed strictly in configured order. A failure on one file
//! is recorded in its outcome and the run moves on; only setup problems
//! surface as [`ToolError`].

use crate::ports::{ProgressPort, WritePort};
use crate::settings::{NamespaceSettings, RestoreSettings};
use anyhow::Context;
use camino::Utf8Path;
use nsprefix_edit::{
    BackupManager, DecodePolicy, EditError, Resolved, Resolver, RestoreOptions, commit,
    render_patch, sha256_hex,
};
use nsprefix_render::render_report_md;
use nsprefix_types::ToolInfo;
use nsprefix_types::report::{
    FileOutcome, FileStatus, NamespaceReport, RestoreOutcome, RestoreReport, RestoreStatus,
    RunStatus,
};
use nsprefix_types::source::SourceFile;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Error type for pipeline results. Always maps to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("no files configured")]
    EmptyFileSet,
    /// An empty suffix would place the backup on top of the original.
    #[error("backup suffix must not be empty")]
    EmptyBackupSuffix,
}

/// Outcome of `run_namespace`.
pub struct NamespaceOutcome {
    pub report: NamespaceReport,
}

impl NamespaceOutcome {
    pub fn exit_code(&self) -> u8 {
        namespace_exit_code(&self.report)
    }
}

/// Run the namespace pipeline over the configured file set.
///
/// In check mode (`dry_run`) every file is transformed and diffed, but no
/// backup or write happens. `progress` hears about each file as it goes, so
/// a run killed part way still leaves a trace of the files it reached.
pub fn run_namespace(
    settings: &NamespaceSettings,
    tool: ToolInfo,
    progress: &dyn ProgressPort,
) -> Result<NamespaceOutcome, ToolError> {
    if settings.files.is_empty() {
        return Err(ToolError::EmptyFileSet);
    }
    if settings.backup_suffix.is_empty() {
        return Err(ToolError::EmptyBackupSuffix);
    }

    let resolver = Resolver::new(settings.root.clone(), settings.decode);
    let backups = BackupManager::new(settings.backup_suffix.clone());
    let mut report = NamespaceReport::new(
        tool,
        settings.root.as_str(),
        backups.suffix(),
        settings.dry_run,
    );

    for resolved in resolver.resolve_all(&settings.files) {
        let outcome = match resolved {
            Resolved::Found(file) => {
                progress.file_started(&file.path);
                namespace_file(file, &backups, settings.dry_run)
            }
            Resolved::Missing { path, abs_path } => {
                warn!(path = %abs_path, "file not found");
                FileOutcome::missing(path.as_str())
            }
            Resolved::Failed { path, error } => {
                progress.file_started(&path);
                error!(path = %path, error = %error, "could not load file");
                FileOutcome::failed(path.as_str(), describe(error))
            }
        };
        progress.file_finished(&outcome);
        report.push(outcome);
    }
    report.finish();

    info!(
        changed = report.summary.files_changed,
        unchanged = report.summary.files_unchanged,
        pending = report.summary.files_pending,
        missing = report.summary.files_missing,
        failed = report.summary.files_failed,
        "namespace run finished"
    );

    Ok(NamespaceOutcome { report })
}

/// Resolved → Read → Transformed → {Unchanged | BackedUp → Written}.
fn namespace_file(mut file: SourceFile, backups: &BackupManager, dry_run: bool) -> FileOutcome {
    let rewrite = nsprefix_rewrite::apply(&file.original);
    debug!(
        path = %file.path,
        macros = rewrite.macro_replacements,
        identifiers = rewrite.identifier_replacements,
        "rewrote content"
    );
    file.record_rewrite(rewrite.content, rewrite.changed);

    let sha256_before = sha256_hex(&file.raw);
    let mut outcome = FileOutcome::new(file.path.as_str(), FileStatus::Unchanged);
    outcome.sha256_before = Some(sha256_before.clone());
    outcome.counts = Some(nsprefix_rewrite::count_namespaced(&file.transformed));
    outcome.lossy_decode = file.lossy;

    if !file.changed {
        outcome.sha256_after = Some(sha256_before);
        return outcome;
    }

    if dry_run {
        outcome.status = FileStatus::Pending;
        outcome.sha256_after = Some(sha256_hex(file.transformed.as_bytes()));
        outcome.patch = Some(render_patch(&file));
        return outcome;
    }

    match commit(&file, backups) {
        Ok(Some(committed)) => {
            outcome.status = FileStatus::Changed;
            outcome.backup_path = Some(committed.backup.path.to_string());
            outcome.sha256_after = Some(committed.sha256_after);
        }
        Ok(None) => {}
        Err(err) => {
            error!(path = %file.path, error = %err, "could not write namespaced file");
            outcome.status = FileStatus::Failed;
            outcome.message = Some(describe(err));
            outcome.counts = None;
        }
    }
    outcome
}

/// Copy each configured file's backup over the file.
pub fn run_restore(settings: &RestoreSettings, tool: ToolInfo) -> Result<RestoreReport, ToolError> {
    if settings.files.is_empty() {
        return Err(ToolError::EmptyFileSet);
    }
    if settings.backup_suffix.is_empty() {
        return Err(ToolError::EmptyBackupSuffix);
    }

    let resolver = Resolver::new(settings.root.clone(), DecodePolicy::Strict);
    let backups = BackupManager::new(settings.backup_suffix.clone());
    let opts = RestoreOptions {
        remove_backup: settings.remove_backups,
    };
    let mut report = RestoreReport::new(tool, settings.root.as_str());

    for rel in settings.files.paths() {
        let abs_path = resolver.abs_path(rel);
        let backup_path = backups.backup_path(&abs_path);
        let mut outcome = RestoreOutcome {
            path: rel.to_string(),
            backup_path: backup_path.to_string(),
            status: RestoreStatus::NoBackup,
            message: None,
            backup_removed: false,
        };

        let restored = backups
            .find(rel, &abs_path)
            .and_then(|found| found.map(|record| backups.restore(&record, &opts)).transpose());
        match restored {
            Ok(Some(_)) => {
                outcome.status = RestoreStatus::Restored;
                outcome.backup_removed = opts.remove_backup;
            }
            Ok(None) => debug!(path = %abs_path, "no backup to restore"),
            Err(err) => {
                error!(path = %abs_path, error = %err, "restore failed");
                outcome.status = RestoreStatus::Failed;
                outcome.message = Some(describe(err));
            }
        }
        report.files.push(outcome);
    }

    info!(
        restored = report.restored(),
        failed = report.failed(),
        "restore finished"
    );
    Ok(report)
}

/// Write the JSON and/or markdown report for a namespace run.
pub fn write_report_artifacts(
    report: &NamespaceReport,
    json_path: Option<&Utf8Path>,
    md_path: Option<&Utf8Path>,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    if let Some(path) = json_path {
        write_json(report, path, writer).context("write JSON report")?;
    }
    if let Some(path) = md_path {
        writer
            .write_file(path, render_report_md(report).as_bytes())
            .context("write markdown report")?;
    }
    Ok(())
}

/// Serialize any report as pretty JSON to `path`.
pub fn write_json<T: Serialize>(
    value: &T,
    path: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("serialize report")?;
    json.push('\n');
    writer.write_file(path, json.as_bytes())
}

/// 0 success, 1 any failed file, 2 check mode with pending changes.
pub fn namespace_exit_code(report: &NamespaceReport) -> u8 {
    match report.status {
        RunStatus::Success if report.dry_run && report.summary.files_pending > 0 => 2,
        RunStatus::Success => 0,
        RunStatus::PartialFailure | RunStatus::Failure => 1,
    }
}

pub fn restore_exit_code(report: &RestoreReport) -> u8 {
    if report.failed() > 0 { 1 } else { 0 }
}

/// Error with its source chain, as shown in per-file messages.
fn describe(err: EditError) -> String {
    format!("{:#}", anyhow::Error::new(err))
}
