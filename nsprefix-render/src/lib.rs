//! Rendering helpers for human-readable nsprefix output.
//!
//! Console rendering is line-for-line stable: downstream scripts grep for
//! `WARNING: File not found:` and the completion banner.

use camino::Utf8Path;
use nsprefix_types::report::{
    FileOutcome, FileStatus, NamespaceCounts, NamespaceReport, RestoreReport, RestoreStatus,
    RunStatus,
};

pub const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Path as shown on the console: joined onto the run root.
fn display_path(root: &str, rel: &str) -> String {
    Utf8Path::new(root).join(rel).to_string()
}

pub fn render_header(dry_run: bool) -> String {
    let title = if dry_run {
        "Checking miniaudio symbols in flutter_soloud"
    } else {
        "Namespacing miniaudio symbols in flutter_soloud"
    };
    format!("{0}\n{1}\n{0}\n\n", rule(), title)
}

/// First line for a file, printed before any of its work happens.
pub fn render_file_start(root: &str, rel: &str) -> String {
    format!("Processing: {}\n", display_path(root, rel))
}

/// Remaining lines for one file once its outcome is known, followed by a
/// blank separator line. A missing file gets a single warning and no
/// `Processing:` line.
pub fn render_file_outcome(root: &str, outcome: &FileOutcome) -> String {
    let path = display_path(root, &outcome.path);
    if outcome.status == FileStatus::Missing {
        return format!("WARNING: File not found: {}\n\n", path);
    }

    let mut out = String::new();
    if outcome.lossy_decode {
        out.push_str("  ! Invalid UTF-8 sequences were replaced while decoding\n");
    }

    match outcome.status {
        FileStatus::Changed => {
            if let Some(backup) = &outcome.backup_path {
                out.push_str(&format!("  ✓ Created backup: {}\n", backup));
            }
            out.push_str(&format!("  ✓ Namespaced symbols in: {}\n", path));
            let counts = outcome.counts.unwrap_or_default();
            out.push_str(&format!("  ✓ Found {}\n", counts_phrase(counts)));
        }
        FileStatus::Pending => {
            out.push_str(&format!("  ~ Would namespace: {}\n", path));
            let counts = outcome.counts.unwrap_or_default();
            out.push_str(&format!("  ~ Would find {}\n", counts_phrase(counts)));
            if let Some(patch) = &outcome.patch {
                out.push('\n');
                out.push_str(patch);
            }
        }
        FileStatus::Unchanged => out.push_str("  - No changes needed\n"),
        FileStatus::Failed => {
            let reason = outcome.message.as_deref().unwrap_or("unknown error");
            out.push_str(&format!("ERROR: {}: {}\n", path, reason));
        }
        FileStatus::Missing => {}
    }

    out.push('\n');
    out
}

fn counts_phrase(counts: NamespaceCounts) -> String {
    format!(
        "{} soloud_ma_ symbols and {} SOLOUD_MA_ macros",
        counts.lowercase, counts.uppercase
    )
}

/// Closing banner plus operator guidance.
pub fn render_footer(report: &NamespaceReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    if summary.files_failed > 0 {
        out.push_str(&format!(
            "✗ {} file(s) failed; files listed above with ERROR were left untouched\n\n",
            summary.files_failed
        ));
    }

    if report.dry_run {
        out.push_str(&format!("{}\n", rule()));
        if summary.files_pending > 0 {
            out.push_str(&format!(
                "{} file(s) would be namespaced\n",
                summary.files_pending
            ));
            out.push_str(&format!("{}\n\n", rule()));
            out.push_str("Run `nsprefix run` to apply the changes.\n");
        } else {
            out.push_str("No changes were needed - files may already be namespaced\n");
            out.push_str(&format!("{}\n", rule()));
        }
        return out;
    }

    out.push_str(&format!("{}\n", rule()));
    if summary.changes_made() {
        out.push_str("✓ Namespacing complete!\n");
        out.push_str(&format!("{}\n\n", rule()));
        out.push_str("Next steps:\n");
        out.push_str("1. Review the changes in the modified files\n");
        out.push_str("2. Test the package locally\n");
        out.push_str("3. Update your pubspec.yaml to use this forked version\n\n");
        out.push_str(&format!(
            "To restore original files, use the {} files created (or run `nsprefix restore`)\n",
            report.backup_suffix
        ));
    } else {
        out.push_str("No changes were needed - files may already be namespaced\n");
        out.push_str(&format!("{}\n", rule()));
    }
    out
}

pub fn render_report_md(report: &NamespaceReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    out.push_str(if report.dry_run {
        "# nsprefix check\n\n"
    } else {
        "# nsprefix run\n\n"
    });
    out.push_str(&format!("- Status: `{}`\n", run_status_label(report.status)));
    out.push_str(&format!("- Root: `{}`\n", report.root));
    out.push_str(&format!(
        "- Files: {} (changed {}, unchanged {}, pending {}, missing {}, failed {})\n\n",
        summary.files_total,
        summary.files_changed,
        summary.files_unchanged,
        summary.files_pending,
        summary.files_missing,
        summary.files_failed
    ));

    out.push_str("## Files\n\n");
    if report.files.is_empty() {
        out.push_str("_No files configured._\n");
        return out;
    }

    out.push_str("| Path | Status | soloud_ma_ | SOLOUD_MA_ | Backup |\n");
    out.push_str("|---|---|---|---|---|\n");
    for f in &report.files {
        let (lower, upper) = match f.counts {
            Some(c) => (c.lowercase.to_string(), c.uppercase.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        let backup = f
            .backup_path
            .as_deref()
            .map(|b| format!("`{}`", b))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            f.path,
            file_status_label(f.status),
            lower,
            upper,
            backup
        ));
    }

    let failures: Vec<&FileOutcome> = report
        .files
        .iter()
        .filter(|f| f.status == FileStatus::Failed)
        .collect();
    if !failures.is_empty() {
        out.push_str("\n## Failures\n\n");
        for f in failures {
            out.push_str(&format!(
                "- `{}`: {}\n",
                f.path,
                f.message.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    let patches: Vec<(&str, &str)> = report
        .files
        .iter()
        .filter_map(|f| f.patch.as_deref().map(|p| (f.path.as_str(), p)))
        .collect();
    if !patches.is_empty() {
        out.push_str("\n## Pending changes\n");
        for (path, patch) in patches {
            out.push_str(&format!("\n### `{}`\n\n```diff\n{}```\n", path, patch));
        }
    }

    out
}

pub fn render_restore(report: &RestoreReport) -> String {
    let mut out = String::new();
    for f in &report.files {
        let path = display_path(&report.root, &f.path);
        out.push_str(&format!("Restoring: {}\n", path));
        match f.status {
            RestoreStatus::Restored => {
                out.push_str(&format!("  ✓ Restored from: {}\n", f.backup_path));
                if f.backup_removed {
                    out.push_str(&format!("  ✓ Removed backup: {}\n", f.backup_path));
                }
            }
            RestoreStatus::NoBackup => out.push_str("  - No backup found\n"),
            RestoreStatus::Failed => {
                let reason = f.message.as_deref().unwrap_or("unknown error");
                out.push_str(&format!("ERROR: {}: {}\n", path, reason));
            }
        }
    }
    out.push('\n');
    out.push_str(&format!(
        "Restored {} file(s), {} failed\n",
        report.restored(),
        report.failed()
    ));
    out
}

fn file_status_label(s: FileStatus) -> &'static str {
    match s {
        FileStatus::Changed => "changed",
        FileStatus::Unchanged => "unchanged",
        FileStatus::Pending => "pending",
        FileStatus::Missing => "missing",
        FileStatus::Failed => "failed",
    }
}

fn run_status_label(s: RunStatus) -> &'static str {
    match s {
        RunStatus::Success => "success",
        RunStatus::PartialFailure => "partial_failure",
        RunStatus::Failure => "failure",
    }
}
