//! Golden fixture tests for nsprefix.
//!
//! Each fixture contains:
//!
//! - `repo/` - The source tree before namespacing
//! - `expected/` - The same files after namespacing
//!
//! Files of the default file set that are absent from `repo/` must be
//! reported as missing without affecting the rest of the run.

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use nsprefix_core::adapters::SilentProgress;
use nsprefix_core::pipeline::{run_namespace, run_restore};
use nsprefix_core::settings::{NamespaceSettings, RestoreSettings};
use nsprefix_types::ToolInfo;
use nsprefix_types::report::{FileStatus, RestoreStatus, RunStatus};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn tool() -> ToolInfo {
    ToolInfo {
        name: "nsprefix".to_string(),
        version: Some("test".to_string()),
    }
}

fn fixture_path(fixture_name: &str) -> Utf8PathBuf {
    // Fixtures are at workspace root: ../tests/fixtures relative to nsprefix-core
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().expect("workspace root");
    let path = workspace_root.join("tests").join("fixtures").join(fixture_name);
    assert!(path.exists(), "Fixture directory does not exist: {}", path);
    path
}

/// Copy the fixture's `repo/` into a tempdir for isolation.
fn stage_fixture(fixture_name: &str) -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let fixture = fixture_path(fixture_name);
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("utf8 path");
    copy_dir_all(fixture.join("repo").as_std_path(), root.as_std_path()).expect("copy repo");
    (temp_dir, root, fixture)
}

/// Recursively copy a directory.
fn copy_dir_all(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let dst_path = dst.join(entry.file_name());
        if ty.is_dir() {
            copy_dir_all(&entry.path(), &dst_path)?;
        } else {
            fs::copy(entry.path(), dst_path)?;
        }
    }
    Ok(())
}

fn status_of(report: &nsprefix_types::report::NamespaceReport, path: &str) -> FileStatus {
    report
        .files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("{path} missing from report"))
        .status
}

#[test]
fn golden_soloud_matches_expected_tree() {
    let (_temp, root, fixture) = stage_fixture("soloud");
    let settings = NamespaceSettings {
        root: root.clone(),
        ..NamespaceSettings::default()
    };

    let outcome = run_namespace(&settings, tool(), &SilentProgress).expect("run");
    let report = &outcome.report;

    // Configured order is preserved, including missing entries.
    let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, nsprefix_core::DEFAULT_FILE_SET.to_vec());

    assert_eq!(
        status_of(report, "src/waveform/miniaudio_libvorbis.h"),
        FileStatus::Changed
    );
    assert_eq!(status_of(report, "src/player.h"), FileStatus::Changed);
    assert_eq!(status_of(report, "src/player.cpp"), FileStatus::Unchanged);
    assert_eq!(report.summary.files_missing, 4);
    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(outcome.exit_code(), 0);

    for rel in [
        "src/waveform/miniaudio_libvorbis.h",
        "src/player.h",
        "src/player.cpp",
    ] {
        let actual = fs::read_to_string(root.join(rel)).expect("read output");
        let expected =
            fs::read_to_string(fixture.join("expected").join(rel)).expect("read expected");
        assert_eq!(actual, expected, "content mismatch for {rel}");
    }

    // Backups hold the fixture input verbatim; unchanged files get none.
    let backup = fs::read_to_string(root.join("src/player.h.backup")).expect("backup");
    let input = fs::read_to_string(fixture.join("repo/src/player.h")).expect("input");
    assert_eq!(backup, input);
    assert!(!root.join("src/player.cpp.backup").exists());
}

#[test]
fn golden_soloud_counts() {
    let (_temp, root, _fixture) = stage_fixture("soloud");
    let settings = NamespaceSettings {
        root,
        ..NamespaceSettings::default()
    };
    let report = run_namespace(&settings, tool(), &SilentProgress).expect("run").report;

    let counts = |path: &str| {
        let c = report
            .files
            .iter()
            .find(|f| f.path == path)
            .and_then(|f| f.counts)
            .expect("counts");
        (c.lowercase, c.uppercase)
    };
    assert_eq!(counts("src/player.h"), (11, 1));
    assert_eq!(counts("src/waveform/miniaudio_libvorbis.h"), (55, 9));
}

#[test]
fn golden_soloud_is_idempotent() {
    let (_temp, root, _fixture) = stage_fixture("soloud");
    let settings = NamespaceSettings {
        root,
        ..NamespaceSettings::default()
    };

    run_namespace(&settings, tool(), &SilentProgress).expect("first run");
    let second = run_namespace(&settings, tool(), &SilentProgress)
        .expect("second run")
        .report;

    assert!(!second.summary.changes_made());
    assert_eq!(second.summary.files_unchanged, 3);
}

#[test]
fn golden_soloud_restore_returns_input_tree() {
    let (_temp, root, fixture) = stage_fixture("soloud");
    run_namespace(
        &NamespaceSettings {
            root: root.clone(),
            ..NamespaceSettings::default()
        },
        tool(),
        &SilentProgress,
    )
    .expect("run");

    let restore = run_restore(
        &RestoreSettings {
            root: root.clone(),
            ..RestoreSettings::default()
        },
        tool(),
    )
    .expect("restore");
    assert_eq!(restore.restored(), 2);
    assert!(
        restore
            .files
            .iter()
            .all(|f| f.status != RestoreStatus::Failed)
    );

    for rel in ["src/waveform/miniaudio_libvorbis.h", "src/player.h"] {
        let actual = fs::read_to_string(root.join(rel)).expect("read restored");
        let input = fs::read_to_string(fixture.join("repo").join(rel)).expect("read input");
        assert_eq!(actual, input, "restore mismatch for {rel}");
    }
}
