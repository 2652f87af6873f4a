//! Backup/write-back ordering tests.
//!
//! A backup exists for a path if and only if the file's content changed, and
//! it always holds the pre-transform bytes verbatim.

use camino::{Utf8Path, Utf8PathBuf};
use nsprefix_edit::{
    BackupManager, DecodePolicy, EditError, FileSet, Resolved, Resolver, RestoreOptions, commit,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn create_temp_repo(files: &[(&str, &[u8])]) -> (TempDir, Utf8PathBuf) {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, contents).expect("write fixture");
    }
    (td, root)
}

fn load(resolver: &Resolver, rel: &str) -> nsprefix_types::source::SourceFile {
    match resolver.resolve(Utf8Path::new(rel)) {
        Resolved::Found(file) => file,
        other => panic!("expected {rel} to resolve, got {other:?}"),
    }
}

#[test]
fn changed_file_gets_backup_with_original_bytes() {
    let original: &[u8] = b"void ma_device_init(ma_device* d) { MA_SUCCESS; }";
    let (_td, root) = create_temp_repo(&[("src/player.cpp", original)]);
    let resolver = Resolver::new(root.clone(), DecodePolicy::Strict);

    let mut file = load(&resolver, "src/player.cpp");
    let rewrite = nsprefix_rewrite::apply(&file.original);
    file.record_rewrite(rewrite.content, rewrite.changed);

    let committed = commit(&file, &BackupManager::default())
        .expect("commit")
        .expect("changed file is committed");

    assert_eq!(committed.backup.path, root.join("src/player.cpp.backup"));
    assert_eq!(fs::read(&committed.backup.path).expect("backup"), original);
    assert_eq!(
        fs::read_to_string(root.join("src/player.cpp")).expect("rewritten"),
        "void soloud_ma_device_init(soloud_ma_device* d) { SOLOUD_MA_SUCCESS; }"
    );
    assert_eq!(
        committed.sha256_after,
        nsprefix_edit::sha256_hex(file.transformed.as_bytes())
    );
}

#[test]
fn unchanged_file_gets_no_backup() {
    let (_td, root) = create_temp_repo(&[("src/player.h", b"int soloud_ma_x;".as_slice())]);
    let resolver = Resolver::new(root.clone(), DecodePolicy::Strict);

    let mut file = load(&resolver, "src/player.h");
    let rewrite = nsprefix_rewrite::apply(&file.original);
    file.record_rewrite(rewrite.content, rewrite.changed);

    assert!(commit(&file, &BackupManager::default()).expect("commit").is_none());
    assert!(!root.join("src/player.h.backup").exists());
}

#[test]
fn failed_backup_leaves_original_untouched() {
    let (_td, root) = create_temp_repo(&[("src/player.h", b"ma_engine e;".as_slice())]);
    // A directory squatting on the backup path makes the snapshot fail.
    fs::create_dir(root.join("src/player.h.backup")).expect("mkdir");

    let resolver = Resolver::new(root.clone(), DecodePolicy::Strict);
    let mut file = load(&resolver, "src/player.h");
    let rewrite = nsprefix_rewrite::apply(&file.original);
    file.record_rewrite(rewrite.content, rewrite.changed);

    let err = commit(&file, &BackupManager::default()).expect_err("backup must fail");
    assert!(matches!(err, EditError::Io { .. }));
    assert_eq!(
        fs::read_to_string(root.join("src/player.h")).expect("original"),
        "ma_engine e;"
    );
}

#[test]
fn lenient_decode_backup_keeps_invalid_bytes() {
    let original: &[u8] = b"ma_sound s; /* \xff */";
    let (_td, root) = create_temp_repo(&[("a.h", original)]);
    let resolver = Resolver::new(root.clone(), DecodePolicy::Lenient);

    let mut file = load(&resolver, "a.h");
    assert!(file.lossy);
    let rewrite = nsprefix_rewrite::apply(&file.original);
    file.record_rewrite(rewrite.content, rewrite.changed);

    let committed = commit(&file, &BackupManager::new(".bak"))
        .expect("commit")
        .expect("changed");
    assert_eq!(fs::read(&committed.backup.path).expect("backup"), original);
}

#[test]
fn second_run_produces_no_further_change() {
    let (_td, root) = create_temp_repo(&[("a.h", b"ma_a MA_B".as_slice())]);
    let resolver = Resolver::new(root.clone(), DecodePolicy::Strict);
    let backups = BackupManager::default();

    for expected_change in [true, false] {
        let mut file = load(&resolver, "a.h");
        let rewrite = nsprefix_rewrite::apply(&file.original);
        file.record_rewrite(rewrite.content, rewrite.changed);
        let committed = commit(&file, &backups).expect("commit");
        assert_eq!(committed.is_some(), expected_change);
    }

    // The backup from the first run still holds the pre-namespacing text.
    assert_eq!(
        fs::read_to_string(root.join("a.h.backup")).expect("backup"),
        "ma_a MA_B"
    );
}

#[test]
fn restore_reverts_committed_file() {
    let (_td, root) = create_temp_repo(&[("a.h", b"ma_a".as_slice())]);
    let resolver = Resolver::new(root.clone(), DecodePolicy::Strict);
    let backups = BackupManager::default();

    let mut file = load(&resolver, "a.h");
    let rewrite = nsprefix_rewrite::apply(&file.original);
    file.record_rewrite(rewrite.content, rewrite.changed);
    let committed = commit(&file, &backups).expect("commit").expect("changed");

    let restored = backups
        .restore(&committed.backup, &RestoreOptions::default())
        .expect("restore");
    assert_eq!(restored.original, "ma_a");
    assert_eq!(fs::read_to_string(root.join("a.h")).expect("read"), "ma_a");
}

#[test]
fn resolver_resilience_with_missing_entry() {
    let (_td, root) = create_temp_repo(&[
        ("one.h", b"ma_1".as_slice()),
        ("three.h", b"ma_3".as_slice()),
    ]);
    let resolver = Resolver::new(root, DecodePolicy::Strict);
    let set = FileSet::new(["one.h", "two.h", "three.h"]);

    let kinds: Vec<&str> = resolver
        .resolve_all(&set)
        .map(|r| match r {
            Resolved::Found(_) => "found",
            Resolved::Missing { .. } => "missing",
            Resolved::Failed { .. } => "failed",
        })
        .collect();
    assert_eq!(kinds, vec!["found", "missing", "found"]);
}
