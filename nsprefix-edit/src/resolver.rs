//! FileSet resolution: configured relative paths to loaded [`SourceFile`]s.

use crate::error::{EditError, EditResult};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use nsprefix_types::source::SourceFile;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Files rewritten when no file list is configured, in processing order.
pub const DEFAULT_FILE_SET: &[&str] = &[
    "src/soloud/src/backend/miniaudio/miniaudio.h",
    "src/soloud/src/backend/miniaudio/soloud_miniaudio.cpp",
    "src/waveform/waveform.cpp",
    "src/waveform/miniaudio_libvorbis.h",
    "src/waveform/miniaudio_libvorbis.cpp",
    "src/player.h",
    "src/player.cpp",
];

/// Ordered list of root-relative paths to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<Utf8PathBuf>,
}

impl FileSet {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[Utf8PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_SET.iter().copied())
    }
}

/// What to do with bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Report the file as failed; it is neither backed up nor rewritten.
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD and continue.
    Lenient,
}

/// Resolution result for one configured entry.
#[derive(Debug)]
pub enum Resolved {
    Found(SourceFile),
    Missing {
        path: Utf8PathBuf,
        abs_path: Utf8PathBuf,
    },
    Failed {
        path: Utf8PathBuf,
        error: EditError,
    },
}

impl Resolved {
    /// Configured path of the entry.
    pub fn path(&self) -> &Utf8Path {
        match self {
            Resolved::Found(file) => &file.path,
            Resolved::Missing { path, .. } | Resolved::Failed { path, .. } => path,
        }
    }
}

/// Loads configured files relative to a root directory.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: Utf8PathBuf,
    policy: DecodePolicy,
}

impl Resolver {
    pub fn new(root: impl Into<Utf8PathBuf>, policy: DecodePolicy) -> Self {
        Self {
            root: root.into(),
            policy,
        }
    }

    pub fn abs_path(&self, rel: &Utf8Path) -> Utf8PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }

    /// Resolve one entry. The file is read completely before returning.
    pub fn resolve(&self, rel: &Utf8Path) -> Resolved {
        let abs_path = self.abs_path(rel);
        if !abs_path.exists() {
            debug!(path = %abs_path, "configured file not found");
            return Resolved::Missing {
                path: rel.to_path_buf(),
                abs_path,
            };
        }

        match self.load(rel, &abs_path) {
            Ok(file) => Resolved::Found(file),
            Err(error) => Resolved::Failed {
                path: rel.to_path_buf(),
                error,
            },
        }
    }

    /// Resolve entries lazily, in configured order.
    pub fn resolve_all<'a>(&'a self, set: &'a FileSet) -> impl Iterator<Item = Resolved> + 'a {
        set.paths().iter().map(move |rel| self.resolve(rel))
    }

    fn load(&self, rel: &Utf8Path, abs_path: &Utf8Path) -> EditResult<SourceFile> {
        let raw = fs::read(abs_path).map_err(|e| EditError::io("read", abs_path, e))?;
        let (text, lossy) = decode(abs_path, &raw, self.policy)?;
        Ok(SourceFile::new(
            rel.to_path_buf(),
            abs_path.to_path_buf(),
            raw,
            text,
            lossy,
        ))
    }
}

/// Decode file bytes under `policy`. Returns the text and whether any bytes
/// were replaced.
pub fn decode(path: &Utf8Path, raw: &[u8], policy: DecodePolicy) -> EditResult<(String, bool)> {
    match std::str::from_utf8(raw) {
        Ok(text) => Ok((text.to_string(), false)),
        Err(err) => match policy {
            DecodePolicy::Strict => Err(EditError::Decode {
                path: path.to_path_buf(),
                valid_up_to: err.valid_up_to(),
            }),
            DecodePolicy::Lenient => {
                warn!(
                    path = %path,
                    offset = err.valid_up_to(),
                    "invalid UTF-8 replaced during decoding"
                );
                Ok((String::from_utf8_lossy(raw).into_owned(), true))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        (temp, root)
    }

    #[test]
    fn default_file_set_is_ordered() {
        let set = FileSet::default();
        assert_eq!(set.len(), 7);
        assert_eq!(
            set.paths()[0].as_str(),
            "src/soloud/src/backend/miniaudio/miniaudio.h"
        );
        assert_eq!(set.paths()[6].as_str(), "src/player.cpp");
    }

    #[test]
    fn missing_entry_does_not_stop_resolution() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join("b.h"), "ma_b").expect("write");

        let resolver = Resolver::new(root, DecodePolicy::Strict);
        let set = FileSet::new(["a.h", "b.h"]);
        let resolved: Vec<_> = resolver.resolve_all(&set).collect();

        assert!(matches!(resolved[0], Resolved::Missing { .. }));
        match &resolved[1] {
            Resolved::Found(file) => assert_eq!(file.original, "ma_b"),
            other => panic!("expected found, got {other:?}"),
        }
    }

    #[test]
    fn directory_entry_fails_without_abort() {
        let (_temp, root) = temp_root();
        std::fs::create_dir(root.join("dir.h")).expect("mkdir");

        let resolver = Resolver::new(root, DecodePolicy::Strict);
        let resolved = resolver.resolve(Utf8Path::new("dir.h"));
        assert!(matches!(resolved, Resolved::Failed { .. }));
        assert_eq!(resolved.path().as_str(), "dir.h");
    }

    #[test]
    fn strict_decode_rejects_invalid_bytes() {
        let err = decode(Utf8Path::new("x.h"), b"ma_\xffx", DecodePolicy::Strict)
            .expect_err("invalid utf-8");
        match err {
            EditError::Decode { valid_up_to, .. } => assert_eq!(valid_up_to, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn lenient_decode_replaces_invalid_bytes() {
        let (text, lossy) =
            decode(Utf8Path::new("x.h"), b"ma_\xffx", DecodePolicy::Lenient).expect("lenient");
        assert!(lossy);
        assert_eq!(text, "ma_\u{FFFD}x");
    }

    #[test]
    fn found_file_keeps_raw_bytes() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join("l.h"), b"ma_\xfe").expect("write");

        let resolver = Resolver::new(root, DecodePolicy::Lenient);
        match resolver.resolve(Utf8Path::new("l.h")) {
            Resolved::Found(file) => {
                assert_eq!(file.raw, b"ma_\xfe");
                assert!(file.lossy);
            }
            other => panic!("expected found, got {other:?}"),
        }
    }
}
