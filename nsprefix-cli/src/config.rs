//! Configuration file loading for nsprefix.
//!
//! Discovers and loads `nsprefix.toml` from the root directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use nsprefix_core::{DEFAULT_BACKUP_SUFFIX, DecodePolicy, FileSet};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "nsprefix.toml";

/// Top-level configuration from nsprefix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NsprefixConfig {
    /// Which files to process.
    pub files: FilesConfig,

    /// Backup settings.
    pub backups: BackupsConfig,

    /// Handling of invalid UTF-8.
    pub decode: DecodeConfig,
}

/// Files section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    /// Root-relative paths, in processing order.
    /// Empty means the built-in flutter_soloud file set.
    pub paths: Vec<Utf8PathBuf>,
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupsConfig {
    /// Suffix appended to a file's path to form its backup path.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
    pub policy: DecodePolicy,
}

/// Discover the nsprefix.toml config file.
///
/// Returns `None` if no config file is found in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a nsprefix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<NsprefixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<NsprefixConfig> {
    let config: NsprefixConfig = toml::from_str(contents).context("invalid TOML")?;
    if config.backups.suffix.is_empty() {
        anyhow::bail!("backups.suffix must not be empty");
    }
    Ok(config)
}

/// Load config from root, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<NsprefixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(NsprefixConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub files: FileSet,
    pub backup_suffix: String,
    pub decode: DecodePolicy,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: NsprefixConfig,
}

impl ConfigMerger {
    pub fn new(config: NsprefixConfig) -> Self {
        Self { config }
    }

    /// Merge with run/check arguments.
    ///
    /// CLI `--file` entries replace the configured list; `--lenient` forces
    /// the lenient decode policy.
    pub fn merge_run_args(
        self,
        cli_files: &[Utf8PathBuf],
        lenient: bool,
        cli_backup_suffix: Option<&str>,
    ) -> MergedConfig {
        let decode = if lenient {
            DecodePolicy::Lenient
        } else {
            self.config.decode.policy
        };
        let backup_suffix = cli_backup_suffix
            .map(str::to_string)
            .unwrap_or_else(|| self.config.backups.suffix.clone());

        MergedConfig {
            files: self.file_set(cli_files),
            backup_suffix,
            decode,
        }
    }

    /// Merge with restore/list-files arguments.
    pub fn merge_restore_args(
        self,
        cli_files: &[Utf8PathBuf],
        cli_backup_suffix: Option<&str>,
    ) -> MergedConfig {
        self.merge_run_args(cli_files, false, cli_backup_suffix)
    }

    fn file_set(&self, cli_files: &[Utf8PathBuf]) -> FileSet {
        if !cli_files.is_empty() {
            FileSet::new(cli_files.iter().cloned())
        } else if !self.config.files.paths.is_empty() {
            FileSet::new(self.config.files.paths.iter().cloned())
        } else {
            FileSet::default()
        }
    }
}
