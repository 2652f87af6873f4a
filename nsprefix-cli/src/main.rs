mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig};
use fs_err as fs;
use nsprefix_core::adapters::{ConsoleProgress, FsWritePort};
use nsprefix_core::pipeline::{
    restore_exit_code, run_namespace, run_restore, write_json, write_report_artifacts,
};
use nsprefix_core::settings::{NamespaceSettings, RestoreSettings};
use nsprefix_render::{render_footer, render_header, render_restore};
use nsprefix_types::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "nsprefix",
    version,
    about = "Namespace miniaudio symbols (ma_ -> soloud_ma_, MA_ -> SOLOUD_MA_) in flutter_soloud sources."
)]
struct Cli {
    /// Directory the configured file paths are resolved against.
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    /// Config file (default: <root>/nsprefix.toml if present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Namespace the configured files, backing up each one that changes (default).
    Run(RunArgs),
    /// Show what `run` would change without touching any file.
    Check(RunArgs),
    /// Copy backups over the configured files.
    Restore(RestoreArgs),
    /// List the configured files and whether they exist.
    ListFiles(ListFilesArgs),
}

#[derive(Debug, Default, clap::Args)]
struct RunArgs {
    /// Process this file instead of the configured set (repeatable).
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<Utf8PathBuf>,

    /// Replace invalid UTF-8 instead of failing the file.
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Suffix appended to a file's path to form its backup path.
    #[arg(long)]
    backup_suffix: Option<String>,

    /// Write the JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Write a markdown run report to this path.
    #[arg(long)]
    report_md: Option<Utf8PathBuf>,
}

#[derive(Debug, clap::Args)]
struct RestoreArgs {
    /// Restore this file instead of the configured set (repeatable).
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<Utf8PathBuf>,

    /// Suffix the backups were written with.
    #[arg(long)]
    backup_suffix: Option<String>,

    /// Delete each backup after restoring from it.
    #[arg(long, default_value_t = false)]
    remove_backups: bool,

    /// Write the JSON restore report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

#[derive(Debug, clap::Args)]
struct ListFilesArgs {
    /// List this file instead of the configured set (repeatable).
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<Utf8PathBuf>,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<u8> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = resolve_root(&cli.root)?;
    match cli.cmd.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => cmd_namespace(&root, cli.config.as_deref(), args, false),
        Command::Check(args) => cmd_namespace(&root, cli.config.as_deref(), args, true),
        Command::Restore(args) => cmd_restore(&root, cli.config.as_deref(), args),
        Command::ListFiles(args) => cmd_list_files(&root, cli.config.as_deref(), args),
    }
}

/// Absolute form of `--root`, so console paths are unambiguous.
fn resolve_root(root: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let canonical =
        fs::canonicalize(root).with_context(|| format!("resolve root directory {}", root))?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|p| anyhow::anyhow!("root directory {} is not valid UTF-8", p.display()))
}

fn load_merger(root: &Utf8Path, config_path: Option<&Utf8Path>) -> anyhow::Result<ConfigMerger> {
    let file_config = match config_path {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(root).context("load nsprefix.toml config")?,
    };
    Ok(ConfigMerger::new(file_config))
}

fn cmd_namespace(
    root: &Utf8Path,
    config_path: Option<&Utf8Path>,
    args: RunArgs,
    dry_run: bool,
) -> anyhow::Result<u8> {
    let MergedConfig {
        files,
        backup_suffix,
        decode,
    } = load_merger(root, config_path)?.merge_run_args(
        &args.files,
        args.lenient,
        args.backup_suffix.as_deref(),
    );

    let settings = NamespaceSettings {
        root: root.to_path_buf(),
        files,
        decode,
        backup_suffix,
        dry_run,
    };
    debug!(
        "settings: root={}, files={}, decode={:?}, backup_suffix={}, dry_run={}",
        settings.root,
        settings.files.len(),
        settings.decode,
        settings.backup_suffix,
        settings.dry_run
    );

    print!("{}", render_header(settings.dry_run));
    let outcome = run_namespace(&settings, tool_info(), &ConsoleProgress::new(root))?;
    print!("{}", render_footer(&outcome.report));

    write_report_artifacts(
        &outcome.report,
        args.report.as_deref(),
        args.report_md.as_deref(),
        &FsWritePort,
    )?;

    Ok(outcome.exit_code())
}

fn cmd_restore(
    root: &Utf8Path,
    config_path: Option<&Utf8Path>,
    args: RestoreArgs,
) -> anyhow::Result<u8> {
    let merged = load_merger(root, config_path)?
        .merge_restore_args(&args.files, args.backup_suffix.as_deref());

    let settings = RestoreSettings {
        root: root.to_path_buf(),
        files: merged.files,
        backup_suffix: merged.backup_suffix,
        remove_backups: args.remove_backups,
    };

    let report = run_restore(&settings, tool_info())?;
    print!("{}", render_restore(&report));

    if let Some(path) = &args.report {
        write_json(&report, path, &FsWritePort).context("write restore report")?;
    }
    Ok(restore_exit_code(&report))
}

fn cmd_list_files(
    root: &Utf8Path,
    config_path: Option<&Utf8Path>,
    args: ListFilesArgs,
) -> anyhow::Result<u8> {
    let merged = load_merger(root, config_path)?.merge_restore_args(&args.files, None);

    for rel in merged.files.paths() {
        let marker = if root.join(rel).is_file() { "✓" } else { "✗" };
        println!("  {} {}", marker, rel);
    }
    Ok(0)
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "nsprefix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
