//! Embeddable core library for nsprefix.
//!
//! Provides a clap-free entry point so the namespacing run can be driven
//! from the CLI, a build script, or tests.
//!
//! # Port traits
//!
//! Report artifacts are written through [`WritePort`](ports::WritePort) and
//! per-file progress goes to [`ProgressPort`](ports::ProgressPort). The
//! [`adapters`] module provides the filesystem writer, the streaming console
//! printer and a silent sink.
//!
//! # Entry points
//!
//! - [`run_namespace`](pipeline::run_namespace) - rewrite (or check) the file set
//! - [`run_restore`](pipeline::run_restore) - copy backups over their originals

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-exported so embedders don't need nsprefix-edit directly.
pub use nsprefix_edit::{DEFAULT_BACKUP_SUFFIX, DEFAULT_FILE_SET, DecodePolicy, FileSet};
