//! Shared DTOs for the nsprefix workspace.
//!
//! # Design constraints
//! - Report types are serialized to disk; prefer adding optional fields over
//!   changing semantics.
//! - [`source::SourceFile`] lives only for the duration of one file's
//!   processing and is never serialized.

pub mod report;
pub mod source;

/// Schema identifiers.
pub mod schema {
    pub const NSPREFIX_REPORT_V1: &str = "nsprefix.report.v1";
    pub const NSPREFIX_RESTORE_V1: &str = "nsprefix.restore.v1";
}

/// Identity of the tool that produced a report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
