//! Rewrite engine for nsprefix.
//!
//! Pure text transformation, no filesystem access:
//! - [`RenameRule`] pairs a boundary-anchored literal prefix with its
//!   namespaced replacement.
//! - [`RuleSet::miniaudio`] holds the two fixed rules, applied in order
//!   (uppercase macros, then lowercase identifiers).
//! - [`apply`] returns the transformed text and a changed flag; feeding the
//!   result back in is a no-op.
//!
//! The engine has no lexical awareness: prefixes inside comments and string
//! literals are rewritten exactly like prefixes in code.

mod engine;
mod rules;

pub use engine::{Rewrite, RuleSet, apply, count_namespaced, find_unprefixed};
pub use rules::{RenameRule, RuleKind};

/// Bare prefix of the bundled library's macros.
pub const MACRO_PREFIX: &str = "MA_";
/// Namespaced form of [`MACRO_PREFIX`].
pub const NAMESPACED_MACRO_PREFIX: &str = "SOLOUD_MA_";
/// Bare prefix of the bundled library's functions and types.
pub const IDENT_PREFIX: &str = "ma_";
/// Namespaced form of [`IDENT_PREFIX`].
pub const NAMESPACED_IDENT_PREFIX: &str = "soloud_ma_";
/// Text that must not directly precede a lowercase match.
pub const IDENT_GUARD: &str = "soloud_";
