use crate::rules::{RenameRule, RuleKind};
use crate::{
    IDENT_GUARD, IDENT_PREFIX, MACRO_PREFIX, NAMESPACED_IDENT_PREFIX, NAMESPACED_MACRO_PREFIX,
};
use nsprefix_types::report::NamespaceCounts;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static MINIAUDIO: LazyLock<RuleSet> = LazyLock::new(|| RuleSet {
    rules: vec![
        RenameRule::literal(RuleKind::Macro, MACRO_PREFIX, NAMESPACED_MACRO_PREFIX, None),
        RenameRule::literal(
            RuleKind::Identifier,
            IDENT_PREFIX,
            NAMESPACED_IDENT_PREFIX,
            Some(IDENT_GUARD),
        ),
    ],
});

static NAMESPACED_IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{}", regex::escape(NAMESPACED_IDENT_PREFIX))).expect("valid regex")
});

static NAMESPACED_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{}", regex::escape(NAMESPACED_MACRO_PREFIX))).expect("valid regex")
});

/// Ordered, immutable rule list.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<RenameRule>,
}

impl RuleSet {
    /// The fixed miniaudio rules: `MA_` -> `SOLOUD_MA_`, then
    /// `ma_` -> `soloud_ma_`.
    pub fn miniaudio() -> &'static RuleSet {
        &MINIAUDIO
    }

    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    /// Run every rule in order over `content`.
    pub fn apply(&self, content: &str) -> Rewrite {
        let mut current = content.to_string();
        let mut macros = 0;
        let mut identifiers = 0;

        for rule in &self.rules {
            let (next, n) = rule.apply(&current);
            if n == 0 {
                continue;
            }
            match rule.kind() {
                RuleKind::Macro => macros += n,
                RuleKind::Identifier => identifiers += n,
            }
            current = next.into_owned();
        }

        let changed = current != content;
        trace!(macros, identifiers, changed, "rewrite pass");

        Rewrite {
            content: current,
            changed,
            macro_replacements: macros,
            identifier_replacements: identifiers,
        }
    }

    /// Byte offsets of bare prefixes that a pass would still rewrite, sorted.
    pub fn find_unprefixed(&self, content: &str) -> Vec<usize> {
        let mut offsets: Vec<usize> = self
            .rules
            .iter()
            .flat_map(|rule| rule.match_offsets(content))
            .collect();
        offsets.sort_unstable();
        offsets
    }
}

/// Engine output for one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// True iff `content` differs from the input.
    pub changed: bool,
    pub macro_replacements: usize,
    pub identifier_replacements: usize,
}

/// Apply the miniaudio rule set.
pub fn apply(content: &str) -> Rewrite {
    RuleSet::miniaudio().apply(content)
}

/// See [`RuleSet::find_unprefixed`].
pub fn find_unprefixed(content: &str) -> Vec<usize> {
    RuleSet::miniaudio().find_unprefixed(content)
}

/// Count boundary occurrences of both namespaced prefixes.
pub fn count_namespaced(content: &str) -> NamespaceCounts {
    NamespaceCounts {
        lowercase: NAMESPACED_IDENT.find_iter(content).count() as u64,
        uppercase: NAMESPACED_MACRO.find_iter(content).count() as u64,
    }
}
