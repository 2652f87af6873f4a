use regex::Regex;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Uppercase macro prefix (`MA_`).
    Macro,
    /// Lowercase identifier prefix (`ma_`).
    Identifier,
}

/// A case-sensitive literal prefix matched at a token boundary.
///
/// A match is a boundary occurrence of `prefix` (no word character directly
/// before it). When `guard` is set, a match whose preceding text ends with
/// the guard is left untouched as well.
///
/// Word characters are the `regex` crate's Unicode `\w`. On ASCII that is
/// `[A-Za-z0-9_]`; beyond ASCII it also covers combining marks and connector
/// punctuation such as `‿`, but not superscript digits such as `²`.
#[derive(Debug, Clone)]
pub struct RenameRule {
    kind: RuleKind,
    replacement: &'static str,
    guard: Option<&'static str>,
    pattern: Regex,
}

impl RenameRule {
    pub(crate) fn literal(
        kind: RuleKind,
        prefix: &'static str,
        replacement: &'static str,
        guard: Option<&'static str>,
    ) -> Self {
        let pattern = Regex::new(&format!(r"\b{}", regex::escape(prefix)))
            .expect("escaped literal prefix is a valid regex");
        Self {
            kind,
            replacement,
            guard,
            pattern,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    fn guarded(&self, text: &str, start: usize) -> bool {
        self.guard.is_some_and(|guard| text[..start].ends_with(guard))
    }

    /// Byte offsets of every occurrence this rule would rewrite.
    pub fn match_offsets(&self, text: &str) -> Vec<usize> {
        self.pattern
            .find_iter(text)
            .map(|m| m.start())
            .filter(|&start| !self.guarded(text, start))
            .collect()
    }

    /// Rewrite every eligible occurrence; returns the text and the number of
    /// replacements. Borrows the input when nothing matched.
    pub fn apply<'a>(&self, text: &'a str) -> (Cow<'a, str>, usize) {
        let mut out = String::new();
        let mut last = 0;
        let mut replaced = 0;

        for m in self.pattern.find_iter(text) {
            if self.guarded(text, m.start()) {
                continue;
            }
            if replaced == 0 {
                out.reserve(text.len() + self.replacement.len());
            }
            out.push_str(&text[last..m.start()]);
            out.push_str(self.replacement);
            last = m.end();
            replaced += 1;
        }

        if replaced == 0 {
            return (Cow::Borrowed(text), 0);
        }
        out.push_str(&text[last..]);
        (Cow::Owned(out), replaced)
    }
}
