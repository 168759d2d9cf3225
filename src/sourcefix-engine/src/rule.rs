//! Rewrite rules: a named pattern paired with a replacement template.

use std::borrow::Cow;
use std::fmt;

use regex::{Captures, Regex};

use crate::error::{FixError, FixResult};

/// Kind of fix a rule performs. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixKind {
    /// Splices new text into the match, keeping the surrounding text verbatim.
    Insertion,
    /// Replaces the match with a reordered sequence of its parts.
    Reordering,
    /// Wraps a value in a defensive fallback.
    Guard,
    /// Replaces a declaration's initializer with an empty literal.
    Removal,
}

impl FixKind {
    /// Returns a short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Reordering => "reordering",
            Self::Guard => "guard",
            Self::Removal => "removal",
        }
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds the replacement for a single match.
///
/// Returning `None` declines the match: the matched text is kept as is and
/// the match is not counted. Declining is how overlapping shapes are kept
/// mutually exclusive between rules.
pub trait Template: Send + Sync {
    fn render(&self, caps: &Captures<'_>) -> Option<String>;

    /// Render with access to the whole `content` the match was found in.
    ///
    /// `content` is the input of the current pass, before any replacement.
    /// Templates that must look outside their own match override this.
    fn render_in(&self, content: &str, caps: &Captures<'_>) -> Option<String> {
        let _ = content;
        self.render(caps)
    }
}

impl<F> Template for F
where
    F: Fn(&Captures<'_>) -> Option<String> + Send + Sync,
{
    fn render(&self, caps: &Captures<'_>) -> Option<String> {
        self(caps)
    }
}

/// A named, immutable rewrite rule.
pub struct Rule {
    name: String,
    description: String,
    kind: FixKind,
    pattern: Regex,
    template: Box<dyn Template>,
}

impl Rule {
    /// Compile `pattern` and pair it with `template`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: FixKind,
        pattern: &str,
        template: impl Template + 'static,
    ) -> FixResult<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|e| FixError::invalid_pattern(&name, e))?;
        Ok(Self {
            name,
            description: description.into(),
            kind,
            pattern,
            template: Box::new(template),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> FixKind {
        self.kind
    }

    /// Rewrite every non-overlapping match in one left-to-right pass.
    ///
    /// Returns the new content and the number of matches actually rewritten.
    /// Content is borrowed back unchanged when nothing matched.
    pub fn apply<'h>(&self, content: &'h str) -> (Cow<'h, str>, usize) {
        let mut count = 0;
        let rewritten = self.pattern.replace_all(content, |caps: &Captures<'_>| {
            let matched = &caps[0];
            match self.template.render_in(content, caps) {
                Some(replacement) => {
                    if replacement != matched {
                        count += 1;
                    }
                    replacement
                }
                None => matched.to_string(),
            }
        });
        (rewritten, count)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Returns the text of a named group, or `""` if it did not participate.
pub(crate) fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Line terminator used inside a match, so rewritten lines keep the file's style.
pub(crate) fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}
