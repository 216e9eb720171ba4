// Chunk: docs/chunks/syntax_highlighting - Token and region rules

//! Syntax rules.
//!
//! A [`Rule`] pairs a compiled pattern with a [`Tag`]. Token rules tag a single
//! match; region rules tag everything from a begin match through the first end
//! match that follows it.

use regex::Regex;
use thiserror::Error;

/// Syntax category assigned to a fragment by a matching rule.
pub type Tag = usize;

/// Error returned when a rule pattern fails to compile.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("invalid begin pattern {pattern:?}")]
    InvalidBegin {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid end pattern {pattern:?}")]
    InvalidEnd {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A rule for matching syntax and applying a tag to it.
#[derive(Debug, Clone)]
pub struct Rule {
    begin: Regex,
    /// `None` for token rules.
    end: Option<Regex>,
    tag: Tag,
}

impl Rule {
    /// Compiles a token rule: each non-empty match of `pattern` is tagged.
    pub fn token(pattern: &str, tag: Tag) -> Result<Self, SyntaxError> {
        let begin = Regex::new(pattern).map_err(|source| SyntaxError::InvalidBegin {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            begin,
            end: None,
            tag,
        })
    }

    /// Compiles a region rule spanning from a `begin` match to the first `end`
    /// match after it.
    ///
    /// A region with no terminating `end` match runs to the end of the text.
    pub fn region(begin: &str, end: &str, tag: Tag) -> Result<Self, SyntaxError> {
        let mut rule = Self::token(begin, tag)?;
        let end_re = Regex::new(end).map_err(|source| SyntaxError::InvalidEnd {
            pattern: end.to_string(),
            source,
        })?;
        rule.end = Some(end_re);
        Ok(rule)
    }

    /// Returns the tag applied to text this rule matches.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns true if this is a begin/end region rule.
    pub fn is_region(&self) -> bool {
        self.end.is_some()
    }

    /// Finds this rule's first match in `text` starting at byte offset `from`.
    ///
    /// Returns the byte range `(start, end)` of the match. Empty begin matches
    /// are skipped so callers always make progress.
    pub(crate) fn find_at(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut at = from;
        let begin = loop {
            let m = self.begin.find_at(text, at)?;
            if !m.is_empty() {
                break m;
            }
            // Step past the empty match by one code point.
            let step = text[m.start()..].chars().next()?.len_utf8();
            at = m.start() + step;
        };

        let end = match &self.end {
            None => begin.end(),
            Some(end_re) => end_re
                .find_at(text, begin.end())
                .map_or(text.len(), |m| m.end()),
        };
        Some((begin.start(), end))
    }
}
