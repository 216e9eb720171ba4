// Chunk: docs/chunks/syntax_highlighting - Splitting text into tagged fragments

//! Rule-set tokenizer.
//!
//! [`Syntax::split`] walks a text left to right and yields [`Fragment`]s that
//! cover it exactly once: no gaps, no overlaps. At each step every rule is
//! searched from the current offset and the earliest match wins; ties go to
//! the rule declared first. Text before the winning match is yielded untagged.

use crate::rule::{Rule, Tag};

/// A run of text annotated with an optional tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub text: String,
    /// `None` when no rule matched this text.
    pub tag: Option<Tag>,
}

impl Fragment {
    /// Creates a fragment with the given text and tag.
    pub fn new(text: impl Into<String>, tag: Option<Tag>) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    /// Creates an untagged fragment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// Creates a fragment carrying `tag`.
    pub fn tagged(text: impl Into<String>, tag: Tag) -> Self {
        Self::new(text, Some(tag))
    }

    /// Returns the number of characters (code points) in the fragment.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if the fragment holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An ordered set of syntax rules.
///
/// The default set has no rules and yields the whole text as one untagged
/// fragment.
#[derive(Debug, Clone, Default)]
pub struct Syntax {
    rules: Vec<Rule>,
}

impl Syntax {
    /// Creates a rule set. Declaration order breaks ties between rules that
    /// match at the same offset.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns true if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Splits `text` into tagged fragments, lazily.
    ///
    /// Empty text yields no fragments.
    pub fn split<'a>(&'a self, text: &'a str) -> Split<'a> {
        Split {
            rules: &self.rules,
            text,
            pos: 0,
            pending: None,
            next_matches: vec![NextMatch::Unsearched; self.rules.len()],
        }
    }
}

impl From<Vec<Rule>> for Syntax {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

/// A rule's next match as last searched.
///
/// A match found from an earlier offset is still the first match from any
/// offset up to its start, so it only needs searching again once `pos` moves
/// past it. A rule with no match stays exhausted.
#[derive(Debug, Clone, Copy)]
enum NextMatch {
    Unsearched,
    At(usize, usize),
    Exhausted,
}

/// Lazy iterator over the fragments of a text. Created by [`Syntax::split`].
#[derive(Debug)]
pub struct Split<'a> {
    rules: &'a [Rule],
    text: &'a str,
    /// Byte offset of the first character not yet yielded.
    pos: usize,
    /// A tagged match waiting behind the untagged text that preceded it.
    pending: Option<Fragment>,
    /// One entry per rule, in declaration order.
    next_matches: Vec<NextMatch>,
}

impl Split<'_> {
    /// Returns the earliest match at or after `pos` as `(start, end, tag)`.
    fn earliest_match(&mut self) -> Option<(usize, usize, Tag)> {
        let mut best: Option<(usize, usize, Tag)> = None;
        for (rule, cached) in self.rules.iter().zip(self.next_matches.iter_mut()) {
            let found = match *cached {
                NextMatch::At(start, end) if start >= self.pos => Some((start, end)),
                NextMatch::Exhausted => None,
                _ => {
                    let found = rule.find_at(self.text, self.pos);
                    *cached = found.map_or(NextMatch::Exhausted, |(start, end)| {
                        NextMatch::At(start, end)
                    });
                    found
                }
            };
            if let Some((start, end)) = found {
                // Strictly earlier only: the first declared rule keeps ties.
                if best.map_or(true, |(best_start, _, _)| start < best_start) {
                    best = Some((start, end, rule.tag()));
                }
            }
        }
        best
    }
}

impl Iterator for Split<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        if let Some(fragment) = self.pending.take() {
            return Some(fragment);
        }
        if self.pos >= self.text.len() {
            return None;
        }

        match self.earliest_match() {
            None => {
                let rest = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(Fragment::plain(rest))
            }
            Some((start, end, tag)) => {
                let tagged = Fragment::tagged(&self.text[start..end], tag);
                let before = &self.text[self.pos..start];
                self.pos = end;
                if before.is_empty() {
                    Some(tagged)
                } else {
                    self.pending = Some(tagged);
                    Some(Fragment::plain(before))
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Split<'_> {}
