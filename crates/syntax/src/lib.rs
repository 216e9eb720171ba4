// Chunk: docs/chunks/syntax_highlighting - Rule-based syntax tokenizer

//! gridpad-syntax: Regex rule tokenizer for the gridpad editing core.
//!
//! This crate turns raw text into an ordered, gapless sequence of tagged
//! [`Fragment`]s. The buffer engine feeds it tab-expanded line text and packs
//! the fragments into wrapped display lines.
//!
//! # Overview
//!
//! - [`Rule`]: a compiled pattern plus a [`Tag`]. Token rules tag a single
//!   match; region rules tag from a begin match to the first end match.
//! - [`Syntax`]: an ordered rule set. The earliest match wins, and ties go to
//!   the rule declared first.
//! - [`Split`]: the lazy fragment iterator returned by [`Syntax::split`].
//!
//! # Example
//!
//! ```
//! use gridpad_syntax::{Fragment, Rule, Syntax};
//!
//! let syntax = Syntax::new(vec![
//!     Rule::token("(var|const)", 0).unwrap(),
//!     Rule::region(r"/\*", r"\*/", 1).unwrap(),
//! ]);
//!
//! let fragments: Vec<Fragment> = syntax.split("var x /* y */").collect();
//! assert_eq!(
//!     fragments,
//!     vec![
//!         Fragment::tagged("var", 0),
//!         Fragment::plain(" x "),
//!         Fragment::tagged("/* y */", 1),
//!     ]
//! );
//! ```

mod rule;
mod tokenizer;

pub use rule::{Rule, SyntaxError, Tag};
pub use tokenizer::{Fragment, Split, Syntax};
