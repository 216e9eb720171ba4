// Chunk: docs/chunks/text_buffer - Line store, display reflow, marks and undo

//! gridpad-buffer: the editing core of the gridpad terminal editor.
//!
//! This crate provides a thread-safe text buffer that keeps a wrapped,
//! syntax-tagged projection of its content ready for a fixed-size character
//! grid.
//!
//! # Overview
//!
//! The main type is [`Buffer`], which provides:
//! - Positional insertion and deletion with silent clipping
//! - Display lines wrapped at the configured column count, tabs expanded and
//!   fragments tagged by a [`Syntax`] rule set
//! - Named marks that follow every edit
//! - Grouped undo and redo, merging runs of typing or deleting
//! - Mapping between logical positions and screen cells
//!
//! # Example
//!
//! ```
//! use gridpad_buffer::{Buffer, BufferConfig, Position, Rule, Syntax};
//!
//! let buffer = Buffer::with_config(BufferConfig {
//!     cols: 8,
//!     rows: 4,
//!     tab_width: 4,
//! });
//! buffer.set_syntax(Syntax::new(vec![Rule::token(r"\bmain\b", 1).unwrap()]));
//! buffer.insert(Position::new(1, 0), "package main");
//!
//! let lines = buffer.display_lines();
//! assert_eq!(lines.len(), 4);
//! assert_eq!(lines[0].text(), "package ");
//! assert_eq!(lines[1].fragments[0].tag, Some(1));
//! assert!(lines[1].continuation);
//! ```
//!
//! # Positions
//!
//! A [`Position`] is `(line, ch)` with 1-based lines and 0-based code point
//! offsets. Every operation clips the positions it is given, so out-of-range
//! input never fails.

mod buffer;
mod config;
mod coords;
mod display;
mod document;
mod line_store;
mod marks;
pub mod tabs;
mod types;
mod undo;

pub use buffer::Buffer;
pub use config::BufferConfig;
pub use display::DisplayLine;
pub use marks::MarkId;
pub use types::Position;

pub use gridpad_syntax::{Fragment, Rule, Syntax, SyntaxError, Tag};
