// Chunk: docs/chunks/text_buffer - Line store, display reflow, marks and undo

//! Performance sanity checks for the buffer.
//!
//! These tests verify that basic operations complete within reasonable time bounds.
//! They are not formal benchmarks but guard against obvious performance regressions,
//! such as an edit reflowing every line instead of the ones it touched.

use gridpad_buffer::{Buffer, BufferConfig, Position, Rule, Syntax};
use std::time::{Duration, Instant};

const BUFFER_LINES: usize = 2000;
const MAX_LINE: usize = 80;

/// Builds a buffer of printable lines of varying length, without randomness.
fn filled_buffer() -> Buffer {
    let lines: Vec<String> = (0..BUFFER_LINES)
        .map(|i| {
            (0..(i * 37) % MAX_LINE)
                .map(|j| char::from(0x20 + ((i * 7 + j * 13) % 0x5f) as u8))
                .collect()
        })
        .collect();
    Buffer::from_text(&lines.join("\n"))
}

fn go_rules() -> Syntax {
    Syntax::new(vec![
        Rule::token(r"\b(func|package|import|return|if|else|for|var)\b", 0).unwrap(),
        Rule::token(r"\b\d+\b", 1).unwrap(),
        Rule::region("\"", "\"", 1).unwrap(),
        Rule::region("//", "$", 2).unwrap(),
    ])
}

#[test]
fn typing_10k_chars_with_newlines_under_2s() {
    let buffer = Buffer::new();
    let start = Instant::now();

    let mut cursor = buffer.end();
    for i in 0..10_000 {
        let text = if i % 80 == 79 { "\n" } else { "x" };
        cursor = buffer.insert(cursor, text);
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "Typing 10K characters took {:?}, expected < 2s",
        elapsed
    );
    assert_eq!(buffer.line_count(), 126);
}

#[test]
fn edits_in_large_buffer_under_2s() {
    let buffer = filled_buffer();
    let start = Instant::now();

    for i in 0..1000 {
        let line = (i * 31 % BUFFER_LINES) as isize + 1;
        let begin = Position::new(line, 3);
        let end = Position::new(line + 3, 5);
        let text = buffer.get(begin, end);
        buffer.delete(begin, end);
        buffer.insert(begin, &text);
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "1000 delete/insert pairs took {:?}, expected < 2s",
        elapsed
    );
    assert_eq!(buffer.line_count(), BUFFER_LINES);
}

#[test]
fn coordinate_mapping_under_1s() {
    let buffer = filled_buffer();
    buffer.set_size(40, 25);
    let start = Instant::now();

    for i in 0..10_000isize {
        let pos = Position::new(i % BUFFER_LINES as isize + 1, i % MAX_LINE as isize);
        let (col, row) = buffer.coords_from_index(pos);
        buffer.index_from_coords(col, row);
        buffer.shift_index(pos, i % 51 - 25);
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_secs(1),
        "10K coordinate mappings took {:?}, expected < 1s",
        elapsed
    );
}

#[test]
fn full_reflow_under_2s() {
    let buffer = filled_buffer();
    let start = Instant::now();

    buffer.set_syntax(go_rules());
    for cols in [17, 80, 3] {
        buffer.set_size(cols, 25);
    }
    buffer.set_tab_width(4);

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "Five full reflows took {:?}, expected < 2s",
        elapsed
    );
    assert!(buffer.display_line_count() > BUFFER_LINES);
}

#[test]
fn display_lines_and_modified_under_1s() {
    let buffer = Buffer::with_config(BufferConfig {
        cols: 80,
        rows: 50,
        tab_width: 8,
    });
    buffer.insert(Position::new(1, 0), &"let x = 42;\n".repeat(BUFFER_LINES));
    let start = Instant::now();

    for i in 0..1000 {
        buffer.scroll(if i % 2 == 0 { 37 } else { -11 });
        assert_eq!(buffer.display_lines().len(), 50);
    }
    for _ in 0..20 {
        assert!(buffer.modified());
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(1000),
        "Display and hash checks took {:?}, expected < 1s",
        elapsed
    );
}
