// Chunk: docs/chunks/tab_expansion - Tab stops and column widths

//! Tab expansion and display width.
//!
//! Every code point occupies one column except `'\t'`, which advances to the
//! next multiple of the tab width. Both functions allocate per call; there is
//! no shared scratch state.

/// Returns the column reached after `ch`, starting from column `col`.
#[inline]
pub fn advance(col: usize, ch: char, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        col + tab_width - col % tab_width
    } else {
        col + 1
    }
}

/// Expands tabs to spaces, aligning each tab to the next tab stop.
pub fn expand<I>(text: I, tab_width: usize) -> String
where
    I: IntoIterator<Item = char>,
{
    let mut out = String::new();
    let mut col = 0;
    for ch in text {
        let next = advance(col, ch, tab_width);
        if ch == '\t' {
            out.extend(std::iter::repeat(' ').take(next - col));
        } else {
            out.push(ch);
        }
        col = next;
    }
    out
}

/// Returns the width of `text` in columns once tabs are expanded.
pub fn display_width<I>(text: I, tab_width: usize) -> usize
where
    I: IntoIterator<Item = char>,
{
    text.into_iter()
        .fold(0, |col, ch| advance(col, ch, tab_width))
}
