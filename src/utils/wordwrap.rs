//! Greedy word wrapping measured in terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Number of terminal cells `text` occupies.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap `text` into lines at most `width` cells wide.
///
/// Line breaks in the input are kept as hard breaks. Words wider than
/// `width` are split between characters. A `width` of zero disables
/// wrapping but still splits on hard breaks.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if width == 0 || display_width(paragraph) <= width {
            lines.push(paragraph.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let mut word_width = display_width(word);

            if word_width > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let mut pieces = split_by_width(word, width);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                word_width = display_width(&last);
                current = last;
                current_width = word_width;
                continue;
            }

            let needed = if current_width == 0 {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current_width += word_width;
            current.push_str(word);
        }

        lines.push(current);
    }

    lines
}

/// Cut `word` into pieces no wider than `width`. A single character wider
/// than `width` gets a piece of its own.
fn split_by_width(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;

    for ch in word.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if piece_width + ch_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
