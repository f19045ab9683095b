//! Formatting utilities for terminal output

use crate::core::Puzzle;
use rustc_hash::FxHashSet;

/// Placeholder shown under an unsolved cipher letter
pub const BLANK: char = '_';

/// Greedily wrap words into lines of at most `width` characters
///
/// A word longer than `width` gets a line of its own.
#[must_use]
pub fn wrap_words<'a>(words: impl IntoIterator<Item = &'a str>, width: usize) -> Vec<Vec<&'a str>> {
    let mut lines: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for word in words {
        let len = word.chars().count();
        let needed = if current.is_empty() {
            len
        } else {
            current_len + 1 + len
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = len;
        } else {
            current_len = needed;
        }
        current.push(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render the board as `(cipher row, guess row)` pairs
///
/// Solved letters show their plaintext in the guess row, unsolved letters show
/// [`BLANK`], and punctuation is echoed in both rows.
#[must_use]
pub fn render_board(
    puzzle: &Puzzle,
    solved: &FxHashSet<u8>,
    width: usize,
) -> Vec<(String, String)> {
    wrap_words(puzzle.cipher_words(), width)
        .into_iter()
        .map(|line| {
            let cipher_row = line.join(" ");
            let guess_row = cipher_row
                .chars()
                .map(|ch| match u8::try_from(ch) {
                    Ok(b) if b.is_ascii_uppercase() => {
                        if solved.contains(&b) {
                            puzzle.plain_for(b).map_or(BLANK, char::from)
                        } else {
                            BLANK
                        }
                    }
                    _ => ch,
                })
                .collect();
            (cipher_row, guess_row)
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a letter list like `A B C`
#[must_use]
pub fn letter_list(letters: &[u8]) -> String {
    letters
        .iter()
        .map(|&b| char::from(b).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
