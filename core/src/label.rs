//! Seat label formatting.
//!
//! A label is the row letter followed by the one-based column number with no
//! separator: row 0, col 0 is "A1", row 1, col 11 is "B12".

use std::fmt::Write as _;

/// Formats the label of the seat at `(row, col)`.
///
/// Rows 0 to 25 render as a single letter `A`..`Z`. Rows beyond that continue
/// with spreadsheet-style letters (`AA`, `AB`, ..., `ZZ`, `AAA`).
#[must_use]
pub fn seat_label(row: u32, col: u32) -> String {
    let mut label = row_letters(row);
    let _ = write!(label, "{}", u64::from(col) + 1);
    label
}

/// Formats the letter part of a row label (bijective base 26).
#[must_use]
pub fn row_letters(row: u32) -> String {
    let mut n = u64::from(row) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        #[allow(clippy::cast_possible_truncation)] // n % 26 < 26
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}
