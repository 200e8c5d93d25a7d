//! Additive shifting over the 26-letter Latin alphabet.
//!
//! Letters are classified with explicit ASCII ranges, so accented or
//! non-Latin letters are treated like punctuation and pass through untouched.

pub const ALPHABET_LEN: i32 = 26;

/// Reduces any shift into `0..26`, so `-3` becomes `23`.
pub fn normalize_shift(shift: i32) -> i32 {
    shift.rem_euclid(ALPHABET_LEN)
}

/// Base letter of `c`'s case, or `None` when `c` is not an ASCII letter.
pub fn case_base(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(b'A'),
        'a'..='z' => Some(b'a'),
        _ => None,
    }
}

/// Offset of `c` from its case's base letter, case-insensitive.
pub fn alphabet_position(c: char) -> Option<i32> {
    case_base(c).map(|base| i32::from(c as u8 - base))
}

pub fn shift_char(c: char, shift: i32) -> char {
    match case_base(c) {
        Some(base) => {
            let offset = i32::from(c as u8 - base);
            let moved = (offset + normalize_shift(shift)).rem_euclid(ALPHABET_LEN);
            char::from(base + moved as u8)
        }
        None => c,
    }
}

/// Applies the same shift to every letter of `text`.
pub fn shift_text(text: &str, shift: i32) -> String {
    let shift = normalize_shift(shift);
    text.chars().map(|c| shift_char(c, shift)).collect()
}
