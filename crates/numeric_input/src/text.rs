//! UTF-8 text utilities for numeric field editing.
//!
//! Carets and selections are byte offsets into the field text. Locale
//! separators are not always ASCII (the narrow no-break space used for
//! grouping is three bytes), so every offset produced here sits on a
//! character boundary.

use std::borrow::Cow;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// If `index` is beyond the string length, it is clamped to `s.len()`.
/// If `index` falls in the middle of a multi-byte character, it is
/// adjusted backwards to the start of that character.
///
/// # Examples
///
/// ```
/// use numeric_input::clamp_to_char_boundary;
///
/// let s = "1\u{202f}234"; // narrow no-break space is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 1), 1);
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 100), s.len());
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Find the previous valid caret position (character boundary) before `i`.
///
/// Returns 0 if already at the start.
///
/// # Examples
///
/// ```
/// use numeric_input::prev_cursor_boundary;
///
/// assert_eq!(prev_cursor_boundary("12,34", 3), 2);
/// assert_eq!(prev_cursor_boundary("12,34", 0), 0);
/// ```
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i == 0 {
        return 0;
    }
    s[..i]
        .char_indices()
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Find the next valid caret position (character boundary) after `i`.
///
/// Returns `s.len()` if already at or beyond the end.
///
/// # Examples
///
/// ```
/// use numeric_input::next_cursor_boundary;
///
/// assert_eq!(next_cursor_boundary("12,34", 2), 3);
/// assert_eq!(next_cursor_boundary("12,34", 5), 5);
/// ```
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i >= s.len() {
        return s.len();
    }

    let mut it = s[i..].char_indices();
    let _ = it.next(); // current char at 0
    it.next().map(|(idx, _)| i + idx).unwrap_or(s.len())
}

/// Character starting at byte offset `i`, if `i` is a boundary inside `s`.
#[inline]
pub fn char_at(s: &str, i: usize) -> Option<char> {
    if !s.is_char_boundary(i) {
        return None;
    }
    s.get(i..).and_then(|rest| rest.chars().next())
}

/// Character ending at byte offset `i` (the one a backspace would remove).
#[inline]
pub fn char_before(s: &str, i: usize) -> Option<char> {
    let i = clamp_to_char_boundary(s, i);
    s[..i].chars().next_back()
}

/// Remove every whitespace character.
///
/// Returns `Cow::Borrowed` when there is nothing to strip.
///
/// # Examples
///
/// ```
/// use numeric_input::strip_whitespace;
///
/// assert_eq!(strip_whitespace("1 234,5"), "1234,5");
/// assert_eq!(strip_whitespace("12"), "12");
/// ```
pub fn strip_whitespace(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_whitespace) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Filter a string to remove newlines (CR and LF), for single-line fields.
///
/// # Examples
///
/// ```
/// use numeric_input::filter_single_line;
///
/// assert_eq!(filter_single_line("12,5"), "12,5");
/// assert_eq!(filter_single_line("12\r\n,5"), "12,5");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains('\n') && !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// Keep at most `max_chars` characters of `s`.
#[inline]
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
