//! Caret and selection ranges.

use crate::text::clamp_to_char_boundary;

/// A selection as a byte range into the field text.
///
/// The range is always normalized such that `start <= end`. An empty range
/// is a plain caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A collapsed selection at `pos`.
    #[inline]
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns `true` if the selection is a single caret position.
    #[inline]
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Clamp both ends into `[0, text.len()]` on character boundaries.
    ///
    /// Out-of-range offsets are never an error; they are pulled back in.
    ///
    /// ```
    /// use numeric_input::SelectionRange;
    ///
    /// let sel = SelectionRange::new(2, 40).clamped_to(",00");
    /// assert_eq!(sel, SelectionRange::new(2, 3));
    /// ```
    pub fn clamped_to(self, text: &str) -> Self {
        Self::new(
            clamp_to_char_boundary(text, self.start),
            clamp_to_char_boundary(text, self.end),
        )
    }

    /// Returns the selected substring, or `""` if the range does not fit.
    #[inline]
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        value.get(self.start..self.end).unwrap_or("")
    }
}
