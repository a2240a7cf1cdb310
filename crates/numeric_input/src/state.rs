//! Live state of one bound numeric field.

use crate::locale::FormatSpec;
use crate::selection::SelectionRange;
use crate::text::clamp_to_char_boundary;

/// Everything the controller knows about a field.
///
/// Transitions take the state by value and hand back the updated one, so
/// each step can be checked without a rendering surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericFieldState {
    /// Current displayed text.
    pub text: String,
    /// Caret or selection, in byte offsets on character boundaries.
    pub selection: SelectionRange,
    /// Last successfully parsed canonical value.
    pub parsed: Option<f64>,
    spec: FormatSpec,
}

impl NumericFieldState {
    pub fn new(spec: FormatSpec) -> Self {
        Self {
            text: String::new(),
            selection: SelectionRange::default(),
            parsed: None,
            spec,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.selection = SelectionRange::caret(self.text.len());
        self
    }

    #[inline]
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    #[inline]
    pub fn decimals(&self) -> usize {
        self.spec.decimals
    }

    #[inline]
    pub fn locale(&self) -> &str {
        &self.spec.locale
    }

    /// Caret position: the start of the selection.
    #[inline]
    pub fn caret(&self) -> usize {
        self.selection.start
    }

    /// Place a collapsed caret, clamped into the text.
    pub fn set_caret(&mut self, pos: usize) {
        let pos = clamp_to_char_boundary(&self.text, pos);
        self.selection = SelectionRange::caret(pos);
    }

    /// Apply a selection, clamped into the text.
    pub fn select(&mut self, selection: SelectionRange) {
        self.selection = selection.clamped_to(&self.text);
    }

    /// Re-clamp the selection after the text changed underneath it.
    pub fn clamp_selection(&mut self) {
        self.selection = self.selection.clamped_to(&self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty_with_caret_at_zero() {
        let st = NumericFieldState::new(FormatSpec::default());
        assert_eq!(st.text, "");
        assert_eq!(st.caret(), 0);
        assert_eq!(st.parsed, None);
        assert_eq!(st.decimals(), 2);
        assert_eq!(st.locale(), "es-ES");
    }

    #[test]
    fn caret_and_selection_are_clamped() {
        let mut st = NumericFieldState::new(FormatSpec::default()).with_text("1,00");
        assert_eq!(st.caret(), 4);

        st.set_caret(50);
        assert_eq!(st.selection, SelectionRange::caret(4));

        st.select(SelectionRange::new(9, 1));
        assert_eq!(st.selection, SelectionRange::new(1, 4));

        st.text = "1".to_string();
        st.clamp_selection();
        assert_eq!(st.selection, SelectionRange::caret(1));
    }
}
