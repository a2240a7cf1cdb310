//! Keystroke descriptions delivered by the host.

use crate::selection::SelectionRange;

/// Key identifiers the field reacts to, spelled the way hosts report them.
pub mod names {
    pub const BACKSPACE: &str = "Backspace";
    pub const DELETE: &str = "Delete";
    pub const TAB: &str = "Tab";
    pub const ESCAPE: &str = "Escape";
    pub const ENTER: &str = "Enter";
    pub const HOME: &str = "Home";
    pub const END: &str = "End";
    pub const ARROW_LEFT: &str = "ArrowLeft";
    pub const ARROW_RIGHT: &str = "ArrowRight";
    pub const CLEAR: &str = "Clear";
    pub const COPY: &str = "Copy";
    pub const PASTE: &str = "Paste";
    pub const MINUS: &str = "-";
    pub const PERIOD: &str = ".";
}

/// One keystroke, consumed synchronously by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// Host selection at the time of the event. `None` means "use the
    /// selection the field already tracks".
    pub selection: Option<SelectionRange>,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            selection: None,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn at(mut self, selection: SelectionRange) -> Self {
        self.selection = Some(selection);
        self
    }

    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.key == name
    }

    /// Control or command held.
    #[inline]
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }

    /// The single character this key would type, if it is printable and no
    /// command modifier is held.
    pub fn typed_char(&self) -> Option<char> {
        if self.has_command_modifier() {
            return None;
        }
        let mut chars = self.key.chars();
        let c = chars.next()?;
        if chars.next().is_some() || c.is_control() {
            return None;
        }
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_modifiers_and_selection() {
        let ev = KeyEvent::new("v").with_ctrl().at(SelectionRange::new(0, 3));
        assert!(ev.ctrl);
        assert!(!ev.meta);
        assert!(ev.has_command_modifier());
        assert_eq!(ev.selection, Some(SelectionRange::new(0, 3)));
    }

    #[test]
    fn typed_char_only_for_single_printable_keys() {
        assert_eq!(KeyEvent::new("7").typed_char(), Some('7'));
        assert_eq!(KeyEvent::new("-").typed_char(), Some('-'));
        assert_eq!(KeyEvent::new(names::BACKSPACE).typed_char(), None);
        assert_eq!(KeyEvent::new("F1").typed_char(), None);
        assert_eq!(KeyEvent::new("c").with_meta().typed_char(), None);
        assert_eq!(KeyEvent::new("\u{8}").typed_char(), None);
    }
}
