//! Default single-line editing, as a host text field performs it.
//!
//! The controller runs around these edits: it sees a keystroke before the
//! host mutates the text and the content change after. Hosts that draw their
//! own fields (and the tests) use these functions as the mutation step.
//! Each editing function returns `true` if the text changed.

use crate::key::{KeyEvent, names};
use crate::selection::SelectionRange;
use crate::state::NumericFieldState;
use crate::text::{clamp_to_char_boundary, filter_single_line, next_cursor_boundary, prev_cursor_boundary};

/// Insert text at the caret, replacing any selection. Newlines are dropped.
pub fn insert_text(st: &mut NumericFieldState, s: &str) -> bool {
    st.clamp_selection();
    let s = filter_single_line(s);
    if s.is_empty() {
        return false;
    }

    delete_selection_if_any(st);

    let caret = clamp_to_char_boundary(&st.text, st.caret());
    st.text.insert_str(caret, &s);
    st.set_caret(caret + s.len());
    true
}

/// Delete the character before the caret, or the selection.
pub fn backspace(st: &mut NumericFieldState) -> bool {
    st.clamp_selection();
    if delete_selection_if_any(st) {
        return true;
    }

    let caret = st.caret();
    if caret == 0 {
        return false;
    }

    let prev = prev_cursor_boundary(&st.text, caret);
    st.text.drain(prev..caret);
    st.set_caret(prev);
    true
}

/// Delete the character after the caret, or the selection.
pub fn delete(st: &mut NumericFieldState) -> bool {
    st.clamp_selection();
    if delete_selection_if_any(st) {
        return true;
    }

    let caret = st.caret();
    if caret >= st.text.len() {
        return false;
    }

    let next = next_cursor_boundary(&st.text, caret);
    st.text.drain(caret..next);
    st.set_caret(caret);
    true
}

pub fn move_caret_left(st: &mut NumericFieldState) {
    st.clamp_selection();
    let target = if st.selection.is_caret() {
        prev_cursor_boundary(&st.text, st.caret())
    } else {
        st.selection.start
    };
    st.set_caret(target);
}

pub fn move_caret_right(st: &mut NumericFieldState) {
    st.clamp_selection();
    let target = if st.selection.is_caret() {
        next_cursor_boundary(&st.text, st.caret())
    } else {
        st.selection.end
    };
    st.set_caret(target);
}

pub fn move_caret_to_start(st: &mut NumericFieldState) {
    st.set_caret(0);
}

pub fn move_caret_to_end(st: &mut NumericFieldState) {
    st.set_caret(st.text.len());
}

pub fn select_all(st: &mut NumericFieldState) {
    st.selection = SelectionRange::new(0, st.text.len());
}

/// Perform the host's default action for `event`.
///
/// Only keys that reach this point (not suppressed) are applied. Of the
/// shortcuts, select-all selects and cut removes the selection; copying
/// to and pasting from the clipboard is the host's job.
pub fn apply_default(st: &mut NumericFieldState, event: &KeyEvent) -> bool {
    if event.has_command_modifier() {
        if event.key.eq_ignore_ascii_case("a") {
            select_all(st);
        } else if event.key.eq_ignore_ascii_case("x") {
            return delete_selection_if_any(st);
        }
        return false;
    }

    match event.key.as_str() {
        names::BACKSPACE => backspace(st),
        names::DELETE => delete(st),
        names::ARROW_LEFT => {
            move_caret_left(st);
            false
        }
        names::ARROW_RIGHT => {
            move_caret_right(st);
            false
        }
        names::HOME => {
            move_caret_to_start(st);
            false
        }
        names::END => {
            move_caret_to_end(st);
            false
        }
        _ => match event.typed_char() {
            Some(c) => {
                let mut buf = [0u8; 4];
                insert_text(st, c.encode_utf8(&mut buf))
            }
            None => false,
        },
    }
}

// --- Internal helper functions ---

fn delete_selection_if_any(st: &mut NumericFieldState) -> bool {
    if st.selection.is_caret() {
        return false;
    }

    let sel = st.selection.clamped_to(&st.text);
    st.text.drain(sel.start..sel.end);
    st.set_caret(sel.start);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FormatSpec;

    fn field(text: &str, caret: usize) -> NumericFieldState {
        let mut st = NumericFieldState::new(FormatSpec::default()).with_text(text);
        st.set_caret(caret);
        st
    }

    #[test]
    fn insert_replaces_selection() {
        let mut st = field("12,34", 0);
        st.select(SelectionRange::new(0, 2));
        assert!(insert_text(&mut st, "7"));
        assert_eq!(st.text, "7,34");
        assert_eq!(st.caret(), 1);
    }

    #[test]
    fn cut_removes_only_a_selection() {
        let mut st = field("12,34", 2);
        let cut = KeyEvent::new("x").with_ctrl();
        assert!(!apply_default(&mut st, &cut));
        assert_eq!(st.text, "12,34");

        st.select(SelectionRange::new(3, 5));
        assert!(apply_default(&mut st, &KeyEvent::new("X").with_meta()));
        assert_eq!(st.text, "12,");
        assert_eq!(st.caret(), 3);

        st.select(SelectionRange::new(0, 1));
        assert!(!apply_default(&mut st, &KeyEvent::new("c").with_ctrl()));
        assert_eq!(st.text, "12,");
    }

    #[test]
    fn insert_strips_newlines() {
        let mut st = field("", 0);
        assert!(!insert_text(&mut st, "\r\n"));
        assert!(insert_text(&mut st, "1\n2"));
        assert_eq!(st.text, "12");
    }

    #[test]
    fn backspace_and_delete_at_edges() {
        let mut st = field("12", 0);
        assert!(!backspace(&mut st));
        assert!(delete(&mut st));
        assert_eq!(st.text, "2");

        st.set_caret(1);
        assert!(!delete(&mut st));
        assert!(backspace(&mut st));
        assert_eq!(st.text, "");
    }

    #[test]
    fn backspace_removes_whole_multibyte_separator() {
        let mut st = field("1\u{202f}234", 4);
        assert!(backspace(&mut st));
        assert_eq!(st.text, "1234");
        assert_eq!(st.caret(), 1);
    }

    #[test]
    fn arrows_collapse_selection_to_its_edge() {
        let mut st = field("12,34", 0);
        st.select(SelectionRange::new(1, 3));
        move_caret_left(&mut st);
        assert_eq!(st.caret(), 1);

        st.select(SelectionRange::new(1, 3));
        move_caret_right(&mut st);
        assert_eq!(st.caret(), 3);

        move_caret_to_end(&mut st);
        assert_eq!(st.caret(), 5);
        move_caret_to_start(&mut st);
        assert_eq!(st.caret(), 0);
    }

    #[test]
    fn default_actions_by_key() {
        let mut st = field("12", 2);
        assert!(apply_default(&mut st, &KeyEvent::new("5")));
        assert_eq!(st.text, "125");

        assert!(!apply_default(&mut st, &KeyEvent::new("a").with_ctrl()));
        assert_eq!(st.selection, SelectionRange::new(0, 3));

        assert!(apply_default(&mut st, &KeyEvent::new(names::DELETE)));
        assert_eq!(st.text, "");

        assert!(!apply_default(&mut st, &KeyEvent::new(names::TAB)));
        assert!(!apply_default(&mut st, &KeyEvent::new("F5")));
    }
}
