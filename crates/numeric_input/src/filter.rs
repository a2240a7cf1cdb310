//! Keystroke allow-list.
//!
//! The filter is stateless: it only answers whether a key may reach the
//! field. Rejected keys must have their default text insertion suppressed
//! by the host.

use crate::key::{KeyEvent, names};

/// Navigation and editing keys that always pass.
pub const NAVIGATION_KEYS: [&str; 13] = [
    names::BACKSPACE,
    names::DELETE,
    names::TAB,
    names::ESCAPE,
    names::ENTER,
    names::HOME,
    names::END,
    names::ARROW_LEFT,
    names::ARROW_RIGHT,
    names::CLEAR,
    names::COPY,
    names::PASTE,
    names::MINUS,
];

/// Letters that pass when combined with control or command
/// (select-all, copy, paste, cut, undo).
pub const ACTION_KEYS: [&str; 5] = ["a", "c", "v", "x", "z"];

/// Function keys. Matching is case-sensitive.
pub const FUNCTION_KEYS: [&str; 12] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyVerdict {
    Admit,
    Reject,
}

impl KeyVerdict {
    #[inline]
    pub fn is_admit(self) -> bool {
        matches!(self, KeyVerdict::Admit)
    }
}

/// Decide whether `event` may reach the field.
///
/// ```
/// use numeric_input::{KeyEvent, KeyVerdict, filter_key};
///
/// assert_eq!(filter_key(&KeyEvent::new("5")), KeyVerdict::Admit);
/// assert_eq!(filter_key(&KeyEvent::new("c").with_ctrl()), KeyVerdict::Admit);
/// assert_eq!(filter_key(&KeyEvent::new("c")), KeyVerdict::Reject);
/// ```
pub fn filter_key(event: &KeyEvent) -> KeyVerdict {
    if is_number_key(event)
        || is_navigation_key(event)
        || is_action_key(event)
        || is_function_key(event)
        || event.is(names::MINUS)
    {
        KeyVerdict::Admit
    } else {
        KeyVerdict::Reject
    }
}

fn is_number_key(event: &KeyEvent) -> bool {
    event
        .key
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite())
}

fn is_navigation_key(event: &KeyEvent) -> bool {
    NAVIGATION_KEYS.contains(&event.key.as_str())
}

// Caps lock reports the upper-case letter for the same shortcut.
fn is_action_key(event: &KeyEvent) -> bool {
    event.has_command_modifier()
        && ACTION_KEYS
            .iter()
            .any(|k| k.eq_ignore_ascii_case(&event.key))
}

fn is_function_key(event: &KeyEvent) -> bool {
    FUNCTION_KEYS.contains(&event.key.as_str())
}
