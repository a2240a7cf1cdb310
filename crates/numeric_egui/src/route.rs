//! Translation of egui input events into numeric field keystrokes.

use egui::{Event, Key, Modifiers};
use log::trace;
use numeric_input::{FieldId, KeyEvent, NumericFieldStore, ValueSink, names};

/// What a single egui event means to a numeric field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Key(KeyEvent),
    Paste(String),
}

/// Result of routing one frame's events to a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Events that reached the field.
    pub routed: usize,
    /// Keys the field asked the host to suppress.
    pub suppressed: usize,
    /// `true` if the field text differs from before routing.
    pub text_changed: bool,
}

/// Translate one egui event.
///
/// Printable input arrives as [`Event::Text`] and becomes one key per
/// character. [`Event::Key`] is only translated for keys with no text of
/// their own and for command shortcuts, so a typed digit is never seen twice.
/// egui reports cut and copy as their own events; they become the matching
/// command shortcut. Filling the clipboard stays with the host.
pub fn translate_event(event: &Event) -> Vec<HostEvent> {
    match event {
        Event::Cut => vec![HostEvent::Key(KeyEvent::new("x").with_ctrl())],
        Event::Copy => vec![HostEvent::Key(KeyEvent::new("c").with_ctrl())],
        Event::Text(t) => t
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| HostEvent::Key(KeyEvent::new(c.to_string())))
            .collect(),
        Event::Paste(s) => vec![HostEvent::Paste(s.clone())],
        Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => translate_key(*key, *modifiers)
            .map(HostEvent::Key)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Route a frame's events to the field `id`. Does nothing if the store does
/// not know the field.
pub fn route_events<S: ValueSink>(
    store: &mut NumericFieldStore<S>,
    id: FieldId,
    events: &[Event],
) -> RouteOutcome {
    let mut outcome = RouteOutcome::default();
    let Some(before) = store.text(id).map(str::to_owned) else {
        return outcome;
    };

    for evt in events {
        for host in translate_event(evt) {
            outcome.routed += 1;
            match host {
                HostEvent::Key(key) => {
                    if store.press(id, &key) {
                        trace!("suppressed {:?} on {id:?}", key.key);
                        outcome.suppressed += 1;
                    }
                }
                HostEvent::Paste(s) => store.paste(id, &s),
            }
        }
    }

    outcome.text_changed = store.text(id).is_some_and(|now| now != before);
    outcome
}

/// Bring the store's focus in line with the widget's. Losing focus commits.
pub fn sync_focus<S: ValueSink>(store: &mut NumericFieldStore<S>, id: FieldId, has_focus: bool) {
    match (has_focus, store.is_focused(id)) {
        (true, false) => store.focus(id),
        (false, true) => store.blur(id),
        _ => {}
    }
}

// --- Internal helper functions ---

fn translate_key(key: Key, modifiers: Modifiers) -> Option<KeyEvent> {
    let name = match key {
        Key::Backspace => names::BACKSPACE,
        Key::Delete => names::DELETE,
        Key::Tab => names::TAB,
        Key::Escape => names::ESCAPE,
        Key::Enter => names::ENTER,
        Key::Home => names::HOME,
        Key::End => names::END,
        Key::ArrowLeft => names::ARROW_LEFT,
        Key::ArrowRight => names::ARROW_RIGHT,
        Key::A if modifiers.command || modifiers.ctrl => "a",
        Key::C if modifiers.command || modifiers.ctrl => "c",
        Key::V if modifiers.command || modifiers.ctrl => "v",
        Key::X if modifiers.command || modifiers.ctrl => "x",
        Key::Z if modifiers.command || modifiers.ctrl => "z",
        _ => function_key_name(key)?,
    };

    let mut event = KeyEvent::new(name);
    event.meta = modifiers.mac_cmd;
    event.ctrl = modifiers.ctrl || (modifiers.command && !modifiers.mac_cmd);
    Some(event)
}

fn function_key_name(key: Key) -> Option<&'static str> {
    Some(match key {
        Key::F1 => "F1",
        Key::F2 => "F2",
        Key::F3 => "F3",
        Key::F4 => "F4",
        Key::F5 => "F5",
        Key::F6 => "F6",
        Key::F7 => "F7",
        Key::F8 => "F8",
        Key::F9 => "F9",
        Key::F10 => "F10",
        Key::F11 => "F11",
        Key::F12 => "F12",
        _ => return None,
    })
}
