//! A numeric field bound to a value sink.
//!
//! [`NumericField`] runs a [`NumericBehavior`] against its own state, routes
//! the resulting writes to the sink and notifies value-change listeners.
//! Hosts either drive it step by step ([`key_down`](NumericField::key_down)
//! followed by their own editing and [`input`](NumericField::input)) or
//! let it perform the default editing too ([`press`](NumericField::press)).

use log::debug;

use crate::behavior::{Effects, NumericBehavior};
use crate::codec::NumberCodec;
use crate::config::{ConfigError, FieldConfig};
use crate::edit;
use crate::key::KeyEvent;
use crate::listeners::{ListenerId, Listeners};
use crate::selection::SelectionRange;
use crate::sink::{PlainField, ValueSink, write_value};
use crate::state::NumericFieldState;
use crate::text::filter_single_line;

pub struct NumericField<S: ValueSink = PlainField> {
    state: NumericFieldState,
    behavior: Box<dyn NumericBehavior>,
    sink: S,
    listeners: Listeners<Option<f64>>,
}

impl<S: ValueSink> NumericField<S> {
    /// Build a field from configuration. The field starts empty; call
    /// [`attach`](Self::attach) to give it its initial text.
    pub fn from_config(config: &FieldConfig, sink: S) -> Result<Self, ConfigError> {
        let codec = config.codec()?;
        Ok(Self::new(config.behavior.build(codec), sink))
    }

    pub fn new(behavior: Box<dyn NumericBehavior>, sink: S) -> Self {
        let state = NumericFieldState::new(behavior.codec().format_spec());
        Self {
            state,
            behavior,
            sink,
            listeners: Listeners::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bind the field with the text it currently shows.
    pub fn attach(&mut self, initial_text: &str) {
        self.state.text = filter_single_line(initial_text).into_owned();
        self.run(|b, st| b.attach(st));
        self.state.set_caret(self.state.text.len());
    }

    /// Focus left the field (`focused == false`), or the bound control's
    /// value changed. Nothing happens while the field is focused.
    pub fn commit(&mut self, focused: bool) {
        self.run(|b, st| b.commit(st, focused));
    }

    #[inline]
    pub fn blur(&mut self) {
        self.commit(false);
    }

    /// Assign a value from outside.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.run(|b, st| b.assign_value(st, value));
    }

    /// The bound control's value was changed by someone other than this
    /// field. The control's value is shown in the field and then committed.
    /// Sinks without a control only commit.
    pub fn control_changed(&mut self, focused: bool) {
        if let Some(value) = self.sink.control_value() {
            debug!("control changed to {value:?}");
            self.set_value(value);
        }
        self.commit(focused);
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Keystroke before the host applies it. Returns `true` if the host must
    /// suppress its default handling.
    pub fn key_down(&mut self, event: &KeyEvent) -> bool {
        self.run(|b, st| b.key_down(st, event)).prevent_default
    }

    /// The host changed the text.
    pub fn input(&mut self, text: &str, selection: SelectionRange) {
        self.state.text = filter_single_line(text).into_owned();
        self.state.select(selection);
        self.run(|b, st| b.content_changed(st));
    }

    /// A complete keystroke: controller, default editing, then the content
    /// change if the text moved. Returns `true` if the key was suppressed.
    pub fn press(&mut self, event: &KeyEvent) -> bool {
        if self.key_down(event) {
            return true;
        }
        if edit::apply_default(&mut self.state, event) {
            self.run(|b, st| b.content_changed(st));
        }
        false
    }

    /// The user moved the caret or selection (click, drag). The controller
    /// does not react to this.
    pub fn select(&mut self, selection: SelectionRange) {
        self.state.select(selection);
    }

    /// Press every character of `s` in turn.
    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.press(&KeyEvent::new(c.to_string()));
        }
    }

    /// Paste text at the caret. Pasting goes through the same key filter as
    /// typing, one character at a time, so a paste cannot smuggle in text a
    /// keystroke could not.
    pub fn paste(&mut self, s: &str) {
        self.type_str(&filter_single_line(s));
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn on_value_change(&mut self, f: impl FnMut(&Option<f64>) + 'static) -> ListenerId {
        self.listeners.add(f)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // =========================================================================
    // Read-Only Getters
    // =========================================================================

    #[inline]
    pub fn text(&self) -> &str {
        &self.state.text
    }

    #[inline]
    pub fn selection(&self) -> SelectionRange {
        self.state.selection
    }

    /// What a copy or cut should put on the clipboard.
    #[inline]
    pub fn selected_text(&self) -> &str {
        self.state.selection.slice(&self.state.text)
    }

    #[inline]
    pub fn caret(&self) -> usize {
        self.state.caret()
    }

    /// Last parsed value.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.state.parsed
    }

    #[inline]
    pub fn state(&self) -> &NumericFieldState {
        &self.state
    }

    #[inline]
    pub fn codec(&self) -> &NumberCodec {
        self.behavior.codec()
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // --- Internal helper functions ---

    fn run<F>(&mut self, transition: F) -> Effects
    where
        F: FnOnce(&dyn NumericBehavior, NumericFieldState) -> (NumericFieldState, Effects),
    {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = transition(self.behavior.as_ref(), state);
        self.state = state;
        self.apply(&effects);
        effects
    }

    fn apply(&mut self, effects: &Effects) {
        if let Some(write) = &effects.write {
            write_value(&mut self.sink, write.parsed, write.formatted.as_deref());
        }
        if let Some(value) = &effects.emit {
            self.listeners.notify(value);
        }
    }
}

impl<S: ValueSink + std::fmt::Debug> std::fmt::Debug for NumericField<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericField")
            .field("state", &self.state)
            .field("behavior", &self.behavior)
            .field("sink", &self.sink)
            .finish()
    }
}
