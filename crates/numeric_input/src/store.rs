//! Central store for numeric fields and focus.
//!
//! This store is UI-agnostic: it does not perform layout or text measurement.
//! Integration layers translate their own widget identifiers into
//! [`FieldId`]s and route keystrokes, content changes and focus changes
//! through here. Focus is tracked in one place so a commit can always be
//! checked against it.

use std::collections::HashMap;

use log::debug;

use crate::field::NumericField;
use crate::id::FieldId;
use crate::key::KeyEvent;
use crate::listeners::ListenerId;
use crate::selection::SelectionRange;
use crate::sink::{PlainField, ValueSink};

/// Central store for numeric field state.
///
/// # Example
///
/// ```
/// use numeric_input::{FieldConfig, FieldId, KeyEvent, NumericField, NumericFieldStore, PlainField};
///
/// let mut store = NumericFieldStore::new();
/// let id = FieldId::from_raw(1);
/// let field = NumericField::from_config(&FieldConfig::default(), PlainField::default()).unwrap();
///
/// store.attach(id, field, "1234,5");
/// assert_eq!(store.text(id), Some("1234,50"));
///
/// store.focus(id);
/// store.press(id, &KeyEvent::new("Home"));
/// store.type_str(id, "9");
/// store.blur(id);
/// assert_eq!(store.text(id), Some("91.234,50"));
/// assert_eq!(store.value(id), Some(91234.5));
/// ```
#[derive(Debug)]
pub struct NumericFieldStore<S: ValueSink = PlainField> {
    fields: HashMap<FieldId, NumericField<S>>,
    focused: Option<FieldId>,
}

impl<S: ValueSink> Default for NumericFieldStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ValueSink> NumericFieldStore<S> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            focused: None,
        }
    }

    // =========================================================================
    // Initialization & Lifecycle
    // =========================================================================

    /// Register a field and bind it with its initial text. An existing field
    /// under the same id is replaced and returned.
    pub fn attach(
        &mut self,
        id: FieldId,
        mut field: NumericField<S>,
        initial_text: &str,
    ) -> Option<NumericField<S>> {
        field.attach(initial_text);
        debug!("{id} attached");
        self.fields.insert(id, field)
    }

    /// Remove a field. Focus is dropped without a commit.
    pub fn detach(&mut self, id: FieldId) -> Option<NumericField<S>> {
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.fields.remove(&id)
    }

    /// Returns `true` if a field is registered under `id`.
    #[inline]
    pub fn has(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Move focus to `id`. The previously focused field, if different, loses
    /// focus and commits.
    pub fn focus(&mut self, id: FieldId) {
        if !self.has(id) {
            return;
        }
        if let Some(prev) = self.focused
            && prev != id
        {
            self.blur(prev);
        }
        self.focused = Some(id);
    }

    /// `id` lost focus: commit it.
    pub fn blur(&mut self, id: FieldId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.commit(id);
    }

    /// Commit `id` unless it currently has focus.
    pub fn commit(&mut self, id: FieldId) {
        let focused = self.is_focused(id);
        if let Some(field) = self.fields.get_mut(&id) {
            field.commit(focused);
        }
    }

    /// The control bound to `id` changed its value on its own. See
    /// [`NumericField::control_changed`].
    pub fn control_changed(&mut self, id: FieldId) {
        let focused = self.is_focused(id);
        if let Some(field) = self.fields.get_mut(&id) {
            field.control_changed(focused);
        }
    }

    #[inline]
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, id: FieldId) -> bool {
        self.focused == Some(id)
    }

    /// Remove all fields.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.focused = None;
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Returns `true` if the host must suppress the keystroke. Unknown ids
    /// suppress nothing.
    pub fn key_down(&mut self, id: FieldId, event: &KeyEvent) -> bool {
        self.fields
            .get_mut(&id)
            .is_some_and(|f| f.key_down(event))
    }

    pub fn input(&mut self, id: FieldId, text: &str, selection: SelectionRange) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.input(text, selection);
        }
    }

    /// Returns `true` if the keystroke was suppressed.
    pub fn press(&mut self, id: FieldId, event: &KeyEvent) -> bool {
        self.fields.get_mut(&id).is_some_and(|f| f.press(event))
    }

    pub fn type_str(&mut self, id: FieldId, s: &str) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.type_str(s);
        }
    }

    pub fn paste(&mut self, id: FieldId, s: &str) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.paste(s);
        }
    }

    pub fn set_value(&mut self, id: FieldId, value: Option<f64>) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.set_value(value);
        }
    }

    pub fn on_value_change(
        &mut self,
        id: FieldId,
        f: impl FnMut(&Option<f64>) + 'static,
    ) -> Option<ListenerId> {
        self.fields.get_mut(&id).map(|field| field.on_value_change(f))
    }

    // =========================================================================
    // Read-Only Getters
    // =========================================================================

    #[inline]
    pub fn get(&self, id: FieldId) -> Option<&NumericField<S>> {
        self.fields.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut NumericField<S>> {
        self.fields.get_mut(&id)
    }

    pub fn text(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(|f| f.text())
    }

    pub fn caret(&self, id: FieldId) -> Option<usize> {
        self.fields.get(&id).map(|f| f.caret())
    }

    pub fn value(&self, id: FieldId) -> Option<f64> {
        self.fields.get(&id).and_then(|f| f.value())
    }

    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
