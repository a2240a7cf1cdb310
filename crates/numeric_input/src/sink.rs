//! Destinations for reformatted values.
//!
//! Every reformat produces a `(parsed, formatted)` pair. Where it lands
//! depends on what the field is bound to, decided once by
//! [`ValueSink::target`] and routed by [`write_value`].

use serde::Deserialize;

use crate::listeners::{ListenerId, Listeners};

/// The three kinds of field a value can be written to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkTarget {
    /// Read-only cell: only the display content changes.
    DisplayCell,
    /// Field bound to a form control with its own value and display channel.
    BoundControl,
    /// Plain field without a control: the text is the content.
    #[default]
    PlainField,
}

/// Receiver of reformatted values.
///
/// Only the methods matching [`target`](ValueSink::target) are ever called.
pub trait ValueSink {
    fn target(&self) -> SinkTarget;

    /// Display cell content.
    fn set_cell_content(&mut self, _text: &str) {}

    /// Canonical control value. Must not notify the control's own
    /// subscribers, or the field would reformat itself in a loop.
    fn set_control_value(&mut self, _value: Option<f64>) {}

    /// The control's display channel.
    fn write_control_display(&mut self, _text: &str) {}

    /// Plain field content.
    fn set_field_text(&mut self, _text: &str) {}

    /// The bound control's current value. `None` for sinks without a
    /// control of their own.
    fn control_value(&self) -> Option<Option<f64>> {
        None
    }
}

/// Route one reformat result to exactly one destination.
///
/// An unparsable result arrives as `formatted == None` and is written as
/// empty text.
pub fn write_value<S: ValueSink + ?Sized>(sink: &mut S, parsed: Option<f64>, formatted: Option<&str>) {
    let text = formatted.unwrap_or("");
    match sink.target() {
        SinkTarget::DisplayCell => sink.set_cell_content(text),
        SinkTarget::BoundControl => {
            sink.set_control_value(parsed);
            sink.write_control_display(text);
        }
        SinkTarget::PlainField => sink.set_field_text(text),
    }
}

/// Content of a plain field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlainField {
    pub text: String,
}

impl ValueSink for PlainField {
    fn target(&self) -> SinkTarget {
        SinkTarget::PlainField
    }

    fn set_field_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }
}

/// A read-only table cell showing a formatted number.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayCell {
    pub content: String,
}

impl ValueSink for DisplayCell {
    fn target(&self) -> SinkTarget {
        SinkTarget::DisplayCell
    }

    fn set_cell_content(&mut self, text: &str) {
        text.clone_into(&mut self.content);
    }
}

/// Whether a control value assignment notifies subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emit {
    Notify,
    Silent,
}

/// A form control holding a canonical value and a display string.
///
/// Subscribers hear about value changes made with [`Emit::Notify`]; writes
/// coming from the field itself are silent.
#[derive(Debug, Default)]
pub struct BoundControl {
    value: Option<f64>,
    display: String,
    subscribers: Listeners<Option<f64>>,
}

impl BoundControl {
    pub fn new(value: Option<f64>) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn set_value(&mut self, value: Option<f64>, emit: Emit) {
        self.value = value;
        if emit == Emit::Notify {
            self.subscribers.notify(&value);
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&Option<f64>) + 'static) -> ListenerId {
        self.subscribers.add(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.subscribers.remove(id)
    }
}

impl ValueSink for BoundControl {
    fn target(&self) -> SinkTarget {
        SinkTarget::BoundControl
    }

    fn set_control_value(&mut self, value: Option<f64>) {
        self.set_value(value, Emit::Silent);
    }

    fn write_control_display(&mut self, text: &str) {
        text.clone_into(&mut self.display);
    }

    fn control_value(&self) -> Option<Option<f64>> {
        Some(self.value)
    }
}
