//! Field behaviors: how a numeric field reacts to host events.
//!
//! A behavior is a set of pure transitions over [`NumericFieldState`]. Each
//! transition hands back the new state together with the [`Effects`] the
//! host has to carry out (suppress the keystroke, write a value, notify
//! listeners). Keeping the side effects as data lets the field, the store
//! and the tests share one implementation.
//!
//! # Design Principles
//!
//! - Transitions never touch a sink or a listener themselves
//! - Offsets in the state are byte offsets on character boundaries
//! - A behavior is object-safe so a field can pick one at runtime from
//!   configuration

use serde::Deserialize;

use crate::codec::NumberCodec;
use crate::controller::LiveEditController;
use crate::filter::{KeyVerdict, filter_key};
use crate::key::KeyEvent;
use crate::state::NumericFieldState;

/// A reformat result on its way to the value sink.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueWrite {
    pub parsed: Option<f64>,
    pub formatted: Option<String>,
}

impl ValueWrite {
    /// The "could not parse" write: clears the destination.
    pub fn cleared() -> Self {
        Self {
            parsed: None,
            formatted: None,
        }
    }
}

/// Side effects requested by a transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    /// Suppress the host's default handling of the keystroke.
    pub prevent_default: bool,
    /// Route a reformat result to the sink.
    pub write: Option<ValueWrite>,
    /// Notify value-change listeners with this value.
    pub emit: Option<Option<f64>>,
}

impl Effects {
    /// Only suppress the keystroke.
    pub fn prevented() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.prevent_default && self.write.is_none() && self.emit.is_none()
    }
}

/// New state plus the effects the host must apply.
pub type Transition = (NumericFieldState, Effects);

/// Event handling for one numeric field.
pub trait NumericBehavior: std::fmt::Debug {
    fn codec(&self) -> &NumberCodec;

    // =========================================================================
    // Pure conversions
    // =========================================================================

    #[inline]
    fn filter_key(&self, event: &KeyEvent) -> KeyVerdict {
        filter_key(event)
    }

    #[inline]
    fn format(&self, value: Option<f64>) -> Option<String> {
        self.codec().format(value)
    }

    #[inline]
    fn parse(&self, text: Option<&str>) -> Option<f64> {
        self.codec().parse(text)
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// A keystroke, before the host applies it.
    fn key_down(&self, state: NumericFieldState, event: &KeyEvent) -> Transition;

    /// The host changed the text; `state` carries the new text and caret.
    fn content_changed(&self, state: NumericFieldState) -> Transition;

    /// Commit request (focus loss or the bound control's own value changed).
    /// Ignored while the field still has focus.
    fn commit(&self, state: NumericFieldState, focused: bool) -> Transition;

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The field was bound; normalize whatever text it started with.
    fn attach(&self, state: NumericFieldState) -> Transition;

    /// A value assigned from outside: show its formatted text.
    fn assign_value(&self, state: NumericFieldState, value: Option<f64>) -> Transition;
}

/// Key filtering only. Text is never rewritten; commits report the parsed
/// value of whatever the user typed.
#[derive(Clone, Debug)]
pub struct FilterOnly {
    codec: NumberCodec,
}

impl FilterOnly {
    pub fn new(codec: NumberCodec) -> Self {
        Self { codec }
    }
}

impl NumericBehavior for FilterOnly {
    fn codec(&self) -> &NumberCodec {
        &self.codec
    }

    fn key_down(&self, mut state: NumericFieldState, event: &KeyEvent) -> Transition {
        match event.selection {
            Some(selection) => state.select(selection),
            None => state.clamp_selection(),
        }
        if self.filter_key(event).is_admit() {
            (state, Effects::default())
        } else {
            (state, Effects::prevented())
        }
    }

    fn content_changed(&self, mut state: NumericFieldState) -> Transition {
        state.parsed = self.parse(Some(&state.text));
        state.clamp_selection();
        (state, Effects::default())
    }

    fn commit(&self, mut state: NumericFieldState, focused: bool) -> Transition {
        if focused {
            return (state, Effects::default());
        }
        state.parsed = self.parse(Some(&state.text));
        let emit = Some(state.parsed);
        (
            state,
            Effects {
                emit,
                ..Effects::default()
            },
        )
    }

    fn attach(&self, mut state: NumericFieldState) -> Transition {
        state.parsed = self.parse(Some(&state.text));
        (state, Effects::default())
    }

    fn assign_value(&self, mut state: NumericFieldState, value: Option<f64>) -> Transition {
        let formatted = self.format(value);
        state.text = formatted.clone().unwrap_or_default();
        state.parsed = value.and_then(|v| self.codec.round(v));
        state.set_caret(state.text.len());
        let write = ValueWrite {
            parsed: state.parsed,
            formatted,
        };
        (
            state,
            Effects {
                write: Some(write),
                ..Effects::default()
            },
        )
    }
}

/// Which behavior a configured field gets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BehaviorKind {
    /// Reformat while typing.
    #[default]
    Live,
    /// Filter keys, leave the text alone.
    FilterOnly,
}

impl BehaviorKind {
    pub fn build(self, codec: NumberCodec) -> Box<dyn NumericBehavior> {
        match self {
            BehaviorKind::Live => Box::new(LiveEditController::new(codec)),
            BehaviorKind::FilterOnly => Box::new(FilterOnly::new(codec)),
        }
    }
}
