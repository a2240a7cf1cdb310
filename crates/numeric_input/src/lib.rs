//! # numeric_input
//!
//! UI-agnostic numeric text-input layer: locale-aware formatting, keystroke
//! filtering and live reformatting with caret preservation.
//!
//! This crate provides the building blocks for a numeric field:
//! - [`filter_key`]: stateless keystroke allow-list
//! - [`NumberCodec`]: canonical value ⇄ fixed-decimals display text
//! - [`LiveEditController`]: reformat-as-you-type state machine
//! - [`NumericField`]: a field bound to a [`ValueSink`], with listeners
//! - [`NumericFieldStore`]: many fields keyed by [`FieldId`], with focus
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on:
//! - Any graphics framework (egui, wgpu, etc.)
//! - Layout or hit-testing systems
//! - Platform-specific APIs
//!
//! Behaviors are pure transitions over [`NumericFieldState`] returning the
//! effects to apply, so every keystroke scenario can be tested without a
//! host.
//!
//! ## Integration
//!
//! A host reports each keystroke to [`NumericField::key_down`] and suppresses
//! its default handling when asked, applies its own editing, then reports
//! the new text through [`NumericField::input`]. Hosts without an editing
//! model of their own use [`NumericField::press`].
//!
//! ```
//! use numeric_input::{FieldConfig, NumericField, PlainField};
//!
//! let mut field = NumericField::from_config(&FieldConfig::default(), PlainField::default()).unwrap();
//! field.attach("");
//! field.type_str("12345,6");
//! assert_eq!(field.text(), "12.345,60");
//! assert_eq!(field.value(), Some(12345.6));
//! ```

mod behavior;
mod codec;
mod config;
mod controller;
mod decimal;
pub mod edit;
mod field;
mod filter;
mod id;
mod key;
mod listeners;
mod locale;
mod script;
mod selection;
mod sink;
mod state;
mod store;
mod text;

pub use behavior::{BehaviorKind, Effects, FilterOnly, NumericBehavior, Transition, ValueWrite};
pub use codec::NumberCodec;
pub use config::{ConfigError, FieldConfig, MAX_DECIMALS};
pub use controller::{LiveEditController, UpdateMode};
pub use decimal::{FixedDecimal, RoundingMode, round_literal, round_value};
pub use field::NumericField;
pub use filter::{ACTION_KEYS, FUNCTION_KEYS, KeyVerdict, NAVIGATION_KEYS, filter_key};
pub use id::FieldId;
pub use key::{KeyEvent, names};
pub use listeners::{ListenerId, Listeners};
pub use locale::{
    DEFAULT_LOCALE, FormatSpec, LocaleConventions, LocaleFormatter, NumberFormatter,
    lookup_locale, supported_locales,
};
pub use script::{Frame, Script, Step, replay};
pub use selection::SelectionRange;
pub use sink::{BoundControl, DisplayCell, Emit, PlainField, SinkTarget, ValueSink, write_value};
pub use state::NumericFieldState;
pub use store::NumericFieldStore;

// Re-export text utilities for integration layers that keep their own
// caret bookkeeping.
pub use text::{
    char_at, char_before, clamp_to_char_boundary, filter_single_line, next_cursor_boundary,
    prev_cursor_boundary, strip_whitespace, take_chars,
};
