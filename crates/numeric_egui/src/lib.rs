//! # numeric_egui
//!
//! egui integration for [`numeric_input`]: translates egui input events into
//! numeric field keystrokes and paints a right-aligned field with caret and
//! selection.
//!
//! The field state lives in a [`numeric_input::NumericFieldStore`]; this
//! crate only routes and paints.

mod route;
mod view;

pub use route::{HostEvent, RouteOutcome, route_events, sync_focus, translate_event};
pub use view::NumericFieldView;
