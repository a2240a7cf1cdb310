//! Keystroke scripts: a field configuration, its initial text and a list of
//! host events, replayed against a [`NumericField`].
//!
//! Scripts are TOML documents:
//!
//! ```toml
//! initial = "1234,00"
//!
//! [field]
//! decimals = 2
//! locale = "es-ES"
//!
//! [[steps]]
//! op = "caret"
//! at = 2
//!
//! [[steps]]
//! op = "key"
//! key = ","
//! ```
//!
//! Replaying records one [`Frame`] per step.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::config::{ConfigError, FieldConfig};
use crate::field::NumericField;
use crate::key::KeyEvent;
use crate::selection::SelectionRange;
use crate::sink::{BoundControl, DisplayCell, PlainField, SinkTarget, ValueSink};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Script {
    pub field: FieldConfig,
    pub initial: String,
    /// Whether the field starts focused.
    pub focused: bool,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    /// Press each character in turn.
    Type { text: String },
    /// Press one named key.
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    /// Move the caret.
    Caret { at: usize },
    /// Select a range.
    Select { start: usize, end: usize },
    /// The host replaced the text itself.
    Input { text: String, caret: usize },
    Paste { text: String },
    Focus,
    Blur,
    /// Commit without changing focus.
    Commit,
    /// Assign a value from outside; no `value` clears the field.
    SetValue { value: Option<f64> },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Type { text } => write!(f, "type {text:?}"),
            Step::Key { key, ctrl, meta } => {
                f.write_str("key ")?;
                if *ctrl {
                    f.write_str("ctrl+")?;
                }
                if *meta {
                    f.write_str("meta+")?;
                }
                write!(f, "{key:?}")
            }
            Step::Caret { at } => write!(f, "caret {at}"),
            Step::Select { start, end } => write!(f, "select {start}..{end}"),
            Step::Input { text, caret } => write!(f, "input {text:?} @{caret}"),
            Step::Paste { text } => write!(f, "paste {text:?}"),
            Step::Focus => f.write_str("focus"),
            Step::Blur => f.write_str("blur"),
            Step::Commit => f.write_str("commit"),
            Step::SetValue { value } => write!(f, "set-value {value:?}"),
        }
    }
}

impl Script {
    /// Parse a script and validate its field configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let script: Script = toml::from_str(s)?;
        script.field.validate()?;
        Ok(script)
    }
}

/// Field state after one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub step: String,
    pub text: String,
    pub selection: SelectionRange,
    pub value: Option<f64>,
    /// What the sink shows.
    pub sink: String,
    /// Values emitted during this step.
    pub emitted: Vec<Option<f64>>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24} {:<16} ", self.step, format!("{:?}", self.text))?;
        if self.selection.is_caret() {
            write!(f, "caret={:<3}", self.selection.start)?;
        } else {
            write!(f, "sel={}..{}", self.selection.start, self.selection.end)?;
        }
        write!(f, " value={:?} sink={:?}", self.value, self.sink)?;
        if !self.emitted.is_empty() {
            write!(f, " emitted={:?}", self.emitted)?;
        }
        Ok(())
    }
}

/// Replay `script`. The first frame is the state right after attach.
pub fn replay(script: &Script) -> Result<Vec<Frame>, ConfigError> {
    let sink = ReplaySink::for_target(script.field.sink);
    let mut field = NumericField::from_config(&script.field, sink)?;

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let log = emitted.clone();
    field.on_value_change(move |v| log.borrow_mut().push(*v));

    field.attach(&script.initial);
    let mut focused = script.focused;
    let mut frames = vec![snapshot("attach", &field, &emitted)];

    for step in &script.steps {
        match step {
            Step::Type { text } => field.type_str(text),
            Step::Key { key, ctrl, meta } => {
                let mut event = KeyEvent::new(key.as_str());
                event.ctrl = *ctrl;
                event.meta = *meta;
                field.press(&event);
            }
            Step::Caret { at } => field.select(SelectionRange::caret(*at)),
            Step::Select { start, end } => field.select(SelectionRange::new(*start, *end)),
            Step::Input { text, caret } => field.input(text, SelectionRange::caret(*caret)),
            Step::Paste { text } => field.paste(text),
            Step::Focus => focused = true,
            Step::Blur => {
                focused = false;
                field.blur();
            }
            Step::Commit => field.commit(focused),
            Step::SetValue { value } => field.set_value(*value),
        }
        frames.push(snapshot(&step.to_string(), &field, &emitted));
    }

    Ok(frames)
}

fn snapshot(
    step: &str,
    field: &NumericField<ReplaySink>,
    emitted: &RefCell<Vec<Option<f64>>>,
) -> Frame {
    Frame {
        step: step.to_string(),
        text: field.text().to_string(),
        selection: field.selection(),
        value: field.value(),
        sink: field.sink().shown(),
        emitted: std::mem::take(&mut *emitted.borrow_mut()),
    }
}

/// One of the three sink kinds, picked from configuration.
#[derive(Debug)]
enum ReplaySink {
    Plain(PlainField),
    Cell(DisplayCell),
    Control(BoundControl),
}

impl ReplaySink {
    fn for_target(target: SinkTarget) -> Self {
        match target {
            SinkTarget::PlainField => ReplaySink::Plain(PlainField::default()),
            SinkTarget::DisplayCell => ReplaySink::Cell(DisplayCell::default()),
            SinkTarget::BoundControl => ReplaySink::Control(BoundControl::default()),
        }
    }

    fn shown(&self) -> String {
        match self {
            ReplaySink::Plain(p) => p.text.clone(),
            ReplaySink::Cell(c) => c.content.clone(),
            ReplaySink::Control(c) => format!("{} ({:?})", c.display(), c.value()),
        }
    }

    fn inner(&mut self) -> &mut dyn ValueSink {
        match self {
            ReplaySink::Plain(p) => p,
            ReplaySink::Cell(c) => c,
            ReplaySink::Control(c) => c,
        }
    }
}

impl ValueSink for ReplaySink {
    fn target(&self) -> SinkTarget {
        match self {
            ReplaySink::Plain(_) => SinkTarget::PlainField,
            ReplaySink::Cell(_) => SinkTarget::DisplayCell,
            ReplaySink::Control(_) => SinkTarget::BoundControl,
        }
    }

    fn set_cell_content(&mut self, text: &str) {
        self.inner().set_cell_content(text);
    }

    fn set_control_value(&mut self, value: Option<f64>) {
        self.inner().set_control_value(value);
    }

    fn write_control_display(&mut self, text: &str) {
        self.inner().write_control_display(text);
    }

    fn set_field_text(&mut self, text: &str) {
        self.inner().set_field_text(text);
    }

    fn control_value(&self) -> Option<Option<f64>> {
        match self {
            ReplaySink::Plain(p) => p.control_value(),
            ReplaySink::Cell(c) => c.control_value(),
            ReplaySink::Control(c) => c.control_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEPARATOR_MOVE: &str = r#"
        initial = "1234,00"
        focused = true

        [[steps]]
        op = "caret"
        at = 2

        [[steps]]
        op = "key"
        key = ","

        [[steps]]
        op = "commit"

        [[steps]]
        op = "blur"
    "#;

    #[test]
    fn replays_separator_move() {
        let script = Script::from_toml_str(SEPARATOR_MOVE).unwrap();
        assert_eq!(script.steps.len(), 4);

        let frames = replay(&script).unwrap();
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["1234,00", "1234,00", "12,00", "12,00", "12,00"]);
        assert_eq!(frames[2].selection, SelectionRange::caret(3));
        assert_eq!(frames[2].emitted, vec![Some(12.0)]);
        assert!(frames[3].emitted.is_empty());
        assert_eq!(frames[4].emitted, vec![Some(12.0)]);
        assert_eq!(frames[4].sink, "12,00");
    }

    #[test]
    fn bound_control_sink_shows_value_and_display() {
        let script = Script::from_toml_str(
            r#"
            [field]
            sink = "bound-control"

            [[steps]]
            op = "set-value"
            value = 3.5
            "#,
        )
        .unwrap();
        let frames = replay(&script).unwrap();
        assert_eq!(frames[1].sink, "3,50 (Some(3.5))");
    }

    #[test]
    fn set_value_without_value_clears() {
        let script = Script::from_toml_str(
            r#"
            initial = "5"

            [[steps]]
            op = "set-value"
            "#,
        )
        .unwrap();
        let frames = replay(&script).unwrap();
        assert_eq!(frames[0].text, "5,00");
        assert_eq!(frames[1].text, "");
        assert_eq!(frames[1].value, None);
    }

    #[test]
    fn invalid_scripts_are_rejected() {
        assert!(matches!(
            Script::from_toml_str("[[steps]]\nop = \"jump\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Script::from_toml_str("[field]\nlocale = \"zz\""),
            Err(ConfigError::UnknownLocale { .. })
        ));
    }

    #[test]
    fn frame_display_is_one_line() {
        let step = Step::Key {
            key: "a".to_string(),
            ctrl: true,
            meta: false,
        };
        assert_eq!(step.to_string(), "key ctrl+\"a\"");
        let frame = Frame {
            step: "attach".to_string(),
            text: ",00".to_string(),
            selection: SelectionRange::caret(0),
            value: Some(0.0),
            sink: ",00".to_string(),
            emitted: vec![],
        };
        let line = frame.to_string();
        assert!(!line.contains('\n'));
        assert!(line.contains("caret=0"));
    }
}
