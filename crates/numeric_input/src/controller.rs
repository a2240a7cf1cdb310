//! Live reformatting while the user types.
//!
//! [`LiveEditController`] keeps the field text in canonical form after every
//! keystroke and content change, and keeps the caret where the user expects
//! it even though reformatting inserts and removes characters around it:
//!
//! - A separator key moves the decimal separator to the caret instead of
//!   inserting a second one.
//! - Backspace or delete next to the separator jumps over it so a digit is
//!   removed instead.
//! - Typing past the allowed decimals truncates the decimal part.
//! - Grouping characters added or removed by the reformat shift the caret by
//!   the same amount.

use log::{debug, trace};

use crate::behavior::{Effects, NumericBehavior, Transition, ValueWrite};
use crate::codec::NumberCodec;
use crate::filter::filter_key;
use crate::key::{KeyEvent, names};
use crate::state::NumericFieldState;
use crate::text::{char_at, char_before, next_cursor_boundary, prev_cursor_boundary, take_chars};

/// When the text cannot be parsed, live updates leave it alone; commits
/// clear it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    Live,
    Commit,
}

#[derive(Clone, Debug)]
pub struct LiveEditController {
    codec: NumberCodec,
}

impl LiveEditController {
    pub fn new(codec: NumberCodec) -> Self {
        Self { codec }
    }

    /// Parse the text and replace it with its canonical rendering.
    ///
    /// Returns the new state, the parsed value and the write to route to the
    /// sink, if any. The negative-zero literal (`-,00`) is left alone and
    /// reads as zero, so a minus typed on an empty field survives. A bare
    /// minus expands to that literal.
    pub fn update(
        &self,
        mut state: NumericFieldState,
        mode: UpdateMode,
    ) -> (NumericFieldState, Option<f64>, Option<ValueWrite>) {
        if state.text == names::MINUS {
            state.text = self.codec.negative_zero_literal();
        }
        if self.codec.is_negative_zero_literal(&state.text) {
            trace!("negative zero literal {:?} kept as typed", state.text);
            state.parsed = Some(0.0);
            return (state, Some(0.0), None);
        }

        let parsed = self.codec.parse(Some(&state.text));
        let write = match (parsed, mode) {
            (Some(value), _) => {
                let formatted = self.codec.format(Some(value));
                state.text = formatted.clone().unwrap_or_default();
                Some(ValueWrite {
                    parsed: Some(value),
                    formatted,
                })
            }
            (None, UpdateMode::Live) => {
                trace!("unparsable text {:?} left as typed", state.text);
                None
            }
            (None, UpdateMode::Commit) => {
                debug!("clearing unparsable text {:?} on commit", state.text);
                state.text.clear();
                Some(ValueWrite::cleared())
            }
        };
        state.parsed = parsed;
        state.clamp_selection();
        (state, parsed, write)
    }

    /// Move or insert the decimal separator at the caret, reformat, and put
    /// the caret right after the separator.
    fn insert_separator(&self, mut state: NumericFieldState) -> Transition {
        let caret = state.caret();
        let sep = self.codec.separator();

        match self.codec.separator_pos(&state.text) {
            None => state.text.insert(caret, sep),
            Some(pos) if pos < caret => {}
            Some(pos) => {
                // Everything between the caret and the old separator goes.
                let tail = state.text[pos + sep.len_utf8()..].to_string();
                state.text.truncate(caret);
                state.text.push(sep);
                state.text.push_str(&tail);
            }
        }

        let (mut state, parsed, write) = self.update(state, UpdateMode::Live);
        let caret = self
            .codec
            .separator_pos(&state.text)
            .map_or(0, |pos| pos + sep.len_utf8());
        state.set_caret(caret);

        (
            state,
            Effects {
                prevent_default: true,
                write,
                emit: Some(parsed),
            },
        )
    }

    /// Characters a deletion should step over instead of removing.
    #[inline]
    fn is_skippable(&self, c: char) -> bool {
        self.codec.is_separator_char(c) || c == self.codec.grouping()
    }

    /// `,50` and `-,50` both count: the sign does not move the digits.
    fn begins_with_separator(&self, text: &str) -> bool {
        text.strip_prefix('-')
            .unwrap_or(text)
            .chars()
            .next()
            .is_some_and(|c| self.codec.is_separator_char(c))
    }

    /// An emptied field becomes the zero rendering with the caret in front,
    /// ready for integer digits. Without decimals zero is a plain `0` and
    /// the caret goes after it, so the next digit replaces it.
    fn reset_to_zero(&self, mut state: NumericFieldState) -> Transition {
        state.text = self.codec.format(Some(0.0)).unwrap_or_default();
        let (mut state, _, write) = self.update(state, UpdateMode::Live);
        let caret = if self.codec.decimals() == 0 {
            state.text.len()
        } else {
            0
        };
        state.set_caret(caret);
        (
            state,
            Effects {
                write,
                ..Effects::default()
            },
        )
    }
}

impl NumericBehavior for LiveEditController {
    fn codec(&self) -> &NumberCodec {
        &self.codec
    }

    fn key_down(&self, mut state: NumericFieldState, event: &KeyEvent) -> Transition {
        match event.selection {
            Some(selection) => state.select(selection),
            None => state.clamp_selection(),
        }

        // Separators are not on the allow-list; they are handled here or not
        // at all.
        if self.codec.decimals() > 0
            && !event.has_command_modifier()
            && self.codec.is_separator_key(&event.key)
        {
            return self.insert_separator(state);
        }

        if !filter_key(event).is_admit() {
            trace!("rejected key {:?}", event.key);
            return (state, Effects::prevented());
        }

        if state.selection.is_caret() {
            let caret = state.caret();
            if event.is(names::BACKSPACE)
                && caret > 1
                && char_before(&state.text, caret).is_some_and(|c| self.is_skippable(c))
            {
                let target = prev_cursor_boundary(&state.text, caret);
                state.set_caret(target);
            } else if event.is(names::DELETE)
                && char_at(&state.text, caret).is_some_and(|c| self.is_skippable(c))
            {
                let target = next_cursor_boundary(&state.text, caret);
                state.set_caret(target);
            }
        }

        (state, Effects::default())
    }

    fn content_changed(&self, mut state: NumericFieldState) -> Transition {
        if state.text.is_empty() {
            return self.reset_to_zero(state);
        }
        state.clamp_selection();

        let mut caret = state.caret();
        let sep_len = self.codec.separator().len_utf8();
        let sep_pos = self.codec.separator_pos(&state.text);
        let in_decimals = sep_pos.is_some_and(|pos| pos < caret);
        let began_with_separator = self.begins_with_separator(&state.text);

        if let Some(pos) = sep_pos
            && in_decimals
        {
            let start = pos + sep_len;
            let kept = take_chars(&state.text[start..], self.codec.decimals()).len();
            state.text.truncate(start + kept);
        }

        let prev_len = state.text.len();
        let (mut state, _, write) = self.update(state, UpdateMode::Live);

        if in_decimals {
            // Zero renders without its leading digit; gaining or losing it
            // shifts everything after the integer part.
            let begins_now = self.begins_with_separator(&state.text);
            if began_with_separator && !begins_now {
                caret += 1;
            } else if !began_with_separator && begins_now {
                caret = caret.saturating_sub(1);
            }
        } else if prev_len > 1 {
            let new_len = state.text.len();
            caret = if new_len >= prev_len {
                caret + (new_len - prev_len)
            } else {
                caret.saturating_sub(prev_len - new_len)
            };
        }
        state.set_caret(caret);

        (
            state,
            Effects {
                write,
                ..Effects::default()
            },
        )
    }

    fn commit(&self, state: NumericFieldState, focused: bool) -> Transition {
        if focused {
            trace!("commit ignored while focused");
            return (state, Effects::default());
        }

        let (state, parsed, write) = self.update(state, UpdateMode::Commit);
        debug!("committed {parsed:?} as {:?}", state.text);
        (
            state,
            Effects {
                prevent_default: false,
                write,
                emit: Some(parsed),
            },
        )
    }

    fn attach(&self, state: NumericFieldState) -> Transition {
        let (state, parsed, write) = self.update(state, UpdateMode::Live);
        debug!("attached with {parsed:?}");
        (
            state,
            Effects {
                write,
                ..Effects::default()
            },
        )
    }

    fn assign_value(&self, mut state: NumericFieldState, value: Option<f64>) -> Transition {
        let formatted = self.codec.format(value);
        debug!("assigned {value:?} as {formatted:?}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FormatSpec;
    use crate::selection::SelectionRange;
    use pretty_assertions::assert_eq;

    fn controller(decimals: usize) -> LiveEditController {
        LiveEditController::new(
            NumberCodec::for_spec(&FormatSpec {
                decimals,
                locale: "es-ES".to_string(),
            })
            .unwrap(),
        )
    }

    fn at(text: &str, caret: usize) -> NumericFieldState {
        let mut st = NumericFieldState::new(FormatSpec::default()).with_text(text);
        st.set_caret(caret);
        st
    }

    #[test]
    fn update_reformats_parsable_text() {
        let c = controller(2);
        let (st, parsed, write) = c.update(at("12345,5", 0), UpdateMode::Live);
        assert_eq!(st.text, "12.345,50");
        assert_eq!(parsed, Some(12345.5));
        assert_eq!(
            write,
            Some(ValueWrite {
                parsed: Some(12345.5),
                formatted: Some("12.345,50".to_string()),
            })
        );
    }

    #[test]
    fn update_live_keeps_garbage_commit_clears_it() {
        let c = controller(2);
        let (st, parsed, write) = c.update(at("5-", 2), UpdateMode::Live);
        assert_eq!((st.text.as_str(), parsed, write), ("5-", None, None));

        let (st, parsed, write) = c.update(at("5-", 2), UpdateMode::Commit);
        assert_eq!(st.text, "");
        assert_eq!(st.caret(), 0);
        assert_eq!(parsed, None);
        assert_eq!(write, Some(ValueWrite::cleared()));
    }

    #[test]
    fn update_short_circuits_negative_zero() {
        let c = controller(2);
        for text in ["-,00", "-0,00"] {
            let (st, parsed, write) = c.update(at(text, 1), UpdateMode::Commit);
            assert_eq!(st.text, text);
            assert_eq!(parsed, Some(0.0));
            assert_eq!(write, None);
        }
    }

    #[test]
    fn separator_moves_to_caret() {
        let c = controller(2);
        let (st, fx) = c.key_down(at("1234,00", 2), &KeyEvent::new(","));
        assert_eq!(st.text, "12,00");
        assert_eq!(st.caret(), 3);
        assert!(fx.prevent_default);
        assert_eq!(fx.emit, Some(Some(12.0)));
    }

    #[test]
    fn separator_already_left_of_caret_only_jumps() {
        let c = controller(2);
        let (st, fx) = c.key_down(at("12,34", 4), &KeyEvent::new("."));
        assert_eq!(st.text, "12,34");
        assert_eq!(st.caret(), 3);
        assert_eq!(fx.emit, Some(Some(12.34)));
    }

    #[test]
    fn separator_inserted_when_missing() {
        let c = controller(2);
        let (st, _) = c.key_down(at("125", 1), &KeyEvent::new(","));
        assert_eq!(st.text, "1,25");
        assert_eq!(st.caret(), 2);
    }

    #[test]
    fn separator_rejected_without_decimals() {
        let c = controller(0);
        let (st, fx) = c.key_down(at("12", 1), &KeyEvent::new(","));
        assert!(fx.prevent_default);
        assert_eq!(fx.emit, None);
        assert_eq!(st.text, "12");
    }

    #[test]
    fn separator_key_uses_event_selection() {
        let c = controller(2);
        let ev = KeyEvent::new(",").at(SelectionRange::caret(1));
        let (st, _) = c.key_down(at("1234,00", 7), &ev);
        assert_eq!(st.text, "1,00");
        assert_eq!(st.caret(), 2);
    }

    #[test]
    fn separator_with_caret_past_end_is_clamped() {
        let c = controller(2);
        let mut st = at("1234", 0);
        st.selection = SelectionRange::caret(99);
        let (st, fx) = c.key_down(st, &KeyEvent::new(","));
        assert!(fx.prevent_default);
        assert_eq!(st.text, "1234,00");
        assert_eq!(st.caret(), 5);
    }

    #[test]
    fn separator_with_caret_inside_grouping_char_is_clamped() {
        let c = LiveEditController::new(
            NumberCodec::for_spec(&FormatSpec {
                decimals: 2,
                locale: "fr-FR".to_string(),
            })
            .unwrap(),
        );
        let mut st = at("1\u{202f}234,00", 0);
        // Middle of the three-byte narrow no-break space.
        st.selection = SelectionRange::caret(2);
        let (st, _) = c.key_down(st, &KeyEvent::new(","));
        assert_eq!(st.text, "1,00");
        assert_eq!(st.caret(), 2);
    }

    #[test]
    fn content_change_with_caret_past_end_is_clamped() {
        let c = controller(2);
        let mut st = at("12,00", 0);
        st.selection = SelectionRange::caret(40);
        let (st, _) = c.content_changed(st);
        assert_eq!(st.text, "12,00");
        assert!(st.caret() <= st.text.len());
    }

    #[test]
    fn rejected_key_only_prevents() {
        let c = controller(2);
        let (st, fx) = c.key_down(at("12,00", 2), &KeyEvent::new("q"));
        assert_eq!(fx, Effects::prevented());
        assert_eq!(st.text, "12,00");
    }

    #[test]
    fn backspace_after_separator_steps_over_it() {
        let c = controller(2);
        let (st, fx) = c.key_down(at("12,34", 3), &KeyEvent::new(names::BACKSPACE));
        assert_eq!(st.caret(), 2);
        assert!(fx.is_empty());
    }

    #[test]
    fn backspace_near_start_is_left_alone() {
        let c = controller(2);
        let (st, _) = c.key_down(at(",00", 1), &KeyEvent::new(names::BACKSPACE));
        assert_eq!(st.caret(), 1);
    }

    #[test]
    fn delete_before_separator_steps_over_it() {
        let c = controller(2);
        let (st, _) = c.key_down(at("12,34", 2), &KeyEvent::new(names::DELETE));
        assert_eq!(st.caret(), 3);
    }

    #[test]
    fn deletion_with_selection_is_not_adjusted() {
        let c = controller(2);
        let ev = KeyEvent::new(names::BACKSPACE).at(SelectionRange::new(2, 4));
        let (st, _) = c.key_down(at("12,34", 5), &ev);
        assert_eq!(st.selection, SelectionRange::new(2, 4));
    }

    #[test]
    fn emptied_field_becomes_zero_with_caret_in_front() {
        let c = controller(2);
        let (st, fx) = c.content_changed(at("", 0));
        assert_eq!(st.text, ",00");
        assert_eq!(st.caret(), 0);
        assert_eq!(st.parsed, Some(0.0));
        assert_eq!(fx.emit, None);
    }

    #[test]
    fn emptied_field_without_decimals_reads_zero() {
        let c = controller(0);
        let (st, _) = c.content_changed(at("", 0));
        assert_eq!(st.text, "0");
        assert_eq!(st.caret(), 1);

        // a 5 typed after the zero
        let (st, _) = c.content_changed(at("05", 2));
        assert_eq!(st.text, "5");
        assert_eq!(st.caret(), 1);
    }

    #[test]
    fn decimals_beyond_limit_are_truncated() {
        let c = controller(2);
        // "12,34" with a 5 typed after the 3
        let (st, _) = c.content_changed(at("12,354", 5));
        assert_eq!(st.text, "12,35");
        assert_eq!(st.caret(), 5);
    }

    #[test]
    fn typing_into_zero_decimals_keeps_caret() {
        let c = controller(2);
        // ",00" with a 5 typed after the separator
        let (st, _) = c.content_changed(at(",500", 2));
        assert_eq!(st.text, "0,50");
        assert_eq!(st.caret(), 3);
    }

    #[test]
    fn grouping_shift_moves_caret() {
        let c = controller(2);
        // "123,00" with a 4 typed at the front
        let (st, _) = c.content_changed(at("4123,00", 1));
        assert_eq!(st.text, "4123,00");
        let (st, _) = c.content_changed(at("54123,00", 1));
        assert_eq!(st.text, "54.123,00");
        assert_eq!(st.caret(), 2);
    }

    #[test]
    fn digit_on_zero_field_shifts_with_length() {
        let c = controller(2);
        // ",00" with a 7 typed in front
        let (st, _) = c.content_changed(at("7,00", 1));
        assert_eq!(st.text, "7,00");
        assert_eq!(st.caret(), 1);
    }

    #[test]
    fn signed_zero_keeps_caret_after_typed_decimal() {
        let c = controller(2);
        // "-,00" with a 5 typed right after the separator
        let (st, _) = c.content_changed(at("-,500", 3));
        assert_eq!(st.text, "-0,50");
        assert_eq!(st.caret(), 4);
    }

    #[test]
    fn minus_on_zero_field_is_kept() {
        let c = controller(2);
        let (st, fx) = c.content_changed(at("-,00", 1));
        assert_eq!(st.text, "-,00");
        assert_eq!(st.parsed, Some(0.0));
        assert_eq!(st.caret(), 1);
        assert_eq!(fx.write, None);
    }

    #[test]
    fn bare_minus_expands_to_literal() {
        let c = controller(2);
        let (st, fx) = c.content_changed(at("-", 1));
        assert_eq!(st.text, "-,00");
        assert_eq!(st.caret(), 1);
        assert_eq!(fx.write, None);

        let (st, _) = controller(0).content_changed(at("-", 1));
        assert_eq!(st.text, "-");
    }

    #[test]
    fn commit_is_gated_on_focus() {
        let c = controller(2);
        let (st, fx) = c.commit(at("12345,5", 7), true);
        assert_eq!(st.text, "12345,5");
        assert!(fx.is_empty());

        let (st, fx) = c.commit(st, false);
        assert_eq!(st.text, "12.345,50");
        assert_eq!(fx.emit, Some(Some(12345.5)));
    }

    #[test]
    fn commit_of_garbage_emits_none() {
        let c = controller(2);
        let (st, fx) = c.commit(at("1-2", 3), false);
        assert_eq!(st.text, "");
        assert_eq!(fx.emit, Some(None));
        assert_eq!(fx.write, Some(ValueWrite::cleared()));
    }

    #[test]
    fn attach_normalizes_initial_text() {
        let c = controller(2);
        let (st, fx) = c.attach(at("1.00009", 0));
        assert_eq!(st.text, "1,00");
        assert_eq!(fx.emit, None);
        assert!(fx.write.is_some());

        let (st, fx) = c.attach(at("", 0));
        assert_eq!(st.text, "");
        assert!(fx.is_empty());
    }

    #[test]
    fn assign_value_formats_and_places_caret_at_end() {
        let c = controller(2);
        let (st, _) = c.assign_value(at("", 0), Some(-0.0));
        assert_eq!(st.text, ",00");
        let (st, fx) = c.assign_value(st, None);
        assert_eq!(st.text, "");
        assert_eq!(fx.write, Some(ValueWrite::cleared()));
    }
}
