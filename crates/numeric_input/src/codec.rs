//! Conversion between canonical values and fixed-decimals display text.
//!
//! [`NumberCodec`] owns the conventions a field needs: the decimal count,
//! the rounding mode and the locale formatter. Both directions are pure; the
//! caller decides what to do with the result.

use std::sync::Arc;

use crate::decimal::{RoundingMode, round_literal, round_value};
use crate::key::names;
use crate::locale::{FormatSpec, LocaleFormatter, NumberFormatter};
use crate::text::strip_whitespace;

#[derive(Clone, Debug)]
pub struct NumberCodec {
    formatter: Arc<dyn NumberFormatter>,
    decimals: usize,
    rounding: RoundingMode,
}

impl NumberCodec {
    pub fn new(formatter: Arc<dyn NumberFormatter>, decimals: usize, rounding: RoundingMode) -> Self {
        Self {
            formatter,
            decimals,
            rounding,
        }
    }

    /// Codec backed by the built-in locale table. `None` if the locale is
    /// unknown.
    pub fn for_spec(spec: &FormatSpec) -> Option<Self> {
        let formatter = LocaleFormatter::new(&spec.locale)?;
        Some(Self::new(
            Arc::new(formatter),
            spec.decimals,
            RoundingMode::default(),
        ))
    }

    #[inline]
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    #[inline]
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    #[inline]
    pub fn separator(&self) -> char {
        self.formatter.decimal_separator()
    }

    #[inline]
    pub fn grouping(&self) -> char {
        self.formatter.grouping_separator()
    }

    pub fn format_spec(&self) -> FormatSpec {
        FormatSpec {
            decimals: self.decimals,
            locale: self.formatter.locale_id().to_string(),
        }
    }

    /// `true` for the locale separator and for `.`, which is always read as
    /// "put the decimals here".
    pub fn is_separator_key(&self, key: &str) -> bool {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.is_separator_char(c),
            _ => false,
        }
    }

    #[inline]
    pub fn is_separator_char(&self, c: char) -> bool {
        c == self.separator() || key_is_period(c)
    }

    /// Byte offset of the locale separator in `text`.
    #[inline]
    pub fn separator_pos(&self, text: &str) -> Option<usize> {
        text.find(self.separator())
    }

    /// What a lone minus sign looks like on a zero field: `-,00`.
    pub fn negative_zero_literal(&self) -> String {
        self.zero_literal("-")
    }

    /// The negative-zero literal after expansion: `-0,00`.
    pub fn expanded_negative_zero_literal(&self) -> String {
        self.zero_literal("-0")
    }

    /// Whether `text` is one of the two negative-zero literals.
    ///
    /// With no decimals there is no separator, so the literals are `-` and
    /// `-0`.
    pub fn is_negative_zero_literal(&self, text: &str) -> bool {
        text == self.negative_zero_literal() || text == self.expanded_negative_zero_literal()
    }

    fn zero_literal(&self, prefix: &str) -> String {
        let mut out = String::from(prefix);
        if self.decimals > 0 {
            out.push(self.separator());
            out.extend(std::iter::repeat_n('0', self.decimals));
        }
        out
    }

    /// Round a value to the field's decimals. `None` for non-finite input.
    pub fn round(&self, value: f64) -> Option<f64> {
        round_value(value, self.decimals, self.rounding).map(|fd| fd.to_f64())
    }

    /// Render a canonical value.
    ///
    /// Zero drops its leading digit (`,00`) so typing decimals can start
    /// straight away. With no decimals zero stays `0`, since stripping it
    /// would leave an empty field.
    ///
    /// ```
    /// use numeric_input::{FormatSpec, NumberCodec};
    ///
    /// let codec = NumberCodec::for_spec(&FormatSpec::default()).unwrap();
    /// assert_eq!(codec.format(Some(0.0)).as_deref(), Some(",00"));
    /// assert_eq!(codec.format(Some(1.00009)).as_deref(), Some("1,00"));
    /// assert_eq!(codec.format(None), None);
    /// ```
    pub fn format(&self, value: Option<f64>) -> Option<String> {
        let canonical = self.round(value?)?;
        let formatted = self.formatter.format_fixed(canonical, self.decimals)?;
        if canonical == 0.0
            && self.decimals > 0
            && let Some(stripped) = formatted.strip_prefix('0')
        {
            return Some(stripped.to_string());
        }
        Some(formatted)
    }

    /// Read display text back into a canonical value.
    ///
    /// ```
    /// use numeric_input::{FormatSpec, NumberCodec};
    ///
    /// let codec = NumberCodec::for_spec(&FormatSpec::default()).unwrap();
    /// assert_eq!(codec.parse(Some("12.345,678")), Some(12345.68));
    /// assert_eq!(codec.parse(Some("-,5")), Some(-0.5));
    /// assert_eq!(codec.parse(Some("12a")), None);
    /// ```
    pub fn parse(&self, text: Option<&str>) -> Option<f64> {
        let stripped = strip_whitespace(text?);
        let mut cleaned = stripped.clone().into_owned();
        if cleaned.starts_with(self.separator()) {
            cleaned.insert(0, '0');
        } else if cleaned.starts_with('-') {
            cleaned.insert(1, '0');
        }

        let body = cleaned.strip_prefix('-').unwrap_or(&cleaned);
        if body.is_empty() || !body.chars().all(|c| self.is_numeric_char(c)) {
            return None;
        }

        // Our own rendering reads back as itself even where `.` groups
        // thousands. Without decimals a `.` can only be grouping.
        let localized = self.convert(&self.cleanup(&cleaned));
        if let Some(value) = localized
            && (self.decimals == 0
                || self.format(Some(value)).as_deref() == Some(stripped.as_ref()))
        {
            return Some(value);
        }

        self.convert(&cleaned).or(localized)
    }

    fn is_numeric_char(&self, c: char) -> bool {
        c.is_ascii_digit() || key_is_period(c) || c == self.separator() || c == self.grouping()
    }

    fn convert(&self, literal: &str) -> Option<f64> {
        let value: f64 = literal.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        round_literal(literal, self.decimals, self.rounding).map(|fd| fd.to_f64())
    }

    /// Drop grouping characters and turn the first separator into `.`.
    fn cleanup(&self, text: &str) -> String {
        let grouping = self.grouping();
        let ungrouped: String = text.chars().filter(|c| *c != grouping).collect();
        let separator = self.separator().to_string();
        ungrouped.replacen(separator.as_str(), names::PERIOD, 1)
    }
}

#[inline]
fn key_is_period(c: char) -> bool {
    c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codec(decimals: usize) -> NumberCodec {
        NumberCodec::for_spec(&FormatSpec {
            decimals,
            locale: "es-ES".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn format_strips_leading_zero_only_for_zero() {
        let c = codec(2);
        assert_eq!(c.format(Some(0.0)).as_deref(), Some(",00"));
        assert_eq!(c.format(Some(-0.0)).as_deref(), Some(",00"));
        assert_eq!(c.format(Some(0.5)).as_deref(), Some("0,50"));
        assert_eq!(c.format(Some(-0.5)).as_deref(), Some("-0,50"));
        assert_eq!(c.format(Some(12345.0)).as_deref(), Some("12.345,00"));
    }

    #[test]
    fn zero_convention_parses_back_to_zero() {
        let c = codec(2);
        for text in [",00", "-,00", "-0,00", "0", "-"] {
            assert_eq!(c.parse(Some(text)), Some(0.0), "{text:?}");
        }
    }

    #[test]
    fn parse_prefers_direct_conversion() {
        let c = codec(2);
        assert_eq!(c.parse(Some("1.00009")), Some(1.0));
        assert_eq!(c.parse(Some("1.5")), Some(1.5));
    }

    #[test]
    fn parse_falls_back_to_cleanup() {
        let c = codec(2);
        assert_eq!(c.parse(Some("1,5")), Some(1.5));
        assert_eq!(c.parse(Some("1.234.567,891")), Some(1234567.89));
        assert_eq!(c.parse(Some(" 1 234,5 ")), Some(1234.5));
    }

    #[test]
    fn parse_rounds_half_away_from_zero() {
        let c = codec(2);
        assert_eq!(c.parse(Some("1.005")), Some(1.01));
        assert_eq!(c.parse(Some("-1,005")), Some(-1.01));
        assert_eq!(c.parse(Some("1,004")), Some(1.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        let c = codec(2);
        assert_eq!(c.parse(None), None);
        for text in ["", "   ", "abc", "1e3", "--5", "5-", "1,2,3", "+1", "."] {
            assert_eq!(c.parse(Some(text)), None, "{text:?}");
        }
    }

    #[test]
    fn truncating_codec_drops_digits() {
        let c = NumberCodec::new(Arc::new(LocaleFormatter::default()), 2, RoundingMode::Truncate);
        assert_eq!(c.parse(Some("1,009")), Some(1.0));
        assert_eq!(c.format(Some(2.999)).as_deref(), Some("2,99"));
    }

    #[test]
    fn english_locale_cleans_comma_grouping() {
        let c = NumberCodec::for_spec(&FormatSpec {
            decimals: 2,
            locale: "en-US".to_string(),
        })
        .unwrap();
        assert_eq!(c.format(Some(0.0)).as_deref(), Some(".00"));
        assert_eq!(c.parse(Some("1,234.5")), Some(1234.5));
        assert_eq!(c.parse(Some(".5")), Some(0.5));
        assert_eq!(c.negative_zero_literal(), "-.00");
    }

    #[test]
    fn round_trip_for_representable_values() {
        let c = codec(2);
        for v in [0.0, 1.0, -1.0, 0.01, 1234.56, -98765.43, 1.005, 3.14159, 1e9] {
            let expected = c.round(v);
            assert_eq!(c.parse(c.format(Some(v)).as_deref()), expected, "{v}");
        }
    }

    #[test]
    fn negative_zero_literals() {
        let c = codec(3);
        assert_eq!(c.negative_zero_literal(), "-,000");
        assert_eq!(c.expanded_negative_zero_literal(), "-0,000");
        assert!(c.is_negative_zero_literal("-,000"));
        assert!(c.is_negative_zero_literal("-0,000"));
        assert!(!c.is_negative_zero_literal("-,00"));
    }

    #[test]
    fn zero_decimals_keeps_plain_zero() {
        let c = codec(0);
        assert_eq!(c.format(Some(0.0)).as_deref(), Some("0"));
        assert_eq!(c.format(Some(2.5)).as_deref(), Some("3"));
        assert_eq!(c.parse(Some("0")), Some(0.0));
        assert_eq!(c.parse(Some("7,6")), Some(8.0));
        assert_eq!(c.format(Some(12345.0)).as_deref(), Some("12.345"));
        assert_eq!(c.parse(Some("12.345")), Some(12345.0));
        assert_eq!(c.parse(Some("-12.345")), Some(-12345.0));
        assert_eq!(c.parse(Some("1.5")), Some(15.0));
        assert_eq!(c.parse(Some("12.3456")), Some(123456.0));
        assert_eq!(c.negative_zero_literal(), "-");
        assert_eq!(c.expanded_negative_zero_literal(), "-0");
        assert!(c.is_negative_zero_literal("-"));
    }

    #[test]
    fn separator_keys() {
        let c = codec(2);
        assert!(c.is_separator_key(","));
        assert!(c.is_separator_key("."));
        assert!(!c.is_separator_key(",,"));
        assert!(!c.is_separator_key("Comma"));
        assert_eq!(c.separator_pos("12,34"), Some(2));
        assert_eq!(c.separator_pos("1234"), None);
    }
}
