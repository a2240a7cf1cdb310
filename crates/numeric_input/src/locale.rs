//! Locale-aware fixed-decimals formatting primitive.
//!
//! The controller never hard-codes separators: it asks a [`NumberFormatter`]
//! for them and for the rendered text. [`LocaleFormatter`] is the built-in
//! implementation backed by a small table of conventions; hosts with real
//! locale data can plug in their own.

use crate::decimal::{RoundingMode, round_value};

/// Default locale: comma decimals, period grouping.
pub const DEFAULT_LOCALE: &str = "es-ES";

/// Decimals count plus locale identifier, as handed to the formatter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub decimals: usize,
    pub locale: String,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            decimals: 2,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Render numbers with a fixed count of fraction digits for one locale.
///
/// Implementations must be pure functions of their inputs; a single
/// formatter is shared by every field using the same locale.
pub trait NumberFormatter: Send + Sync + std::fmt::Debug {
    fn locale_id(&self) -> &str;

    fn decimal_separator(&self) -> char;

    fn grouping_separator(&self) -> char;

    /// Format `value` with exactly `decimals` fraction digits, rounding half
    /// away from zero. Returns `None` for non-finite values.
    fn format_fixed(&self, value: f64, decimals: usize) -> Option<String>;
}

/// Separator conventions for one locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleConventions {
    pub id: &'static str,
    pub decimal: char,
    pub grouping: char,
    /// Integer parts shorter than `3 + min_grouping_digits` digits are not
    /// grouped (Spanish writes `1234,00` but `12.345,00`).
    pub min_grouping_digits: usize,
}

const LOCALES: &[LocaleConventions] = &[
    LocaleConventions { id: "es-ES", decimal: ',', grouping: '.', min_grouping_digits: 2 },
    LocaleConventions { id: "de-DE", decimal: ',', grouping: '.', min_grouping_digits: 1 },
    LocaleConventions { id: "it-IT", decimal: ',', grouping: '.', min_grouping_digits: 1 },
    LocaleConventions { id: "pt-BR", decimal: ',', grouping: '.', min_grouping_digits: 1 },
    LocaleConventions { id: "fr-FR", decimal: ',', grouping: '\u{202f}', min_grouping_digits: 1 },
    LocaleConventions { id: "de-CH", decimal: '.', grouping: '\u{2019}', min_grouping_digits: 1 },
    LocaleConventions { id: "en-US", decimal: '.', grouping: ',', min_grouping_digits: 1 },
    LocaleConventions { id: "en-GB", decimal: '.', grouping: ',', min_grouping_digits: 1 },
];

/// Look up conventions by identifier.
///
/// Matching ignores ASCII case and accepts `_` for `-`. A bare language
/// (`"es"`) resolves to the first table entry for that language.
///
/// ```
/// use numeric_input::lookup_locale;
///
/// assert_eq!(lookup_locale("es_es").map(|l| l.id), Some("es-ES"));
/// assert_eq!(lookup_locale("en").map(|l| l.decimal), Some('.'));
/// assert!(lookup_locale("xx-YY").is_none());
/// ```
pub fn lookup_locale(id: &str) -> Option<&'static LocaleConventions> {
    let wanted = id.trim().replace('_', "-");
    if let Some(found) = LOCALES.iter().find(|l| l.id.eq_ignore_ascii_case(&wanted)) {
        return Some(found);
    }
    if wanted.contains('-') {
        return None;
    }
    LOCALES.iter().find(|l| {
        l.id
            .split('-')
            .next()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(&wanted))
    })
}

/// Identifiers of every built-in locale.
pub fn supported_locales() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|l| l.id)
}

/// Table-backed [`NumberFormatter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleFormatter {
    conventions: &'static LocaleConventions,
}

impl LocaleFormatter {
    /// Formatter for `id`, or `None` if the locale is unknown.
    pub fn new(id: &str) -> Option<Self> {
        lookup_locale(id).map(|conventions| Self { conventions })
    }

    pub fn conventions(&self) -> &'static LocaleConventions {
        self.conventions
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self {
            conventions: &LOCALES[0],
        }
    }
}

impl NumberFormatter for LocaleFormatter {
    fn locale_id(&self) -> &str {
        self.conventions.id
    }

    fn decimal_separator(&self) -> char {
        self.conventions.decimal
    }

    fn grouping_separator(&self) -> char {
        self.conventions.grouping
    }

    fn format_fixed(&self, value: f64, decimals: usize) -> Option<String> {
        let fixed = round_value(value, decimals, RoundingMode::HalfAwayFromZero)?;
        let mut out = String::with_capacity(fixed.int_digits.len() + decimals + 4);
        if fixed.negative {
            out.push('-');
        }
        push_grouped(&mut out, &fixed.int_digits, self.conventions);
        if decimals > 0 {
            out.push(self.conventions.decimal);
            out.push_str(&fixed.frac_digits);
        }
        Some(out)
    }
}

fn push_grouped(out: &mut String, int_digits: &str, conventions: &LocaleConventions) {
    let n = int_digits.len();
    if n < 3 + conventions.min_grouping_digits {
        out.push_str(int_digits);
        return;
    }
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(conventions.grouping);
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(locale: &str, value: f64, decimals: usize) -> String {
        LocaleFormatter::new(locale)
            .unwrap()
            .format_fixed(value, decimals)
            .unwrap()
    }

    #[test]
    fn spanish_skips_grouping_for_four_digits() {
        assert_eq!(fmt("es-ES", 1234.0, 2), "1234,00");
        assert_eq!(fmt("es-ES", 12345.0, 2), "12.345,00");
        assert_eq!(fmt("es-ES", 1234567.891, 2), "1.234.567,89");
    }

    #[test]
    fn german_groups_from_four_digits() {
        assert_eq!(fmt("de-DE", 1234.5, 1), "1.234,5");
    }

    #[test]
    fn english_and_swiss_use_period_decimals() {
        assert_eq!(fmt("en-US", -9876.543, 2), "-9,876.54");
        assert_eq!(fmt("de-CH", 1000.0, 0), "1\u{2019}000");
    }

    #[test]
    fn french_groups_with_narrow_no_break_space() {
        assert_eq!(fmt("fr-FR", 1234.5, 2), "1\u{202f}234,50");
    }

    #[test]
    fn zero_and_negative_zero_render_unsigned() {
        assert_eq!(fmt("es-ES", 0.0, 2), "0,00");
        assert_eq!(fmt("es-ES", -0.0, 2), "0,00");
        assert_eq!(fmt("es-ES", -0.001, 2), "0,00");
    }

    #[test]
    fn zero_decimals_has_no_separator() {
        assert_eq!(fmt("es-ES", 2.5, 0), "3");
    }

    #[test]
    fn non_finite_values_do_not_format() {
        let f = LocaleFormatter::default();
        assert_eq!(f.locale_id(), DEFAULT_LOCALE);
        assert!(f.format_fixed(f64::INFINITY, 2).is_none());
    }

    #[test]
    fn supported_locales_all_resolve() {
        for id in supported_locales() {
            assert_eq!(LocaleFormatter::new(id).unwrap().locale_id(), id);
        }
    }
}
