//! Fixed-point rounding on decimal digit strings.
//!
//! Rounding happens on the decimal text rather than on `value * 10^n`, so a
//! literal `1.005` rounds to `1.01` even though its nearest `f64` sits just
//! below the half-way point.

use serde::Deserialize;

/// How values are brought to the field's fixed number of decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// `0.5` goes up in magnitude: `1.005 -> 1.01`, `-1.005 -> -1.01`.
    #[default]
    HalfAwayFromZero,
    /// Extra digits are dropped.
    Truncate,
}

/// A value with exactly `decimals` fraction digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedDecimal {
    /// Never set for a value whose digits are all zero.
    pub negative: bool,
    /// Integer digits without leading zeros (`"0"` for zero).
    pub int_digits: String,
    /// Exactly `decimals` fraction digits.
    pub frac_digits: String,
}

impl FixedDecimal {
    pub fn is_zero(&self) -> bool {
        self.int_digits.bytes().chain(self.frac_digits.bytes()).all(|b| b == b'0')
    }

    /// Back to a plain `f64`.
    pub fn to_f64(&self) -> f64 {
        let sign = if self.negative { "-" } else { "" };
        let literal = if self.frac_digits.is_empty() {
            format!("{sign}{}", self.int_digits)
        } else {
            format!("{sign}{}.{}", self.int_digits, self.frac_digits)
        };
        // Built from ASCII digits only, so this cannot fail.
        literal.parse().unwrap_or(0.0)
    }
}

/// Round a plain decimal literal (`-?digits?.?digits?`) to `decimals` places.
///
/// Returns `None` if `literal` is not a plain decimal.
///
/// ```
/// use numeric_input::{RoundingMode, round_literal};
///
/// let r = round_literal("1.005", 2, RoundingMode::HalfAwayFromZero).unwrap();
/// assert_eq!((r.int_digits.as_str(), r.frac_digits.as_str()), ("1", "01"));
///
/// let t = round_literal("-0.004", 2, RoundingMode::HalfAwayFromZero).unwrap();
/// assert!(!t.negative);
/// ```
pub fn round_literal(literal: &str, decimals: usize, mode: RoundingMode) -> Option<FixedDecimal> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return None;
    }

    let mut digits: Vec<u8> = int_part.bytes().collect();
    let kept_frac = frac_part.len().min(decimals);
    digits.extend_from_slice(&frac_part.as_bytes()[..kept_frac]);
    digits.resize(int_part.len() + decimals, b'0');

    let round_up = match mode {
        RoundingMode::HalfAwayFromZero => frac_part
            .as_bytes()
            .get(decimals)
            .is_some_and(|d| *d >= b'5'),
        RoundingMode::Truncate => false,
    };
    if round_up {
        increment(&mut digits);
    }

    let split = digits.len() - decimals;
    let (int_bytes, frac_bytes) = digits.split_at(split);
    let int_digits = match int_bytes.iter().position(|b| *b != b'0') {
        Some(first) => String::from_utf8_lossy(&int_bytes[first..]).into_owned(),
        None => "0".to_string(),
    };
    let mut out = FixedDecimal {
        negative,
        int_digits,
        frac_digits: String::from_utf8_lossy(frac_bytes).into_owned(),
    };
    if out.is_zero() {
        out.negative = false;
    }
    Some(out)
}

/// Round a finite `f64` to `decimals` places.
///
/// The shortest decimal text of `value` is rounded, so the result agrees with
/// what the user would see typed out. Non-finite input yields `None`.
pub fn round_value(value: f64, decimals: usize, mode: RoundingMode) -> Option<FixedDecimal> {
    if !value.is_finite() {
        return None;
    }
    // `Display` for f64 never uses exponent notation.
    round_literal(&value.to_string(), decimals, mode)
}

fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
