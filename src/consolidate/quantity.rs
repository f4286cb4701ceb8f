//! Exact quantity arithmetic
//!
//! Ingredient amounts arrive as display strings ("1/2", "1.25", "1 1/2").
//! They are parsed into reduced fractions so that repeated sums do not
//! drift, and are only turned back into strings at the output boundary.

use std::cmp::Ordering;
use std::fmt;

use fraction::{CheckedAdd, CheckedDiv, CheckedMul, GenericFraction};

type Fraction = GenericFraction<u128>;

/// Number of decimal places kept when formatting
const DISPLAY_DECIMALS: u32 = 2;

/// Decimal places kept by the parser. Longer fractions, such as JSON floats
/// like 0.3333333333333333, are truncated to this precision.
const MAX_DECIMAL_DIGITS: usize = 18;

/// A non-negative exact amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity(Fraction);

impl Quantity {
    /// Build a reduced fraction. Negative amounts and zero denominators are None.
    pub fn new(num: i128, den: i128) -> Option<Self> {
        if num < 0 || den <= 0 {
            return None;
        }
        Some(Self(Fraction::new(num as u128, den as u128)))
    }

    pub fn zero() -> Self {
        Self(Fraction::new(0u128, 1u128))
    }

    pub fn one() -> Self {
        Self(Fraction::new(1u128, 1u128))
    }

    pub fn from_integer(n: u64) -> Self {
        Self(Fraction::new(n as u128, 1u128))
    }

    pub fn numer(&self) -> u128 {
        self.0.numer().copied().unwrap_or(0)
    }

    pub fn denom(&self) -> u128 {
        self.0.denom().copied().unwrap_or(1)
    }

    pub fn is_zero(&self) -> bool {
        self.numer() == 0
    }

    /// Parse a quantity string
    ///
    /// Accepts integers ("2"), decimals ("1.5", ".5"), fractions ("3/4"),
    /// mixed numbers ("1 1/2") and unicode vulgar fractions ("½", "1½").
    /// Returns None for anything else, including negative amounts.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Split off a trailing vulgar fraction glyph: "1½" -> ("1", ½)
        if let Some(last) = trimmed.chars().last() {
            if let Some(glyph) = vulgar_fraction(last) {
                let whole = trimmed[..trimmed.len() - last.len_utf8()].trim();
                if whole.is_empty() {
                    return Some(glyph);
                }
                return parse_plain(whole)?.checked_add(&glyph);
            }
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            [single] => parse_plain(single),
            [whole, fraction] if fraction.contains('/') && !whole.contains('/') => {
                let whole = parse_decimal(whole)?;
                let fraction = parse_fraction(fraction)?;
                whole.checked_add(&fraction)
            }
            _ => None,
        }
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(&other.0).map(Self)
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(&other.0).map(Self)
    }

    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        self.0.checked_div(&other.0).map(Self)
    }

    /// Lossy conversion, for logging and overflow fallbacks only
    pub fn to_f64(&self) -> f64 {
        self.numer() as f64 / self.denom() as f64
    }

    /// Format rounded to two decimals with trailing zeros dropped
    ///
    /// 3 -> "3", 1/2 -> "0.5", 1/3 -> "0.33", 2/3 -> "0.67"
    pub fn format(&self) -> String {
        let scale = 10_u128.pow(DISPLAY_DECIMALS);
        let (num, den) = (self.numer(), self.denom());

        // Round half up: floor((num * scale * 2 + den) / (den * 2))
        let scaled = match num
            .checked_mul(scale * 2)
            .and_then(|n| n.checked_add(den))
            .and_then(|n| den.checked_mul(2).map(|d| n / d))
        {
            Some(s) => s,
            None => return trim_decimals(format!("{:.2}", self.to_f64())),
        };

        let whole = scaled / scale;
        let frac = scaled % scale;
        if frac == 0 {
            return whole.to_string();
        }

        let digits = format!("{:0width$}", frac, width = DISPLAY_DECIMALS as usize);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        match (
            self.numer().checked_mul(other.denom()),
            other.numer().checked_mul(self.denom()),
        ) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self
                .to_f64()
                .partial_cmp(&other.to_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

fn trim_decimals(mut formatted: String) -> String {
    if formatted.contains('.') {
        let kept = formatted.trim_end_matches('0').trim_end_matches('.').len();
        formatted.truncate(kept);
    }
    formatted
}

/// A single token: decimal or fraction
fn parse_plain(s: &str) -> Option<Quantity> {
    if s.contains('/') {
        parse_fraction(s)
    } else {
        parse_decimal(s)
    }
}

fn parse_fraction(s: &str) -> Option<Quantity> {
    let (num, den) = s.split_once('/')?;
    let num = parse_digits(num.trim())?;
    let den = parse_digits(den.trim())?;
    Quantity::new(num, den)
}

fn parse_decimal(s: &str) -> Option<Quantity> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let frac = &frac[..frac.len().min(MAX_DECIMAL_DIGITS)];

    let whole = if whole.is_empty() { 0 } else { parse_digits(whole)? };
    if frac.is_empty() {
        return Quantity::new(whole, 1);
    }

    let scale = 10_i128.pow(frac.len() as u32);
    let frac = parse_digits(frac)?;
    Quantity::new(whole.checked_mul(scale)?.checked_add(frac)?, scale)
}

fn parse_digits(s: &str) -> Option<i128> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i128>().ok()
}

fn vulgar_fraction(c: char) -> Option<Quantity> {
    let (num, den) = match c {
        '¼' => (1, 4),
        '½' => (1, 2),
        '¾' => (3, 4),
        '⅓' => (1, 3),
        '⅔' => (2, 3),
        '⅛' => (1, 8),
        '⅜' => (3, 8),
        '⅝' => (5, 8),
        '⅞' => (7, 8),
        _ => return None,
    };
    Quantity::new(num, den)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(num: i128, den: i128) -> Quantity {
        Quantity::new(num, den).unwrap()
    }

    #[test]
    fn test_parse_integers_and_decimals() {
        assert_eq!(Quantity::parse("2"), Some(q(2, 1)));
        assert_eq!(Quantity::parse(" 1.5 "), Some(q(3, 2)));
        assert_eq!(Quantity::parse(".25"), Some(q(1, 4)));
        assert_eq!(Quantity::parse("3."), Some(q(3, 1)));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(Quantity::parse("1/2"), Some(q(1, 2)));
        assert_eq!(Quantity::parse("3/4"), Some(q(3, 4)));
        assert_eq!(Quantity::parse("1 1/2"), Some(q(3, 2)));
        assert_eq!(Quantity::parse("½"), Some(q(1, 2)));
        assert_eq!(Quantity::parse("1½"), Some(q(3, 2)));
        assert_eq!(Quantity::parse("2 ¾"), Some(q(11, 4)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Quantity::parse(""), None);
        assert_eq!(Quantity::parse("   "), None);
        assert_eq!(Quantity::parse("to taste"), None);
        assert_eq!(Quantity::parse("1/0"), None);
        assert_eq!(Quantity::parse("-2"), None);
        assert_eq!(Quantity::parse("2-3"), None);
        assert_eq!(Quantity::parse("1/2/3"), None);
        assert_eq!(Quantity::parse("."), None);
        assert_eq!(Quantity::parse("1.5x"), None);
        assert_eq!(Quantity::parse("0.33333333333333333333x"), None);
    }

    #[test]
    fn test_parse_truncates_long_decimals() {
        let third = Quantity::parse("0.3333333333333333").unwrap();
        assert_eq!(third.format(), "0.33");

        let long = Quantity::parse("1.12345678901234567890123").unwrap();
        assert_eq!(long, q(1_123_456_789_012_345_678, 1_000_000_000_000_000_000));
        assert_eq!(long.format(), "1.12");
    }

    #[test]
    fn test_new_reduces_and_rejects_negatives() {
        let half = q(2, 4);
        assert_eq!(half.numer(), 1);
        assert_eq!(half.denom(), 2);
        assert_eq!(Quantity::new(-1, 2), None);
        assert_eq!(Quantity::new(1, 0), None);
    }

    #[test]
    fn test_fraction_sums_are_exact() {
        let third = q(1, 3);
        let sum = third.checked_add(&third).unwrap().checked_add(&third).unwrap();
        assert_eq!(sum, Quantity::one());
    }

    #[test]
    fn test_mul_div() {
        assert_eq!(q(3, 4).checked_mul(&q(4, 3)), Some(Quantity::one()));
        assert_eq!(q(1, 2).checked_div(&q(1, 4)), Some(q(2, 1)));
        assert_eq!(q(1, 2).checked_div(&Quantity::zero()), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(q(3, 1).format(), "3");
        assert_eq!(q(1, 2).format(), "0.5");
        assert_eq!(q(1, 3).format(), "0.33");
        assert_eq!(q(2, 3).format(), "0.67");
        assert_eq!(q(5, 4).format(), "1.25");
        assert_eq!(q(1, 1000).format(), "0");
        assert_eq!(Quantity::zero().format(), "0");
    }

    #[test]
    fn test_format_huge_values_drops_trailing_zeros() {
        // Too large to round exactly, formatted through f64 instead
        let formatted = q(i128::MAX, 1).format();
        assert!(!formatted.ends_with(".00"), "{}", formatted);
        assert!(!formatted.contains('.'), "{}", formatted);
        assert!(formatted.starts_with("1701411834604692"), "{}", formatted);

        let formatted = q(i128::MAX, 2).format();
        assert!(!formatted.contains('.'), "{}", formatted);
    }

    #[test]
    fn test_trim_decimals() {
        assert_eq!(trim_decimals("12.00".to_string()), "12");
        assert_eq!(trim_decimals("12.50".to_string()), "12.5");
        assert_eq!(trim_decimals("100".to_string()), "100");
    }

    #[test]
    fn test_ordering() {
        assert!(q(1, 3) < q(1, 2));
        assert!(q(4, 1) >= q(4, 1));
        assert_eq!(q(2, 4).cmp(&q(1, 2)), Ordering::Equal);
    }
}
