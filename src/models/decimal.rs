//! Exact base-10 numbers for summary totals
//!
//! Stores a mantissa and a scale (digits after the decimal point) so that
//! sums such as `0.1 + 0.2` come out as `0.3` and `10.50 + 2.5` keeps its two
//! fractional digits, the way a currency column is expected to add up.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Maximum number of fractional digits kept when parsing
pub const MAX_SCALE: u32 = 18;

/// A decimal number stored as `mantissa / 10^scale`
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    /// Create a Decimal from a mantissa and scale
    ///
    /// Scales above [`MAX_SCALE`] are truncated toward zero.
    pub fn new(mantissa: i128, scale: u32) -> Self {
        if scale > MAX_SCALE {
            let drop = scale - MAX_SCALE;
            Self {
                mantissa: 10i128.checked_pow(drop).map_or(0, |factor| mantissa / factor),
                scale: MAX_SCALE,
            }
        } else {
            Self { mantissa, scale }
        }
    }

    /// Zero with no fractional digits
    pub const fn zero() -> Self {
        Self {
            mantissa: 0,
            scale: 0,
        }
    }

    /// The raw mantissa
    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Number of digits after the decimal point
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Check if the value is zero
    pub const fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Check if the value is negative
    pub const fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// Parse a decimal from text
    ///
    /// Accepts an optional sign, digits, and an optional fractional part:
    /// "12", "-3.75", "+0.5", ".25", "7.". Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, DecimalParseError> {
        let s = s.trim();
        let invalid = || DecimalParseError::InvalidFormat(s.to_string());

        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let frac_part = &frac_part[..frac_part.len().min(MAX_SCALE as usize)];

        let mut mantissa: i128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(b - b'0')))
                .ok_or_else(|| DecimalParseError::Overflow(s.to_string()))?;
        }

        Ok(Self {
            mantissa: if negative { -mantissa } else { mantissa },
            scale: frac_part.len() as u32,
        })
    }

    /// Convert a float through its shortest decimal representation
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Self::parse(&value.to_string()).ok()
    }

    /// Mantissa rescaled to `scale`, saturating on overflow
    fn rescaled(&self, scale: u32) -> i128 {
        let factor = 10i128.saturating_pow(scale.saturating_sub(self.scale));
        self.mantissa.saturating_mul(factor)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            mantissa: i128::from(value),
            scale: 0,
        }
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let scale = self.scale.max(other.scale);
        self.rescaled(scale) == other.rescaled(scale)
    }
}

impl Eq for Decimal {}

impl Add for Decimal {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self {
            mantissa: self.rescaled(scale).saturating_add(other.rescaled(scale)),
            scale,
        }
    }
}

impl AddAssign for Decimal {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();

        if self.scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let scale = self.scale as usize;
        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

/// Error type for decimal parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecimalParseError {
    InvalidFormat(String),
    Overflow(String),
}

impl fmt::Display for DecimalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalParseError::InvalidFormat(s) => write!(f, "Invalid decimal format: {}", s),
            DecimalParseError::Overflow(s) => write!(f, "Decimal out of range: {}", s),
        }
    }
}

impl std::error::Error for DecimalParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Decimal::parse("10.50").unwrap(), Decimal::new(1050, 2));
        assert_eq!(Decimal::parse("-3.75").unwrap(), Decimal::new(-375, 2));
        assert_eq!(Decimal::parse("+0.5").unwrap(), Decimal::new(5, 1));
        assert_eq!(Decimal::parse(".25").unwrap(), Decimal::new(25, 2));
        assert_eq!(Decimal::parse(" 42 ").unwrap(), Decimal::from(42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Decimal::parse("").is_err());
        assert!(Decimal::parse("-").is_err());
        assert!(Decimal::parse(".").is_err());
        assert!(Decimal::parse("12a").is_err());
        assert!(Decimal::parse("1.2.3").is_err());
        assert!(Decimal::parse("1e5").is_err());
    }

    #[test]
    fn test_display_keeps_scale() {
        assert_eq!(Decimal::new(1050, 2).to_string(), "10.50");
        assert_eq!(Decimal::new(-5, 2).to_string(), "-0.05");
        assert_eq!(Decimal::new(7, 0).to_string(), "7");
        assert_eq!(Decimal::zero().to_string(), "0");
    }

    #[test]
    fn test_add_aligns_scale() {
        let total = Decimal::parse("10.50").unwrap() + Decimal::parse("2.5").unwrap();
        assert_eq!(total.to_string(), "13.00");

        let total = Decimal::parse("0.1").unwrap() + Decimal::parse("0.2").unwrap();
        assert_eq!(total.to_string(), "0.3");
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Decimal::from_f64(19.99).unwrap().to_string(), "19.99");
        assert_eq!(Decimal::from_f64(3.0).unwrap().to_string(), "3");
        assert!(Decimal::from_f64(f64::NAN).is_none());
        assert!(Decimal::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_sum() {
        let values = vec![Decimal::from(1), Decimal::parse("2.25").unwrap(), Decimal::from(-3)];
        let total: Decimal = values.into_iter().sum();
        assert_eq!(total.to_string(), "0.25");
    }

    #[test]
    fn test_equality_ignores_scale() {
        assert_eq!(Decimal::parse("1.50").unwrap(), Decimal::parse("1.5").unwrap());
    }
}
