use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::EngineError;

/// Signed money amount represented as **integer minor units** (paise/cents).
///
/// Use this type for **all** monetary values in the engine (prices, payment
/// amounts, balances) to avoid floating-point drift across repeated sums.
///
/// Two parsing policies coexist:
/// - [`Money::from_str`] is strict and rejects malformed operator input;
/// - [`Money::parse_loose`] / [`Money::parse_loose_str`] implement the
///   coercion policy for values read back from the store: numbers or numeric
///   strings in major units are accepted, anything else (null, empty,
///   garbage) becomes [`Money::ZERO`]. The loose path never fails.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor_units(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
///
/// assert_eq!(Money::parse_loose_str("150.50").minor_units(), 15050);
/// assert_eq!(Money::parse_loose_str("not a number"), Money::ZERO);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Unsigned magnitude of the amount.
    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.saturating_abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Coerces a loosely typed JSON value into an amount.
    ///
    /// Numbers and numeric strings are read as **major units**; `null`,
    /// non-numeric strings and every other value coerce to [`Money::ZERO`].
    #[must_use]
    pub fn parse_loose(value: &serde_json::Value) -> Money {
        match value {
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Money(int.saturating_mul(100))
                } else if let Some(float) = number.as_f64() {
                    Money(minor_units_from_f64(float))
                } else {
                    Money::ZERO
                }
            }
            serde_json::Value::String(raw) => Money::parse_loose_str(raw),
            _ => Money::ZERO,
        }
    }

    /// Coerces a decimal string in major units into an amount.
    ///
    /// Accepts an optional sign, `.` or `,` as decimal separator and any
    /// number of fractional digits (rounded half-up to 2). Invalid input
    /// coerces to [`Money::ZERO`].
    #[must_use]
    pub fn parse_loose_str(raw: &str) -> Money {
        Money(loose_minor_units(raw).unwrap_or(0))
    }
}

fn minor_units_from_f64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let scaled = (value * 100.0).round();
    if scaled >= i64::MAX as f64 {
        i64::MAX
    } else if scaled <= i64::MIN as f64 {
        i64::MIN
    } else {
        scaled as i64
    }
}

fn loose_minor_units(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (true, stripped)
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (false, stripped)
    } else {
        (false, trimmed)
    };

    let rest = rest.trim().replace(',', ".");
    let mut parts = rest.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("");

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let major: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let mut frac_digits = frac_part.chars().map(|c| i64::from(c as u8 - b'0'));
    let tens = frac_digits.next().unwrap_or(0);
    let units = frac_digits.next().unwrap_or(0);
    let round_up = frac_digits.next().is_some_and(|d| d >= 5);

    let mut minor = major.checked_mul(100)?.checked_add(tens * 10 + units)?;
    if round_up {
        minor = minor.checked_add(1)?;
    }

    Some(if negative { -minor } else { minor })
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> de::Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Money::parse_loose_str(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Money(value.saturating_mul(100)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let major = i64::try_from(value).unwrap_or(i64::MAX);
        Ok(Money(major.saturating_mul(100)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Money(minor_units_from_f64(value)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Money::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Money::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string in major units into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let minor_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| invalid())?;

        let minor: i64 = match minor_str {
            None => 0,
            Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_decimal() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn strict_parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().minor_units(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor_units(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor_units(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor_units(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor_units(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor_units(), 230);
    }

    #[test]
    fn strict_parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("0.001".parse::<Money>().is_err());
    }

    #[test]
    fn strict_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
    }

    #[test]
    fn loose_parse_reads_major_units() {
        assert_eq!(Money::parse_loose_str("150.50").minor_units(), 15050);
        assert_eq!(Money::parse_loose_str("-20").minor_units(), -2000);
        assert_eq!(Money::parse_loose_str(" 40 ").minor_units(), 4000);
        assert_eq!(Money::parse_loose_str(".5").minor_units(), 50);
    }

    #[test]
    fn loose_parse_rounds_extra_decimals() {
        assert_eq!(Money::parse_loose_str("1.005").minor_units(), 101);
        assert_eq!(Money::parse_loose_str("1.004").minor_units(), 100);
    }

    #[test]
    fn loose_parse_coerces_invalid_to_zero() {
        assert_eq!(Money::parse_loose_str(""), Money::ZERO);
        assert_eq!(Money::parse_loose_str("abc"), Money::ZERO);
        assert_eq!(Money::parse_loose_str("1.2.3"), Money::ZERO);
        assert_eq!(Money::parse_loose(&serde_json::Value::Null), Money::ZERO);
        assert_eq!(Money::parse_loose(&serde_json::json!(true)), Money::ZERO);
    }

    #[test]
    fn loose_parse_reads_json_numbers() {
        assert_eq!(Money::parse_loose(&serde_json::json!(100)).minor_units(), 10000);
        assert_eq!(Money::parse_loose(&serde_json::json!(150.5)).minor_units(), 15050);
        assert_eq!(Money::parse_loose(&serde_json::json!(-40)).minor_units(), -4000);
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::new(15050)).unwrap();
        assert_eq!(json, "\"150.50\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::new(15050));
    }
}
