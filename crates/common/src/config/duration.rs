//! Duration expressions used by config values such as `turn_user_lifetime`.
//!
//! Accepted grammar: an optional sign followed either by the bare literal
//! `0` or by one or more `<number><unit>` segments (`"1h30m"`, `"1.5s"`).
//! Units: `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m`, `h`.
//!
//! Only syntax is checked. Zero and negative values parse fine.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// 2^63, the magnitude limit of a signed 64-bit nanosecond count.
const MAGNITUDE_LIMIT: u64 = 1 << 63;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Duration parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// A parsed, signed duration with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ParsedDuration(i64);

impl ParsedDuration {
    pub const ZERO: ParsedDuration = ParsedDuration(0);

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Convert to a [`std::time::Duration`]; `None` for negative values.
    pub fn to_std(&self) -> Option<Duration> {
        u64::try_from(self.0).ok().map(Duration::from_nanos)
    }
}

impl FromStr for ParsedDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}

/// 解析时长表达式
pub fn parse_duration(input: &str) -> Result<ParsedDuration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let mut rest = input.as_bytes();
    let mut negative = false;
    if let Some((&sign, tail)) = rest.split_first()
        && (sign == b'-' || sign == b'+')
    {
        negative = sign == b'-';
        rest = tail;
    }

    if rest == b"0" {
        return Ok(ParsedDuration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !(rest[0] == b'.' || rest[0].is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, tail, has_whole) = leading_int(rest).ok_or_else(invalid)?;
        rest = tail;

        let mut fraction = 0u64;
        let mut scale = 1f64;
        let mut has_fraction = false;
        if let Some((&b'.', tail)) = rest.split_first() {
            let parsed = leading_fraction(tail);
            fraction = parsed.value;
            scale = parsed.scale;
            has_fraction = parsed.consumed;
            rest = parsed.rest;
        }

        // "." or "s" alone
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .iter()
            .position(|c| *c == b'.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        // Split points are ASCII bytes, so the unit is always valid UTF-8.
        let unit = std::str::from_utf8(&rest[..unit_len]).map_err(|_| invalid())?;
        let unit_nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        rest = &rest[unit_len..];

        if whole > MAGNITUDE_LIMIT / unit_nanos {
            return Err(overflow());
        }
        let mut segment = whole * unit_nanos;
        if fraction > 0 {
            segment += (fraction as f64 * (unit_nanos as f64 / scale)) as u64;
            if segment > MAGNITUDE_LIMIT {
                return Err(overflow());
            }
        }

        total = total.checked_add(segment).ok_or_else(overflow)?;
        if total > MAGNITUDE_LIMIT {
            return Err(overflow());
        }
    }

    if negative {
        // 2^63 wraps to i64::MIN, which is exactly its negation.
        return Ok(ParsedDuration((total as i64).wrapping_neg()));
    }
    if total > MAGNITUDE_LIMIT - 1 {
        return Err(overflow());
    }
    Ok(ParsedDuration(total as i64))
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume leading decimal digits. `None` on overflow.
fn leading_int(s: &[u8]) -> Option<(u64, &[u8], bool)> {
    let mut value: u64 = 0;
    let mut i = 0;
    while i < s.len() && s[i].is_ascii_digit() {
        if value > MAGNITUDE_LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(s[i] - b'0');
        if value > MAGNITUDE_LIMIT {
            return None;
        }
        i += 1;
    }
    Some((value, &s[i..], i > 0))
}

struct Fraction<'a> {
    value: u64,
    scale: f64,
    rest: &'a [u8],
    consumed: bool,
}

/// Consume the digits after a decimal point. Digits beyond what fits are
/// dropped, which only loses precision.
fn leading_fraction(s: &[u8]) -> Fraction<'_> {
    let mut value: u64 = 0;
    let mut scale = 1f64;
    let mut saturated = false;
    let mut i = 0;
    while i < s.len() && s[i].is_ascii_digit() {
        let digit = u64::from(s[i] - b'0');
        i += 1;
        if saturated {
            continue;
        }
        if value > (MAGNITUDE_LIMIT - 1) / 10 {
            saturated = true;
            continue;
        }
        let next = value * 10 + digit;
        if next > MAGNITUDE_LIMIT {
            saturated = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    Fraction {
        value,
        scale,
        rest: &s[i..],
        consumed: i > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nanos(s: &str) -> i64 {
        parse_duration(s).unwrap().as_nanos()
    }

    #[test]
    fn test_simple_units() {
        assert_eq!(nanos("1h"), 3_600_000_000_000);
        assert_eq!(nanos("30m"), 1_800_000_000_000);
        assert_eq!(nanos("500ms"), 500_000_000);
        assert_eq!(nanos("10s"), 10_000_000_000);
        assert_eq!(nanos("7us"), 7_000);
        assert_eq!(nanos("7µs"), 7_000);
        assert_eq!(nanos("7μs"), 7_000);
        assert_eq!(nanos("3ns"), 3);
    }

    #[test]
    fn test_compound_and_fractional() {
        assert_eq!(nanos("1h30m"), 5_400_000_000_000);
        assert_eq!(nanos("1.5s"), 1_500_000_000);
        assert_eq!(nanos(".5s"), 500_000_000);
        assert_eq!(nanos("2.s"), 2_000_000_000);
        assert_eq!(nanos("1m0.25s"), 60_250_000_000);
    }

    #[test]
    fn test_zero_and_sign() {
        assert_eq!(nanos("0"), 0);
        assert_eq!(nanos("-0"), 0);
        assert_eq!(nanos("+0"), 0);
        assert_eq!(nanos("0s"), 0);
        assert_eq!(nanos("-5s"), -5_000_000_000);
        assert_eq!(nanos("+5s"), 5_000_000_000);

        let negative = parse_duration("-1m").unwrap();
        assert!(negative.is_negative());
        assert_eq!(negative.to_std(), None);
        assert_eq!(
            parse_duration("1m").unwrap().to_std(),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            parse_duration(""),
            Err(DurationError::Invalid(_))
        ));
        assert!(matches!(
            parse_duration("abc"),
            Err(DurationError::Invalid(_))
        ));
        assert!(matches!(
            parse_duration("."),
            Err(DurationError::Invalid(_))
        ));
        assert!(matches!(
            parse_duration("-"),
            Err(DurationError::Invalid(_))
        ));
        assert!(matches!(
            parse_duration("10"),
            Err(DurationError::MissingUnit(_))
        ));
        assert!(matches!(
            parse_duration("1h5"),
            Err(DurationError::MissingUnit(_))
        ));
        assert_eq!(
            parse_duration("1hour"),
            Err(DurationError::UnknownUnit {
                unit: "hour".to_string(),
                input: "1hour".to_string(),
            })
        );
        assert!(matches!(
            parse_duration("5d"),
            Err(DurationError::UnknownUnit { .. })
        ));
        assert!(matches!(
            parse_duration(" 1h"),
            Err(DurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(nanos("9223372036854775807ns"), i64::MAX);
        assert_eq!(nanos("-9223372036854775808ns"), i64::MIN);
        assert!(matches!(
            parse_duration("9223372036854775808ns"),
            Err(DurationError::Overflow(_))
        ));
        assert!(matches!(
            parse_duration("3000000h"),
            Err(DurationError::Overflow(_))
        ));
        assert!(parse_duration("99999999999999999999s").is_err());
    }

    #[test]
    fn test_from_str() {
        let parsed: ParsedDuration = "2m".parse().unwrap();
        assert_eq!(parsed, ParsedDuration::from_nanos(120_000_000_000));
    }
}
