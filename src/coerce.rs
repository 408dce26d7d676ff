//! String-to-scalar coercion.
//!
//! Each parser takes the raw string plus the [`ScalarKind`] it is parsing for,
//! so failures name the exact target type (`int16`, `complex64`, ...).
//! [`coerce_into`] applies a raw value at a leaf [`Place`], allocating through
//! pointers on the way.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;
use std::time::Duration;

use num_complex::Complex;

use crate::error::{AssignError, CoerceError};
use crate::shape::Place;
use crate::types::ScalarKind;

/// Write `raw` into the leaf at `place`.
///
/// Pointers are allocated on demand and coerced through. Records, maps,
/// sequences and dynamic values have no coercion rule at a leaf.
pub fn coerce_into(place: Place<'_>, raw: &str) -> Result<(), AssignError> {
    match place {
        Place::Scalar(scalar) => Ok(scalar.assign(raw)?),
        Place::Pointer(pointer) => {
            let referent = pointer.get_or_alloc().ok_or_else(|| AssignError::Inaccessible {
                target: "shared pointer".into(),
            })?;
            coerce_into(referent, raw)
        }
        other => Err(AssignError::UnsupportedKind {
            kind: other.kind(),
            raw: raw.to_string(),
        }),
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::new(ScalarKind::Bool, raw, "invalid syntax")),
    }
}

/// Base-10 signed integer, range-checked by the width of `T`.
pub fn parse_int<T>(raw: &str, kind: ScalarKind) -> Result<T, CoerceError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse().map_err(|e| CoerceError::new(kind, raw, e))
}

/// Base-10 unsigned integer. A sign prefix is rejected.
pub fn parse_uint<T>(raw: &str, kind: ScalarKind) -> Result<T, CoerceError>
where
    T: FromStr<Err = ParseIntError>,
{
    if raw.starts_with('+') {
        return Err(CoerceError::new(kind, raw, "invalid digit found in string"));
    }
    raw.parse().map_err(|e| CoerceError::new(kind, raw, e))
}

/// Floating point at the precision of `T`. Finite literals that overflow the
/// precision are a range error rather than a silent infinity.
pub fn parse_float<T>(raw: &str, kind: ScalarKind) -> Result<T, CoerceError>
where
    T: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value: T = raw.parse().map_err(|e| CoerceError::new(kind, raw, e))?;
    let wide: f64 = value.into();
    if wide.is_infinite() && !is_infinity_literal(raw) {
        return Err(CoerceError::new(kind, raw, "value out of range"));
    }
    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Complex literal such as `1+2i`, `-3.5i` or `(2-1i)`.
pub fn parse_complex<T>(raw: &str, kind: ScalarKind) -> Result<Complex<T>, CoerceError>
where
    Complex<T>: FromStr,
    <Complex<T> as FromStr>::Err: fmt::Display,
{
    let literal = raw
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(raw);
    if literal.is_empty() {
        return Err(CoerceError::new(kind, raw, "empty complex literal"));
    }
    literal.parse().map_err(|e| CoerceError::new(kind, raw, e))
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest accepted fraction precision; further digits cannot change the
/// result at nanosecond resolution.
const MAX_FRACTION_DIGITS: usize = 18;

/// Duration literal: a sequence of decimal magnitudes with unit suffixes
/// (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`), e.g. `300ms`, `1.5h`, `2h45m`.
///
/// A bare `0` is accepted without unit. Negative durations are rejected since
/// [`Duration`] is unsigned.
pub fn parse_duration(raw: &str) -> Result<Duration, CoerceError> {
    let fail = |reason: &str| CoerceError::new(ScalarKind::Duration, raw, reason);

    let (negative, mut rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(fail("invalid duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(fail("invalid duration"));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, remainder) = after_number.split_at(unit_len);
        let scale = match unit {
            "" => return Err(fail("missing unit in duration")),
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            _ => return Err(fail(&format!("unknown unit {unit:?} in duration"))),
        };

        let mut nanos = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|n| n.checked_mul(scale))
                .ok_or_else(|| fail("duration out of range"))?
        };
        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u128 = digits.parse().map_err(|_| fail("invalid duration"))?;
            nanos = nanos
                .checked_add(numerator * scale / 10u128.pow(digits.len() as u32))
                .ok_or_else(|| fail("duration out of range"))?;
        }

        total = total
            .checked_add(nanos)
            .filter(|t| *t <= i64::MAX as u128)
            .ok_or_else(|| fail("duration out of range"))?;
        rest = remainder;
    }

    if negative && total != 0 {
        return Err(fail("negative durations are not supported"));
    }
    Ok(Duration::from_nanos(total as u64))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(end)
}
