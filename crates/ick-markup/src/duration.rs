//! Duration strings
//!
//! Parses the `5h30m40s` notation: a sequence of decimal numbers, each
//! with an optional fraction and a unit suffix (`ns`, `us`, `µs`, `ms`,
//! `s`, `m`, `h`). A lone `0` needs no unit.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Duration parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("negative duration {0:?}")]
    Negative(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} out of range")]
    Overflow(String),
}

fn unit_scale(unit: &str) -> Option<u128> {
    let scale = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(scale)
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a duration string such as `1h15m` or `1.5s`
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let mut s = input.trim();
    if s.starts_with('-') {
        return Err(DurationError::Negative(input.to_string()));
    }
    if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let (whole, rest) = split_digits(s);
        let (fraction, rest) = match rest.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", rest),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, rest) = rest.split_at(unit_end);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_scale(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

        // digits past nanosecond precision cannot change the result
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| invalid())?;
            let divisor = 10u128.pow(fraction.len() as u32);
            nanos = nanos
                .checked_add(digits * scale / divisor)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(nanos).ok_or_else(overflow)?;
        s = rest;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}
