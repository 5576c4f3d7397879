//! Parsing for Asterisk's `<seconds>[.<microseconds>]` event timestamps.

use std::num::ParseIntError;

use chrono::{DateTime, Utc};
use thiserror::Error;

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Errors that can occur while parsing an Asterisk timestamp.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The input was empty.
    #[error("input is empty string")]
    Empty,
    /// The input contained more than one `.`.
    #[error("expected at most one period in string")]
    TooManyPeriods,
    /// Either the seconds or the microseconds component isn't an integer.
    #[error("{0}")]
    BadInt(#[from] ParseIntError),
    /// The timestamp can't be represented.
    #[error("timestamp out of range")]
    OutOfRange,
}

/// Parse an Asterisk CEL timestamp into a UTC instant.
///
/// The input is an integer number of seconds since the Unix epoch, optionally
/// followed by a `.` and an integer number of *microseconds*. The microsecond
/// component is not a decimal fraction: `"1.5"` is one second and five microseconds.
///
/// Sub-second components outside of a single second roll over into the seconds
/// component, e.g. `"0.1000001"` is one second and one microsecond.
pub fn parse_asterisk_timestamp(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    if s.is_empty() {
        return Err(TimestampError::Empty);
    }

    if s.matches('.').count() > 1 {
        return Err(TimestampError::TooManyPeriods);
    }

    let mut parts = s.split('.');

    // Unwrap safety: `split` always yields at least one part.
    #[allow(clippy::unwrap_used)]
    let secs = parts.next().unwrap().parse::<i64>()?;

    let nanos = match parts.next() {
        Some(micros) => micros
            .parse::<i64>()?
            .checked_mul(NANOS_PER_MICRO)
            .ok_or(TimestampError::OutOfRange)?,
        None => 0,
    };

    let secs = secs
        .checked_add(nanos.div_euclid(NANOS_PER_SEC))
        .ok_or(TimestampError::OutOfRange)?;

    // Truncation safety: rem_euclid is always in [0, NANOS_PER_SEC).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nanos = nanos.rem_euclid(NANOS_PER_SEC) as u32;

    DateTime::from_timestamp(secs, nanos).ok_or(TimestampError::OutOfRange)
}
