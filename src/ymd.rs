//! `YYYYMMDD` codec
//!
//! Dates are encoded as `year * 10000 + month * 100 + day`, with `0` reserved
//! to mean "unset". Validation is strict: `20221032` is rejected, never rolled
//! over to November 1st.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use tracing::trace;

use crate::error::{Error, Result};
use crate::location::Location;

/// Largest value that fits in 8 digits
pub const MAX_YMD: i64 = 99_999_999;

/// Check that `yyyymmdd` is `0` or a real calendar date.
///
/// Not forgiving: month 13, day 32 and February 29th of a common year all
/// fail instead of normalizing into a neighbouring date.
pub fn validate_ymd(yyyymmdd: i64) -> Result<()> {
    if yyyymmdd == 0 {
        return Ok(());
    }
    if yyyymmdd < 0 {
        return Err(Error::Negative(yyyymmdd));
    }
    if yyyymmdd > MAX_YMD {
        return Err(Error::TooManyDigits(yyyymmdd));
    }

    let (year, month, day) = decompose(yyyymmdd as u32);
    match NaiveDate::from_ymd_opt(year, month, day) {
        // reconstructed fields must match the input exactly
        Some(date) if (date.year(), date.month(), date.day()) == (year, month, day) => Ok(()),
        _ => Err(Error::InvalidDate(yyyymmdd)),
    }
}

/// Parse `""` or an 8-digit `YYYYMMDD` string.
///
/// The empty string parses to `0` (unset). Separators, signs, whitespace and
/// any length other than 8 are rejected.
pub fn parse_ymd(s: &str) -> Result<u32> {
    if s.is_empty() {
        return Ok(0);
    }
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Format(s.to_string()));
    }

    let yyyymmdd: u32 = s.parse().map_err(|_| Error::Format(s.to_string()))?;
    validate_ymd(i64::from(yyyymmdd)).map_err(|source| Error::Parse {
        input: s.to_string(),
        source: Box::new(source),
    })?;

    trace!(input = s, yyyymmdd, "parsed date");
    Ok(yyyymmdd)
}

/// Split into `(year, month, day)`. `0` gives `(0, 0, 0)`.
pub fn decompose(yyyymmdd: u32) -> (i32, u32, u32) {
    let year = (yyyymmdd / 10_000) as i32;
    let month = (yyyymmdd % 10_000) / 100;
    let day = yyyymmdd % 100;
    (year, month, day)
}

/// Encode a calendar date. Years outside `0..=9999` cannot be encoded.
pub fn date_to_ymd(date: NaiveDate) -> Result<u32> {
    let yyyymmdd =
        i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day());
    if date.year() < 0 {
        return Err(Error::Negative(yyyymmdd));
    }
    validate_ymd(yyyymmdd)?;
    Ok(yyyymmdd as u32)
}

/// Encode the date of `dt` as seen in its own time zone
pub fn datetime_to_ymd<Z: TimeZone>(dt: &DateTime<Z>) -> Result<u32> {
    date_to_ymd(dt.date_naive())
}

/// Decode to a calendar date; `None` when unset or not a real date
pub fn ymd_to_date(yyyymmdd: u32) -> Option<NaiveDate> {
    if yyyymmdd == 0 {
        return None;
    }
    let (year, month, day) = decompose(yyyymmdd);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Midnight of the encoded date in `location` (process local time if `None`).
///
/// Does not resolve: an unset value maps to the Unix epoch, as does any value
/// that skipped validation and turns out not to be a date.
///
/// A midnight skipped by a DST jump becomes the first wall time after the gap,
/// which is still on the same date. A whole calendar day skipped by a zone
/// (e.g. `20111230` in `Pacific/Apia`) has no wall time at all; it lands on
/// the next day, so encoding the result back gives a different value.
pub fn ymd_to_datetime(yyyymmdd: u32, location: Option<&Location>) -> DateTime<FixedOffset> {
    match ymd_to_date(yyyymmdd) {
        Some(date) => location.copied().unwrap_or_default().midnight(date),
        // Default for DateTime<Utc> is the Unix epoch
        None => DateTime::<Utc>::default().fixed_offset(),
    }
}

/// `"YYYYMMDD"`, or `""` when unset
pub fn format_ymd(yyyymmdd: u32) -> String {
    if yyyymmdd == 0 {
        return String::new();
    }
    format!("{:08}", yyyymmdd)
}

/// `"YYYY{sep}MM{sep}DD"`, or `""` when unset
pub fn format_dir_path(yyyymmdd: u32, separator: char) -> String {
    if yyyymmdd == 0 {
        return String::new();
    }
    let (year, month, day) = decompose(yyyymmdd);
    format!("{:04}{sep}{:02}{sep}{:02}", year, month, day, sep = separator)
}
