//! Readable form that spells out the timestamp as a UTC date and time.
//!
//! The 35-character readable form replaces the first ten digits of the canonical string with a
//! fixed-width `YYYYMMDDThhmmssmmmZ` date-time and keeps the 16 random-field digits unchanged:
//!
//! ```text
//! 01ARZ3NDEKTSV4RRFFQ69G5FAV
//! 20160730T235410259ZTSV4RRFFQ69G5FAV
//! ```
//!
//! Both forms sort in the same order as the underlying values. The readable form is an extension
//! and is not accepted by [`str::parse`](Ulid#impl-FromStr-for-Ulid).

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use fstr::FStr;

use crate::{base32, ParseError, Ulid};

/// Number of characters in the readable string representation.
const READABLE_LEN: usize = 35;

/// Length of the date-time prefix, which ends with `Z`.
const DATE_TIME_LEN: usize = 19;

/// Number of leading canonical digits that the date-time prefix replaces.
const TIMESTAMP_DIGITS: usize = 10;

impl Ulid {
    /// Returns the 35-character readable string representation, or `None` if the timestamp falls
    /// after `9999-12-31T23:59:59.999Z` and cannot fit the four-digit year.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulidx::Ulid;
    ///
    /// let x = "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse::<Ulid>()?;
    /// let y = x.encode_readable().unwrap();
    /// assert_eq!(y.as_str(), "20160730T235410259ZTSV4RRFFQ69G5FAV");
    /// assert_eq!(Ulid::parse_readable(&y), Ok(x));
    /// # Ok::<(), ulidx::ParseError>(())
    /// ```
    pub fn encode_readable(&self) -> Option<FStr<35>> {
        // a 48-bit timestamp always fits in i64
        let date_time = DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms() as i64)?;
        let year = u32::try_from(date_time.year())
            .ok()
            .filter(|&year| year <= 9999)?;

        let mut buffer = [0u8; READABLE_LEN];
        write_digits(&mut buffer[0..4], year);
        write_digits(&mut buffer[4..6], date_time.month());
        write_digits(&mut buffer[6..8], date_time.day());
        buffer[8] = b'T';
        write_digits(&mut buffer[9..11], date_time.hour());
        write_digits(&mut buffer[11..13], date_time.minute());
        write_digits(&mut buffer[13..15], date_time.second());
        write_digits(&mut buffer[15..18], date_time.nanosecond() / 1_000_000);
        buffer[18] = b'Z';
        let canonical = base32::encode(self.as_bytes());
        buffer[DATE_TIME_LEN..].copy_from_slice(&canonical[TIMESTAMP_DIGITS..]);

        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer holds ASCII digits, separators, and base32 digits only
        Some(unsafe { FStr::from_inner_unchecked(buffer) })
    }

    /// Creates an object from the 35-character readable string representation.
    ///
    /// The date-time prefix must be a valid UTC calendar date and time no earlier than the Unix
    /// epoch, with uppercase `T` and `Z` separators. The random-field digits are parsed the same
    /// way as the canonical form.
    pub fn parse_readable(src: &str) -> Result<Self, ParseError> {
        let src = src.as_bytes();
        if src.len() != READABLE_LEN || src[8] != b'T' || src[18] != b'Z' {
            return Err(ParseError::malformed());
        }

        let year = parse_digits(&src[0..4])?;
        let month = parse_digits(&src[4..6])?;
        let day = parse_digits(&src[6..8])?;
        let hour = parse_digits(&src[9..11])?;
        let minute = parse_digits(&src[11..13])?;
        let second = parse_digits(&src[13..15])?;
        let millisecond = parse_digits(&src[15..18])?;

        if !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(ParseError::out_of_range());
        }

        // rejects impossible dates such as February 29 of a common year
        let unix_ts_ms = NaiveDate::from_ymd_opt(year as i32, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, millisecond))
            .map(|date_time| date_time.and_utc().timestamp_millis())
            .ok_or(ParseError::out_of_range())?;
        let unix_ts_ms = u64::try_from(unix_ts_ms).map_err(|_| ParseError::out_of_range())?;

        let mut canonical = base32::encode(Self::from_fields(unix_ts_ms, [0; 10]).as_bytes());
        canonical[TIMESTAMP_DIGITS..].copy_from_slice(&src[DATE_TIME_LEN..]);
        base32::decode(&canonical).map(Self::from_bytes)
    }
}

/// Writes `value` as zero-padded decimal digits filling `dst`.
fn write_digits(dst: &mut [u8], mut value: u32) {
    for e in dst.iter_mut().rev() {
        *e = b'0' + (value % 10) as u8;
        value /= 10;
    }
    debug_assert_eq!(value, 0);
}

/// Parses a fixed-width field consisting solely of ASCII decimal digits.
fn parse_digits(src: &[u8]) -> Result<u32, ParseError> {
    src.iter().try_fold(0u32, |acc, &c| {
        if c.is_ascii_digit() {
            Ok(acc * 10 + (c - b'0') as u32)
        } else {
            Err(ParseError::malformed())
        }
    })
}
