//! Calendar-day helpers shared by the whole engine.
//!
//! Day semantics in Stratum always operate on [`NaiveDate`] values that were
//! produced from the user's local calendar, never from a UTC date component.
//! The historical bug class this guards against: serializing an instant and
//! splitting off the UTC date shifts the displayed day near midnight in
//! negative-offset zones. Instants (`created_at` and friends) cross into
//! day-land only through [`local_date_of`].

use crate::errors::{Error, Result};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn local_date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` string back into a calendar date.
///
/// Strict inverse of [`local_date_string`]; anything else (timestamps,
/// offsets, partial dates) is rejected rather than interpreted.
///
/// # Errors
/// Returns [`Error::InvalidDate`] when the input does not parse.
pub fn parse_local_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: s.to_string(),
    })
}

/// Today's date on the local wall calendar.
///
/// The only place the engine touches the system clock; everything downstream
/// takes the as-of date as an explicit argument.
#[must_use]
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// The local calendar date an instant fell on.
#[must_use]
pub fn local_date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// The Monday that starts the ISO week containing `date`.
///
/// A Sunday maps back six days, not forward one.
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// The Sunday on or before `date` (activity grids start weeks on Sunday).
#[must_use]
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// First calendar day of the given quarter (1-4), or `None` for an
/// out-of-range quarter number.
#[must_use]
pub fn quarter_start(quarter: u32, year: i32) -> Option<NaiveDate> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1)
}

/// Quarter number (1-4) containing `date`.
#[must_use]
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// First calendar day of the quarter containing `date`.
#[must_use]
pub fn quarter_start_of(date: NaiveDate) -> NaiveDate {
    // Month is one of 1/4/7/10 with day 1, always a valid date
    quarter_start(quarter_of(date), date.year()).unwrap_or(date)
}

/// Signed number of whole calendar days from `from` to `to`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
