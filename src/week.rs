//! Week arithmetic helpers.
//!
//! The roster week runs Monday through Sunday. Weekdays are indexed
//! 0 (Monday) through 6 (Sunday) throughout the crate, matching the
//! indices stored in raw preference records.

use chrono::{Datelike, Days, NaiveDate};

/// Days in one roster week.
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday index of a date: 0 = Monday .. 6 = Sunday.
#[inline]
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Whether a date falls on Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    weekday_index(date) >= 5
}

/// Whether the ISO week number of a date is odd.
///
/// Rotation parity and the legacy alternating-Friday rule are both
/// anchored on the ISO week of the target date.
#[inline]
pub fn iso_week_is_odd(date: NaiveDate) -> bool {
    date.iso_week().week() % 2 == 1
}

/// All seven dates of the week starting at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Days::new(i as u64))
}
