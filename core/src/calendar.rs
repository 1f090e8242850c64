//! Calendar-month arithmetic for date-bucketed analyses.

use chrono::{Datelike, NaiveDate};

/// Whole-month difference between two dates, ignoring day-of-month.
/// Pure (year, month) arithmetic: Jan 31 -> Feb 1 is one month.
pub fn month_span(first: NaiveDate, last: NaiveDate) -> i64 {
    let years = i64::from(last.year()) - i64::from(first.year());
    let months = i64::from(last.month() as i32) - i64::from(first.month() as i32);
    years * 12 + months
}

/// Truncate a date to its (year, month) bucket.
pub fn month_bucket(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
