//! Date and time conversions for schedule slots.
//!
//! Every conversion in this module uses one fixed, locale-independent
//! convention: calendar dates are `YYYY-MM-DD`, wall-clock times are
//! 24-hour `HH:MM`, and absolute instants are the combined date-time
//! interpreted as UTC, expressed in milliseconds since the Unix epoch.
//! There is no hidden process-wide calendar state; every function here is
//! pure and deterministic.
//!
//! Week days are Monday-first and 1-indexed: Monday = 1 .. Sunday = 7.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::errors::ScheduleResult;

/// Format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format for wall-clock times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// The seven week days in index order, Monday first.
///
/// `WEEK_DAYS[n - 1]` is the day with index `n` as reported by
/// [`weekday_index`].
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn parse_date(input: &str) -> ScheduleResult<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input, DATE_FORMAT)?)
}

pub fn parse_time(input: &str) -> ScheduleResult<NaiveTime> {
    Ok(NaiveTime::parse_from_str(input, TIME_FORMAT)?)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Combines a date and a time of day into a single date-time.
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// The absolute instant of `date` at `time`, in milliseconds since the
/// Unix epoch.
pub fn instant_millis(date: NaiveDate, time: NaiveTime) -> i64 {
    date.and_time(time).and_utc().timestamp_millis()
}

pub fn add_minutes(datetime: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    datetime + Duration::minutes(minutes)
}

/// Whole minutes between two date-times, `end - start`.
///
/// Inputs built from `HH:MM` times are minute-aligned, so the division of
/// the millisecond difference is exact.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Index of a week day under the Monday-first convention (1..=7).
pub fn weekday_index(day: Weekday) -> u32 {
    day.number_from_monday()
}

/// The week day with the given Monday-first index, if `index` is in 1..=7.
pub fn weekday_from_index(index: u32) -> Option<Weekday> {
    let position = index.checked_sub(1)? as usize;
    WEEK_DAYS.get(position).copied()
}
