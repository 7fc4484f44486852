//! Month geometry for the calendar grid. All functions are pure; the week
//! start convention is always an explicit parameter so results do not
//! depend on any process-wide locale.

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Number of days in `date`'s month.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = start_of_month(date);
    let next = first + Months::new(1);
    (next - first).num_days() as u32
}

/// First day of `date`'s month.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// 1-based position of `date`'s weekday in a week starting on
/// `week_start`, wrapping. With a Monday start a Sunday date yields 7.
pub fn weekday_offset(date: NaiveDate, week_start: Weekday) -> u32 {
    (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7 + 1
}

/// Number of week-of-month buckets the month spans under the given week
/// start convention.
pub fn weeks_in_month(date: NaiveDate, week_start: Weekday) -> u32 {
    let lead = weekday_offset(start_of_month(date), week_start) - 1;
    (lead + days_in_month(date)).div_ceil(7)
}

/// The seven weekday identifiers rotated to begin at `week_start`, for
/// header rendering.
pub fn weekday_labels(week_start: Weekday) -> [Weekday; 7] {
    let mut labels = [week_start; 7];
    let mut day = week_start;
    for slot in labels.iter_mut() {
        *slot = day;
        day = day.succ();
    }
    labels
}
