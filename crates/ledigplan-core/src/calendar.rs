use chrono::{Datelike, NaiveDate, Weekday};

/// Saturday or Sunday, independent of locale week-start conventions.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns every date in the inclusive range [start, end], ascending.
/// Empty when `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    std::iter::successors(Some(start), |d| d.succ_opt())
        .take_while(|d| *d <= end)
        .collect()
}

/// Calendar years touched by [start, end]. Empty when `start > end`.
pub fn years_in_range(start: NaiveDate, end: NaiveDate) -> Vec<i32> {
    if start > end {
        return Vec::new();
    }
    (start.year()..=end.year()).collect()
}
