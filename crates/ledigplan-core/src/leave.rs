use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::holiday::{self, Holiday};

/// Which years' holidays are consulted for a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolidayScope {
    /// Only the year of `from`. A range crossing New Year does not see the
    /// following year's holidays.
    #[default]
    AnchorYear,
    /// Every calendar year the range touches.
    EveryYear,
}

/// Classification of a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub date_string: String,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub is_working_day: bool,
}

impl DayInfo {
    /// Classify `date`; `holiday` is the holiday falling on it, if any.
    pub fn classify(date: NaiveDate, holiday: Option<&Holiday>) -> Self {
        let is_weekend = calendar::is_weekend(date);
        let is_holiday = holiday.is_some();
        Self {
            date,
            date_string: date.format("%Y-%m-%d").to_string(),
            is_weekend,
            is_holiday,
            holiday_name: holiday.map(|h| h.name.clone()),
            is_working_day: !is_weekend && !is_holiday,
        }
    }
}

/// Outcome of classifying an inclusive leave range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_days: usize,
    pub working_days: usize,
    /// Calendar days consumed by the leave; equal to `total_days`.
    pub days_to_take_off: usize,
    pub holidays: Vec<Holiday>,
    pub holidays_in_range: Vec<Holiday>,
    pub all_days: Vec<DayInfo>,
}

impl CalculationResult {
    /// Working days inside the range, i.e. days that need leave.
    pub fn working_days_to_take_off(&self) -> Vec<&DayInfo> {
        self.all_days.iter().filter(|d| d.is_working_day).collect()
    }

    /// Weekend and holiday days inside the range.
    pub fn days_off(&self) -> Vec<&DayInfo> {
        self.all_days.iter().filter(|d| !d.is_working_day).collect()
    }

    /// Working dates as `YYYY-MM-DD`, one per line.
    pub fn working_dates_text(&self) -> String {
        self.working_days_to_take_off()
            .iter()
            .map(|d| d.date_string.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Classify every day in [from, to] using the holidays of `from`'s year.
///
/// Returns `None` when either endpoint is missing or `from > to`.
pub fn calculate(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<CalculationResult> {
    calculate_with(from, to, HolidayScope::AnchorYear)
}

/// Like [`calculate`], with an explicit choice of which years' holidays apply.
pub fn calculate_with(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    scope: HolidayScope,
) -> Option<CalculationResult> {
    let (from, to) = (from?, to?);
    if from > to {
        return None;
    }

    let holidays: Vec<Holiday> = match scope {
        HolidayScope::AnchorYear => holiday::holidays_for_year(from.year()),
        HolidayScope::EveryYear => calendar::years_in_range(from, to)
            .into_iter()
            .flat_map(holiday::holidays_for_year)
            .collect(),
    };

    let holidays_in_range: Vec<Holiday> = holidays
        .iter()
        .filter(|h| h.date >= from && h.date <= to)
        .cloned()
        .collect();

    // First holiday wins when two share a date.
    let mut by_date: BTreeMap<NaiveDate, &Holiday> = BTreeMap::new();
    for h in &holidays_in_range {
        by_date.entry(h.date).or_insert(h);
    }

    let all_days: Vec<DayInfo> = calendar::days_in_range(from, to)
        .into_iter()
        .map(|date| DayInfo::classify(date, by_date.get(&date).copied()))
        .collect();

    let total_days = all_days.len();
    let working_days = all_days.iter().filter(|d| d.is_working_day).count();

    Some(CalculationResult {
        total_days,
        working_days,
        days_to_take_off: total_days,
        holidays,
        holidays_in_range,
        all_days,
    })
}
