use chrono::{Locale, NaiveDate, NaiveTime};

use crate::error::CoreError;

const ISO_DATE: &str = "%Y-%m-%d";

/// `YYYY-MM-DD`, the form date inputs and history entries use.
pub fn format_date_for_input(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Display form; Swedish convention is ISO 8601 as well.
pub fn format_date_display(date: NaiveDate) -> String {
    localized(date, ISO_DATE)
}

/// Swedish long form, e.g. `måndag 2 juni 2025`.
pub fn format_date_long(date: NaiveDate) -> String {
    localized(date, "%A %-d %B %Y")
}

/// Swedish weekday name, e.g. `fredag`.
pub fn format_weekday(date: NaiveDate) -> String {
    localized(date, "%A")
}

/// Short form used in holiday lists, e.g. `6 jun 2025`.
pub fn format_date_short(date: NaiveDate) -> String {
    localized(date, "%-d %b %Y")
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE).map_err(|source| CoreError::InvalidDate {
        input: input.to_string(),
        source,
    })
}

fn localized(date: NaiveDate, fmt: &str) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(fmt, Locale::sv_SE)
        .to_string()
}
