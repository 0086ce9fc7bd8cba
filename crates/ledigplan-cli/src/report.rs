use std::io::Write;

use anyhow::Result;
use ledigplan_core::format::{
    format_date_display, format_date_long, format_date_short, format_weekday,
};
use ledigplan_core::season::Season;
use ledigplan_core::{CalculationResult, DayInfo, Holiday};
use ledigplan_store::SearchHistoryItem;

fn day_status(day: &DayInfo) -> &str {
    match (&day.holiday_name, day.is_weekend) {
        (Some(name), _) => name.as_str(),
        (None, true) => "helg",
        (None, false) => "arbetsdag",
    }
}

fn write_days<W: Write>(out: &mut W, title: &str, days: &[&DayInfo]) -> Result<()> {
    writeln!(out, "{title} ({})", days.len())?;
    for day in days {
        writeln!(
            out,
            "  {:<12} {:<8} {}",
            day.date_string,
            format_weekday(day.date),
            day_status(day)
        )?;
    }
    Ok(())
}

/// Human-readable summary of a calculation.
pub fn write_result<W: Write>(out: &mut W, result: &CalculationResult) -> Result<()> {
    if let (Some(first), Some(last)) = (result.all_days.first(), result.all_days.last()) {
        writeln!(
            out,
            "Period: {} till {}",
            format_date_long(first.date),
            format_date_long(last.date)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "  {:<22} {}", "Dagar att ta ledigt:", result.days_to_take_off)?;
    writeln!(out, "  {:<22} {}", "Arbetsdagar:", result.working_days)?;
    writeln!(out, "  {:<22} {}", "Totalt antal dagar:", result.total_days)?;
    writeln!(out, "  {:<22} {}", "Röda dagar i perioden:", result.holidays_in_range.len())?;
    writeln!(out, "---")?;
    write_days(out, "Arbetsdagar att ta ledigt", &result.working_days_to_take_off())?;
    write_days(out, "Lediga dagar", &result.days_off())?;
    Ok(())
}

pub fn write_result_json<W: Write>(out: &mut W, result: &CalculationResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}

/// Working dates to take off, one ISO date per line. Writes nothing when
/// the period has none.
pub fn write_working_dates<W: Write>(out: &mut W, result: &CalculationResult) -> Result<()> {
    let text = result.working_dates_text();
    if !text.is_empty() {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

pub fn write_holidays<W: Write>(out: &mut W, title: &str, holidays: &[&Holiday]) -> Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "---")?;
    for h in holidays {
        writeln!(
            out,
            "  {:<12} {:<8} {}",
            format_date_short(h.date),
            format_weekday(h.date),
            h.name
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Totalt: {} röda dag(ar)", holidays.len())?;
    Ok(())
}

pub fn write_history<W: Write>(out: &mut W, history: &[SearchHistoryItem]) -> Result<()> {
    if history.is_empty() {
        writeln!(out, "Inga tidigare sökningar.")?;
        return Ok(());
    }
    for (i, item) in history.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} till {}",
            i + 1,
            format_date_display(item.from_date),
            format_date_display(item.to_date)
        )?;
    }
    Ok(())
}

pub fn write_season<W: Write>(out: &mut W, season: Season) -> Result<()> {
    writeln!(out, "{} {}", season.emoji(), season.name())?;
    Ok(())
}
