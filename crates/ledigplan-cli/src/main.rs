use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Europe::Stockholm;
use clap::{Parser, Subcommand};
use ledigplan_core::format::parse_date;
use ledigplan_core::holiday::{holidays_for_year, upcoming};
use ledigplan_core::season::Season;
use ledigplan_core::{Holiday, HolidayScope, calculate_with};
use ledigplan_store::{Consent, PreferenceStore, Theme};
use tracing::{debug, info, warn};

mod report;

const INVERTED_RANGE: &str = "Från-datumet måste vara före eller samma som till-datumet";
const MISSING_RANGE: &str = "Ange både --from och --to (ingen sparad period finns)";

#[derive(Parser)]
#[command(
    name = "ledigplan",
    about = "Count working days and Swedish public holidays in a leave period"
)]
struct Cli {
    /// Directory for stored preferences
    #[arg(long, default_value = ".ledigplan")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every day in a leave period
    Calculate {
        /// First day of leave (YYYY-MM-DD, defaults to the remembered period)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Last day of leave (YYYY-MM-DD, defaults to the remembered period)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        /// Use holidays of every year the period touches, not just the first
        #[arg(long)]
        every_year: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Print only the working dates to take off, one per line
        #[arg(long, conflicts_with = "json")]
        dates_only: bool,
    },

    /// List the public holidays of a year
    Holidays {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Only holidays from today onwards
        #[arg(long)]
        upcoming: bool,
    },

    /// Show, clear or rerun recent searches
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Answer or inspect the storage consent prompt
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },

    /// Show the seasonal theme for a date
    Season {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recent searches, newest first
    List,
    /// Forget all recent searches
    Clear,
    /// Recalculate a recent search by its list number
    Run { index: usize },
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

#[derive(Subcommand)]
enum ConsentAction {
    Accept,
    Decline,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    DatesOnly,
}

impl OutputFormat {
    fn from_flags(json: bool, dates_only: bool) -> Self {
        match (json, dates_only) {
            (true, _) => Self::Json,
            (false, true) => Self::DatesOnly,
            (false, false) => Self::Text,
        }
    }
}

/// Today's date in Sweden.
fn today() -> NaiveDate {
    Utc::now().with_timezone(&Stockholm).date_naive()
}

fn print_result<W: Write>(
    out: &mut W,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    scope: HolidayScope,
    format: OutputFormat,
) -> Result<()> {
    let Some(result) = calculate_with(from, to, scope) else {
        match (from, to) {
            (Some(_), Some(_)) => anyhow::bail!(INVERTED_RANGE),
            _ => anyhow::bail!(MISSING_RANGE),
        }
    };
    debug!(
        "{} day(s), {} working, {} holiday(s) in range",
        result.total_days,
        result.working_days,
        result.holidays_in_range.len()
    );
    match format {
        OutputFormat::Text => report::write_result(out, &result),
        OutputFormat::Json => report::write_result_json(out, &result),
        OutputFormat::DatesOnly => report::write_working_dates(out, &result),
    }
}

fn cmd_calculate<W: Write>(
    out: &mut W,
    store: &PreferenceStore,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    scope: HolidayScope,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let remembered = store.last_range();
    let from = from.or(remembered.map(|r| r.from));
    let to = to.or(remembered.map(|r| r.to));

    print_result(out, from, to, scope, format)?;

    if let (Some(from), Some(to)) = (from, to) {
        if let Err(e) = store.remember_range(from, to) {
            warn!("failed to remember period: {e}");
        }
        if let Err(e) = store.add_to_search_history(from, to, now) {
            warn!("failed to record search: {e}");
        }
    }
    Ok(())
}

fn cmd_holidays<W: Write>(
    out: &mut W,
    year: Option<i32>,
    only_upcoming: bool,
    today: NaiveDate,
) -> Result<()> {
    let year = year.unwrap_or(today.year());
    let holidays = holidays_for_year(year);
    if only_upcoming {
        let rest = upcoming(&holidays, today);
        let title = format!("Röda dagar kvar {year} ({})", rest.len());
        report::write_holidays(out, &title, &rest)
    } else {
        let all: Vec<&Holiday> = holidays.iter().collect();
        report::write_holidays(out, &format!("Röda dagar {year}"), &all)
    }
}

fn cmd_history<W: Write>(
    out: &mut W,
    store: &PreferenceStore,
    action: &HistoryAction,
) -> Result<()> {
    match action {
        HistoryAction::List => report::write_history(out, &store.search_history()),
        HistoryAction::Clear => {
            store
                .clear_search_history()
                .context("failed to clear search history")?;
            info!("search history cleared");
            Ok(())
        }
        HistoryAction::Run { index } => {
            let history = store.search_history();
            let item = index
                .checked_sub(1)
                .and_then(|i| history.get(i))
                .with_context(|| format!("no search numbered {index}"))?;
            print_result(
                out,
                Some(item.from_date),
                Some(item.to_date),
                HolidayScope::AnchorYear,
                OutputFormat::Text,
            )?;
            if let Err(e) = store.remember_range(item.from_date, item.to_date) {
                warn!("failed to remember period: {e}");
            }
            Ok(())
        }
    }
}

fn cmd_theme<W: Write>(out: &mut W, store: &PreferenceStore, action: &ThemeAction) -> Result<()> {
    let theme = match action {
        ThemeAction::Show => store.theme(),
        ThemeAction::Toggle => store.toggle_theme().context("failed to save theme")?,
        ThemeAction::Set { theme } => {
            store.set_theme(*theme).context("failed to save theme")?;
            *theme
        }
    };
    writeln!(out, "{theme}")?;
    Ok(())
}

fn cmd_consent<W: Write>(
    out: &mut W,
    store: &PreferenceStore,
    action: &ConsentAction,
) -> Result<()> {
    match action {
        ConsentAction::Accept => store.set_consent(true).context("failed to save consent")?,
        ConsentAction::Decline => store.set_consent(false).context("failed to save consent")?,
        ConsentAction::Status => {}
    }
    let status = match store.consent() {
        Some(Consent::Accepted) => "accepted",
        Some(Consent::Declined) => "declined",
        None => "not answered",
    };
    writeln!(out, "{status}")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = PreferenceStore::new(&cli.data_dir);
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::Calculate {
            from,
            to,
            every_year,
            json,
            dates_only,
        } => {
            let scope = if *every_year {
                HolidayScope::EveryYear
            } else {
                HolidayScope::AnchorYear
            };
            let format = OutputFormat::from_flags(*json, *dates_only);
            cmd_calculate(&mut out, &store, *from, *to, scope, format, Utc::now())?;
        }
        Commands::Holidays { year, upcoming } => {
            cmd_holidays(&mut out, *year, *upcoming, today())?;
        }
        Commands::History { action } => {
            cmd_history(&mut out, &store, action)?;
        }
        Commands::Theme { action } => {
            cmd_theme(&mut out, &store, action)?;
        }
        Commands::Consent { action } => {
            cmd_consent(&mut out, &store, action)?;
        }
        Commands::Season { date } => {
            report::write_season(&mut out, Season::for_date(date.unwrap_or_else(today)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;
    use ledigplan_core::format::format_date_short;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn run<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> Result<String> {
        let mut buf = Vec::new();
        f(&mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn parse_calculate_args() {
        let cli = Cli::try_parse_from([
            "ledigplan",
            "calculate",
            "--from",
            "2025-06-02",
            "--to",
            "2025-06-08",
            "--every-year",
        ])
        .unwrap();

        match cli.command {
            Commands::Calculate {
                from,
                to,
                every_year,
                json,
                dates_only,
            } => {
                assert_eq!(from, Some(date(2025, 6, 2)));
                assert_eq!(to, Some(date(2025, 6, 8)));
                assert!(every_year);
                assert!(!json);
                assert!(!dates_only);
            }
            _ => panic!("expected Calculate command"),
        }
    }

    #[test]
    fn parse_calculate_defaults() {
        let cli = Cli::try_parse_from(["ledigplan", "calculate"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from(".ledigplan"));
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Calculate { from, to, .. } => {
                assert!(from.is_none());
                assert!(to.is_none());
            }
            _ => panic!("expected Calculate command"),
        }
    }

    #[test]
    fn parse_dates_only_flag() {
        let cli = Cli::try_parse_from(["ledigplan", "calculate", "--dates-only"]).unwrap();
        match cli.command {
            Commands::Calculate {
                json, dates_only, ..
            } => {
                assert!(dates_only);
                assert_eq!(OutputFormat::from_flags(json, dates_only), OutputFormat::DatesOnly);
            }
            _ => panic!("expected Calculate command"),
        }
        assert!(
            Cli::try_parse_from(["ledigplan", "calculate", "--json", "--dates-only"]).is_err()
        );
    }

    #[test]
    fn parse_rejects_malformed_date() {
        assert!(Cli::try_parse_from(["ledigplan", "calculate", "--from", "2025-13-01"]).is_err());
    }

    #[test]
    fn parse_holidays_args() {
        let cli = Cli::try_parse_from(["ledigplan", "holidays", "-y", "2024", "--upcoming"]).unwrap();
        match cli.command {
            Commands::Holidays { year, upcoming } => {
                assert_eq!(year, Some(2024));
                assert!(upcoming);
            }
            _ => panic!("expected Holidays command"),
        }
    }

    #[test]
    fn parse_theme_set() {
        let cli = Cli::try_parse_from(["ledigplan", "theme", "set", "light"]).unwrap();
        match cli.command {
            Commands::Theme {
                action: ThemeAction::Set { theme },
            } => assert_eq!(theme, Theme::Light),
            _ => panic!("expected Theme set command"),
        }
        assert!(Cli::try_parse_from(["ledigplan", "theme", "set", "blue"]).is_err());
    }

    #[test]
    fn parse_history_run() {
        let cli = Cli::try_parse_from(["ledigplan", "history", "run", "2"]).unwrap();
        match cli.command {
            Commands::History {
                action: HistoryAction::Run { index },
            } => assert_eq!(index, 2),
            _ => panic!("expected History run command"),
        }
    }

    #[test]
    fn calculate_inverted_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        let err = run(|out| {
            cmd_calculate(
                out,
                &store,
                Some(date(2025, 6, 10)),
                Some(date(2025, 6, 2)),
                HolidayScope::AnchorYear,
                OutputFormat::Text,
                now(),
            )
        })
        .unwrap_err();
        assert_eq!(err.to_string(), INVERTED_RANGE);
    }

    #[test]
    fn calculate_missing_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        let err = run(|out| {
            cmd_calculate(
                out,
                &store,
                Some(date(2025, 6, 2)),
                None,
                HolidayScope::AnchorYear,
                OutputFormat::Text,
                now(),
            )
        })
        .unwrap_err();
        assert_eq!(err.to_string(), MISSING_RANGE);
    }

    #[test]
    fn calculate_records_history_with_consent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        store.set_consent(true).unwrap();

        let out = run(|out| {
            cmd_calculate(
                out,
                &store,
                Some(date(2025, 6, 6)),
                Some(date(2025, 6, 8)),
                HolidayScope::AnchorYear,
                OutputFormat::Text,
                now(),
            )
        })
        .unwrap();
        assert!(out.contains("Sveriges nationaldag"));

        let history = store.search_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].from_date, date(2025, 6, 6));
        assert_eq!(history[0].timestamp, now());

        // Remembered period is used when dates are omitted.
        let out = run(|out| {
            cmd_calculate(
                out,
                &store,
                None,
                None,
                HolidayScope::AnchorYear,
                OutputFormat::Json,
                now(),
            )
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total_days"], 3);
        assert_eq!(value["working_days"], 0);
    }

    #[test]
    fn calculate_dates_only_lists_working_dates() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        let out = run(|out| {
            cmd_calculate(
                out,
                &store,
                Some(date(2025, 6, 2)),
                Some(date(2025, 6, 8)),
                HolidayScope::AnchorYear,
                OutputFormat::DatesOnly,
                now(),
            )
        })
        .unwrap();
        // 6 June is National Day, 7-8 June a weekend.
        assert_eq!(out, "2025-06-02\n2025-06-03\n2025-06-04\n2025-06-05\n");

        let out = run(|out| {
            cmd_calculate(
                out,
                &store,
                Some(date(2025, 6, 6)),
                Some(date(2025, 6, 8)),
                HolidayScope::AnchorYear,
                OutputFormat::DatesOnly,
                now(),
            )
        })
        .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn calculate_without_consent_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        run(|out| {
            cmd_calculate(
                out,
                &store,
                Some(date(2025, 6, 2)),
                Some(date(2025, 6, 2)),
                HolidayScope::AnchorYear,
                OutputFormat::Text,
                now(),
            )
        })
        .unwrap();
        assert!(store.search_history().is_empty());
        assert!(store.last_range().is_none());
    }

    #[test]
    fn history_run_recalculates() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        store.set_consent(true).unwrap();
        store
            .add_to_search_history(date(2025, 12, 22), date(2026, 1, 6), now())
            .unwrap();

        let out = run(|out| cmd_history(out, &store, &HistoryAction::Run { index: 1 })).unwrap();
        assert!(out.contains("Julafton"));
        assert_eq!(store.search_history().len(), 1);

        assert!(run(|out| cmd_history(out, &store, &HistoryAction::Run { index: 0 })).is_err());
        assert!(run(|out| cmd_history(out, &store, &HistoryAction::Run { index: 2 })).is_err());
    }

    #[test]
    fn holidays_upcoming_from_today() {
        let out = run(|out| cmd_holidays(out, Some(2025), true, date(2025, 12, 25))).unwrap();
        assert!(out.starts_with("Röda dagar kvar 2025 (3)"));
        assert!(!out.contains("Julafton"));
        assert!(out.contains("Nyårsafton"));
    }

    #[test]
    fn holidays_defaults_to_current_year() {
        let out = run(|out| cmd_holidays(out, None, false, date(2026, 3, 1))).unwrap();
        assert!(out.starts_with("Röda dagar 2026"));
        assert!(out.contains(&format_date_short(date(2026, 4, 3))));
        assert!(out.contains("Långfredagen"));
    }

    #[test]
    fn theme_and_consent_commands() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());

        assert_eq!(run(|out| cmd_theme(out, &store, &ThemeAction::Show)).unwrap(), "dark\n");
        assert_eq!(run(|out| cmd_theme(out, &store, &ThemeAction::Toggle)).unwrap(), "light\n");
        assert_eq!(store.theme(), Theme::Light);

        assert_eq!(
            run(|out| cmd_consent(out, &store, &ConsentAction::Status)).unwrap(),
            "not answered\n"
        );
        assert_eq!(
            run(|out| cmd_consent(out, &store, &ConsentAction::Accept)).unwrap(),
            "accepted\n"
        );
        assert_eq!(
            run(|out| cmd_consent(out, &store, &ConsentAction::Decline)).unwrap(),
            "declined\n"
        );
    }
}
