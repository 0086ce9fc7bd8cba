use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// The Swedish public holidays ("röda dagar") tracked by the calendar.
///
/// Christmas Eve, Midsummer Eve and New Year's Eve are not statutory holidays,
/// but are treated as days off in practice and are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwedishHoliday {
    NewYearsDay,
    Epiphany,
    GoodFriday,
    EasterSunday,
    EasterMonday,
    MayDay,
    AscensionDay,
    WhitMonday,
    NationalDay,
    MidsummerEve,
    MidsummerDay,
    AllSaintsDay,
    ChristmasEve,
    ChristmasDay,
    BoxingDay,
    NewYearsEve,
}

impl SwedishHoliday {
    /// Swedish display name.
    pub fn name(self) -> &'static str {
        match self {
            SwedishHoliday::NewYearsDay => "Nyårsdagen",
            SwedishHoliday::Epiphany => "Trettondedag jul",
            SwedishHoliday::GoodFriday => "Långfredagen",
            SwedishHoliday::EasterSunday => "Påskdagen",
            SwedishHoliday::EasterMonday => "Annandag påsk",
            SwedishHoliday::MayDay => "Första maj",
            SwedishHoliday::AscensionDay => "Kristi himmelsfärdsdag",
            SwedishHoliday::WhitMonday => "Annandag pingst",
            SwedishHoliday::NationalDay => "Sveriges nationaldag",
            SwedishHoliday::MidsummerEve => "Midsommarafton",
            SwedishHoliday::MidsummerDay => "Midsommardagen",
            SwedishHoliday::AllSaintsDay => "Alla helgons dag",
            SwedishHoliday::ChristmasEve => "Julafton",
            SwedishHoliday::ChristmasDay => "Juldagen",
            SwedishHoliday::BoxingDay => "Annandag jul",
            SwedishHoliday::NewYearsEve => "Nyårsafton",
        }
    }
}

/// (month, day, holiday) for holidays on the same date every year.
const FIXED_HOLIDAYS: [(u32, u32, SwedishHoliday); 8] = [
    (1, 1, SwedishHoliday::NewYearsDay),
    (1, 6, SwedishHoliday::Epiphany),
    (5, 1, SwedishHoliday::MayDay),
    (6, 6, SwedishHoliday::NationalDay),
    (12, 24, SwedishHoliday::ChristmasEve),
    (12, 25, SwedishHoliday::ChristmasDay),
    (12, 26, SwedishHoliday::BoxingDay),
    (12, 31, SwedishHoliday::NewYearsEve),
];

/// Day offsets from Easter Sunday.
const EASTER_HOLIDAYS: [(i64, SwedishHoliday); 5] = [
    (-2, SwedishHoliday::GoodFriday),
    (0, SwedishHoliday::EasterSunday),
    (1, SwedishHoliday::EasterMonday),
    (39, SwedishHoliday::AscensionDay),
    (50, SwedishHoliday::WhitMonday),
];

/// A public holiday on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    pub kind: SwedishHoliday,
}

impl Holiday {
    pub fn new(date: NaiveDate, kind: SwedishHoliday) -> Self {
        Self {
            date,
            name: kind.name().to_string(),
            kind,
        }
    }

    /// Canonical `YYYY-MM-DD` form of the date.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Easter Sunday for a Gregorian year, using the Oudin congruences.
///
/// Returns `None` only when chrono cannot represent the resulting date.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let month = (h + l - 7 * m + 114).div_euclid(31);
    let day = (h + l - 7 * m + 114).rem_euclid(31) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// First Saturday on or after the given month/day.
fn saturday_on_or_after(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    let from_sunday = i64::from(start.weekday().num_days_from_sunday());
    start.checked_add_signed(Duration::days((6 - from_sunday) % 7))
}

/// Midsummer Eve: the Saturday between June 20 and June 26.
pub fn midsummer_eve(year: i32) -> Option<NaiveDate> {
    saturday_on_or_after(year, 6, 20)
}

/// All Saints' Day: the Saturday between October 31 and November 6.
pub fn all_saints_day(year: i32) -> Option<NaiveDate> {
    saturday_on_or_after(year, 10, 31)
}

fn build_year(year: i32) -> Option<Vec<Holiday>> {
    let mut holidays = Vec::with_capacity(16);

    for (month, day, kind) in FIXED_HOLIDAYS {
        holidays.push(Holiday::new(NaiveDate::from_ymd_opt(year, month, day)?, kind));
    }

    let easter = easter_sunday(year)?;
    for (offset, kind) in EASTER_HOLIDAYS {
        let date = easter.checked_add_signed(Duration::days(offset))?;
        holidays.push(Holiday::new(date, kind));
    }

    let midsummer = midsummer_eve(year)?;
    holidays.push(Holiday::new(midsummer, SwedishHoliday::MidsummerEve));
    holidays.push(Holiday::new(midsummer.succ_opt()?, SwedishHoliday::MidsummerDay));
    holidays.push(Holiday::new(all_saints_day(year)?, SwedishHoliday::AllSaintsDay));

    // Stable: where two holidays share a date the fixed one stays first.
    holidays.sort_by_key(|h| h.date);
    Some(holidays)
}

/// All Swedish public holidays for `year`, sorted ascending by date.
///
/// Coinciding holidays (e.g. Whit Monday on National Day) are both kept.
/// Years outside chrono's representable range produce an empty list.
pub fn holidays_for_year(year: i32) -> Vec<Holiday> {
    build_year(year).unwrap_or_default()
}

/// Holidays falling on or after `today`.
pub fn upcoming(holidays: &[Holiday], today: NaiveDate) -> Vec<&Holiday> {
    holidays.iter().filter(|h| h.date >= today).collect()
}
