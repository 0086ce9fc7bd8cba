use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Seasonal theme, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
    Halloween,
    Christmas,
}

impl Season {
    /// October is always Halloween and December always Christmas; the other
    /// boundaries follow the astronomical seasons.
    pub fn for_date(date: NaiveDate) -> Self {
        match (date.month(), date.day()) {
            (10, _) => Season::Halloween,
            (12, _) => Season::Christmas,
            (1 | 2, _) => Season::Winter,
            (3, d) if d < 20 => Season::Winter,
            (3..=5, _) => Season::Spring,
            (6, d) if d < 21 => Season::Spring,
            (6..=8, _) => Season::Summer,
            (9, d) if d < 23 => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// Swedish name.
    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "Vinter",
            Season::Spring => "Vår",
            Season::Summer => "Sommar",
            Season::Fall => "Höst",
            Season::Halloween => "Halloween",
            Season::Christmas => "Jul",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Season::Winter => "❄️",
            Season::Spring => "🌸",
            Season::Summer => "☀️",
            Season::Fall => "🍂",
            Season::Halloween => "🎃",
            Season::Christmas => "🎄",
        }
    }
}
