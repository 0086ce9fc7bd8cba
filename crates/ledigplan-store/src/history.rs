use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_HISTORY_ITEMS: usize = 5;

/// A previously calculated range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

/// Newest first, at most [`MAX_HISTORY_ITEMS`].
pub fn normalize(mut history: Vec<SearchHistoryItem>) -> Vec<SearchHistoryItem> {
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history.truncate(MAX_HISTORY_ITEMS);
    history
}

/// Put the range at the top of the history. A range already present has its
/// timestamp refreshed instead of being duplicated.
pub fn record(
    history: Vec<SearchHistoryItem>,
    from_date: NaiveDate,
    to_date: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<SearchHistoryItem> {
    let mut updated = vec![SearchHistoryItem {
        from_date,
        to_date,
        timestamp: now,
    }];
    updated.extend(
        normalize(history)
            .into_iter()
            .filter(|item| !(item.from_date == from_date && item.to_date == to_date)),
    );
    updated.truncate(MAX_HISTORY_ITEMS);
    updated
}
