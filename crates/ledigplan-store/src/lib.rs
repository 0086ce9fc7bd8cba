//! File-backed user preferences: storage consent, theme, remembered range
//! and recent searches.

pub mod error;
pub mod history;
pub mod preferences;
pub mod store;

pub use error::StoreError;
pub use history::SearchHistoryItem;
pub use preferences::{Consent, DateRange, Preferences, Theme};
pub use store::PreferenceStore;
