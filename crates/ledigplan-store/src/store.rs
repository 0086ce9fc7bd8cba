use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::history::{self, SearchHistoryItem};
use crate::preferences::{Consent, DateRange, Preferences, Theme};

const PREFERENCES_FILE: &str = "preferences.json";

/// Filesystem-backed store for user preferences.
///
/// Layout: `{root}/preferences.json`. Range and history entries are only kept
/// once the user has accepted storage; the theme is kept regardless.
pub struct PreferenceStore {
    root: PathBuf,
}

impl PreferenceStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path to the preferences document.
    pub fn file_path(&self) -> PathBuf {
        self.root.join(PREFERENCES_FILE)
    }

    /// Read the stored preferences. A missing or unreadable document yields
    /// defaults.
    pub fn load(&self) -> Preferences {
        let path = self.file_path();
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Preferences::default(),
            Err(e) => {
                warn!("{}: failed to read preferences: {e}", path.display());
                return Preferences::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("{}: ignoring corrupt preferences: {e}", path.display());
                Preferences::default()
            }
        }
    }

    /// Write the preferences document, creating the root directory as needed.
    pub fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.file_path();
        std::fs::write(&path, serde_json::to_vec_pretty(prefs)?)?;
        debug!("{}: preferences saved", path.display());
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Preferences)) -> Result<Preferences, StoreError> {
        let mut prefs = self.load();
        f(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    pub fn consent(&self) -> Option<Consent> {
        self.load().consent
    }

    /// Record the consent answer. Declining drops anything kept under consent.
    pub fn set_consent(&self, accepted: bool) -> Result<(), StoreError> {
        self.update(|prefs| {
            if accepted {
                prefs.consent = Some(Consent::Accepted);
            } else {
                prefs.consent = Some(Consent::Declined);
                prefs.last_range = None;
                prefs.history.clear();
            }
        })?;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.load().theme
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.update(|prefs| prefs.theme = theme)?;
        Ok(())
    }

    /// Flip between dark and light, returning the new theme.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let prefs = self.update(|prefs| prefs.theme = prefs.theme.toggle())?;
        Ok(prefs.theme)
    }

    /// The last range entered, if consent was given.
    pub fn last_range(&self) -> Option<DateRange> {
        let prefs = self.load();
        if prefs.has_consented() {
            prefs.last_range
        } else {
            None
        }
    }

    /// Remember the range for the next run. No-op without consent.
    pub fn remember_range(&self, from: NaiveDate, to: NaiveDate) -> Result<(), StoreError> {
        let prefs = self.load();
        if !prefs.has_consented() {
            return Ok(());
        }
        self.update(|prefs| prefs.last_range = Some(DateRange { from, to }))?;
        Ok(())
    }

    /// Recent searches, newest first. Empty without consent.
    pub fn search_history(&self) -> Vec<SearchHistoryItem> {
        let prefs = self.load();
        if !prefs.has_consented() {
            return Vec::new();
        }
        history::normalize(prefs.history)
    }

    /// Record a search. No-op without consent.
    pub fn add_to_search_history(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if !self.load().has_consented() {
            debug!("no storage consent, search not recorded");
            return Ok(());
        }
        self.update(|prefs| {
            prefs.history = history::record(std::mem::take(&mut prefs.history), from, to, now);
        })?;
        Ok(())
    }

    /// Clear recent searches. No-op without consent.
    pub fn clear_search_history(&self) -> Result<(), StoreError> {
        if !self.load().has_consented() {
            return Ok(());
        }
        self.update(|prefs| prefs.history.clear())?;
        Ok(())
    }
}
