//! Configuration for a game.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use gb_core::Roster;
use gb_mechanics::{DiceSource, RngDice};

/// Configuration for a game.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Dice seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// In-world date and time every investigator starts at.
    pub start_date: NaiveDateTime,
    /// Locale a fresh session starts in.
    pub starting_locale: String,
    /// Appended to the text of ending entries.
    pub end_marker: String,
    /// How long transient notifications stay up.
    pub notify_window: Duration,
    /// Succession order.
    pub roster: Roster,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_date: NaiveDate::from_ymd_opt(1925, 10, 12)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .unwrap_or_default(),
            starting_locale: "Arkham".to_string(),
            end_marker: "*** THE END ***".to_string(),
            notify_window: Duration::from_secs(6),
            roster: Roster::standard(),
        }
    }
}

impl EngineConfig {
    /// Seed the dice for reproducible play.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting date.
    pub fn with_start_date(mut self, date: NaiveDateTime) -> Self {
        self.start_date = date;
        self
    }

    /// Set the starting locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.starting_locale = locale.into();
        self
    }

    /// Set the ending marker.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }

    /// Set the notification window.
    pub fn with_notify_window(mut self, window: Duration) -> Self {
        self.notify_window = window;
        self
    }

    /// Replace the roster.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// The dice this configuration asks for.
    pub fn dice(&self) -> Box<dyn DiceSource> {
        match self.seed {
            Some(seed) => Box::new(RngDice::seeded(seed)),
            None => Box::new(RngDice::from_os_rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.start_date.year(), 1925);
        assert_eq!(cfg.start_date.hour(), 8);
        assert_eq!(cfg.starting_locale, "Arkham");
        assert_eq!(cfg.notify_window, Duration::from_secs(6));
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_locale("Kingsport")
            .with_end_marker("FIN");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.starting_locale, "Kingsport");
        assert_eq!(cfg.end_marker, "FIN");
    }

    #[test]
    fn seeded_dice_repeat() {
        let cfg = EngineConfig::default().with_seed(11);
        let mut a = cfg.dice();
        let mut b = cfg.dice();
        assert_eq!(a.roll_die(100), b.roll_die(100));
    }
}
