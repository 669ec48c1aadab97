//! The mutable state of one investigator's run.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};
use gb_core::{InvestigatorTemplate, RosterSlot};
use gb_mechanics::CheckSubject;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Combat bookkeeping; reset whenever a new investigator takes over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatState {
    /// A fight is in progress.
    pub is_active: bool,
}

/// The game state for the active investigator.
///
/// Only `visited_entries` survives a death; everything else is rebuilt from
/// the next investigator's template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Entry on screen.
    pub current_entry: String,
    /// Active investigator.
    pub character: String,
    /// Current health. Not clamped.
    pub health: i32,
    /// Current sanity. Not clamped.
    pub sanity: i32,
    /// Stats.
    pub stats: BTreeMap<String, i32>,
    /// Skill values.
    pub skills: BTreeMap<String, i32>,
    /// Carried items, without duplicates.
    pub inventory: Vec<String>,
    /// In-world clock.
    pub current_date: NaiveDateTime,
    /// Every entry rendered so far, across investigators, in first-visit order.
    pub visited_entries: Vec<String>,
    /// Checks made today, per skill.
    #[serde(default)]
    pub daily_skill_usage: BTreeMap<String, u32>,
    /// Combat bookkeeping.
    #[serde(default)]
    pub combat: CombatState,
    /// Town or region the investigator is in.
    pub current_locale: String,
    /// Pending story events.
    #[serde(default)]
    pub scheduled_events: Vec<String>,
    /// Vessel the investigator is aboard, if any.
    #[serde(default)]
    pub ship: Option<String>,
    /// Skill points still to distribute.
    #[serde(default)]
    pub unallocated_points: u32,
    /// Position in the roster.
    pub roster_index: usize,
}

impl Session {
    /// A fresh session for the investigator in `slot`.
    pub fn for_investigator(
        index: usize,
        slot: &RosterSlot,
        template: &InvestigatorTemplate,
        config: &EngineConfig,
    ) -> Self {
        let mut session = Self {
            current_entry: slot.start_entry.clone(),
            character: slot.name.clone(),
            health: template.health,
            sanity: template.sanity,
            stats: template.stats.clone(),
            skills: template.skills.clone(),
            inventory: Vec::new(),
            current_date: config.start_date,
            visited_entries: Vec::new(),
            daily_skill_usage: BTreeMap::new(),
            combat: CombatState::default(),
            current_locale: config.starting_locale.clone(),
            scheduled_events: Vec::new(),
            ship: None,
            unallocated_points: template.unallocated_points,
            roster_index: index,
        };
        for item in &template.inventory {
            session.grant_item(item);
        }
        session
    }

    /// Add to health; returns the new value.
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        self.health = self.health.saturating_add(delta);
        self.health
    }

    /// Add to sanity; returns the new value.
    pub fn adjust_sanity(&mut self, delta: i32) -> i32 {
        self.sanity = self.sanity.saturating_add(delta);
        self.sanity
    }

    /// Whether the item is carried.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item unless already carried. Returns true if it was added.
    pub fn grant_item(&mut self, item: &str) -> bool {
        if self.has_item(item) {
            return false;
        }
        self.inventory.push(item.to_string());
        true
    }

    /// Move the clock forward. Crossing midnight clears the daily skill usage.
    ///
    /// Returns false, leaving the clock alone, when `hours` is negative, not
    /// finite, or would carry the date out of range.
    pub fn advance_time(&mut self, hours: f64) -> bool {
        if !hours.is_finite() || hours < 0.0 {
            log::error!("cannot advance the clock by {hours} hours");
            return false;
        }
        let before = self.current_date;
        let Some(after) = TimeDelta::try_minutes((hours * 60.0).round() as i64)
            .and_then(|delta| before.checked_add_signed(delta))
        else {
            log::error!("advancing {hours} hours from {before} leaves the calendar");
            return false;
        };
        self.current_date = after;
        if after.date() != before.date() {
            log::debug!("new day, clearing daily skill usage");
            self.daily_skill_usage.clear();
        }
        true
    }

    /// Count one check against `skill` for today.
    pub fn record_skill_use(&mut self, skill: &str) {
        *self.daily_skill_usage.entry(skill.to_string()).or_default() += 1;
    }

    /// Mark an entry as visited.
    pub fn visit(&mut self, entry: &str) {
        if !self.visited_entries.iter().any(|e| e == entry) {
            self.visited_entries.push(entry.to_string());
        }
    }

    /// Whether an entry has been visited by any investigator.
    pub fn has_visited(&self, entry: &str) -> bool {
        self.visited_entries.iter().any(|e| e == entry)
    }

    /// Health or sanity has run out.
    pub fn is_incapacitated(&self) -> bool {
        self.health <= 0 || self.sanity <= 0
    }

    /// The view a skill check reads.
    pub fn check_subject(&self) -> CheckSubject<'_> {
        CheckSubject {
            skills: &self.skills,
            stats: &self.stats,
            sanity: self.sanity,
            inventory: &self.inventory,
            now: self.current_date,
        }
    }
}
