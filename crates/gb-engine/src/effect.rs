//! The effect applicator.

use std::fmt;

use chrono::NaiveDateTime;
use gb_core::Effect;
use gb_core::time::format_date;

use crate::session::Session;

/// A visible change made by an effect, published on the stat channel.
#[derive(Debug, Clone, PartialEq)]
pub enum StatChange {
    /// Health moved.
    Health {
        /// Before.
        from: i32,
        /// After.
        to: i32,
    },
    /// Sanity moved.
    Sanity {
        /// Before.
        from: i32,
        /// After.
        to: i32,
    },
    /// A new item is carried.
    ItemGained(String),
    /// The clock moved forward.
    TimeAdvanced {
        /// Hours passed.
        hours: f64,
        /// The new time.
        now: NaiveDateTime,
    },
}

impl fmt::Display for StatChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health { from, to } => write!(f, "Health {from} -> {to}"),
            Self::Sanity { from, to } => write!(f, "Sanity {from} -> {to}"),
            Self::ItemGained(item) => write!(f, "Gained {item}"),
            Self::TimeAdvanced { hours, now } => {
                write!(f, "{hours} hours pass; it is now {}", format_date(*now))
            }
        }
    }
}

/// Apply effects in health, sanity, inventory, time order, whatever order
/// they are given in. Returns what changed.
pub fn apply_effects(effects: &[Effect], session: &mut Session) -> Vec<StatChange> {
    let mut ordered: Vec<&Effect> = effects.iter().collect();
    ordered.sort_by_key(|e| e.order());

    let mut changes = Vec::new();
    for effect in ordered {
        match effect {
            Effect::HealthSet(target) => {
                let from = session.health;
                let to = session.adjust_health(target.saturating_sub(from));
                if from != to {
                    changes.push(StatChange::Health { from, to });
                }
            }
            Effect::SanitySet(target) => {
                let from = session.sanity;
                let to = session.adjust_sanity(target.saturating_sub(from));
                if from != to {
                    changes.push(StatChange::Sanity { from, to });
                }
            }
            Effect::InventoryGrant(items) => {
                for item in items {
                    if session.grant_item(item) {
                        changes.push(StatChange::ItemGained(item.clone()));
                    }
                }
            }
            Effect::TimeAdvance(hours) => {
                if session.advance_time(*hours) {
                    changes.push(StatChange::TimeAdvanced {
                        hours: *hours,
                        now: session.current_date,
                    });
                }
            }
        }
    }
    for change in &changes {
        log::debug!("{}: {change}", session.character);
    }
    changes
}
