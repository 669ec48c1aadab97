use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Starting values for an investigator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigatorTemplate {
    /// Starting health.
    pub health: i32,
    /// Starting sanity.
    pub sanity: i32,
    /// Base stats (Strength, Education, ...).
    #[serde(default)]
    pub stats: BTreeMap<String, i32>,
    /// Base skill values.
    #[serde(default)]
    pub skills: BTreeMap<String, i32>,
    /// Starting items.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Skill points the player distributes before play continues.
    #[serde(default)]
    pub unallocated_points: u32,
}

/// One place in the succession order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSlot {
    /// Investigator name; also the template key.
    pub name: String,
    /// Entry the investigator starts at.
    pub start_entry: String,
}

impl RosterSlot {
    /// Create a slot.
    pub fn new(name: impl Into<String>, start_entry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_entry: start_entry.into(),
        }
    }
}

/// The fixed succession order of four investigators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    slots: [RosterSlot; Roster::SIZE],
}

const STANDARD: [(&str, &str); Roster::SIZE] = [
    ("Eleanor Voss", "1"),
    ("Thaddeus Pike", "100"),
    ("Mercy Halloway", "200"),
    ("Ambrose Kell", "300"),
];

impl Roster {
    /// Number of investigators in a roster.
    pub const SIZE: usize = 4;

    /// The order the story is written for.
    pub fn standard() -> Self {
        Self::new(STANDARD.map(|(name, start)| RosterSlot::new(name, start)))
    }

    /// A roster with a custom order.
    pub fn new(slots: [RosterSlot; Roster::SIZE]) -> Self {
        Self { slots }
    }

    /// The slot at `index`.
    pub fn get(&self, index: usize) -> Option<&RosterSlot> {
        self.slots.get(index)
    }

    /// Whether `index` is the final investigator.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= Self::SIZE
    }

    /// Slots in succession order.
    pub fn iter(&self) -> impl Iterator<Item = &RosterSlot> {
        self.slots.iter()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order() {
        let roster = Roster::standard();
        let names: Vec<_> = roster.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Eleanor Voss", "Thaddeus Pike", "Mercy Halloway", "Ambrose Kell"]
        );
        assert_eq!(roster.get(0).unwrap().start_entry, "1");
        assert!(roster.get(4).is_none());
    }

    #[test]
    fn last_slot() {
        let roster = Roster::standard();
        assert!(!roster.is_last(0));
        assert!(!roster.is_last(2));
        assert!(roster.is_last(3));
    }

    #[test]
    fn template_defaults() {
        let t: InvestigatorTemplate =
            serde_json::from_str(r#"{"health": 10, "sanity": 60}"#).unwrap();
        assert!(t.skills.is_empty());
        assert!(t.inventory.is_empty());
        assert_eq!(t.unallocated_points, 0);
    }
}
