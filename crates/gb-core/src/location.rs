use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::availability::Availability;

/// A selectable place inside a location table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Entry the location leads to.
    pub entry: String,
    /// When the location can be chosen.
    #[serde(default)]
    pub availability: Availability,
}

impl Location {
    /// A location leading to `entry`, open at all times.
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            availability: Availability::always_open(),
        }
    }

    /// Replace the availability.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }
}

/// Location name to location, listed in name order.
pub type LocationTable = BTreeMap<String, Location>;
