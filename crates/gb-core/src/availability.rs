use serde::{Deserialize, Serialize};

/// When a location can be visited.
///
/// `hours` is a flat list of `[start, end)` pairs: `[9, 12, 14, 17]` means
/// 09:00-12:00 and 14:00-17:00. Every present constraint must hold unless
/// `alwaysOpen` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Skip every other check.
    #[serde(default)]
    pub always_open: bool,
    /// Weekday names the location is open on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<String>>,
    /// Flattened half-open hour ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Vec<u32>>,
    /// Only this investigator can go here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
}

impl Availability {
    /// Open at all times.
    pub fn always_open() -> Self {
        Self {
            always_open: true,
            ..Self::default()
        }
    }

    /// Restrict to these weekdays.
    pub fn on_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days_of_week = Some(days.into_iter().map(Into::into).collect());
        self
    }

    /// Add an opening window `[start, end)`.
    pub fn between(mut self, start: u32, end: u32) -> Self {
        self.hours.get_or_insert_with(Vec::new).extend([start, end]);
        self
    }

    /// Restrict to one investigator.
    pub fn for_character(mut self, name: impl Into<String>) -> Self {
        self.character = Some(name.into());
        self
    }

    /// The `[start, end)` windows; a trailing unpaired value is ignored.
    pub fn windows(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.hours
            .iter()
            .flat_map(|hours| hours.chunks_exact(2))
            .map(|pair| (pair[0], pair[1]))
    }
}
