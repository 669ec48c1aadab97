use std::collections::HashMap;

use crate::effect::ChoiceEffects;
use crate::entry::{ChoiceTarget, Entry};
use crate::error::{Collection, ContentError, ContentResult};
use crate::investigator::{InvestigatorTemplate, Roster};
use crate::location::LocationTable;

/// Anything that can produce the whole content store at once.
///
/// Loading is all-or-nothing: an implementation returns either every
/// collection or an error, never a partial store.
pub trait ContentSource {
    /// Fetch and parse all content.
    fn load(&self) -> ContentResult<ContentStore>;
}

/// The immutable story data.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    investigators: HashMap<String, InvestigatorTemplate>,
    entries: HashMap<String, Entry>,
    locations: HashMap<String, LocationTable>,
}

impl ContentStore {
    /// Build a store from parsed collections. Entry ids are taken from
    /// their keys.
    pub fn new(
        investigators: HashMap<String, InvestigatorTemplate>,
        entries: HashMap<String, Entry>,
        locations: HashMap<String, LocationTable>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, mut entry)| {
                if !entry.id.is_empty() && entry.id != key {
                    log::warn!("entry keyed '{key}' declares id '{}', using the key", entry.id);
                }
                entry.id.clone_from(&key);
                (key, entry)
            })
            .collect();
        Self {
            investigators,
            entries,
            locations,
        }
    }

    /// Parse the three collections from JSON text.
    pub fn from_json_parts(
        investigators: &str,
        entries: &str,
        locations: &str,
    ) -> ContentResult<Self> {
        let investigators = serde_json::from_str(investigators).map_err(|source| {
            ContentError::Parse {
                collection: Collection::Investigators,
                source,
            }
        })?;
        let entries = serde_json::from_str(entries).map_err(|source| ContentError::Parse {
            collection: Collection::Entries,
            source,
        })?;
        let locations = serde_json::from_str(locations).map_err(|source| ContentError::Parse {
            collection: Collection::Locations,
            source,
        })?;
        Ok(Self::new(investigators, entries, locations))
    }

    /// Add an entry.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.insert(entry.id.clone(), entry);
        self
    }

    /// Add a location table.
    pub fn with_location_table(mut self, name: impl Into<String>, table: LocationTable) -> Self {
        self.locations.insert(name.into(), table);
        self
    }

    /// Add an investigator template.
    pub fn with_investigator(
        mut self,
        name: impl Into<String>,
        template: InvestigatorTemplate,
    ) -> Self {
        self.investigators.insert(name.into(), template);
        self
    }

    /// Look up an entry.
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Look up a location table.
    pub fn location_table(&self, name: &str) -> Option<&LocationTable> {
        self.locations.get(name)
    }

    /// Look up an investigator template.
    pub fn investigator(&self, name: &str) -> Option<&InvestigatorTemplate> {
        self.investigators.get(name)
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of location tables.
    pub fn location_table_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of investigator templates.
    pub fn investigator_count(&self) -> usize {
        self.investigators.len()
    }

    /// Fail unless every roster investigator has a template.
    pub fn require_roster(&self, roster: &Roster) -> ContentResult<()> {
        match roster
            .iter()
            .find(|slot| !self.investigators.contains_key(&slot.name))
        {
            Some(slot) => Err(ContentError::MissingInvestigator(slot.name.clone())),
            None => Ok(()),
        }
    }

    /// Report dangling references and contradictory effect records. The
    /// story still loads and plays; broken links degrade at runtime.
    pub fn validate(&self) -> Vec<ContentWarning> {
        let mut warnings = Vec::new();

        let mut ids: Vec<&String> = self.entries.keys().collect();
        ids.sort();
        for id in ids {
            let entry = &self.entries[id];
            for choice in &entry.choices {
                let from = || entry.id.clone();
                if choice
                    .effects
                    .as_ref()
                    .is_some_and(|e| e.check.is_some() && e.has_direct_fields())
                {
                    warnings.push(ContentWarning::MixedCheckEffects {
                        entry: from(),
                        choice: choice.text.clone(),
                    });
                }
                if let ChoiceEffects::Check(branch) = choice.effects() {
                    for target in [&branch.success, &branch.failure] {
                        if !self.entries.contains_key(target) {
                            warnings.push(ContentWarning::MissingEntry {
                                from: from(),
                                target: target.clone(),
                            });
                        }
                    }
                    continue;
                }
                match choice.target() {
                    ChoiceTarget::Entry(target) if !self.entries.contains_key(target) => {
                        warnings.push(ContentWarning::MissingEntry {
                            from: from(),
                            target: target.to_string(),
                        });
                    }
                    ChoiceTarget::Location(table) if !self.locations.contains_key(table) => {
                        warnings.push(ContentWarning::MissingLocationTable {
                            from: from(),
                            table: table.to_string(),
                        });
                    }
                    _ => {}
                }
            }
        }

        let mut tables: Vec<(&String, &LocationTable)> = self.locations.iter().collect();
        tables.sort_by(|a, b| a.0.cmp(b.0));
        for (table, locations) in tables {
            for (name, location) in locations {
                if !self.entries.contains_key(&location.entry) {
                    warnings.push(ContentWarning::MissingLocationEntry {
                        table: table.clone(),
                        location: name.clone(),
                        target: location.entry.clone(),
                    });
                }
            }
        }

        warnings
    }
}

impl ContentSource for ContentStore {
    fn load(&self) -> ContentResult<ContentStore> {
        Ok(self.clone())
    }
}

/// The three collections as raw JSON text, already fetched.
#[derive(Debug, Clone, Default)]
pub struct JsonParts {
    /// Investigator templates.
    pub investigators: String,
    /// Entries.
    pub entries: String,
    /// Location tables.
    pub locations: String,
}

impl ContentSource for JsonParts {
    fn load(&self) -> ContentResult<ContentStore> {
        ContentStore::from_json_parts(&self.investigators, &self.entries, &self.locations)
    }
}

/// A problem found by [`ContentStore::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentWarning {
    /// A choice or check points at an entry that does not exist.
    MissingEntry {
        /// Entry holding the choice.
        from: String,
        /// Missing entry id.
        target: String,
    },
    /// A location redirect names a table that does not exist.
    MissingLocationTable {
        /// Entry holding the choice.
        from: String,
        /// Missing table.
        table: String,
    },
    /// A location leads to an entry that does not exist.
    MissingLocationEntry {
        /// Table holding the location.
        table: String,
        /// Location name.
        location: String,
        /// Missing entry id.
        target: String,
    },
    /// An effect record has both a check and direct fields; the direct
    /// fields are never applied.
    MixedCheckEffects {
        /// Entry holding the choice.
        entry: String,
        /// Choice label.
        choice: String,
    },
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEntry { from, target } => {
                write!(f, "entry {from}: choice leads to missing entry {target}")
            }
            Self::MissingLocationTable { from, table } => {
                write!(f, "entry {from}: no location table named \"{table}\"")
            }
            Self::MissingLocationEntry {
                table,
                location,
                target,
            } => write!(
                f,
                "location \"{location}\" in {table}: leads to missing entry {target}"
            ),
            Self::MixedCheckEffects { entry, choice } => write!(
                f,
                "entry {entry}: choice \"{choice}\" has a check and direct effects; direct effects are ignored"
            ),
        }
    }
}
