use serde::{Deserialize, Serialize};

use crate::effect::{ChoiceEffects, EffectSpec};
use crate::requirement::{Requirement, RequirementSpec};

/// Suffix on `nextEntry` that turns a choice into a location redirect.
pub const LOCATION_SUFFIX: &str = " Location";

/// A numbered story node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Entry id. May be omitted in content files, where the map key is used.
    #[serde(default)]
    pub id: String,
    /// Optional title shown next to the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Story text.
    #[serde(default)]
    pub description: String,
    /// Extra directions for the reader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Outgoing choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Whether the story ends here.
    #[serde(default)]
    pub end: bool,
}

impl Entry {
    /// Create an entry with the given id and text.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the special instructions.
    pub fn with_instructions(mut self, text: impl Into<String>) -> Self {
        self.special_instructions = Some(text.into());
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Mark as an ending.
    pub fn ending(mut self) -> Self {
        self.end = true;
        self
    }

    /// `id` or `id: title`.
    pub fn heading(&self) -> String {
        match &self.title {
            Some(title) => format!("{}: {title}", self.id),
            None => self.id.clone(),
        }
    }
}

/// An option on an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Label shown to the reader.
    pub text: String,
    /// Target entry id, or `<type> Location` for a location redirect.
    pub next_entry: String,
    /// Gate on offering this choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<RequirementSpec>,
    /// What taking the choice does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectSpec>,
}

/// Where a choice's `nextEntry` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceTarget<'a> {
    /// An entry id.
    Entry(&'a str),
    /// A location table, suffix stripped.
    Location(&'a str),
}

impl Choice {
    /// Create a choice leading to `next_entry`.
    pub fn new(text: impl Into<String>, next_entry: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_entry: next_entry.into(),
            requirements: None,
            effects: None,
        }
    }

    /// Set the requirements.
    pub fn with_requirements(mut self, requirements: RequirementSpec) -> Self {
        self.requirements = Some(requirements);
        self
    }

    /// Set the effects.
    pub fn with_effects(mut self, effects: EffectSpec) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Resolve `nextEntry` into an entry or a location table.
    pub fn target(&self) -> ChoiceTarget<'_> {
        match self.next_entry.strip_suffix(LOCATION_SUFFIX) {
            Some(table) => ChoiceTarget::Location(table),
            None => ChoiceTarget::Entry(&self.next_entry),
        }
    }

    /// Typed requirements; empty when none were authored.
    pub fn requirements(&self) -> Vec<Requirement> {
        self.requirements
            .as_ref()
            .map(RequirementSpec::requirements)
            .unwrap_or_default()
    }

    /// Typed effects; an empty effect list when none were authored.
    pub fn effects(&self) -> ChoiceEffects {
        self.effects
            .as_ref()
            .map(EffectSpec::resolve)
            .unwrap_or(ChoiceEffects::Apply(Vec::new()))
    }
}
