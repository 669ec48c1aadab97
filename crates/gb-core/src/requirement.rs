use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::optional_date;

/// A requirement record as authored on a choice. Every present field must
/// hold; absent fields hold trivially.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSpec {
    /// The in-world date must be strictly later than this.
    #[serde(default, with = "optional_date", skip_serializing_if = "Option::is_none")]
    pub date_after: Option<NaiveDateTime>,
    /// Only this investigator may take the choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    /// This investigator may not take the choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_not: Option<String>,
}

impl RequirementSpec {
    /// The typed requirements this record describes.
    pub fn requirements(&self) -> Vec<Requirement> {
        let mut out = Vec::new();
        if let Some(date) = self.date_after {
            out.push(Requirement::DateAfter(date));
        }
        if let Some(name) = &self.character {
            out.push(Requirement::CharacterIs(name.clone()));
        }
        if let Some(name) = &self.character_not {
            out.push(Requirement::CharacterIsNot(name.clone()));
        }
        out
    }
}

/// A single gating predicate on a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Current date strictly after the given one.
    DateAfter(NaiveDateTime),
    /// Active investigator is exactly this one.
    CharacterIs(String),
    /// Active investigator is anyone but this one.
    CharacterIsNot(String),
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateAfter(date) => write!(f, "after {date}"),
            Self::CharacterIs(name) => write!(f, "only {name}"),
            Self::CharacterIsNot(name) => write!(f, "not {name}"),
        }
    }
}
