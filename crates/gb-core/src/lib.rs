//! Content model for Gamebook.
//!
//! Everything here is immutable story data: numbered entries with their
//! choices, the location tables that location redirects open, and the
//! investigator templates the roster is built from. Content is loaded once,
//! as a whole, through a [`ContentSource`].

/// Location availability windows.
pub mod availability;
/// The content store and its loaders.
pub mod content;
/// Choice effects and skill-check branches.
pub mod effect;
/// Story entries and choices.
pub mod entry;
/// Error types used throughout the crate.
pub mod error;
/// Investigator templates and the fixed roster.
pub mod investigator;
/// Location tables.
pub mod location;
/// Choice requirements.
pub mod requirement;
/// In-world date parsing and formatting.
pub mod time;

pub use availability::Availability;
pub use content::{ContentSource, ContentStore, ContentWarning, JsonParts};
pub use effect::{CheckSpec, ChoiceEffects, Effect, EffectSpec, SkillCheckBranch};
pub use entry::{Choice, ChoiceTarget, Entry, LOCATION_SUFFIX};
pub use error::{Collection, ContentError, ContentResult};
pub use investigator::{InvestigatorTemplate, Roster, RosterSlot};
pub use location::{Location, LocationTable};
pub use requirement::{Requirement, RequirementSpec};
