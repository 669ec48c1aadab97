//! The Gamebook engine.
//!
//! [`Game`] walks the entry graph: it filters choices by their requirements,
//! dispatches direct jumps, location redirects and skill-check branches,
//! applies effects to the [`Session`], and hands the investigator roster
//! over to the next investigator when the caller signals a death. All
//! presentation goes through a [`RenderSink`]; saves go through a
//! [`SessionStore`].

pub mod allocation;
pub mod availability;
pub mod config;
pub mod effect;
pub mod error;
pub mod game;
pub mod lifecycle;
pub mod persistence;
pub mod render;
pub mod requirement;
pub mod session;

pub use allocation::SkillAllocator;
pub use availability::is_available;
pub use config::EngineConfig;
pub use effect::{StatChange, apply_effects};
pub use error::{EngineError, EngineResult};
pub use game::{Game, Step};
pub use lifecycle::{InvestigatorState, Lifecycle};
pub use persistence::{JsonFileStore, MemoryStore, SessionStore};
pub use render::{Channel, MemorySink, Notification, RenderSink};
pub use requirement::{requirement_met, requirements_met};
pub use session::{CombatState, Session};
