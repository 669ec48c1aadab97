//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors the engine reports. Navigation errors are also rendered inline, so
/// the caller only needs to surface them, not recover.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No entry with this id.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// No location table with this name.
    #[error("location table not found: {0}")]
    LocationTableNotFound(String),

    /// Content could not be loaded; the game did not start.
    #[error("content failed to load: {0}")]
    ContentLoadFailure(#[from] gb_core::ContentError),

    /// The selected index is not an offered choice.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// Navigation is blocked until skill points are allocated.
    #[error("allocate {0} skill points before continuing")]
    AllocationPending(u32),

    /// An allocation was submitted with nothing to allocate.
    #[error("no skill allocation is pending")]
    NoAllocationPending,

    /// An allocation spends more points than are available.
    #[error("allocated {requested} points but only {available} are available")]
    AllocationExceedsPoints {
        /// Points in the allocation.
        requested: u32,
        /// Points the investigator has.
        available: u32,
    },

    /// An allocation names a skill the investigator does not have.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// Every investigator is dead.
    #[error("the game is over")]
    GameOver,

    /// A save names an investigator who is not in that roster slot.
    #[error("save for {character} does not match roster slot {index}")]
    RosterMismatch {
        /// Roster index recorded in the save.
        index: usize,
        /// Investigator recorded in the save.
        character: String,
    },

    /// A save key that cannot be used as a slot name.
    #[error("invalid save key: \"{0}\"")]
    InvalidSaveKey(String),

    /// A save could not be encoded or decoded.
    #[error("save data error: {0}")]
    Persistence(#[from] serde_json::Error),

    /// A save could not be read or written.
    #[error("save I/O error: {0}")]
    Io(#[from] std::io::Error),
}
