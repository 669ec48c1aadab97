//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A dice spec could not be interpreted.
    #[error("invalid dice spec: {0}")]
    InvalidDiceSpec(String),

    /// A difficulty name is not one of normal, hard or extreme.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
