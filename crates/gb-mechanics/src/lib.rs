//! Dice and skill-check mechanics for Gamebook.
//!
//! Provides `NDM` dice notation, an injectable [`DiceSource`] so callers can
//! swap a seeded or scripted source for the real one, percentile skill checks
//! with difficulty, bonus, opposed values and repeated tries, and the
//! time-and-inventory driven custom roll.

pub mod check;
pub mod dice;
pub mod error;

pub use check::custom::{CUSTOM_ROLL_ITEMS, custom_roll, custom_roll_threshold};
pub use check::{
    Attempts, CUSTOM_ROLL, CheckResult, CheckSubject, Difficulty, SANITY, SkillCheck,
    make_skill_check,
};
pub use dice::source::{DiceSource, RngDice, ScriptedDice};
pub use dice::{DiceNotation, RollSpec, roll_dice};
pub use error::{MechError, MechResult};
