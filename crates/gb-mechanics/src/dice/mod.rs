//! Dice specs and rolling.
//!
//! Content authors write dice either as notation (`"2D6"`) or as a bare
//! number of sides (`20`). Anything else still deserializes so a bad spec
//! never blocks content loading; rolling it logs an error and yields 0.

pub mod source;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use source::DiceSource;

/// A dice spec as it appears in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RollSpec {
    /// A single die with this many sides.
    Sides(u32),
    /// `<N>D<M>` notation.
    Notation(String),
    /// Any other value; always rolls 0.
    Other(serde_json::Value),
}

impl RollSpec {
    /// Interpret the spec as dice notation.
    pub fn notation(&self) -> MechResult<DiceNotation> {
        match self {
            Self::Sides(0) => Err(MechError::InvalidDiceSpec("0".to_string())),
            Self::Sides(sides) => Ok(DiceNotation {
                count: 1,
                sides: *sides,
            }),
            Self::Notation(text) => text.parse(),
            Self::Other(value) => Err(MechError::InvalidDiceSpec(value.to_string())),
        }
    }
}

impl From<u32> for RollSpec {
    fn from(sides: u32) -> Self {
        Self::Sides(sides)
    }
}

impl From<&str> for RollSpec {
    fn from(text: &str) -> Self {
        Self::Notation(text.to_string())
    }
}

impl std::fmt::Display for RollSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sides(sides) => write!(f, "{sides}"),
            Self::Notation(text) => write!(f, "{text}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// `count` dice with `sides` faces each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceNotation {
    /// Number of dice.
    pub count: u32,
    /// Faces per die.
    pub sides: u32,
}

impl DiceNotation {
    /// Most dice a single notation may roll.
    pub const MAX_COUNT: u32 = 1000;

    /// Smallest possible total.
    pub fn min(self) -> u32 {
        self.count
    }

    /// Largest possible total.
    pub fn max(self) -> u32 {
        self.count.saturating_mul(self.sides)
    }

    /// Roll every die and sum the faces.
    pub fn roll(self, dice: &mut dyn DiceSource) -> u32 {
        (0..self.count).fold(0u32, |total, _| {
            total.saturating_add(dice.roll_die(self.sides))
        })
    }
}

impl FromStr for DiceNotation {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MechError::InvalidDiceSpec(s.to_string());
        let (count, sides) = s.trim().split_once(['D', 'd']).ok_or_else(invalid)?;
        let count: u32 = count.parse().map_err(|_| invalid())?;
        let sides: u32 = sides.parse().map_err(|_| invalid())?;
        if count == 0 || count > Self::MAX_COUNT || sides == 0 {
            return Err(invalid());
        }
        Ok(Self { count, sides })
    }
}

impl std::fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}D{}", self.count, self.sides)
    }
}

/// Roll a dice spec. Invalid specs are logged and roll 0.
pub fn roll_dice(spec: &RollSpec, dice: &mut dyn DiceSource) -> u32 {
    match spec.notation() {
        Ok(notation) => {
            let total = notation.roll(dice);
            log::debug!("rolled {notation}: {total}");
            total
        }
        Err(e) => {
            log::error!("{e}");
            0
        }
    }
}
