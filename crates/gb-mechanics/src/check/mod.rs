//! Percentile skill checks.
//!
//! A check rolls 1-100 and succeeds when the roll is at or under the
//! threshold: the skill (or stat) value plus bonus, scaled by difficulty.
//! An opposed value adds a second ceiling the roll must also clear. With
//! `tries`, the number of attempts is itself rolled and the check re-rolls
//! until it succeeds or the attempts run out.

pub mod custom;

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dice::source::DiceSource;
use crate::dice::{RollSpec, roll_dice};
use crate::error::MechError;

/// Faces on the percentile die.
pub const PERCENTILE: u32 = 100;

/// Most attempts a check with `tries` will make.
pub const MAX_TRIES: u32 = 100;

/// Skill name that routes to [`custom::custom_roll`].
pub const CUSTOM_ROLL: &str = "CustomRoll";

/// Skill name that always reads the subject's current sanity.
pub const SANITY: &str = "Sanity";

/// How much a check's threshold is scaled down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Full value.
    #[default]
    Normal,
    /// Half value.
    Hard,
    /// One fifth of the value.
    Extreme,
}

impl Difficulty {
    /// The threshold multiplier.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Hard => 0.5,
            Self::Extreme => 0.2,
        }
    }

    /// Scale a value, rounding down. Rolls are whole numbers, so a floored
    /// threshold accepts exactly the same rolls as the fractional one.
    pub fn apply(self, value: i32) -> i32 {
        (f64::from(value) * self.multiplier()).floor() as i32
    }
}

impl FromStr for Difficulty {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            _ => Err(MechError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
            Self::Extreme => write!(f, "extreme"),
        }
    }
}

/// A request to perform a skill check.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCheck {
    /// Skill or stat name to test.
    pub skill: String,
    /// Threshold scaling.
    pub difficulty: Difficulty,
    /// When set, the number of attempts is rolled from this spec.
    pub tries: Option<RollSpec>,
    /// When set, the roll must also be at or under this value.
    pub opposed_value: Option<i32>,
    /// Added to the base value before difficulty scaling.
    pub bonus: i32,
}

impl SkillCheck {
    /// A normal-difficulty, single-roll check.
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            difficulty: Difficulty::Normal,
            tries: None,
            opposed_value: None,
            bonus: 0,
        }
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Roll the number of attempts from `tries`.
    pub fn with_tries(mut self, tries: impl Into<RollSpec>) -> Self {
        self.tries = Some(tries.into());
        self
    }

    /// Require the roll to also beat an opposing value.
    pub fn with_opposed(mut self, value: i32) -> Self {
        self.opposed_value = Some(value);
        self
    }

    /// Add a flat bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }
}

/// The character-side inputs a check reads.
#[derive(Debug, Clone, Copy)]
pub struct CheckSubject<'a> {
    /// Skill values.
    pub skills: &'a BTreeMap<String, i32>,
    /// Stat values, consulted when a skill is missing.
    pub stats: &'a BTreeMap<String, i32>,
    /// Current sanity.
    pub sanity: i32,
    /// Carried items, used by the custom roll.
    pub inventory: &'a [String],
    /// In-world time, used by the custom roll.
    pub now: NaiveDateTime,
}

impl CheckSubject<'_> {
    /// The unmodified value a check on `skill` starts from.
    pub fn base_value(&self, skill: &str) -> i32 {
        if skill == SANITY {
            return self.sanity;
        }
        match self.skills.get(skill).or_else(|| self.stats.get(skill)) {
            Some(value) => *value,
            None => {
                log::warn!("no skill or stat named '{skill}', checking against 0");
                0
            }
        }
    }
}

/// How many attempts a multi-try check had and used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempts {
    /// Attempts rolled for.
    pub allowed: u32,
    /// Attempts consumed; on success, the attempt that succeeded.
    pub used: u32,
}

/// The outcome of a skill check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Skill that was tested.
    pub skill: String,
    /// The last percentile roll, or `None` if no attempt was made.
    pub roll: Option<u32>,
    /// The roll had to be at or under this.
    pub threshold: i32,
    /// The opposing ceiling, if any.
    pub opposed_value: Option<i32>,
    /// Whether the check passed.
    pub success: bool,
    /// Present for multi-try checks.
    pub attempts: Option<Attempts>,
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} check: ", self.skill)?;
        let against = match self.opposed_value {
            Some(opposed) => format!("{} (opposed {opposed})", self.threshold),
            None => self.threshold.to_string(),
        };
        match (self.attempts, self.roll) {
            (Some(a), Some(roll)) if self.success => write!(
                f,
                "succeeded on try {} of {} (rolled {roll} against {against})",
                a.used, a.allowed
            ),
            (Some(a), Some(roll)) => write!(
                f,
                "all {} tries failed (last roll {roll} against {against})",
                a.allowed
            ),
            (Some(a), None) => write!(f, "all {} tries failed", a.allowed),
            (None, roll) => write!(
                f,
                "rolled {} against {against} ({})",
                roll.unwrap_or(0),
                if self.success { "success" } else { "failure" }
            ),
        }
    }
}

/// Resolve a skill check.
pub fn make_skill_check(
    check: &SkillCheck,
    subject: &CheckSubject<'_>,
    dice: &mut dyn DiceSource,
) -> CheckResult {
    if check.skill == CUSTOM_ROLL {
        return custom::custom_roll(subject, dice);
    }

    let threshold = check
        .difficulty
        .apply(subject.base_value(&check.skill).saturating_add(check.bonus));
    let passes = |roll: u32| {
        let roll = roll as i32;
        roll <= threshold && check.opposed_value.is_none_or(|opposed| roll <= opposed)
    };

    let result = match &check.tries {
        None => {
            let roll = dice.roll_die(PERCENTILE);
            CheckResult {
                skill: check.skill.clone(),
                roll: Some(roll),
                threshold,
                opposed_value: check.opposed_value,
                success: passes(roll),
                attempts: None,
            }
        }
        Some(tries) => {
            let rolled = roll_dice(tries, dice);
            if rolled > MAX_TRIES {
                log::warn!("{} check: {rolled} tries capped at {MAX_TRIES}", check.skill);
            }
            let allowed = rolled.min(MAX_TRIES);
            let mut used = 0;
            let mut roll = None;
            let mut success = false;
            while used < allowed {
                used += 1;
                let face = dice.roll_die(PERCENTILE);
                roll = Some(face);
                if passes(face) {
                    success = true;
                    break;
                }
            }
            CheckResult {
                skill: check.skill.clone(),
                roll,
                threshold,
                opposed_value: check.opposed_value,
                success,
                attempts: Some(Attempts { allowed, used }),
            }
        }
    };
    log::debug!("{result}");
    result
}
