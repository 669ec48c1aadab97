use gb_mechanics::{Difficulty, RollSpec, SkillCheck};
use serde::{Deserialize, Serialize};

/// An effect record as authored on a choice.
///
/// `health` and `sanity` are absolute targets, not deltas. When `check` is
/// present the choice is a skill-check branch and the other fields are
/// ignored; see [`EffectSpec::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSpec {
    /// Set health to this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    /// Set sanity to this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanity: Option<i32>,
    /// Grant these items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<String>>,
    /// Advance the clock by this many hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Branch on a skill check instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckSpec>,
}

impl EffectSpec {
    /// True if any of the direct (non-check) fields are set.
    pub fn has_direct_fields(&self) -> bool {
        self.health.is_some()
            || self.sanity.is_some()
            || self.inventory.is_some()
            || self.time.is_some()
    }

    /// Turn the record into what the choice actually does. A check wins over
    /// direct fields; direct effects come out in application order.
    pub fn resolve(&self) -> ChoiceEffects {
        if let Some(check) = &self.check {
            return ChoiceEffects::Check(check.branch());
        }
        let mut effects = Vec::new();
        if let Some(health) = self.health {
            effects.push(Effect::HealthSet(health));
        }
        if let Some(sanity) = self.sanity {
            effects.push(Effect::SanitySet(sanity));
        }
        if let Some(items) = &self.inventory {
            effects.push(Effect::InventoryGrant(items.clone()));
        }
        if let Some(hours) = self.time {
            effects.push(Effect::TimeAdvance(hours));
        }
        ChoiceEffects::Apply(effects)
    }
}

/// A skill-check record as authored inside an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSpec {
    /// Skill or stat to test.
    pub skill: String,
    /// Entry to go to on success.
    pub success: String,
    /// Entry to go to on failure.
    pub failure: String,
    /// Threshold scaling.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Dice spec for the number of attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tries: Option<RollSpec>,
    /// Opposing ceiling the roll must also clear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opposed_value: Option<i32>,
    /// Flat bonus.
    #[serde(default)]
    pub bonus: i32,
}

impl CheckSpec {
    /// The typed branch for this record.
    pub fn branch(&self) -> SkillCheckBranch {
        SkillCheckBranch {
            check: SkillCheck {
                skill: self.skill.clone(),
                difficulty: self.difficulty,
                tries: self.tries.clone(),
                opposed_value: self.opposed_value,
                bonus: self.bonus,
            },
            success: self.success.clone(),
            failure: self.failure.clone(),
        }
    }
}

/// A direct state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Set health to an absolute value.
    HealthSet(i32),
    /// Set sanity to an absolute value.
    SanitySet(i32),
    /// Add items to the inventory.
    InventoryGrant(Vec<String>),
    /// Move the clock forward by hours.
    TimeAdvance(f64),
}

impl Effect {
    /// Position in the fixed application order.
    pub fn order(&self) -> u8 {
        match self {
            Self::HealthSet(_) => 0,
            Self::SanitySet(_) => 1,
            Self::InventoryGrant(_) => 2,
            Self::TimeAdvance(_) => 3,
        }
    }
}

/// A skill check and the entries its verdict leads to.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCheckBranch {
    /// The check to roll.
    pub check: SkillCheck,
    /// Entry on success.
    pub success: String,
    /// Entry on failure.
    pub failure: String,
}

impl SkillCheckBranch {
    /// The entry for a verdict.
    pub fn target(&self, success: bool) -> &str {
        if success { &self.success } else { &self.failure }
    }
}

/// What selecting a choice does to state: either a check branch or a list
/// of direct effects, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceEffects {
    /// Roll a check and branch on it.
    Check(SkillCheckBranch),
    /// Apply these effects, in order.
    Apply(Vec<Effect>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_effects_in_application_order() {
        let spec: EffectSpec = serde_json::from_str(
            r#"{"time": 2, "inventory": ["Lantern"], "sanity": 30, "health": 80}"#,
        )
        .unwrap();
        let ChoiceEffects::Apply(effects) = spec.resolve() else {
            panic!("expected direct effects");
        };
        let order: Vec<u8> = effects.iter().map(Effect::order).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(effects[0], Effect::HealthSet(80));
        assert_eq!(effects[3], Effect::TimeAdvance(2.0));
    }

    #[test]
    fn check_excludes_direct_effects() {
        let spec: EffectSpec = serde_json::from_str(
            r#"{"health": 10, "check": {"skill": "Dodge", "success": "12", "failure": "13"}}"#,
        )
        .unwrap();
        assert!(spec.has_direct_fields());
        let ChoiceEffects::Check(branch) = spec.resolve() else {
            panic!("expected a check branch");
        };
        assert_eq!(branch.check.skill, "Dodge");
        assert_eq!(branch.check.difficulty, Difficulty::Normal);
        assert_eq!(branch.target(true), "12");
        assert_eq!(branch.target(false), "13");
    }

    #[test]
    fn check_supplements() {
        let spec: CheckSpec = serde_json::from_str(
            r#"{"skill": "Climb", "success": "a", "failure": "b",
                "difficulty": "hard", "tries": "1D3", "opposedValue": 40, "bonus": 5}"#,
        )
        .unwrap();
        let branch = spec.branch();
        assert_eq!(branch.check.difficulty, Difficulty::Hard);
        assert_eq!(branch.check.tries, Some(RollSpec::from("1D3")));
        assert_eq!(branch.check.opposed_value, Some(40));
        assert_eq!(branch.check.bonus, 5);
    }

    #[test]
    fn empty_record_applies_nothing() {
        assert_eq!(EffectSpec::default().resolve(), ChoiceEffects::Apply(vec![]));
    }
}
