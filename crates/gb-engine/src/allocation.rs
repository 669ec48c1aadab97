//! Skill point allocation.

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::session::Session;

/// Asks the player how to spend unallocated skill points.
pub trait SkillAllocator {
    /// Points to add per skill, or `None` if the player has not finished.
    fn allocate(
        &mut self,
        investigator: &str,
        points: u32,
        skills: &BTreeMap<String, i32>,
    ) -> Option<BTreeMap<String, i32>>;
}

/// Add an allocation to the session's skills. Points left over are forfeit;
/// once this succeeds nothing is pending.
pub(crate) fn apply_allocation(
    session: &mut Session,
    allocation: &BTreeMap<String, i32>,
) -> EngineResult<()> {
    let available = session.unallocated_points;
    if available == 0 {
        return Err(EngineError::NoAllocationPending);
    }

    let mut requested: u32 = 0;
    for (skill, points) in allocation {
        if !session.skills.contains_key(skill) {
            return Err(EngineError::UnknownSkill(skill.clone()));
        }
        let points = u32::try_from(*points).map_err(|_| EngineError::AllocationExceedsPoints {
            requested: u32::MAX,
            available,
        })?;
        requested = requested.saturating_add(points);
    }
    if requested > available {
        return Err(EngineError::AllocationExceedsPoints {
            requested,
            available,
        });
    }

    for (skill, points) in allocation {
        if let Some(value) = session.skills.get_mut(skill) {
            *value += points;
        }
    }
    if requested < available {
        log::info!(
            "{} left {} skill points unspent",
            session.character,
            available - requested
        );
    }
    session.unallocated_points = 0;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use gb_core::{InvestigatorTemplate, RosterSlot};

    fn session(points: u32) -> Session {
        let template = InvestigatorTemplate {
            health: 10,
            sanity: 50,
            skills: BTreeMap::from([("Dodge".to_string(), 20), ("Library Use".to_string(), 40)]),
            unallocated_points: points,
            ..InvestigatorTemplate::default()
        };
        Session::for_investigator(
            0,
            &RosterSlot::new("Eleanor Voss", "1"),
            &template,
            &EngineConfig::default(),
        )
    }

    fn plan(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn adds_points_and_clears_pending() {
        let mut s = session(10);
        apply_allocation(&mut s, &plan(&[("Dodge", 6), ("Library Use", 4)])).unwrap();
        assert_eq!(s.skills["Dodge"], 26);
        assert_eq!(s.skills["Library Use"], 44);
        assert_eq!(s.unallocated_points, 0);
    }

    #[test]
    fn underspending_forfeits_the_rest() {
        let mut s = session(10);
        apply_allocation(&mut s, &plan(&[("Dodge", 3)])).unwrap();
        assert_eq!(s.unallocated_points, 0);
    }

    #[test]
    fn overspending_is_rejected() {
        let mut s = session(5);
        let err = apply_allocation(&mut s, &plan(&[("Dodge", 4), ("Library Use", 2)])).unwrap_err();
        assert!(matches!(
            err,
            EngineError::AllocationExceedsPoints {
                requested: 6,
                available: 5
            }
        ));
        assert_eq!(s.skills["Dodge"], 20);
        assert_eq!(s.unallocated_points, 5);
    }

    #[test]
    fn negative_points_are_rejected() {
        let mut s = session(5);
        let err = apply_allocation(&mut s, &plan(&[("Dodge", -5)])).unwrap_err();
        assert!(matches!(err, EngineError::AllocationExceedsPoints { .. }));
    }

    #[test]
    fn unknown_skill_is_rejected() {
        let mut s = session(5);
        let err = apply_allocation(&mut s, &plan(&[("Flying", 1)])).unwrap_err();
        assert!(matches!(err, EngineError::UnknownSkill(name) if name == "Flying"));
    }

    #[test]
    fn nothing_pending() {
        let mut s = session(0);
        assert!(matches!(
            apply_allocation(&mut s, &plan(&[])),
            Err(EngineError::NoAllocationPending)
        ));
    }
}
