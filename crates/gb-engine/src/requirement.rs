//! Requirement evaluation.

use gb_core::Requirement;

use crate::session::Session;

/// Whether one requirement holds for the session.
pub fn requirement_met(requirement: &Requirement, session: &Session) -> bool {
    match requirement {
        Requirement::DateAfter(date) => session.current_date > *date,
        Requirement::CharacterIs(name) => session.character == *name,
        Requirement::CharacterIsNot(name) => session.character != *name,
    }
}

/// Whether every requirement holds. An empty list always does.
pub fn requirements_met(requirements: &[Requirement], session: &Session) -> bool {
    requirements.iter().all(|r| requirement_met(r, session))
}
