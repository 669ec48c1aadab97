//! Investigator succession.

use gb_core::{ContentError, ContentStore, Roster, RosterSlot};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::session::Session;

/// Where the game is in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestigatorState {
    /// The investigator at this roster index is playing.
    Active(usize),
    /// Every investigator is dead.
    GameOver,
}

/// Tracks which investigator is playing and builds their sessions.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    roster: Roster,
    state: InvestigatorState,
}

impl Lifecycle {
    /// Start with the first investigator.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            state: InvestigatorState::Active(0),
        }
    }

    /// Current state.
    pub fn state(&self) -> InvestigatorState {
        self.state
    }

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The active investigator's slot.
    pub fn current(&self) -> Option<&RosterSlot> {
        match self.state {
            InvestigatorState::Active(i) => self.roster.get(i),
            InvestigatorState::GameOver => None,
        }
    }

    /// The active investigator died. Moves to the next one, or to
    /// [`InvestigatorState::GameOver`] after the last.
    pub fn on_death(&mut self) -> InvestigatorState {
        self.state = match self.state {
            InvestigatorState::Active(i) if !self.roster.is_last(i) => {
                InvestigatorState::Active(i + 1)
            }
            _ => InvestigatorState::GameOver,
        };
        self.state
    }

    /// Back to the first investigator.
    pub fn restart(&mut self) {
        self.state = InvestigatorState::Active(0);
    }

    /// Jump to a roster index, e.g. when a save is loaded.
    pub fn resume(&mut self, index: usize) -> InvestigatorState {
        self.state = if index < Roster::SIZE {
            InvestigatorState::Active(index)
        } else {
            InvestigatorState::GameOver
        };
        self.state
    }

    /// A fresh session for the active investigator.
    pub fn session(&self, content: &ContentStore, config: &EngineConfig) -> EngineResult<Session> {
        let InvestigatorState::Active(index) = self.state else {
            return Err(EngineError::GameOver);
        };
        let slot = self.roster.get(index).ok_or(EngineError::GameOver)?;
        let template = content
            .investigator(&slot.name)
            .ok_or_else(|| ContentError::MissingInvestigator(slot.name.clone()))?;
        Ok(Session::for_investigator(index, slot, template, config))
    }

    /// The session that follows `previous` after a death. Only the visited
    /// entries carry over.
    pub fn successor(
        &self,
        previous: Session,
        content: &ContentStore,
        config: &EngineConfig,
    ) -> EngineResult<Session> {
        let mut next = self.session(content, config)?;
        next.visited_entries = previous.visited_entries;
        Ok(next)
    }
}
