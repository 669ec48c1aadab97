//! The navigation engine.

use std::collections::BTreeMap;

use gb_core::time::format_date;
use gb_core::{
    Choice, ChoiceEffects, ChoiceTarget, ContentSource, ContentStore, Effect, SkillCheckBranch,
};
use gb_mechanics::{DiceSource, make_skill_check};

use crate::allocation::{SkillAllocator, apply_allocation};
use crate::availability::is_available;
use crate::config::EngineConfig;
use crate::effect::apply_effects;
use crate::error::{EngineError, EngineResult};
use crate::lifecycle::{InvestigatorState, Lifecycle};
use crate::persistence::SessionStore;
use crate::render::{Channel, RenderSink};
use crate::requirement::requirements_met;
use crate::session::Session;

/// What an offered choice does when selected.
#[derive(Debug, Clone)]
enum Action {
    Check(SkillCheckBranch),
    Locations(String),
    Goto { effects: Vec<Effect>, next: String },
}

impl Action {
    fn for_choice(choice: &Choice) -> Self {
        match choice.effects() {
            ChoiceEffects::Check(branch) => Self::Check(branch),
            ChoiceEffects::Apply(effects) => match choice.target() {
                ChoiceTarget::Location(table) => Self::Locations(table.to_string()),
                ChoiceTarget::Entry(next) => Self::Goto {
                    effects,
                    next: next.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Offered {
    label: String,
    action: Action,
}

/// Where a selection led.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An entry was rendered.
    Entry(String),
    /// A location table was opened.
    Locations(String),
}

/// A running game: content, the active session, and the presentation sink.
pub struct Game<S: RenderSink> {
    content: ContentStore,
    config: EngineConfig,
    lifecycle: Lifecycle,
    session: Option<Session>,
    offered: Vec<Offered>,
    dice: Box<dyn DiceSource>,
    sink: S,
}

impl<S: RenderSink> Game<S> {
    /// Load content and render the first investigator's start entry. Dice
    /// come from the config.
    pub fn start(source: &dyn ContentSource, config: EngineConfig, sink: S) -> EngineResult<Self> {
        let dice = config.dice();
        Self::start_with_dice(source, config, sink, dice)
    }

    /// Like [`Game::start`], with explicit dice.
    pub fn start_with_dice(
        source: &dyn ContentSource,
        config: EngineConfig,
        sink: S,
        dice: Box<dyn DiceSource>,
    ) -> EngineResult<Self> {
        let content = source.load().map_err(|e| {
            log::error!("content failed to load: {e}");
            EngineError::ContentLoadFailure(e)
        })?;
        content.require_roster(&config.roster)?;
        log::info!(
            "loaded {} entries, {} location tables, {} investigators",
            content.entry_count(),
            content.location_table_count(),
            content.investigator_count()
        );

        let lifecycle = Lifecycle::new(config.roster.clone());
        let session = lifecycle.session(&content, &config)?;
        let start = session.current_entry.clone();
        let mut game = Self {
            content,
            config,
            lifecycle,
            session: Some(session),
            offered: Vec::new(),
            dice,
            sink,
        };
        game.show_start(&start);
        Ok(game)
    }

    /// Show an entry and offer its choices.
    pub fn render(&mut self, entry_id: &str) -> EngineResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::GameOver);
        };
        let Some(entry) = self.content.entry(entry_id) else {
            return Err(self.fail(EngineError::EntryNotFound(entry_id.to_string())));
        };

        session.current_entry.clone_from(&entry.id);
        session.visit(&entry.id);

        self.sink.show_heading(&entry.heading());
        if let Some(instructions) = &entry.special_instructions {
            self.sink.show_instructions(instructions);
        }
        if entry.end {
            let text = format!("{}\n\n{}", entry.description, self.config.end_marker);
            self.sink.show_description(&text);
        } else {
            self.sink.show_description(&entry.description);
        }

        self.offered = entry
            .choices
            .iter()
            .filter(|c| requirements_met(&c.requirements(), session))
            .map(|c| Offered {
                label: c.text.clone(),
                action: Action::for_choice(c),
            })
            .collect();
        publish_choices(&mut self.sink, &self.offered);
        publish_stats(&mut self.sink, session);
        log::info!("{} is at entry {}", session.character, entry.id);
        Ok(())
    }

    /// Offer the open locations of a location table.
    pub fn render_locations(&mut self, location_type: &str) -> EngineResult<()> {
        let Some(session) = self.session.as_ref() else {
            return Err(EngineError::GameOver);
        };
        let Some(table) = self.content.location_table(location_type) else {
            return Err(self.fail(EngineError::LocationTableNotFound(location_type.to_string())));
        };

        self.offered = table
            .iter()
            .filter(|(_, loc)| {
                is_available(&loc.availability, session.current_date, &session.character)
            })
            .map(|(name, loc)| Offered {
                label: name.clone(),
                action: Action::Goto {
                    effects: Vec::new(),
                    next: loc.entry.clone(),
                },
            })
            .collect();

        self.sink.show_heading(location_type);
        if self.offered.is_empty() {
            self.sink.show_description("Nowhere is open right now.");
        } else {
            self.sink.show_description("Where do you go?");
        }
        publish_choices(&mut self.sink, &self.offered);
        publish_stats(&mut self.sink, session);
        log::debug!(
            "{location_type}: {} of {} locations open",
            self.offered.len(),
            table.len()
        );
        Ok(())
    }

    /// Take the offered choice at `index`.
    pub fn select(&mut self, index: usize) -> EngineResult<Step> {
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::GameOver);
        };
        if session.unallocated_points > 0 {
            return Err(EngineError::AllocationPending(session.unallocated_points));
        }
        let Some(offered) = self.offered.get(index) else {
            return Err(EngineError::InvalidChoice(index));
        };

        match offered.action.clone() {
            Action::Check(branch) => {
                let result =
                    make_skill_check(&branch.check, &session.check_subject(), self.dice.as_mut());
                session.record_skill_use(&branch.check.skill);
                self.sink.notify(
                    Channel::SkillCheck,
                    &result.to_string(),
                    self.config.notify_window,
                );
                let next = branch.target(result.success).to_string();
                self.render(&next)?;
                Ok(Step::Entry(next))
            }
            Action::Locations(table) => {
                self.render_locations(&table)?;
                Ok(Step::Locations(table))
            }
            Action::Goto { effects, next } => {
                for change in apply_effects(&effects, session) {
                    self.sink
                        .notify(Channel::Stat, &change.to_string(), self.config.notify_window);
                }
                self.render(&next)?;
                Ok(Step::Entry(next))
            }
        }
    }

    /// The active investigator has died. Hands over to the next investigator,
    /// or ends the game after the last one.
    pub fn death(&mut self) -> EngineResult<InvestigatorState> {
        let Some(previous) = self.session.take() else {
            return Err(EngineError::GameOver);
        };
        let fallen = previous.character.clone();
        let state = self.lifecycle.on_death();
        match state {
            InvestigatorState::GameOver => {
                log::warn!("all investigators dead");
                self.offered.clear();
                self.sink.set_choices(&[]);
                self.sink.notify(
                    Channel::Stat,
                    &format!("{fallen} has fallen. All investigators are dead."),
                    self.config.notify_window,
                );
            }
            InvestigatorState::Active(_) => {
                let next = self
                    .lifecycle
                    .successor(previous, &self.content, &self.config)?;
                log::info!("{fallen} died; {} takes over", next.character);
                self.sink.notify(
                    Channel::Stat,
                    &format!("{fallen} has fallen. {} takes up the investigation.", next.character),
                    self.config.notify_window,
                );
                let start = next.current_entry.clone();
                self.session = Some(next);
                self.show_start(&start);
            }
        }
        Ok(state)
    }

    /// Start over with the first investigator and a fresh session.
    pub fn restart(&mut self) -> EngineResult<()> {
        self.lifecycle.restart();
        let session = self.lifecycle.session(&self.content, &self.config)?;
        log::info!("restarting with {}", session.character);
        let start = session.current_entry.clone();
        self.session = Some(session);
        self.render(&start)
    }

    /// Unallocated skill points, if navigation is waiting on them.
    pub fn allocation_pending(&self) -> Option<u32> {
        self.session
            .as_ref()
            .map(|s| s.unallocated_points)
            .filter(|points| *points > 0)
    }

    /// Spend the pending skill points.
    pub fn complete_allocation(&mut self, allocation: &BTreeMap<String, i32>) -> EngineResult<()> {
        let session = self.session.as_mut().ok_or(EngineError::GameOver)?;
        apply_allocation(session, allocation)?;
        log::info!("{} allocated skill points", session.character);
        publish_stats(&mut self.sink, session);
        Ok(())
    }

    /// Ask `allocator` for the pending allocation. Returns whether the step
    /// is complete; `Ok(false)` means the allocator gave no answer.
    pub fn allocate_with(&mut self, allocator: &mut dyn SkillAllocator) -> EngineResult<bool> {
        let session = self.session.as_ref().ok_or(EngineError::GameOver)?;
        if session.unallocated_points == 0 {
            return Err(EngineError::NoAllocationPending);
        }
        let Some(allocation) =
            allocator.allocate(&session.character, session.unallocated_points, &session.skills)
        else {
            return Ok(false);
        };
        self.complete_allocation(&allocation)?;
        Ok(true)
    }

    /// Snapshot the session into `store`.
    pub fn save(&self, store: &mut dyn SessionStore, key: &str) -> EngineResult<()> {
        let session = self.session.as_ref().ok_or(EngineError::GameOver)?;
        store.save(key, session)
    }

    /// Replace the session with a snapshot and redraw everything. Returns
    /// false if the slot is empty.
    pub fn load(&mut self, store: &dyn SessionStore, key: &str) -> EngineResult<bool> {
        let Some(session) = store.load(key)? else {
            return Ok(false);
        };
        let matches_roster = self
            .lifecycle
            .roster()
            .get(session.roster_index)
            .is_some_and(|slot| slot.name == session.character);
        if !matches_roster {
            return Err(EngineError::RosterMismatch {
                index: session.roster_index,
                character: session.character,
            });
        }
        self.lifecycle.resume(session.roster_index);
        log::info!("loaded slot '{key}' ({})", session.character);
        let entry = session.current_entry.clone();
        self.session = Some(session);
        self.render(&entry)?;
        Ok(true)
    }

    /// The active session, if anyone is still alive.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Lifecycle state.
    pub fn state(&self) -> InvestigatorState {
        self.lifecycle.state()
    }

    /// Labels of the choices on offer.
    pub fn choices(&self) -> Vec<&str> {
        self.offered.iter().map(|o| o.label.as_str()).collect()
    }

    /// Loaded content.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Render a new investigator's first page. The session is already in
    /// place, so a broken start entry is shown inline and logged only.
    fn show_start(&mut self, entry_id: &str) {
        if let Err(e) = self.render(entry_id) {
            log::warn!("start entry unavailable: {e}");
        }
    }

    fn fail(&mut self, error: EngineError) -> EngineError {
        log::warn!("{error}");
        self.sink.show_description(&format!("Error: {error}"));
        self.offered.clear();
        self.sink.set_choices(&[]);
        error
    }
}

fn publish_choices<S: RenderSink>(sink: &mut S, offered: &[Offered]) {
    let labels: Vec<String> = offered.iter().map(|o| o.label.clone()).collect();
    sink.set_choices(&labels);
}

fn publish_stats<S: RenderSink>(sink: &mut S, session: &Session) {
    sink.show_stat("Investigator", &session.character);
    sink.show_stat("Health", &session.health.to_string());
    sink.show_stat("Sanity", &session.sanity.to_string());
    let inventory = if session.inventory.is_empty() {
        "nothing".to_string()
    } else {
        session.inventory.join(", ")
    };
    sink.show_stat("Inventory", &inventory);
    sink.show_stat("Skill points", &session.unallocated_points.to_string());
    sink.show_date(&format_date(session.current_date));
}
