//! Scenario tests for the gamebook engine.
use gb_core::JsonParts;
use gb_engine::{Channel, EngineConfig, EngineError, Game, InvestigatorState, MemorySink, Step};
use gb_mechanics::ScriptedDice;

const INVESTIGATORS: &str = r#"{
    "Eleanor Voss":   {"health": 50, "sanity": 60, "skills": {"Spot Hidden": 45}},
    "Thaddeus Pike":  {"health": 12, "sanity": 55, "skills": {"Fighting": 50}},
    "Mercy Halloway": {"health": 9,  "sanity": 70, "skills": {"Medicine": 60}},
    "Ambrose Kell":   {"health": 11, "sanity": 40, "skills": {"Occult": 35}}
}"#;

const ENTRIES: &str = r#"{
    "1": {
        "description": "You are in a dark room...",
        "choices": [
            {"text": "Turn on the light", "nextEntry": "2"},
            {"text": "Leave the room", "nextEntry": "3"}
        ]
    },
    "2": {
        "description": "The bulb flickers on.",
        "choices": [
            {"text": "Take the artifact", "nextEntry": "4",
             "effects": {"health": 100, "inventory": ["Magical Artifact"]}},
            {"text": "Search the shelves", "nextEntry": "4",
             "effects": {"check": {"skill": "Spot Hidden", "success": "5", "failure": "3"}}},
            {"text": "Touch the bare wire", "nextEntry": "2", "effects": {"health": 0}}
        ]
    },
    "3": {"description": "The corridor stretches away.", "choices": [
        {"text": "Head into town", "nextEntry": "Town Location"},
        {"text": "Go back", "nextEntry": "1"},
        {"text": "Sleep on a bench", "nextEntry": "3", "effects": {"time": 18}}
    ]},
    "4": {"title": "The Artifact", "description": "It hums in your hands.", "choices": [
        {"text": "Take it again", "nextEntry": "4",
         "effects": {"health": 100, "inventory": ["Magical Artifact"]}}
    ]},
    "5": {"description": "Behind the books, a hidden latch.", "end": true},
    "100": {"description": "Thaddeus wakes in a cell."},
    "200": {"description": "Mercy arrives by train."},
    "300": {"description": "Ambrose lights a candle."}
}"#;

const LOCATIONS: &str = r#"{
    "Town": {
        "Library": {"entry": "5", "availability": {"daysOfWeek": ["Monday"], "hours": [9, 17]}},
        "Docks": {"entry": "1", "availability": {"alwaysOpen": true}}
    }
}"#;

fn parts() -> JsonParts {
    JsonParts {
        investigators: INVESTIGATORS.to_string(),
        entries: ENTRIES.to_string(),
        locations: LOCATIONS.to_string(),
    }
}

fn start(dice: Vec<u32>) -> Game<MemorySink> {
    Game::start_with_dice(
        &parts(),
        EngineConfig::default(),
        MemorySink::new(),
        Box::new(ScriptedDice::new(dice)),
    )
    .unwrap()
}

#[test]
fn dark_room() {
    let mut game = start(vec![1]);
    assert_eq!(game.sink().description, "You are in a dark room...");
    assert_eq!(game.sink().choices, vec!["Turn on the light", "Leave the room"]);

    assert_eq!(game.select(0).unwrap(), Step::Entry("2".to_string()));
    assert_eq!(game.session().unwrap().current_entry, "2");
    assert_eq!(game.sink().description, "The bulb flickers on.");
}

#[test]
fn magical_artifact() {
    let mut game = start(vec![1]);
    game.select(0).unwrap();
    game.select(0).unwrap();
    // Take it again: health is reset to the target, the artifact is not duplicated.
    game.select(0).unwrap();

    let session = game.session().unwrap();
    assert_eq!(session.health, 100);
    let artifacts = session
        .inventory
        .iter()
        .filter(|item| *item == "Magical Artifact")
        .count();
    assert_eq!(artifacts, 1);
    assert_eq!(game.sink().heading, "4: The Artifact");
    assert_eq!(game.sink().stats["Inventory"], "Magical Artifact");
}

#[test]
fn magical_artifact_from_zero_health() {
    let mut game = start(vec![1]);
    game.select(0).unwrap();
    game.select(2).unwrap();
    let session = game.session().unwrap();
    assert_eq!(session.health, 0);
    // Zero health is reported, not acted on; only the caller signals death.
    assert!(session.is_incapacitated());
    assert_eq!(game.state(), InvestigatorState::Active(0));

    game.select(0).unwrap();
    let session = game.session().unwrap();
    assert_eq!(session.health, 100);
    assert_eq!(session.inventory, vec!["Magical Artifact"]);

    let stat_messages: Vec<&str> = game
        .sink()
        .notifications
        .iter()
        .filter(|n| n.channel == Channel::Stat)
        .map(|n| n.message.as_str())
        .collect();
    assert_eq!(
        stat_messages,
        vec!["Health 50 -> 0", "Health 0 -> 100", "Gained Magical Artifact"]
    );
}

#[test]
fn skill_check_success_reaches_the_ending() {
    let mut game = start(vec![45]);
    game.select(0).unwrap();
    assert_eq!(game.select(1).unwrap(), Step::Entry("5".to_string()));
    assert_eq!(
        game.sink().description,
        "Behind the books, a hidden latch.\n\n*** THE END ***"
    );
    assert!(game.sink().choices.is_empty());
}

#[test]
fn skill_check_failure() {
    let mut game = start(vec![46]);
    game.select(0).unwrap();
    assert_eq!(game.select(1).unwrap(), Step::Entry("3".to_string()));
    let note = game.sink().last_notification(Channel::SkillCheck).unwrap();
    assert_eq!(note.message, "Spot Hidden check: rolled 46 against 45 (failure)");
}

#[test]
fn town_before_opening_hours() {
    let mut game = start(vec![1]);
    game.select(1).unwrap();
    assert_eq!(game.select(0).unwrap(), Step::Locations("Town".to_string()));
    assert_eq!(game.choices(), vec!["Docks"]);
}

#[test]
fn town_during_opening_hours() {
    let config = EngineConfig::default().with_start_date(
        chrono::NaiveDate::from_ymd_opt(1925, 10, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    );
    let mut game = Game::start_with_dice(
        &parts(),
        config,
        MemorySink::new(),
        Box::new(ScriptedDice::new([1])),
    )
    .unwrap();
    game.select(1).unwrap();
    game.select(0).unwrap();
    assert_eq!(game.choices(), vec!["Docks", "Library"]);
    assert_eq!(game.select(1).unwrap(), Step::Entry("5".to_string()));
}

#[test]
fn sleeping_past_midnight_closes_the_library() {
    let config = EngineConfig::default().with_start_date(
        chrono::NaiveDate::from_ymd_opt(1925, 10, 12)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap(),
    );
    let mut game = Game::start_with_dice(
        &parts(),
        config,
        MemorySink::new(),
        Box::new(ScriptedDice::new([1])),
    )
    .unwrap();
    game.select(1).unwrap();
    game.select(0).unwrap();
    assert_eq!(game.choices(), vec!["Docks", "Library"]);

    // Docks, back to the corridor, then sleep until Tuesday 10:00.
    game.select(0).unwrap();
    game.select(1).unwrap();
    game.select(2).unwrap();
    assert_eq!(game.sink().date, "Tuesday, October 13, 1925 10:00");

    assert_eq!(game.select(0).unwrap(), Step::Locations("Town".to_string()));
    assert_eq!(game.choices(), vec!["Docks"]);
}

#[test]
fn succession_through_the_roster() {
    let mut game = start(vec![1]);
    game.select(0).unwrap();

    assert_eq!(game.death().unwrap(), InvestigatorState::Active(1));
    let session = game.session().unwrap();
    assert_eq!(session.character, "Thaddeus Pike");
    assert_eq!(session.visited_entries, vec!["1", "2", "100"]);
    assert_eq!(game.sink().description, "Thaddeus wakes in a cell.");

    assert_eq!(game.death().unwrap(), InvestigatorState::Active(2));
    assert_eq!(game.death().unwrap(), InvestigatorState::Active(3));
    assert_eq!(game.sink().description, "Ambrose lights a candle.");

    let pages = game.sink().pages;
    assert_eq!(game.death().unwrap(), InvestigatorState::GameOver);
    assert_eq!(game.sink().pages, pages);
    assert!(matches!(game.select(0), Err(EngineError::GameOver)));
}

#[test]
fn broken_content_never_starts() {
    let mut broken = parts();
    broken.entries = "{ not json".to_string();
    let result = Game::start(&broken, EngineConfig::default(), MemorySink::new());
    assert!(matches!(result, Err(EngineError::ContentLoadFailure(_))));
}

#[test]
fn missing_investigator_never_starts() {
    let mut partial = parts();
    partial.investigators = r#"{"Eleanor Voss": {"health": 10, "sanity": 10}}"#.to_string();
    let result = Game::start(&partial, EngineConfig::default(), MemorySink::new());
    assert!(matches!(result, Err(EngineError::ContentLoadFailure(_))));
}
