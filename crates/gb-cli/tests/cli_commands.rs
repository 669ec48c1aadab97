//! Integration tests for the gamebook CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENTRIES: &str = r#"{
    "1": {
        "description": "You are in a dark room...",
        "choices": [
            {"text": "Turn on the light", "nextEntry": "2"},
            {"text": "Leave the room", "nextEntry": "Town Location"}
        ]
    },
    "2": {
        "description": "The bulb flickers on.",
        "choices": [
            {"text": "Grab the live wire", "nextEntry": "1", "effects": {"health": 0}}
        ]
    },
    "100": {"description": "Thaddeus wakes in a cell."},
    "200": {"description": "Mercy arrives by train."},
    "300": {"description": "Ambrose lights a candle."}
}"#;

const LOCATIONS: &str = r#"{
    "Town": {"Docks": {"entry": "1", "availability": {"alwaysOpen": true}}}
}"#;

fn investigators(points: u32) -> String {
    format!(
        r#"{{
    "Eleanor Voss":   {{"health": 10, "sanity": 60, "skills": {{"Spot Hidden": 45}}, "unallocatedPoints": {points}}},
    "Thaddeus Pike":  {{"health": 12, "sanity": 55}},
    "Mercy Halloway": {{"health": 9,  "sanity": 70}},
    "Ambrose Kell":   {{"health": 11, "sanity": 40}}
}}"#
    )
}

/// Create a temp directory with a complete story.
fn test_story(points: u32, entries: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("investigators.json"), investigators(points)).unwrap();
    fs::write(dir.path().join("entries.json"), entries).unwrap();
    fs::write(dir.path().join("locations.json"), LOCATIONS).unwrap();
    dir
}

fn gamebook() -> Command {
    Command::cargo_bin("gamebook").unwrap()
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_notation() {
    gamebook()
        .args(["roll", "3D6", "--seed", "7", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^3D6: \d+\n3D6: \d+\n$").unwrap());
}

#[test]
fn roll_is_reproducible_with_a_seed() {
    let first = gamebook().args(["roll", "1d100", "--seed", "42"]).output().unwrap();
    let second = gamebook().args(["roll", "1d100", "--seed", "42"]).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_bare_sides() {
    gamebook()
        .args(["roll", "20", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1D20: "));
}

#[test]
fn roll_rejects_bad_specs() {
    gamebook()
        .args(["roll", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("banana"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_clean_story() {
    let dir = test_story(0, ENTRIES);
    gamebook()
        .args(["check", "--content"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries"))
        .stdout(predicate::str::contains("All links resolve"));
}

#[test]
fn check_reports_broken_links() {
    let entries = ENTRIES.replace(r#""nextEntry": "2""#, r#""nextEntry": "99""#);
    let dir = test_story(0, &entries);
    gamebook()
        .args(["check", "--content"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("missing entry 99"))
        .stdout(predicate::str::contains("1 warning"));
}

#[test]
fn check_missing_content() {
    let dir = TempDir::new().unwrap();
    gamebook()
        .args(["check", "--content"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn check_invalid_json() {
    let dir = test_story(0, "{ not json");
    gamebook()
        .args(["check", "--content"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse entries"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_follows_a_choice() {
    let dir = test_story(0, ENTRIES);
    gamebook()
        .args(["play", "--seed", "3", "--content"])
        .arg(dir.path())
        .write_stdin("1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are in a dark room..."))
        .stdout(predicate::str::contains("Turn on the light"))
        .stdout(predicate::str::contains("The bulb flickers on."));
}

#[test]
fn play_opens_location_tables() {
    let dir = test_story(0, ENTRIES);
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Town"))
        .stdout(predicate::str::contains("Docks"));
}

#[test]
fn play_hands_over_when_health_runs_out() {
    let dir = test_story(0, ENTRIES);
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("1\n1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Eleanor Voss can go no further."))
        .stdout(predicate::str::contains("Thaddeus Pike takes up the investigation."))
        .stdout(predicate::str::contains("Thaddeus wakes in a cell."));
}

#[test]
fn play_until_everyone_is_dead() {
    let dir = test_story(0, ENTRIES);
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("die\ndie\ndie\ndie\n1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All investigators are dead."))
        .stdout(predicate::str::contains("the game is over"));
}

#[test]
fn play_saves_to_a_slot() {
    let dir = test_story(0, ENTRIES);
    let saves = TempDir::new().unwrap();
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .arg("--saves")
        .arg(saves.path())
        .write_stdin("1\nsave chapter1\nload chapter1\nload nothing\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to slot 'chapter1'."))
        .stdout(predicate::str::contains("No save in slot 'nothing'."));
    let saved = fs::read_to_string(saves.path().join("chapter1.json")).unwrap();
    assert!(saved.contains("\"currentEntry\": \"2\""));
}

#[test]
fn play_asks_for_skill_points_first() {
    let dir = test_story(10, ENTRIES);
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("Spot Hidden=10\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Eleanor Voss has 10 skill points to allocate."))
        .stdout(predicate::str::contains("Skills updated."))
        .stdout(predicate::str::contains("55"));
}

#[test]
fn play_rejects_overspending() {
    let dir = test_story(5, ENTRIES);
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("Spot Hidden=9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "allocated 9 points but only 5 are available",
        ));
}

#[test]
fn play_unknown_command() {
    let dir = test_story(0, ENTRIES);
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("dance\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command 'dance'"));
}

#[test]
fn play_missing_content() {
    let dir = TempDir::new().unwrap();
    gamebook()
        .args(["play", "--content"])
        .arg(dir.path())
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("content failed to load"));
}
