//! The custom roll: a race against the evening.
//!
//! The threshold starts at 20, grows by 5 for every full in-world hour left
//! before 18:00 and by 20 for each distinct qualifying item carried. It is
//! never clamped, so a large enough threshold always succeeds.

use chrono::NaiveTime;

use super::{CUSTOM_ROLL, CheckResult, CheckSubject, PERCENTILE};
use crate::dice::source::DiceSource;

/// Items that each add [`ITEM_BONUS`] to the custom roll.
pub const CUSTOM_ROLL_ITEMS: &[&str] = &[
    "Lantern",
    "Old Town Map",
    "Letter of Introduction",
    "Silver Whistle",
];

/// Starting threshold.
pub const BASE_BONUS: i32 = 20;
/// Added per full hour remaining before the deadline.
pub const HOURLY_BONUS: i32 = 5;
/// Added per distinct qualifying item.
pub const ITEM_BONUS: i32 = 20;
/// Hour of day the hourly bonus counts down to.
pub const DEADLINE_HOUR: u32 = 18;

/// Compute the custom roll threshold for a subject.
pub fn custom_roll_threshold(subject: &CheckSubject<'_>) -> i32 {
    let hours_left = NaiveTime::from_hms_opt(DEADLINE_HOUR, 0, 0)
        .map(|deadline| {
            (subject.now.date().and_time(deadline) - subject.now)
                .num_hours()
                .max(0)
        })
        .unwrap_or(0);

    let items = CUSTOM_ROLL_ITEMS
        .iter()
        .filter(|item| subject.inventory.iter().any(|held| held == *item))
        .count();

    BASE_BONUS + HOURLY_BONUS * hours_left as i32 + ITEM_BONUS * items as i32
}

/// Roll the custom check.
pub fn custom_roll(subject: &CheckSubject<'_>, dice: &mut dyn DiceSource) -> CheckResult {
    let threshold = custom_roll_threshold(subject);
    let roll = dice.roll_die(PERCENTILE);
    CheckResult {
        skill: CUSTOM_ROLL.to_string(),
        roll: Some(roll),
        threshold,
        opposed_value: None,
        success: roll as i32 <= threshold,
        attempts: None,
    }
}
