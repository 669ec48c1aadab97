//! Location availability.

use chrono::{Datelike, NaiveDateTime, Timelike};
use gb_core::Availability;
use gb_core::time::weekday_name;

/// Whether a location with this availability can be chosen at `now` by
/// `character`.
pub fn is_available(spec: &Availability, now: NaiveDateTime, character: &str) -> bool {
    if spec.always_open {
        return true;
    }

    if let Some(days) = &spec.days_of_week {
        let today = weekday_name(now.weekday());
        if !days.iter().any(|d| d.trim().eq_ignore_ascii_case(today)) {
            return false;
        }
    }

    if spec.hours.is_some() {
        let hour = now.hour();
        if !spec.windows().any(|(start, end)| start <= hour && hour < end) {
            return false;
        }
    }

    match &spec.character {
        Some(name) => name == character,
        None => true,
    }
}
