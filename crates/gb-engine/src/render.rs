//! The presentation port.

use std::collections::BTreeMap;
use std::time::Duration;

/// Where a transient notification belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Skill-check outcomes.
    SkillCheck,
    /// Stat changes and investigator hand-overs.
    Stat,
}

/// Receives everything the engine displays.
///
/// A page starts with [`show_heading`](RenderSink::show_heading); the
/// instructions call is only made when the entry has some.
pub trait RenderSink {
    /// Start a new page with this heading.
    fn show_heading(&mut self, text: &str);
    /// Special instructions for the current entry.
    fn show_instructions(&mut self, text: &str);
    /// Body text of the page, or an inline error.
    fn show_description(&mut self, text: &str);
    /// Replace the choice labels. Activation goes through `Game::select`.
    fn set_choices(&mut self, labels: &[String]);
    /// Update one stat panel line.
    fn show_stat(&mut self, name: &str, value: &str);
    /// Update the clock display.
    fn show_date(&mut self, text: &str);
    /// Show a message for `duration`.
    fn notify(&mut self, channel: Channel, message: &str, duration: Duration);
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Channel it was sent on.
    pub channel: Channel,
    /// Message text.
    pub message: String,
    /// How long it was meant to show.
    pub duration: Duration,
}

/// A sink that keeps what it was last shown.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Current heading.
    pub heading: String,
    /// Current instructions, if the page has any.
    pub instructions: Option<String>,
    /// Current body text.
    pub description: String,
    /// Current choice labels.
    pub choices: Vec<String>,
    /// Stat panel.
    pub stats: BTreeMap<String, String>,
    /// Clock display.
    pub date: String,
    /// Every notification, oldest first.
    pub notifications: Vec<Notification>,
    /// Number of pages started.
    pub pages: usize,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest notification on a channel.
    pub fn last_notification(&self, channel: Channel) -> Option<&Notification> {
        self.notifications.iter().rev().find(|n| n.channel == channel)
    }
}

impl RenderSink for MemorySink {
    fn show_heading(&mut self, text: &str) {
        self.heading = text.to_string();
        self.instructions = None;
        self.pages += 1;
    }

    fn show_instructions(&mut self, text: &str) {
        self.instructions = Some(text.to_string());
    }

    fn show_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    fn set_choices(&mut self, labels: &[String]) {
        self.choices = labels.to_vec();
    }

    fn show_stat(&mut self, name: &str, value: &str) {
        self.stats.insert(name.to_string(), value.to_string());
    }

    fn show_date(&mut self, text: &str) {
        self.date = text.to_string();
    }

    fn notify(&mut self, channel: Channel, message: &str, duration: Duration) {
        self.notifications.push(Notification {
            channel,
            message: message.to_string(),
            duration,
        });
    }
}
