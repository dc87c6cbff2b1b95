//! World Events
//!
//! Append-only event records describing what happened in a match: faction
//! state transitions, wars, cults, crashes, and alliances. The log is the
//! sole input to post-match narrative generation.

use serde::{Deserialize, Serialize};

/// Category of a world event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    War,
    Alliance,
    Crash,
    Cult,
    Other,
}

impl EventCategory {
    /// Returns all event categories.
    pub fn all() -> &'static [EventCategory] {
        &[
            EventCategory::War,
            EventCategory::Alliance,
            EventCategory::Crash,
            EventCategory::Cult,
            EventCategory::Other,
        ]
    }

    /// Human-readable label used in narratives.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::War => "war",
            EventCategory::Alliance => "alliance",
            EventCategory::Crash => "crash",
            EventCategory::Cult => "cult",
            EventCategory::Other => "other",
        }
    }
}

/// A single recorded world event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    /// Round in which the event occurred
    pub round: u64,
    /// Human-readable description
    pub description: String,
    /// Category for narrative bucketing
    pub category: EventCategory,
}

impl WorldEvent {
    pub fn new(round: u64, description: impl Into<String>, category: EventCategory) -> Self {
        Self {
            round,
            description: description.into(),
            category,
        }
    }
}

/// Append-only log of world events.
///
/// Events are never removed or reordered; narrative and truth-reveal
/// generation read the log as accumulated history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<WorldEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the log.
    pub fn record(&mut self, event: WorldEvent) {
        self.events.push(event);
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Events recorded in a specific round.
    pub fn in_round(&self, round: u64) -> Vec<&WorldEvent> {
        self.events.iter().filter(|e| e.round == round).collect()
    }

    /// Number of events in the given category.
    pub fn count_by_category(&self, category: EventCategory) -> usize {
        self.events.iter().filter(|e| e.category == category).count()
    }

    /// The most recent `limit` events, oldest first.
    pub fn recent(&self, limit: usize) -> &[WorldEvent] {
        let start = self.events.len().saturating_sub(limit);
        &self.events[start..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
