//! World State
//!
//! The round counter, the countdown clock, and the append-only event log,
//! plus the deterministic post-match summaries derived from them. The
//! narrative here is the mandatory fallback; a narrative oracle may
//! replace the prose but never the facts.

use serde::{Deserialize, Serialize};

use signal_events::{
    EventCategory, EventLog, FragmentKind, NarrativeReport, PlayerSummary, TruthReveal, WorldEvent,
};

use crate::fragment::InformationFragment;

/// The state of the collapsing world across a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    round: u64,
    log: EventLog,
    duration_seconds: f64,
    time_remaining: f64,
}

impl WorldState {
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            round: 0,
            log: EventLog::new(),
            duration_seconds,
            time_remaining: duration_seconds,
        }
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    /// Increments the round counter.
    pub fn advance_round(&mut self) {
        self.round += 1;
    }

    /// Appends an event to the log.
    pub fn record(&mut self, description: impl Into<String>, category: EventCategory) -> WorldEvent {
        let event = WorldEvent::new(self.round, description, category);
        self.log.record(event.clone());
        event
    }

    /// Consumes elapsed time, flooring at zero.
    pub fn consume_time(&mut self, elapsed_seconds: f64) {
        self.time_remaining = (self.time_remaining - elapsed_seconds).max(0.0);
    }

    pub fn expired(&self) -> bool {
        self.time_remaining <= 0.0
    }

    /// Deterministic three-part narrative: setup, escalation, resolution.
    /// Counts events per category and names the participants; no external
    /// dependency involved.
    pub fn fallback_narrative(
        &self,
        standings: &[PlayerSummary],
        winner: &PlayerSummary,
    ) -> NarrativeReport {
        let wars = self.log.count_by_category(EventCategory::War);
        let cults = self.log.count_by_category(EventCategory::Cult);
        let crashes = self.log.count_by_category(EventCategory::Crash);
        let alliances = self.log.count_by_category(EventCategory::Alliance);

        let names: Vec<&str> = standings.iter().map(|p| p.name.as_str()).collect();
        let summary = format!(
            "In the dying moments of the grid, {} signals ({}) fought for narrative \
             dominance across {} rounds.",
            standings.len(),
            names.join(", "),
            self.round,
        );

        let mut key_moments = format!(
            "The collapsing world recorded {} wars, {} cults, {} system failures, \
             and {} alliances.",
            wars, cults, crashes, alliances,
        );
        if wars > 2 {
            key_moments.push_str(" Open warfare spread as factions turned on each other.");
        }
        if cults > 0 {
            key_moments.push_str(" Devoted cults formed around the strongest beliefs.");
        }
        if crashes > 2 {
            key_moments.push_str(" Whole factions went dark under contradictory intelligence.");
        }
        if self.log.is_empty() {
            key_moments = "The match passed without major upheaval.".to_string();
        }

        let conclusion = format!(
            "When reality crystallized, {}'s version of the truth prevailed with {:.1} \
             influence. The collapsed world now runs on their story.",
            winner.name, winner.influence,
        );

        NarrativeReport {
            summary,
            key_moments,
            conclusion,
        }
    }
}

/// Partitions the fragment registry by kind for the post-match reveal.
/// Order follows the registry, so seeded fragments come before altered ones.
pub fn truth_reveal(fragments: &[InformationFragment]) -> TruthReveal {
    let mut reveal = TruthReveal {
        truths: Vec::new(),
        lies: Vec::new(),
        corrupted: Vec::new(),
    };
    for fragment in fragments {
        let entry = fragment.disclosure();
        match fragment.kind() {
            FragmentKind::Truth => reveal.truths.push(entry),
            FragmentKind::Lie => reveal.lies.push(entry),
            FragmentKind::Corrupted => reveal.corrupted.push(entry),
        }
    }
    reveal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str, influence: f64) -> PlayerSummary {
        PlayerSummary {
            id: id.to_string(),
            name: name.to_string(),
            influence,
            actions_taken: 0,
        }
    }

    #[test]
    fn test_round_counter_monotonic() {
        let mut world = WorldState::new(60.0);
        assert_eq!(world.round(), 0);
        world.advance_round();
        world.advance_round();
        assert_eq!(world.round(), 2);
    }

    #[test]
    fn test_record_stamps_current_round() {
        let mut world = WorldState::new(60.0);
        world.advance_round();
        let event = world.record("something happened", EventCategory::Other);
        assert_eq!(event.round, 1);
        assert_eq!(world.log().len(), 1);
    }

    #[test]
    fn test_time_floors_at_zero() {
        let mut world = WorldState::new(10.0);
        world.consume_time(7.0);
        assert!(!world.expired());
        world.consume_time(7.0);
        assert_eq!(world.time_remaining(), 0.0);
        assert!(world.expired());
    }

    #[test]
    fn test_fallback_narrative_counts_categories() {
        let mut world = WorldState::new(60.0);
        world.advance_round();
        world.record("strike", EventCategory::War);
        world.record("strike again", EventCategory::War);
        world.record("cult", EventCategory::Cult);

        let players = vec![summary("player_1", "Alice", 3.3), summary("player_2", "Bob", 1.5)];
        let report = world.fallback_narrative(&players, &players[0]);

        assert!(report.summary.contains("2 signals"));
        assert!(report.summary.contains("Alice"));
        assert!(report.key_moments.contains("2 wars"));
        assert!(report.key_moments.contains("1 cults"));
        assert!(report.conclusion.contains("Alice"));
        assert!(report.conclusion.contains("3.3"));
    }

    #[test]
    fn test_fallback_narrative_quiet_match() {
        let world = WorldState::new(60.0);
        let players = vec![summary("player_1", "Alice", 0.5)];
        let report = world.fallback_narrative(&players, &players[0]);
        assert_eq!(report.key_moments, "The match passed without major upheaval.");
    }

    #[test]
    fn test_truth_reveal_partitions_by_kind() {
        let fragments = vec![
            InformationFragment::new("info_0", "a", FragmentKind::Truth, 0),
            InformationFragment::new("info_1", "b", FragmentKind::Lie, 0),
            InformationFragment::new("info_2", "c", FragmentKind::Lie, 0),
            InformationFragment::new("info_3", "d", FragmentKind::Corrupted, 0),
        ];

        let reveal = truth_reveal(&fragments);
        assert_eq!(reveal.count(FragmentKind::Truth), 1);
        assert_eq!(reveal.count(FragmentKind::Lie), 2);
        assert_eq!(reveal.count(FragmentKind::Corrupted), 1);
        assert_eq!(reveal.truths[0].content, "a");
    }
}
