//! Boundary Records
//!
//! Plain structured snapshots and reports handed across the engine
//! boundary: current match state, victory standings, the post-match
//! narrative, and the truth reveal. A session or transport layer can
//! serialize these directly; nothing here references engine internals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::WorldEvent;
use crate::kinds::{FactionState, FragmentKind};

/// Per-faction summary included in a game snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionSummary {
    pub name: String,
    pub state: FactionState,
    /// Number of fragments the faction currently believes in
    pub belief_count: usize,
}

/// Per-player summary included in snapshots and victory standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: String,
    pub name: String,
    pub influence: f64,
    pub actions_taken: u32,
}

/// A point-in-time view of a running or finished match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub match_id: Uuid,
    /// Lifecycle label: "setup", "running", or "finished"
    pub lifecycle: String,
    pub round: u64,
    pub time_remaining: f64,
    pub factions: Vec<FactionSummary>,
    pub players: Vec<PlayerSummary>,
    pub fragment_count: usize,
    /// Tail of the event log for display
    pub recent_events: Vec<WorldEvent>,
}

/// Final outcome of a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictoryReport {
    pub winner_id: String,
    pub winner_name: String,
    /// All players in registration order with final influence
    pub standings: Vec<PlayerSummary>,
}

/// Three-part post-match narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    /// Setup: who fought and what the world witnessed
    pub summary: String,
    /// Escalation: the turning points of the match
    pub key_moments: String,
    /// Resolution: how the winner's reality prevailed
    pub conclusion: String,
}

impl NarrativeReport {
    /// The full narrative as one block of text.
    pub fn full_text(&self) -> String {
        format!("{}\n\n{}\n\n{}", self.summary, self.key_moments, self.conclusion)
    }
}

/// A fragment's entry in the truth reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentDisclosure {
    pub id: String,
    pub content: String,
    /// "system" or the creating player's id
    pub creator: String,
    /// How many times the fragment was spread during the match
    pub spread_count: u32,
}

/// The post-match partition of every fragment by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruthReveal {
    pub truths: Vec<FragmentDisclosure>,
    pub lies: Vec<FragmentDisclosure>,
    pub corrupted: Vec<FragmentDisclosure>,
}

impl TruthReveal {
    /// Number of fragments of the given kind.
    pub fn count(&self, kind: FragmentKind) -> usize {
        match kind {
            FragmentKind::Truth => self.truths.len(),
            FragmentKind::Lie => self.lies.len(),
            FragmentKind::Corrupted => self.corrupted.len(),
        }
    }

    /// Total number of disclosed fragments.
    pub fn total(&self) -> usize {
        self.truths.len() + self.lies.len() + self.corrupted.len()
    }
}
