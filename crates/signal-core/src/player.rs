//! Players
//!
//! A player is an invisible signal: no avatar, no position, just an
//! identity, a monotonically increasing influence score, and a hand of
//! fragment ids visible to them this match.

use serde::{Deserialize, Serialize};

use signal_events::PlayerSummary;

use crate::fragment::FragmentId;

/// A player in a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: String,
    name: String,
    influence: f64,
    /// Fragment ids held as this player's secret data
    hand: Vec<FragmentId>,
    actions_taken: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            influence: 0.0,
            hand: Vec::new(),
            actions_taken: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn influence(&self) -> f64 {
        self.influence
    }

    pub fn hand(&self) -> &[FragmentId] {
        &self.hand
    }

    pub fn actions_taken(&self) -> u32 {
        self.actions_taken
    }

    /// Awards influence for a completed action. Influence only ever goes
    /// up; no game mechanic decreases it.
    pub fn award(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "influence rewards are non-negative");
        self.influence += amount;
        self.actions_taken += 1;
    }

    /// Adds a fragment to the player's hand.
    pub fn grant(&mut self, id: FragmentId) {
        self.hand.push(id);
    }

    pub fn holds(&self, id: &FragmentId) -> bool {
        self.hand.contains(id)
    }

    /// Snapshot summary for the session boundary.
    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            influence: self.influence,
            actions_taken: self.actions_taken,
        }
    }
}
