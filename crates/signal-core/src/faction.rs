//! NPC Factions
//!
//! A faction holds belief strengths per fragment and signed relationship
//! scores toward other factions, and recomputes its behavioral state from
//! those maps every round. The decision ladder here is the mandatory
//! deterministic policy; a decision oracle may pre-empt it but can never
//! be required for a match to complete.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use signal_events::{FactionState, FactionSummary};

use crate::config::DecisionThresholds;
use crate::fragment::FragmentId;

/// Outcome of a faction's per-round decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub state: FactionState,
    /// Action description, when the state warrants an event
    pub description: Option<String>,
}

impl Decision {
    pub fn new(state: FactionState, description: Option<String>) -> Self {
        Self { state, description }
    }
}

/// An NPC faction in the collapsing world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    name: String,
    state: FactionState,
    /// Fragment id -> non-negative belief strength
    beliefs: HashMap<FragmentId, f64>,
    /// Other faction name -> signed, unbounded relationship score
    relationships: HashMap<String, f64>,
}

impl Faction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: FactionState::Peaceful,
            beliefs: HashMap::new(),
            relationships: HashMap::new(),
        }
    }

    /// Creates a faction with zeroed relationships toward `others`.
    pub fn with_neighbors<'a>(name: impl Into<String>, others: impl Iterator<Item = &'a str>) -> Self {
        let name = name.into();
        let relationships = others
            .filter(|other| **other != name)
            .map(|other| (other.to_string(), 0.0))
            .collect();
        Self {
            name,
            state: FactionState::Peaceful,
            beliefs: HashMap::new(),
            relationships,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> FactionState {
        self.state
    }

    pub fn set_state(&mut self, state: FactionState) {
        self.state = state;
    }

    pub fn beliefs(&self) -> &HashMap<FragmentId, f64> {
        &self.beliefs
    }

    pub fn relationships(&self) -> &HashMap<String, f64> {
        &self.relationships
    }

    pub fn belief(&self, id: &FragmentId) -> f64 {
        self.beliefs.get(id).copied().unwrap_or(0.0)
    }

    pub fn believes_in(&self, id: &FragmentId) -> bool {
        self.belief(id) > 0.0
    }

    /// Adds `amount` to the belief in a fragment, creating the entry at 0
    /// first. The engine guarantees `amount` is non-negative, so belief
    /// strength can never go below zero.
    pub fn receive_belief(&mut self, id: FragmentId, amount: f64) {
        debug_assert!(amount >= 0.0, "belief amounts are non-negative");
        *self.beliefs.entry(id).or_insert(0.0) += amount;
    }

    /// Deletes the belief entry for a fragment. No-op when absent.
    pub fn remove_belief(&mut self, id: &FragmentId) {
        self.beliefs.remove(id);
    }

    /// Additive, signed, unbounded relationship adjustment.
    pub fn adjust_relationship(&mut self, other: impl Into<String>, delta: f64) {
        *self.relationships.entry(other.into()).or_insert(0.0) += delta;
    }

    pub fn relationship(&self, other: &str) -> f64 {
        self.relationships.get(other).copied().unwrap_or(0.0)
    }

    pub fn set_relationship(&mut self, other: impl Into<String>, value: f64) {
        self.relationships.insert(other.into(), value);
    }

    /// Highest single belief value, 0 when the faction believes nothing.
    pub fn max_belief(&self) -> f64 {
        self.beliefs.values().copied().fold(0.0, f64::max)
    }

    /// The strongest belief, ties broken by fragment id for determinism.
    pub fn strongest_belief(&self) -> Option<(&FragmentId, f64)> {
        self.beliefs
            .iter()
            .max_by(|(id_a, a), (id_b, b)| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| id_b.cmp(id_a))
            })
            .map(|(id, value)| (id, *value))
    }

    /// Population variance across belief values, 0 for fewer than two.
    pub fn belief_variance(&self) -> f64 {
        if self.beliefs.len() < 2 {
            return 0.0;
        }
        let n = self.beliefs.len() as f64;
        let mean = self.beliefs.values().sum::<f64>() / n;
        self.beliefs.values().map(|b| (b - mean).powi(2)).sum::<f64>() / n
    }

    /// The most negative relationship, ties broken by faction name.
    fn worst_enemy(&self) -> Option<(&str, f64)> {
        self.relationships
            .iter()
            .filter(|(_, score)| **score < 0.0)
            .min_by(|(name_a, a), (name_b, b)| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| name_a.cmp(name_b))
            })
            .map(|(name, score)| (name.as_str(), *score))
    }

    /// The deterministic decision ladder, evaluated in precedence order.
    ///
    /// A crashed faction stays crashed through this same recomputation
    /// until new belief input moves it to a different branch; there is no
    /// separate recovery path. A faction with an empty belief map never
    /// crashes; it idles or allies on its relationships alone.
    pub fn decide(&self, thresholds: &DecisionThresholds) -> Decision {
        let max_belief = self.max_belief();
        let variance = self.belief_variance();

        if max_belief > thresholds.zealous_belief {
            let (fragment, _) = self
                .strongest_belief()
                .expect("zealous state requires at least one belief");
            return Decision::new(
                FactionState::Zealous,
                Some(format!("{} forms a cult around {}", self.name, fragment)),
            );
        }

        if max_belief > thresholds.aggressive_belief {
            if let Some((enemy, _)) = self.worst_enemy() {
                return Decision::new(
                    FactionState::Aggressive,
                    Some(format!("{} launches a strike against {}", self.name, enemy)),
                );
            }
            return Decision::new(
                FactionState::Aggressive,
                Some(format!("{} mobilizes for open conflict", self.name)),
            );
        }

        if !self.beliefs.is_empty()
            && (max_belief < thresholds.crash_belief_floor
                || variance > thresholds.crash_variance_ceiling)
        {
            return Decision::new(
                FactionState::Crashed,
                Some(format!(
                    "{} suffers a system failure under conflicting signals",
                    self.name
                )),
            );
        }

        if let Some((ally, _)) = self
            .relationships
            .iter()
            .filter(|(_, score)| **score > thresholds.ally_relationship)
            .max_by(|(name_a, a), (name_b, b)| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| name_b.cmp(name_a))
            })
        {
            return Decision::new(
                FactionState::Allied,
                Some(format!("{} closes ranks with {}", self.name, ally)),
            );
        }

        Decision::new(FactionState::Peaceful, None)
    }

    /// Snapshot summary for the session boundary.
    pub fn summary(&self) -> FactionSummary {
        FactionSummary {
            name: self.name.clone(),
            state: self.state,
            belief_count: self.beliefs.len(),
        }
    }
}
