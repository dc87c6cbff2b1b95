//! Heuristic faction decisions.
//!
//! A richer read of a faction's situation than the engine's built-in
//! ladder: coherence of belief, breadth of enmity, depth of friendship.
//! When no pattern applies the oracle declines, and the engine's
//! deterministic policy decides instead.

use signal_core::faction::Decision;
use signal_core::oracle::{DecisionInputs, DecisionOracle, OracleError};
use signal_events::FactionState;

const OBSESSION_BELIEF: f64 = 15.0;
const OBSESSION_COHERENCE: f64 = 5.0;
const VENDETTA_BELIEF: f64 = 12.0;
const VENDETTA_ENEMIES: usize = 2;
const BLOC_FRIENDS: usize = 2;
const BLOC_AVG_BELIEF: f64 = 5.0;
const OVERLOAD_VARIANCE: f64 = 10.0;
const STARVATION_BELIEF: f64 = 2.0;
const STARVATION_SPREAD: usize = 3;

/// Pattern-matching decision oracle over the faction's belief and
/// relationship maps.
#[derive(Debug, Default)]
pub struct HeuristicDecision;

impl HeuristicDecision {
    pub fn new() -> Self {
        Self
    }
}

fn max_belief(inputs: &DecisionInputs<'_>) -> f64 {
    inputs.beliefs.values().fold(0.0, |max, v| v.max(max))
}

fn belief_variance(inputs: &DecisionInputs<'_>) -> f64 {
    let count = inputs.beliefs.len();
    if count < 2 {
        return 0.0;
    }
    let mean = inputs.beliefs.values().sum::<f64>() / count as f64;
    inputs
        .beliefs
        .values()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / count as f64
}

/// The strongest-held fragment, smallest id on ties.
fn obsession_target(inputs: &DecisionInputs<'_>) -> Option<String> {
    inputs
        .beliefs
        .iter()
        .max_by(|(id_a, a), (id_b, b)| {
            a.partial_cmp(b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| id_b.cmp(id_a))
        })
        .map(|(id, _)| id.to_string())
}

impl DecisionOracle for HeuristicDecision {
    fn decide(&self, inputs: &DecisionInputs<'_>) -> Result<Decision, OracleError> {
        let max = max_belief(inputs);
        let variance = belief_variance(inputs);
        let name = inputs.faction_name;

        // Coherent obsession: one dominating signal, little noise
        if max > OBSESSION_BELIEF && variance < OBSESSION_COHERENCE {
            let fragment = obsession_target(inputs)
                .ok_or_else(|| OracleError::Failed("obsession without beliefs".to_string()))?;
            return Ok(Decision::new(
                FactionState::Zealous,
                Some(format!("{} enshrines {} as doctrine", name, fragment)),
            ));
        }

        // Vendetta: high conviction and enemies on several fronts
        let enemies = inputs
            .relationships
            .values()
            .filter(|score| **score < -2.0)
            .count();
        if max > VENDETTA_BELIEF && enemies >= VENDETTA_ENEMIES {
            return Ok(Decision::new(
                FactionState::Aggressive,
                Some(format!("{} lashes out on every front", name)),
            ));
        }

        // Bloc: broad friendship backed by real conviction
        let friends = inputs
            .relationships
            .values()
            .filter(|score| **score > 2.0)
            .count();
        let avg_belief = if inputs.beliefs.is_empty() {
            0.0
        } else {
            inputs.beliefs.values().sum::<f64>() / inputs.beliefs.len() as f64
        };
        if friends >= BLOC_FRIENDS && avg_belief > BLOC_AVG_BELIEF {
            return Ok(Decision::new(
                FactionState::Allied,
                Some(format!("{} anchors a bloc of believers", name)),
            ));
        }

        // Overload: wildly uneven signal, or thin belief smeared wide
        if variance > OVERLOAD_VARIANCE
            || (max < STARVATION_BELIEF && inputs.beliefs.len() > STARVATION_SPREAD)
        {
            return Ok(Decision::new(
                FactionState::Crashed,
                Some(format!("{} drowns in contradictory signal", name)),
            ));
        }

        // Nothing distinctive; let the deterministic policy rule
        Err(OracleError::Unavailable)
    }
}
