//! Collaborator Contracts
//!
//! The engine can delegate three concerns to pluggable collaborators:
//! rewriting altered content, deciding faction behavior, and narrating a
//! finished match. Each call goes through a deadline guard; on error,
//! timeout, or absence the engine falls back to its deterministic policy,
//! so no collaborator can stall or fail a match.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::warn;

use signal_events::{FactionState, NarrativeReport, PlayerSummary, WorldEvent};

use crate::faction::Decision;
use crate::fragment::FragmentId;

/// Failure modes of a collaborator call. Never surfaced to the match
/// caller; the guard logs them and the fallback runs instead.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle unavailable")]
    Unavailable,
    #[error("oracle failed: {0}")]
    Failed(String),
    #[error("oracle exceeded its deadline")]
    DeadlineExceeded,
}

/// Game context handed to the alteration oracle.
#[derive(Debug, Clone)]
pub struct AlterationContext {
    /// Id of the player performing the alteration
    pub player_id: String,
    pub round: u64,
    pub faction_names: Vec<String>,
    pub faction_states: Vec<(String, FactionState)>,
}

/// Inputs handed to the decision oracle; the same data the deterministic
/// ladder evaluates, plus world context.
#[derive(Debug)]
pub struct DecisionInputs<'a> {
    pub faction_name: &'a str,
    pub beliefs: &'a HashMap<FragmentId, f64>,
    pub relationships: &'a HashMap<String, f64>,
    pub current_state: FactionState,
    pub round: u64,
    pub faction_count: usize,
    pub fragment_count: usize,
}

/// Rewrites altered fragment content.
pub trait AlterationOracle {
    fn alter(&self, source: &str, context: &AlterationContext) -> Result<String, OracleError>;
}

/// Decides a faction's state and action description for the round. Must
/// stay within the five-state vocabulary.
pub trait DecisionOracle {
    fn decide(&self, inputs: &DecisionInputs<'_>) -> Result<Decision, OracleError>;
}

/// Produces the post-match narrative.
pub trait NarrativeOracle {
    fn narrate(
        &self,
        events: &[WorldEvent],
        standings: &[PlayerSummary],
        winner: &PlayerSummary,
    ) -> Result<NarrativeReport, OracleError>;
}

/// The engine's collaborator slots. All optional; an empty set runs the
/// match entirely on deterministic policy.
pub struct Oracles {
    alteration: Option<Box<dyn AlterationOracle>>,
    decision: Option<Box<dyn DecisionOracle>>,
    narrative: Option<Box<dyn NarrativeOracle>>,
    timeout: Duration,
}

impl Default for Oracles {
    fn default() -> Self {
        Self::none()
    }
}

impl Oracles {
    /// No collaborators; every call falls through to the deterministic
    /// policy.
    pub fn none() -> Self {
        Self {
            alteration: None,
            decision: None,
            narrative: None,
            timeout: Duration::from_millis(500),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_alteration(mut self, oracle: Box<dyn AlterationOracle>) -> Self {
        self.alteration = Some(oracle);
        self
    }

    pub fn with_decision(mut self, oracle: Box<dyn DecisionOracle>) -> Self {
        self.decision = Some(oracle);
        self
    }

    pub fn with_narrative(mut self, oracle: Box<dyn NarrativeOracle>) -> Self {
        self.narrative = Some(oracle);
        self
    }

    /// Runs a collaborator call under the deadline. A result that arrives
    /// after the deadline is discarded like a failure; adapters that block
    /// must enforce their own hard cutoff within this budget.
    fn guarded<T>(
        &self,
        name: &str,
        call: impl FnOnce() -> Result<T, OracleError>,
    ) -> Option<T> {
        let started = Instant::now();
        match call() {
            Ok(value) if started.elapsed() <= self.timeout => Some(value),
            Ok(_) => {
                warn!(oracle = name, "collaborator exceeded deadline, using fallback");
                None
            }
            Err(error) => {
                warn!(oracle = name, %error, "collaborator failed, using fallback");
                None
            }
        }
    }

    /// Altered content from the collaborator, if it answered in time.
    pub fn alter(&self, source: &str, context: &AlterationContext) -> Option<String> {
        let oracle = self.alteration.as_ref()?;
        self.guarded("alteration", || oracle.alter(source, context))
    }

    /// Faction decision from the collaborator, if it answered in time.
    pub fn decide(&self, inputs: &DecisionInputs<'_>) -> Option<Decision> {
        let oracle = self.decision.as_ref()?;
        self.guarded("decision", || oracle.decide(inputs))
    }

    /// Match narrative from the collaborator, if it answered in time.
    pub fn narrate(
        &self,
        events: &[WorldEvent],
        standings: &[PlayerSummary],
        winner: &PlayerSummary,
    ) -> Option<NarrativeReport> {
        let oracle = self.narrative.as_ref()?;
        self.guarded("narrative", || oracle.narrate(events, standings, winner))
    }
}

/// Deterministic template rewrite used when no alteration collaborator is
/// available. The prefix guarantees the output differs from the source.
pub fn fallback_alteration(source: &str, player_id: &str) -> String {
    let softened = source
        .replace(" is ", " might be ")
        .replace(" will ", " may ")
        .replace(" in ", " possibly in ");
    format!("[signal {} intercept] unverified: {}", player_id, softened)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingAlteration;

    impl AlterationOracle for FailingAlteration {
        fn alter(&self, _source: &str, _context: &AlterationContext) -> Result<String, OracleError> {
            Err(OracleError::Failed("model offline".to_string()))
        }
    }

    struct SlowAlteration;

    impl AlterationOracle for SlowAlteration {
        fn alter(&self, _source: &str, _context: &AlterationContext) -> Result<String, OracleError> {
            std::thread::sleep(Duration::from_millis(20));
            Ok("too late".to_string())
        }
    }

    struct EchoAlteration;

    impl AlterationOracle for EchoAlteration {
        fn alter(&self, source: &str, _context: &AlterationContext) -> Result<String, OracleError> {
            Ok(format!("rewritten: {}", source))
        }
    }

    fn context() -> AlterationContext {
        AlterationContext {
            player_id: "player_1".to_string(),
            round: 1,
            faction_names: vec!["The Archivists".to_string()],
            faction_states: vec![("The Archivists".to_string(), FactionState::Peaceful)],
        }
    }

    #[test]
    fn test_empty_oracles_answer_nothing() {
        let oracles = Oracles::none();
        assert!(oracles.alter("x", &context()).is_none());
    }

    #[test]
    fn test_working_oracle_answers() {
        let oracles = Oracles::none().with_alteration(Box::new(EchoAlteration));
        assert_eq!(oracles.alter("x", &context()).unwrap(), "rewritten: x");
    }

    #[test]
    fn test_failing_oracle_yields_none() {
        let oracles = Oracles::none().with_alteration(Box::new(FailingAlteration));
        assert!(oracles.alter("x", &context()).is_none());
    }

    #[test]
    fn test_slow_oracle_result_discarded() {
        let oracles = Oracles::none()
            .with_alteration(Box::new(SlowAlteration))
            .with_timeout(Duration::from_millis(1));
        assert!(oracles.alter("x", &context()).is_none());
    }

    #[test]
    fn test_fallback_alteration_differs_from_source() {
        let source = "The system core is located in sector Alpha";
        let altered = fallback_alteration(source, "player_1");
        assert_ne!(altered, source);
        assert!(altered.contains("player_1"));
        assert!(altered.contains("unverified"));
    }

    #[test]
    fn test_fallback_alteration_deterministic() {
        let a = fallback_alteration("x is y", "p");
        let b = fallback_alteration("x is y", "p");
        assert_eq!(a, b);
    }
}
