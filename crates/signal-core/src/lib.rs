//! Signal Core
//!
//! Simulation engine for LastSignal, a belief-warfare game set in a
//! collapsing network. Players plant, corrupt, and bury information
//! fragments; factions accumulate belief, shift posture, strike
//! alliances, or crash under contradictory signals; when the clock runs
//! out the most influential player's story becomes the record.
//!
//! The [`GameEngine`] is the only mutation point. Generative
//! collaborators plug in through the [`oracle`] traits; every oracle has
//! a deterministic fallback, so the engine runs standalone.

pub mod config;
pub mod engine;
pub mod error;
pub mod faction;
pub mod fragment;
pub mod oracle;
pub mod player;
pub mod setup;
pub mod world;

pub use config::{ConfigError, DecisionThresholds, GameConfig, RewardTable, SpreadStrengths};
pub use engine::{ActionOutcome, GameEngine, Lifecycle};
pub use error::{EntityKind, GameError};
pub use faction::{Decision, Faction};
pub use fragment::{Creator, FragmentId, InformationFragment};
pub use oracle::{
    AlterationContext, AlterationOracle, DecisionInputs, DecisionOracle, NarrativeOracle,
    OracleError, Oracles,
};
pub use player::Player;
pub use world::WorldState;
