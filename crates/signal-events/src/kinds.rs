//! Core Enumerations
//!
//! The closed sets of fragment kinds, faction states, and player actions.
//! These are deliberately non-extensible so decision ladders and match
//! summaries can stay exhaustive.

use serde::{Deserialize, Serialize};

/// The nature of a piece of information circulating in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Objectively accurate information seeded by the system
    Truth,
    /// Fabricated information seeded by the system
    Lie,
    /// Information damaged in transit, or deliberately altered by a player
    Corrupted,
}

impl FragmentKind {
    /// Returns all fragment kinds.
    pub fn all() -> &'static [FragmentKind] {
        &[FragmentKind::Truth, FragmentKind::Lie, FragmentKind::Corrupted]
    }

    /// Human-readable label used in reveals and logs.
    pub fn label(&self) -> &'static str {
        match self {
            FragmentKind::Truth => "truth",
            FragmentKind::Lie => "lie",
            FragmentKind::Corrupted => "corrupted",
        }
    }
}

/// Behavioral state of an NPC faction, recomputed every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionState {
    /// Default state: no strong beliefs, no strong ties
    Peaceful,
    /// Strong belief pushed the faction toward conflict
    Aggressive,
    /// A single overwhelming belief became doctrine
    Zealous,
    /// Conflicting or starved signals shut the faction down
    Crashed,
    /// Strong positive relationship with another faction
    Allied,
}

impl FactionState {
    /// Returns all faction states.
    pub fn all() -> &'static [FactionState] {
        &[
            FactionState::Peaceful,
            FactionState::Aggressive,
            FactionState::Zealous,
            FactionState::Crashed,
            FactionState::Allied,
        ]
    }

    /// Human-readable label used in snapshots and logs.
    pub fn label(&self) -> &'static str {
        match self {
            FactionState::Peaceful => "peaceful",
            FactionState::Aggressive => "aggressive",
            FactionState::Zealous => "zealous",
            FactionState::Crashed => "crashed",
            FactionState::Allied => "allied",
        }
    }
}

impl Default for FactionState {
    fn default() -> Self {
        FactionState::Peaceful
    }
}

/// An action a player can take with an information fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Push a fragment into faction belief maps
    Spread,
    /// Derive a corrupted copy of a fragment
    Alter,
    /// Strip a fragment from the strongest believers
    Hide,
}

impl ActionKind {
    /// Returns all action kinds.
    pub fn all() -> &'static [ActionKind] {
        &[ActionKind::Spread, ActionKind::Alter, ActionKind::Hide]
    }

    /// Human-readable label used in action outcomes.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Spread => "spread",
            ActionKind::Alter => "alter",
            ActionKind::Hide => "hide",
        }
    }
}
