//! Engine Errors
//!
//! Every fallible engine entry point returns one of these. Collaborator
//! (oracle) failures are deliberately absent: they are absorbed by the
//! deterministic fallbacks and never surface to the match caller.

use thiserror::Error;

/// Kind of entity referenced by an action or query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Fragment,
    Faction,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityKind::Player => "player",
            EntityKind::Fragment => "fragment",
            EntityKind::Faction => "faction",
        };
        write!(f, "{}", label)
    }
}

/// Errors surfaced by the game engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// Bad setup parameters; the match never starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Operation attempted outside its valid lifecycle state. The match
    /// state is unchanged.
    #[error("cannot {operation} while the match is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Reference to a player, fragment, or faction that is not registered.
    /// Actions validate every reference before mutating anything, so a
    /// failed action applies none of its effects.
    #[error("unknown {kind}: {id}")]
    UnknownEntity { kind: EntityKind, id: String },
}

impl GameError {
    pub fn unknown_player(id: impl Into<String>) -> Self {
        GameError::UnknownEntity {
            kind: EntityKind::Player,
            id: id.into(),
        }
    }

    pub fn unknown_fragment(id: impl Into<String>) -> Self {
        GameError::UnknownEntity {
            kind: EntityKind::Fragment,
            id: id.into(),
        }
    }

    pub fn unknown_faction(id: impl Into<String>) -> Self {
        GameError::UnknownEntity {
            kind: EntityKind::Faction,
            id: id.into(),
        }
    }
}
