//! Information Fragments
//!
//! The atomic unit of play: an immutable piece of information with a
//! mutable belief footprint out in the faction registries. Alteration
//! never mutates in place; it derives a new corrupted fragment with a
//! lineage link back to its parent.

use serde::{Deserialize, Serialize};

use signal_events::{FragmentDisclosure, FragmentKind};

/// Unique identifier for an information fragment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FragmentId(pub String);

impl FragmentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FragmentId {
    fn from(s: &str) -> Self {
        FragmentId(s.to_string())
    }
}

impl From<String> for FragmentId {
    fn from(s: String) -> Self {
        FragmentId(s)
    }
}

impl std::fmt::Display for FragmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who created a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Creator {
    /// Seeded at match initialization
    System,
    /// Derived by a player's alter action
    Player(String),
}

impl Creator {
    /// Registry label: "system" or the player id.
    pub fn label(&self) -> &str {
        match self {
            Creator::System => "system",
            Creator::Player(id) => id,
        }
    }
}

/// A piece of information in the game world.
///
/// Id, content, and kind are fixed at creation. Fragments are never
/// deleted from the registry; hiding one only strips it from faction
/// belief maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformationFragment {
    id: FragmentId,
    content: String,
    kind: FragmentKind,
    creator: Creator,
    round_created: u64,
    /// Immediate parent when this fragment was derived by alteration
    altered_from: Option<FragmentId>,
    /// Times this fragment was spread to factions
    spread_count: u32,
}

impl InformationFragment {
    /// Creates a system-seeded fragment.
    pub fn new(
        id: impl Into<FragmentId>,
        content: impl Into<String>,
        kind: FragmentKind,
        round: u64,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            kind,
            creator: Creator::System,
            round_created: round,
            altered_from: None,
            spread_count: 0,
        }
    }

    /// Creates the corrupted child of `parent`, attributed to a player.
    ///
    /// The child is always `Corrupted` regardless of the parent's kind and
    /// carries a lineage link to the parent's id. The parent is untouched.
    pub fn altered(
        parent: &InformationFragment,
        id: impl Into<FragmentId>,
        player_id: impl Into<String>,
        content: impl Into<String>,
        round: u64,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            kind: FragmentKind::Corrupted,
            creator: Creator::Player(player_id.into()),
            round_created: round,
            altered_from: Some(parent.id.clone()),
            spread_count: 0,
        }
    }

    pub fn id(&self) -> &FragmentId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn creator(&self) -> &Creator {
        &self.creator
    }

    pub fn round_created(&self) -> u64 {
        self.round_created
    }

    pub fn altered_from(&self) -> Option<&FragmentId> {
        self.altered_from.as_ref()
    }

    pub fn spread_count(&self) -> u32 {
        self.spread_count
    }

    /// Bumps the spread counter. Called by the engine on every spread.
    pub fn note_spread(&mut self) {
        self.spread_count += 1;
    }

    /// Truth-reveal entry for this fragment.
    pub fn disclosure(&self) -> FragmentDisclosure {
        FragmentDisclosure {
            id: self.id.0.clone(),
            content: self.content.clone(),
            creator: self.creator.label().to_string(),
            spread_count: self.spread_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_fragment() {
        let fragment = InformationFragment::new("info_0", "the core is in sector Alpha", FragmentKind::Truth, 0);

        assert_eq!(fragment.id().as_str(), "info_0");
        assert_eq!(fragment.kind(), FragmentKind::Truth);
        assert_eq!(fragment.creator(), &Creator::System);
        assert!(fragment.altered_from().is_none());
        assert_eq!(fragment.spread_count(), 0);
    }

    #[test]
    fn test_altered_fragment_is_corrupted_with_lineage() {
        let parent = InformationFragment::new("info_1", "coalition forming", FragmentKind::Lie, 0);
        let child = InformationFragment::altered(
            &parent,
            "info_1_altered_player_1",
            "player_1",
            "[intercept] coalition possibly forming",
            3,
        );

        assert_eq!(child.kind(), FragmentKind::Corrupted);
        assert_eq!(child.altered_from(), Some(parent.id()));
        assert_eq!(child.creator(), &Creator::Player("player_1".to_string()));
        assert_eq!(child.round_created(), 3);
        // Parent is untouched
        assert_eq!(parent.kind(), FragmentKind::Lie);
        assert_eq!(parent.content(), "coalition forming");
    }

    #[test]
    fn test_altering_an_altered_fragment_extends_lineage() {
        let root = InformationFragment::new("info_2", "virus detected", FragmentKind::Lie, 0);
        let first = InformationFragment::altered(&root, "info_2_altered_p1", "p1", "x", 1);
        let second = InformationFragment::altered(&first, "info_2_altered_p1_altered_p2", "p2", "y", 2);

        // Lineage is one level: each child points at its immediate parent
        assert_eq!(second.altered_from(), Some(first.id()));
        assert_eq!(first.altered_from(), Some(root.id()));
    }

    #[test]
    fn test_disclosure_labels_creator() {
        let fragment = InformationFragment::new("info_3", "cache found", FragmentKind::Truth, 0);
        assert_eq!(fragment.disclosure().creator, "system");

        let child = InformationFragment::altered(&fragment, "c", "player_2", "z", 1);
        assert_eq!(child.disclosure().creator, "player_2");
    }

    #[test]
    fn test_note_spread() {
        let mut fragment = InformationFragment::new("info_4", "breach", FragmentKind::Lie, 0);
        fragment.note_spread();
        fragment.note_spread();
        assert_eq!(fragment.spread_count(), 2);
        assert_eq!(fragment.disclosure().spread_count, 2);
    }
}
