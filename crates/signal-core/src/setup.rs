//! Match Setup
//!
//! The default faction roster and the seed fragment deck dealt at
//! initialization.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use signal_events::FragmentKind;

use crate::fragment::InformationFragment;

/// Sector names substituted into seed fragment templates.
pub const SECTOR_NAMES: &[&str] = &["Alpha", "Beta", "Gamma", "Delta", "Omega"];

/// The five default factions, in registration order.
pub fn default_faction_names() -> Vec<String> {
    [
        "The Archivists",
        "Digital Nomads",
        "Encryption Zealots",
        "System Maintainers",
        "Data Miners",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

/// Seed fragment templates: a mixed deck with at least one of each kind.
const FRAGMENT_TEMPLATES: &[(&str, FragmentKind)] = &[
    ("The system core is located in sector {}", FragmentKind::Truth),
    ("Faction {} is planning an attack", FragmentKind::Lie),
    ("Emergency protocol {} activated", FragmentKind::Corrupted),
    ("Resource cache found at coordinates {}", FragmentKind::Truth),
    ("Security breach in {} subsystem", FragmentKind::Lie),
    ("Ancient data suggests {} holds the key", FragmentKind::Corrupted),
    ("Coalition forming between {} factions", FragmentKind::Truth),
    ("Virus detected in {} network", FragmentKind::Lie),
];

/// Number of fragments seeded at match start.
pub fn seed_fragment_count() -> usize {
    FRAGMENT_TEMPLATES.len()
}

/// Builds the seed deck, substituting a random sector into each template.
pub fn seed_fragments(rng: &mut SmallRng, round: u64) -> Vec<InformationFragment> {
    FRAGMENT_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, (template, kind))| {
            let sector = SECTOR_NAMES
                .choose(rng)
                .copied()
                .unwrap_or(SECTOR_NAMES[0]);
            InformationFragment::new(
                format!("info_{}", i),
                template.replace("{}", sector),
                *kind,
                round,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_faction_roster() {
        let names = default_faction_names();
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "The Archivists");
    }

    #[test]
    fn test_seed_deck_has_eight_mixed_fragments() {
        let mut rng = SmallRng::seed_from_u64(7);
        let fragments = seed_fragments(&mut rng, 0);

        assert_eq!(fragments.len(), 8);
        for kind in FragmentKind::all() {
            assert!(
                fragments.iter().any(|f| f.kind() == *kind),
                "missing kind {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_seed_deck_ids_unique() {
        let mut rng = SmallRng::seed_from_u64(7);
        let fragments = seed_fragments(&mut rng, 0);
        let mut ids: Vec<_> = fragments.iter().map(|f| f.id().as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_seed_deck_deterministic_for_seed() {
        let mut rng_a = SmallRng::seed_from_u64(42);
        let mut rng_b = SmallRng::seed_from_u64(42);
        let deck_a = seed_fragments(&mut rng_a, 0);
        let deck_b = seed_fragments(&mut rng_b, 0);

        for (a, b) in deck_a.iter().zip(deck_b.iter()) {
            assert_eq!(a.content(), b.content());
        }
    }

    #[test]
    fn test_templates_resolve_sectors() {
        let mut rng = SmallRng::seed_from_u64(7);
        let fragments = seed_fragments(&mut rng, 0);
        for fragment in fragments {
            assert!(!fragment.content().contains("{}"));
        }
    }
}
