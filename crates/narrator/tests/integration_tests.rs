//! End-to-end tests wiring the narrator's collaborators into the engine.

use narrator::{standard_oracles, NarratorTemplates, TemplateAlteration, TemplateNarrator};
use signal_core::oracle::{NarrativeOracle, Oracles};
use signal_core::{GameConfig, GameEngine};
use signal_events::{ActionKind, EventCategory, FragmentKind, PlayerSummary, WorldEvent};

fn narrated_engine(seed: u64) -> GameEngine {
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut engine = GameEngine::new(config);
    engine.set_oracles(standard_oracles(NarratorTemplates::default()));
    engine
        .initialize(&["Alice".to_string(), "Bob".to_string()], 60.0)
        .unwrap();
    engine
}

#[test]
fn test_altered_fragments_carry_narrator_voice() {
    let mut engine = narrated_engine(21);
    let source = engine.fragment("info_0").unwrap().content().to_string();

    engine
        .process_action("player_1", "info_0", ActionKind::Alter, None)
        .unwrap();

    let altered = engine.fragment("info_0_altered_player_1").unwrap();
    assert_eq!(altered.kind(), FragmentKind::Corrupted);
    assert_ne!(altered.content(), source);
    // Template prefixes all open with a bracketed provenance tag
    assert!(altered.content().starts_with('['));
}

#[test]
fn test_heuristic_decisions_drive_the_round() {
    let mut engine = narrated_engine(22);
    // 18 belief in one fragment, perfectly coherent: the obsession
    // pattern fires instead of the generic ladder
    for _ in 0..9 {
        engine
            .process_action(
                "player_1",
                "info_0",
                ActionKind::Spread,
                Some("The Archivists"),
            )
            .unwrap();
    }

    let events = engine.process_round(None).unwrap();
    assert!(events
        .iter()
        .any(|e| e.category == EventCategory::Cult && e.description.contains("doctrine")));
}

#[test]
fn test_narrated_match_completes_with_full_reports() {
    let mut engine = narrated_engine(23);
    engine
        .process_action("player_1", "info_0", ActionKind::Spread, None)
        .unwrap();
    engine
        .process_action("player_2", "info_1", ActionKind::Alter, None)
        .unwrap();
    engine.process_round(None).unwrap();
    engine.process_round(Some(500.0)).unwrap();

    let report = engine.check_victory().unwrap().unwrap();
    assert_eq!(report.winner_id, "player_2");

    let narrative = engine.narrative().unwrap();
    assert!(narrative.summary.contains("Alice"));
    assert!(narrative.conclusion.contains("Bob"));

    let reveal = engine.truth_reveal().unwrap();
    assert_eq!(reveal.total(), 9);
}

#[test]
fn test_quiet_match_falls_back_to_engine_narrative() {
    // No actions at all: the narrator declines and the engine's own
    // template must still produce a narrative
    let mut engine = narrated_engine(24);
    engine.process_round(Some(500.0)).unwrap();
    engine.check_victory().unwrap();

    let narrative = engine.narrative().unwrap();
    assert!(!narrative.full_text().is_empty());
    assert!(narrative.conclusion.contains("Alice"));
}

#[test]
fn test_custom_templates_flow_through() {
    let templates = NarratorTemplates {
        alteration_prefixes: vec!["[spoofed by {player}]".to_string()],
        ..NarratorTemplates::default()
    };
    let mut engine = GameEngine::new(GameConfig {
        seed: Some(25),
        ..GameConfig::default()
    });
    engine.set_oracles(Oracles::none().with_alteration(Box::new(TemplateAlteration::new(
        templates,
    ))));
    engine.initialize(&["Alice".to_string()], 60.0).unwrap();

    engine
        .process_action("player_1", "info_3", ActionKind::Alter, None)
        .unwrap();
    let altered = engine.fragment("info_3_altered_player_1").unwrap();
    assert!(altered.content().starts_with("[spoofed by"));
}

#[test]
fn test_narrator_output_matches_report_shape() {
    let narrator = TemplateNarrator::default();
    let standings = vec![PlayerSummary {
        id: "player_1".to_string(),
        name: "Alice".to_string(),
        influence: 2.5,
        actions_taken: 3,
    }];
    let events = vec![WorldEvent::new(0, "strike", EventCategory::War)];

    let report = narrator.narrate(&events, &standings, &standings[0]).unwrap();
    assert!(!report.summary.is_empty());
    assert!(!report.key_moments.is_empty());
    assert!(report.conclusion.contains("2.5"));
}
