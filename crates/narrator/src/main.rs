//! LastSignal demo match.
//!
//! Run with: cargo run -p narrator
//!
//! Examples:
//!   cargo run -p narrator -- --seed 42 --rounds 8
//!   cargo run -p narrator -- --players Alice,Bob,Eve --duration 120

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use narrator::{standard_oracles, NarratorTemplates};
use signal_core::{FragmentId, GameConfig, GameEngine};
use signal_events::ActionKind;

/// Scripted LastSignal match with the template narrator attached.
#[derive(Parser, Debug)]
#[command(name = "lastsignal")]
#[command(about = "Belief-warfare match in a collapsing network")]
struct Args {
    /// Player names
    #[arg(long, value_delimiter = ',', default_value = "Alice,Bob")]
    players: Vec<String>,

    /// Match duration in seconds
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// Maximum number of rounds to play
    #[arg(long, default_value_t = 6)]
    rounds: u32,

    /// Random seed for the match and the action script
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Path to a game configuration TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a narrator template TOML file
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Run on deterministic policy only, without the narrator
    #[arg(long)]
    plain: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    config.seed = Some(args.seed);

    let mut engine = GameEngine::new(config);
    if !args.plain {
        let templates = match &args.templates {
            Some(path) => NarratorTemplates::from_file(path)?,
            None => NarratorTemplates::default(),
        };
        engine.set_oracles(standard_oracles(templates));
    }
    engine.initialize(&args.players, args.duration)?;

    println!("match {} begins: {}", engine.match_id(), args.players.join(", "));
    let mut rng = SmallRng::seed_from_u64(args.seed);

    for round in 0..args.rounds {
        play_round(&mut engine, &mut rng)?;
        if let Some(report) = engine.check_victory()? {
            println!("\ntime expired after round {}", round + 1);
            finish(&engine, &report)?;
            return Ok(());
        }
    }

    // Round budget exhausted before the clock; burn the remainder
    let remaining = engine.world().time_remaining();
    engine.process_round(Some(remaining + 1.0))?;
    let report = engine
        .check_victory()?
        .ok_or("clock expired but no victory was reported")?;
    println!("\nround budget exhausted");
    finish(&engine, &report)?;
    Ok(())
}

/// Each player takes one randomly scripted action, then the round runs.
fn play_round(engine: &mut GameEngine, rng: &mut SmallRng) -> Result<(), Box<dyn Error>> {
    let player_ids: Vec<String> = engine.players().iter().map(|p| p.id().to_string()).collect();
    let faction_names: Vec<String> = engine
        .factions()
        .iter()
        .map(|f| f.name().to_string())
        .collect();

    for player_id in &player_ids {
        let hand: Vec<FragmentId> = engine
            .player(player_id)
            .map(|p| p.hand().to_vec())
            .unwrap_or_default();
        let Some(fragment_id) = hand.choose(rng).cloned() else {
            continue;
        };

        let action = *[ActionKind::Spread, ActionKind::Alter, ActionKind::Hide]
            .choose(rng)
            .ok_or("empty action set")?;
        let target = match action {
            ActionKind::Spread if rng.gen_bool(0.7) => {
                faction_names.choose(rng).map(String::as_str)
            }
            _ => None,
        };

        let outcome =
            engine.process_action(player_id, fragment_id.as_str(), action, target)?;
        println!("  {} (influence {:.1})", outcome.description, outcome.influence);
    }

    let events = engine.process_round(None)?;
    let snapshot = engine.snapshot();
    println!(
        "round {} complete, {:.0}s remaining",
        snapshot.round, snapshot.time_remaining
    );
    for event in &events {
        println!("  ! {}", event.description);
    }
    Ok(())
}

fn finish(
    engine: &GameEngine,
    report: &signal_events::VictoryReport,
) -> Result<(), Box<dyn Error>> {
    println!("\nwinner: {} ", report.winner_name);
    for standing in &report.standings {
        println!(
            "  {}: {:.1} influence over {} actions",
            standing.name, standing.influence, standing.actions_taken
        );
    }

    let narrative = engine.narrative()?;
    println!("\n{}", narrative.full_text());

    let reveal = engine.truth_reveal()?;
    println!("\nthe truth, revealed:");
    for truth in &reveal.truths {
        println!("  true   | {}", truth.content);
    }
    for lie in &reveal.lies {
        println!("  false  | {}", lie.content);
    }
    for corrupted in &reveal.corrupted {
        println!("  mangled| {} (by {})", corrupted.content, corrupted.creator);
    }
    Ok(())
}
