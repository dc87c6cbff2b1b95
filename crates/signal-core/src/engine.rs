//! Game Engine
//!
//! The single mutation point for a match. The engine owns the fragment,
//! faction, and player registries plus the world state, and drives the
//! match lifecycle: initialization, per-action processing, per-round
//! processing, and victory determination. All cross-references between
//! entities go by id/name through these registries; nothing holds a
//! reference back to the engine.
//!
//! The engine is not internally thread-safe. All calls against one match
//! must be serialized by whoever owns it (a session layer, a test, the
//! demo binary); distinct matches are fully independent.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use signal_events::{
    ActionKind, EventCategory, FactionState, GameSnapshot, NarrativeReport, TruthReveal,
    VictoryReport, WorldEvent,
};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::faction::{Decision, Faction};
use crate::fragment::{FragmentId, InformationFragment};
use crate::oracle::{fallback_alteration, AlterationContext, DecisionInputs, Oracles};
use crate::player::Player;
use crate::setup;
use crate::world::{truth_reveal, WorldState};

/// Lifecycle of a match. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Setup,
    Running,
    Finished,
}

impl Lifecycle {
    pub fn label(&self) -> &'static str {
        match self {
            Lifecycle::Setup => "setup",
            Lifecycle::Running => "running",
            Lifecycle::Finished => "finished",
        }
    }
}

/// Result of a processed player action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub player_id: String,
    /// The player's updated influence total
    pub influence: f64,
    pub description: String,
}

fn detached_rng() -> SmallRng {
    SmallRng::from_entropy()
}

/// Core engine for one match.
///
/// Serializable as the full match state; collaborators and the rng are
/// not persisted, so a restored engine runs on deterministic fallbacks
/// and a fresh rng until re-wired.
#[derive(Serialize, Deserialize)]
pub struct GameEngine {
    match_id: Uuid,
    config: GameConfig,
    lifecycle: Lifecycle,
    fragments: Vec<InformationFragment>,
    /// Registration order is the round-processing order
    factions: Vec<Faction>,
    /// Registration order is the victory tie-break order
    players: Vec<Player>,
    world: WorldState,
    #[serde(skip)]
    oracles: Oracles,
    #[serde(skip, default = "detached_rng")]
    rng: SmallRng,
}

impl GameEngine {
    /// Creates an engine in the `Setup` state. Setup randomness is seeded
    /// from the config when a seed is present.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let timeout = Duration::from_millis(config.oracle_timeout_ms);
        Self {
            match_id: Uuid::new_v4(),
            config,
            lifecycle: Lifecycle::Setup,
            fragments: Vec::new(),
            factions: Vec::new(),
            players: Vec::new(),
            world: WorldState::new(0.0),
            oracles: Oracles::none().with_timeout(timeout),
            rng,
        }
    }

    /// Installs collaborators. The engine's configured deadline applies to
    /// every call regardless of how the set was built.
    pub fn set_oracles(&mut self, oracles: Oracles) {
        self.oracles = oracles.with_timeout(Duration::from_millis(self.config.oracle_timeout_ms));
    }

    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn fragments(&self) -> &[InformationFragment] {
        &self.fragments
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn faction(&self, name: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.name() == name)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn fragment(&self, id: &str) -> Option<&InformationFragment> {
        self.fragments.iter().find(|f| f.id().as_str() == id)
    }

    fn require_running(&self, operation: &'static str) -> Result<(), GameError> {
        if self.lifecycle != Lifecycle::Running {
            return Err(GameError::InvalidState {
                operation,
                state: self.lifecycle.label(),
            });
        }
        Ok(())
    }

    /// Sets up and starts a match: seed factions, seed fragments, player
    /// registration with a random starting hand, and the countdown clock.
    pub fn initialize(
        &mut self,
        player_names: &[String],
        duration_seconds: f64,
    ) -> Result<(), GameError> {
        if self.lifecycle != Lifecycle::Setup {
            return Err(GameError::InvalidState {
                operation: "initialize",
                state: self.lifecycle.label(),
            });
        }
        self.config.validate()?;
        if player_names.is_empty() {
            return Err(GameError::Configuration(
                "at least one player is required".to_string(),
            ));
        }
        if duration_seconds <= 0.0 {
            return Err(GameError::Configuration(
                "match duration must be positive".to_string(),
            ));
        }

        let faction_names = self.config.factions.clone();
        self.factions = faction_names
            .iter()
            .map(|name| Faction::with_neighbors(name.clone(), faction_names.iter().map(String::as_str)))
            .collect();

        self.fragments = setup::seed_fragments(&mut self.rng, 0);

        let hand_size = self.config.hand_size.min(self.fragments.len());
        self.players = player_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut player = Player::new(format!("player_{}", i + 1), name.clone());
                let hand: Vec<FragmentId> = self
                    .fragments
                    .choose_multiple(&mut self.rng, hand_size)
                    .map(|fragment| fragment.id().clone())
                    .collect();
                for id in hand {
                    player.grant(id);
                }
                player
            })
            .collect();

        self.world = WorldState::new(duration_seconds);
        self.world
            .record("The grid begins its final collapse", EventCategory::Other);
        self.lifecycle = Lifecycle::Running;

        info!(
            match_id = %self.match_id,
            players = self.players.len(),
            factions = self.factions.len(),
            fragments = self.fragments.len(),
            "match initialized"
        );
        Ok(())
    }

    /// Processes one player action. Every reference is validated before
    /// any mutation, so a failed action leaves the match untouched.
    pub fn process_action(
        &mut self,
        player_id: &str,
        fragment_id: &str,
        action: ActionKind,
        target: Option<&str>,
    ) -> Result<ActionOutcome, GameError> {
        self.require_running("process_action")?;

        let player_index = self
            .players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| GameError::unknown_player(player_id))?;
        let fragment_index = self
            .fragments
            .iter()
            .position(|f| f.id().as_str() == fragment_id)
            .ok_or_else(|| GameError::unknown_fragment(fragment_id))?;
        let target_index = match target {
            Some(name) => Some(
                self.factions
                    .iter()
                    .position(|f| f.name() == name)
                    .ok_or_else(|| GameError::unknown_faction(name))?,
            ),
            None => None,
        };

        let description = match action {
            ActionKind::Spread => self.spread(player_index, fragment_index, target_index),
            ActionKind::Alter => self.alter(player_index, fragment_index),
            ActionKind::Hide => self.hide(player_index, fragment_index),
        };

        let player = &self.players[player_index];
        debug!(player = player.id(), action = action.label(), "action processed");
        Ok(ActionOutcome {
            player_id: player.id().to_string(),
            influence: player.influence(),
            description,
        })
    }

    fn spread(
        &mut self,
        player_index: usize,
        fragment_index: usize,
        target_index: Option<usize>,
    ) -> String {
        let fragment_id = self.fragments[fragment_index].id().clone();
        self.fragments[fragment_index].note_spread();

        match target_index {
            Some(index) => {
                let strength = self.config.spread.targeted;
                self.factions[index].receive_belief(fragment_id.clone(), strength);
                self.players[player_index].award(self.config.rewards.spread_targeted);
                format!(
                    "{} spread {} to {}",
                    self.players[player_index].name(),
                    fragment_id,
                    self.factions[index].name()
                )
            }
            None => {
                let strength = self.config.spread.broadcast;
                for faction in &mut self.factions {
                    faction.receive_belief(fragment_id.clone(), strength);
                }
                // One flat reward regardless of faction count
                self.players[player_index].award(self.config.rewards.spread_broadcast);
                format!(
                    "{} broadcast {} to all factions",
                    self.players[player_index].name(),
                    fragment_id
                )
            }
        }
    }

    fn alter(&mut self, player_index: usize, fragment_index: usize) -> String {
        let player_id = self.players[player_index].id().to_string();
        let context = AlterationContext {
            player_id: player_id.clone(),
            round: self.world.round(),
            faction_names: self.factions.iter().map(|f| f.name().to_string()).collect(),
            faction_states: self
                .factions
                .iter()
                .map(|f| (f.name().to_string(), f.state()))
                .collect(),
        };
        let source = self.fragments[fragment_index].content();
        let content = self
            .oracles
            .alter(source, &context)
            .unwrap_or_else(|| fallback_alteration(source, &player_id));

        let parent_id = self.fragments[fragment_index].id().clone();
        let new_id = self.unique_altered_id(&parent_id, &player_id);
        let altered = InformationFragment::altered(
            &self.fragments[fragment_index],
            new_id.clone(),
            player_id,
            content,
            self.world.round(),
        );
        self.fragments.push(altered);
        self.players[player_index].grant(FragmentId::from(new_id.clone()));
        self.players[player_index].award(self.config.rewards.alter);

        format!(
            "{} altered {}, creating {}",
            self.players[player_index].name(),
            parent_id,
            new_id
        )
    }

    fn hide(&mut self, player_index: usize, fragment_index: usize) -> String {
        let fragment_id = self.fragments[fragment_index].id().clone();

        // Strip belief from the strongest believers; ties go to earlier
        // registration.
        let mut holders: Vec<(usize, f64)> = self
            .factions
            .iter()
            .enumerate()
            .filter(|(_, f)| f.believes_in(&fragment_id))
            .map(|(i, f)| (i, f.belief(&fragment_id)))
            .collect();
        holders.sort_by(|(index_a, a), (index_b, b)| {
            b.partial_cmp(a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| index_a.cmp(index_b))
        });
        holders.truncate(self.config.hide_targets);

        for (index, _) in &holders {
            self.factions[*index].remove_belief(&fragment_id);
        }
        // Flat reward even when nobody held the fragment
        self.players[player_index].award(self.config.rewards.hide);

        format!(
            "{} hid {} from {} factions",
            self.players[player_index].name(),
            fragment_id,
            holders.len()
        )
    }

    fn unique_altered_id(&self, parent: &FragmentId, player_id: &str) -> String {
        let base = format!("{}_altered_{}", parent, player_id);
        if self.fragment(&base).is_none() {
            return base;
        }
        let mut serial = 2;
        loop {
            let candidate = format!("{}_{}", base, serial);
            if self.fragment(&candidate).is_none() {
                return candidate;
            }
            serial += 1;
        }
    }

    /// Processes one round: every faction recomputes its state from its
    /// accumulated beliefs, then a single alliance pass runs over faction
    /// pairs sharing beliefs. Returns the events recorded this round.
    pub fn process_round(&mut self, elapsed_seconds: Option<f64>) -> Result<Vec<WorldEvent>, GameError> {
        self.require_running("process_round")?;
        let mut events = Vec::new();

        // Decision phase, in registration order. The oracle may pre-empt
        // the ladder but its failure always falls back to it.
        let decisions: Vec<Decision> = self
            .factions
            .iter()
            .map(|faction| {
                let inputs = DecisionInputs {
                    faction_name: faction.name(),
                    beliefs: faction.beliefs(),
                    relationships: faction.relationships(),
                    current_state: faction.state(),
                    round: self.world.round(),
                    faction_count: self.factions.len(),
                    fragment_count: self.fragments.len(),
                };
                self.oracles
                    .decide(&inputs)
                    .unwrap_or_else(|| faction.decide(&self.config.thresholds))
            })
            .collect();

        for (index, decision) in decisions.into_iter().enumerate() {
            let previous = self.factions[index].state();
            let changed = previous != decision.state;
            self.factions[index].set_state(decision.state);

            let noteworthy = matches!(
                decision.state,
                FactionState::Aggressive | FactionState::Zealous | FactionState::Crashed
            );
            if changed || noteworthy {
                let description = decision.description.unwrap_or_else(|| {
                    format!(
                        "{} settles into a {} posture",
                        self.factions[index].name(),
                        decision.state.label()
                    )
                });
                events.push(self.world.record(description, category_for(decision.state)));
            }
        }

        events.extend(self.alliance_pass());

        self.world.advance_round();
        self.world
            .consume_time(elapsed_seconds.unwrap_or(self.config.round_tick_seconds));

        debug!(
            round = self.world.round(),
            events = events.len(),
            time_remaining = self.world.time_remaining(),
            "round processed"
        );
        Ok(events)
    }

    /// One pass over unordered faction pairs. Pairs that share at least
    /// one believed fragment and bear each other no ill will are raised to
    /// the allied relationship level; the event fires only when the level
    /// actually rises, so re-running without new shared beliefs emits
    /// nothing.
    fn alliance_pass(&mut self) -> Vec<WorldEvent> {
        let mut events = Vec::new();
        let allied = self.config.thresholds.allied_level;
        let names: Vec<String> = self.factions.iter().map(|f| f.name().to_string()).collect();

        for i in 0..self.factions.len() {
            for j in (i + 1)..self.factions.len() {
                let shares = self.factions[i]
                    .beliefs()
                    .iter()
                    .any(|(id, strength)| *strength > 0.0 && self.factions[j].belief(id) > 0.0);
                if !shares {
                    continue;
                }

                let forward = self.factions[i].relationship(&names[j]);
                let backward = self.factions[j].relationship(&names[i]);
                if forward < 0.0 || backward < 0.0 {
                    continue;
                }

                let newly_formed = forward < allied || backward < allied;
                self.factions[i].set_relationship(names[j].clone(), allied);
                self.factions[j].set_relationship(names[i].clone(), allied);
                if newly_formed {
                    events.push(self.world.record(
                        format!("{} and {} form an alliance", names[i], names[j]),
                        EventCategory::Alliance,
                    ));
                }
            }
        }
        events
    }

    /// Checks the clock. On expiry the match finishes and the winner is
    /// the strictly highest influence, ties broken by earliest player
    /// registration. Idempotent once finished; re-calling changes no
    /// influence and returns the same winner.
    pub fn check_victory(&mut self) -> Result<Option<VictoryReport>, GameError> {
        if self.lifecycle == Lifecycle::Setup {
            return Err(GameError::InvalidState {
                operation: "check_victory",
                state: self.lifecycle.label(),
            });
        }
        if self.lifecycle == Lifecycle::Running && !self.world.expired() {
            return Ok(None);
        }
        if self.lifecycle != Lifecycle::Finished {
            self.lifecycle = Lifecycle::Finished;
            info!(match_id = %self.match_id, "match finished");
        }

        let winner = self.winner().ok_or_else(no_players)?;
        Ok(Some(VictoryReport {
            winner_id: winner.id().to_string(),
            winner_name: winner.name().to_string(),
            standings: self.players.iter().map(Player::summary).collect(),
        }))
    }

    /// `None` only before any player has registered.
    fn winner(&self) -> Option<&Player> {
        // Strictly-greater comparison keeps the earliest registrant on ties
        self.players
            .iter()
            .fold(None::<&Player>, |best, player| match best {
                Some(current) if player.influence() > current.influence() => Some(player),
                Some(current) => Some(current),
                None => Some(player),
            })
    }

    /// Point-in-time view of the match, valid in any lifecycle state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            match_id: self.match_id,
            lifecycle: self.lifecycle.label().to_string(),
            round: self.world.round(),
            time_remaining: self.world.time_remaining(),
            factions: self.factions.iter().map(Faction::summary).collect(),
            players: self.players.iter().map(Player::summary).collect(),
            fragment_count: self.fragments.len(),
            recent_events: self.world.log().recent(5).to_vec(),
        }
    }

    /// Post-match narrative, from the narrative collaborator when one is
    /// wired and answering, otherwise the deterministic template.
    pub fn narrative(&self) -> Result<NarrativeReport, GameError> {
        if self.lifecycle != Lifecycle::Finished {
            return Err(GameError::InvalidState {
                operation: "narrative",
                state: self.lifecycle.label(),
            });
        }
        let standings: Vec<_> = self.players.iter().map(Player::summary).collect();
        let winner = self.winner().ok_or_else(no_players)?.summary();
        Ok(self
            .oracles
            .narrate(self.world.log().events(), &standings, &winner)
            .unwrap_or_else(|| self.world.fallback_narrative(&standings, &winner)))
    }

    /// Post-match partition of every fragment by kind. Deterministic.
    pub fn truth_reveal(&self) -> Result<TruthReveal, GameError> {
        if self.lifecycle != Lifecycle::Finished {
            return Err(GameError::InvalidState {
                operation: "truth_reveal",
                state: self.lifecycle.label(),
            });
        }
        Ok(truth_reveal(&self.fragments))
    }
}

fn no_players() -> GameError {
    GameError::Configuration("match has no registered players".to_string())
}

fn category_for(state: FactionState) -> EventCategory {
    match state {
        FactionState::Aggressive => EventCategory::War,
        FactionState::Zealous => EventCategory::Cult,
        FactionState::Crashed => EventCategory::Crash,
        FactionState::Allied => EventCategory::Alliance,
        FactionState::Peaceful => EventCategory::Other,
    }
}
