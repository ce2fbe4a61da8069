//! Doomspire skirmish driver.
//!
//! Seats four players on a generated board and plays rounds until someone
//! wins or the round limit runs out. Every seat is bot-driven unless
//! `DOOMSPIRE_HUMAN_SEAT` names one for the terminal.
//!
//! # Environment
//!
//! Everything [`RuntimeConfig::from_env`] reads, plus:
//! - `DOOMSPIRE_MAX_ROUNDS` - Round limit (default: 40)
//! - `DOOMSPIRE_HUMAN_SEAT` - Seat (1-4) played from the terminal
//!
//! ```bash
//! DOOMSPIRE_SEED=7 RUST_LOG=doomspire=debug cargo run -p doomspire-client
//! ```

mod console;

use std::cmp::Ordering;

use anyhow::Result;
use doomspire_core::{
    ChampionId, GameConfig, GameState, Monster, Player, PlayerId, PcgDice, Position, ResourceKind,
    Resources, TileKind, Victory, available_builds, check_victory, harvest, resolve_build,
};
use doomspire_runtime::{
    AgentRegistry, AgentResolver, Choices, EventCardId, HumanAgent, RandomAgent, RuntimeConfig,
    ScriptedAgent, TracingSink, TurnContext, decide, resolve_champion_duel,
    resolve_dragon_encounter, resolve_event_card, resolve_monster_encounter,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;
use tracing::{debug, info};

const DEFAULT_MAX_ROUNDS: u32 = 40;
const SEATS: [(u8, &str); 4] = [(1, "Crimson"), (2, "Azure"), (3, "Verdant"), (4, "Amber")];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let seed = config.seed_or_clock();
    let max_rounds = read_env::<u32>("DOOMSPIRE_MAX_ROUNDS").unwrap_or(DEFAULT_MAX_ROUNDS);
    let human_seat = read_env::<u8>("DOOMSPIRE_HUMAN_SEAT").map(PlayerId);
    info!(seed, max_rounds, "starting skirmish");

    let mut registry = AgentRegistry::new();
    registry.set_fallback(RandomAgent);
    registry.bind(
        PlayerId(2),
        ScriptedAgent::new().with_preferences(["fight", "gold", "hire", "chapel", "monastery"]),
    );
    registry.bind(
        PlayerId(3),
        ScriptedAgent::new().with_preferences(["flee", "blacksmith", "buy-might", "food"]),
    );
    let console = human_seat.map(|seat| {
        let (agent, prompts) = HumanAgent::channel(config.prompt_buffer);
        registry.bind(seat, agent);
        tokio::spawn(console::serve(prompts))
    });

    let mut session = Session {
        state: lay_out_board(),
        dice: PcgDice::new(seed),
        deck: StdRng::seed_from_u64(seed),
        log: TracingSink,
        config: config.game.clone(),
    };

    let mut winner = None;
    'rounds: for round in 1..=max_rounds {
        info!(round, "round begins");
        for (seat, _) in SEATS {
            if let Some(victory) = session.play_turn(PlayerId(seat), &registry).await? {
                winner = Some(victory);
                break 'rounds;
            }
        }
    }

    match winner {
        Some(victory) => info!(%victory, "game over"),
        None => info!("no winner after {max_rounds} rounds"),
    }
    for player in &session.state.players {
        info!(
            player = %player.name,
            fame = player.fame,
            might = player.might,
            resources = %player.resources,
            starred = session.state.starred_claims(player.id),
            "final standing"
        );
    }

    if let Some(console) = console {
        console.abort();
    }
    Ok(())
}

struct Session {
    state: GameState,
    dice: PcgDice,
    deck: StdRng,
    log: TracingSink,
    config: GameConfig,
}

impl Session {
    /// Harvest, build, step towards the doomspire, draw a card, then fight
    /// whatever waits on the tile.
    async fn play_turn(
        &mut self,
        seat: PlayerId,
        agents: &AgentRegistry,
    ) -> Result<Option<Victory>> {
        let harvested = harvest(&mut self.state, seat)?;
        debug!(%seat, collected = %harvested.collected, "harvest");

        self.build(seat, agents).await?;

        let position = self.advance(seat)?;

        let card = *EventCardId::iter()
            .collect::<Vec<_>>()
            .choose(&mut self.deck)
            .unwrap_or(&EventCardId::Drought);
        let mut ctx = self.context(seat, agents);
        let result = resolve_event_card(card, &mut ctx).await;
        debug!(%seat, %card, affected = result.players_affected.len(), "card resolved");

        self.encounter(seat, position, agents).await?;
        self.claim(seat)?;

        Ok(check_victory(&self.state, &self.config))
    }

    fn context<'a>(&'a mut self, seat: PlayerId, agents: &'a AgentRegistry) -> TurnContext<'a> {
        TurnContext::new(
            &mut self.state,
            seat,
            ChampionId(1),
            &mut self.dice,
            &self.log,
            &self.config,
        )
        .with_agents(agents)
    }

    async fn build(&mut self, seat: PlayerId, agents: &AgentRegistry) -> Result<()> {
        let builds = available_builds(&self.state, seat);
        if builds.is_empty() {
            return Ok(());
        }

        let mut choices = Choices::new(seat, "Anything to build this turn?")
            .option("pass", "Build nothing", None);
        for action in builds {
            choices = choices.option(
                action.as_str(),
                format!("Build {action} for {}", action.cost()),
                Some(action),
            );
        }
        let agent = agents.agent_for(seat);
        let Some(decided) = decide(agent.as_deref(), choices, &self.log).await else {
            return Ok(());
        };
        if let Some(action) = decided.value {
            let receipt = resolve_build(&mut self.state, seat, action)?;
            info!(%seat, action = %receipt.action, fame = receipt.fame_awarded, "built");
        }
        Ok(())
    }

    /// Move the first champion one step towards the doomspire.
    fn advance(&mut self, seat: PlayerId) -> Result<Position> {
        let from = self.state.require_champion(seat, ChampionId(1))?.position;
        let target = self.state.doomspire;
        let step = |from: u8, to: u8| match from.cmp(&to) {
            Ordering::Less => from + 1,
            Ordering::Greater => from - 1,
            Ordering::Equal => from,
        };
        let next = if from.row != target.row {
            Position::new(step(from.row, target.row), from.col)
        } else {
            Position::new(from.row, step(from.col, target.col))
        };
        self.state.place_champion(seat, ChampionId(1), next)?;
        Ok(next)
    }

    async fn encounter(
        &mut self,
        seat: PlayerId,
        position: Position,
        agents: &AgentRegistry,
    ) -> Result<()> {
        // the card may already have moved the champion
        let here = self.state.require_champion(seat, ChampionId(1))?.position;
        if here != position {
            return Ok(());
        }

        if here == self.state.doomspire {
            let mut ctx = self.context(seat, agents);
            let report = resolve_dragon_encounter(&mut ctx).await?;
            info!(%seat, outcome = ?report.outcome, "faced the dragon");
            return Ok(());
        }

        let monster = self.state.tile(here).and_then(|tile| tile.monster.clone());
        if let Some(monster) = monster {
            let mut ctx = self.context(seat, agents);
            let report = resolve_monster_encounter(&mut ctx, &monster, Some(here), true).await?;
            info!(%seat, monster = %monster.name, outcome = ?report.outcome, "fought a monster");
            return Ok(());
        }

        let rival = self
            .state
            .champions_at(here)
            .into_iter()
            .find(|&(player, _)| player != seat);
        if let Some((defender, champion)) = rival {
            let mut ctx = self.context(seat, agents);
            let report = resolve_champion_duel(&mut ctx, defender, champion).await?;
            info!(%seat, %defender, outcome = ?report.outcome, "duel");
        }
        Ok(())
    }

    /// Claim the tile under the champion when it is free to take.
    fn claim(&mut self, seat: PlayerId) -> Result<()> {
        let here = self.state.require_champion(seat, ChampionId(1))?.position;
        let Some(tile) = self.state.tile_mut(here) else {
            return Ok(());
        };
        if tile.is_claimable() && tile.claimed_by.is_none() && tile.monster.is_none() {
            tile.claimed_by = Some(seat);
            debug!(%seat, %here, "claimed");
        }
        Ok(())
    }
}

/// A standard board with production, lairs, oases and stars spread over it.
fn lay_out_board() -> GameState {
    let homes = GameState::corner_homes();
    let players = SEATS
        .iter()
        .zip(homes)
        .map(|(&(id, name), home)| {
            Player::new(PlayerId(id), name, home).with_resources(Resources::new(2, 2, 1, 1))
        })
        .collect();
    let mut state = GameState::standard(players);

    for tile in &mut state.tiles {
        let (row, col) = (tile.position.row, tile.position.col);
        match tile.kind {
            TileKind::Home => tile.production = Resources::new(1, 1, 0, 0),
            TileKind::Resource => {
                let kind = ResourceKind::ALL[usize::from(row + col) % ResourceKind::ALL.len()];
                tile.production = Resources::single(kind, 1);
                if (row * col) % 7 == 0 {
                    tile.monster = Some(
                        Monster::new("Wolf", 3)
                            .with_reward(1, Resources::single(ResourceKind::Gold, 1)),
                    );
                } else if (row + col) % 9 == 0 {
                    tile.kind = TileKind::Oasis;
                    tile.production = Resources::ZERO;
                }
                tile.is_starred = (row * 3 + col) % 8 == 0;
            }
            _ => {}
        }
    }
    state
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}
