//! Everything a resolver needs for one action of one player.

use std::sync::Arc;

use doomspire_core::{ChampionId, Dice, GameConfig, GameState, PlayerId};

use crate::api::{AgentResolver, DecisionAgent};
use crate::interceptors::InterceptorRegistry;
use crate::log::LogSink;

/// Borrowed view of the session for a single resolution.
///
/// The acting player's agent is carried directly; agents of other players
/// are looked up through the optional resolver.
pub struct TurnContext<'a> {
    pub state: &'a mut GameState,
    pub player: PlayerId,
    pub champion: ChampionId,
    pub agent: Option<Arc<dyn DecisionAgent>>,
    pub agents: Option<&'a dyn AgentResolver>,
    pub log: &'a dyn LogSink,
    pub dice: &'a mut dyn Dice,
    pub config: &'a GameConfig,
    pub interceptors: InterceptorRegistry,
}

impl<'a> TurnContext<'a> {
    /// A context with no agents and the standard interceptors.
    pub fn new(
        state: &'a mut GameState,
        player: PlayerId,
        champion: ChampionId,
        dice: &'a mut dyn Dice,
        log: &'a dyn LogSink,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            state,
            player,
            champion,
            agent: None,
            agents: None,
            log,
            dice,
            config,
            interceptors: InterceptorRegistry::default_interceptors(),
        }
    }

    pub fn with_agent(mut self, agent: Arc<dyn DecisionAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Use `agents` for other players and, if none was set, the acting one.
    pub fn with_agents(mut self, agents: &'a dyn AgentResolver) -> Self {
        if self.agent.is_none() {
            self.agent = agents.agent_for(self.player);
        }
        self.agents = Some(agents);
        self
    }

    pub fn with_interceptors(mut self, interceptors: InterceptorRegistry) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// Agent deciding for `player`, if any is reachable.
    pub fn agent_for(&self, player: PlayerId) -> Option<Arc<dyn DecisionAgent>> {
        if player == self.player {
            return self.agent.clone();
        }
        self.agents.and_then(|agents| agents.agent_for(player))
    }

    /// Might of a champion: player might plus its items.
    pub fn champion_might(&self, player: PlayerId, champion: ChampionId) -> Option<u32> {
        self.state.player(player)?.champion_might(champion)
    }
}
