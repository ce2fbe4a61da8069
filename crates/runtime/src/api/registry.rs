//! Registry binding players to decision agents.
//!
//! # Design
//!
//! - **Player bindings**: each seat can be bound to its own agent
//! - **Fallback**: an optional default agent for unbound seats
//! - **Runtime changes**: seats can be rebound between resolutions

use std::collections::HashMap;
use std::sync::Arc;

use doomspire_core::PlayerId;

use super::{AgentKind, AgentResolver, DecisionAgent, Result, RuntimeError};

/// Registry for per-player decision agents.
///
/// ```text
/// AgentRegistry
/// ├── bindings: HashMap<PlayerId, Arc<dyn DecisionAgent>>
/// └── fallback: Option<Arc<dyn DecisionAgent>>
/// ```
///
/// Agents are stored behind `Arc` so resolvers can hold a clone while the
/// registry itself stays borrowed elsewhere.
#[derive(Default, Clone)]
pub struct AgentRegistry {
    bindings: HashMap<PlayerId, Arc<dyn DecisionAgent>>,
    fallback: Option<Arc<dyn DecisionAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `player` to `agent`, replacing any previous binding.
    pub fn bind(&mut self, player: PlayerId, agent: impl DecisionAgent + 'static) {
        self.bindings.insert(player, Arc::new(agent));
    }

    pub fn bind_shared(&mut self, player: PlayerId, agent: Arc<dyn DecisionAgent>) {
        self.bindings.insert(player, agent);
    }

    /// Returns the previous agent if the player was bound.
    pub fn unbind(&mut self, player: PlayerId) -> Option<Arc<dyn DecisionAgent>> {
        self.bindings.remove(&player)
    }

    /// Agent used for players without an explicit binding.
    pub fn set_fallback(&mut self, agent: impl DecisionAgent + 'static) {
        self.fallback = Some(Arc::new(agent));
    }

    /// Resolution order: explicit binding, then fallback.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::AgentNotSet` when neither exists.
    pub fn get(&self, player: PlayerId) -> Result<Arc<dyn DecisionAgent>> {
        self.bindings
            .get(&player)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or(RuntimeError::AgentNotSet { player })
    }

    pub fn kind_of(&self, player: PlayerId) -> Option<AgentKind> {
        self.get(player).ok().map(|agent| agent.kind())
    }

    pub fn is_bound(&self, player: PlayerId) -> bool {
        self.bindings.contains_key(&player)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }
}

impl AgentResolver for AgentRegistry {
    fn agent_for(&self, player: PlayerId) -> Option<Arc<dyn DecisionAgent>> {
        self.get(player).ok()
    }
}
