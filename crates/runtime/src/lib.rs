//! Interactive rule resolution for Doomspire.
//!
//! The core crate holds the state and the pure rules; this crate runs them
//! against live players. Resolvers pause at every point of player judgment,
//! ask a [`DecisionAgent`] through [`decide`], and resume with a typed
//! answer. Agents that fail or are missing never stall a turn: the choice
//! falls back to a uniform random pick.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the decision records, the agent capability and errors
//! - [`agents`] ships human, scripted, model-backed and random agents
//! - [`encounter`] and [`flee`] resolve fights on the board
//! - [`interceptors`] lets held items rewrite loot, donation and respawn
//! - [`events`] resolves the event deck
//! - [`log`] carries the narrative log sink
pub mod agents;
pub mod api;
pub mod config;
pub mod context;
pub mod encounter;
pub mod events;
pub mod flee;
pub mod interceptors;
pub mod log;

mod protocol;

pub use agents::{
    DecisionPrompt, HumanAgent, ModelAgent, ModelClient, ModelRequest, RandomAgent, ScriptedAgent,
};
pub use api::{
    AgentError, AgentKind, AgentRegistry, AgentResolver, Choices, Decided, Decision,
    DecisionAgent, DecisionContext, DecisionOption, ResolveError, Result, RuntimeError,
};
pub use config::RuntimeConfig;
pub use context::TurnContext;
pub use encounter::{
    CombatDetail, DefeatReport, EncounterOutcome, EncounterReport, handle_defeat,
    resolve_champion_duel, resolve_dragon_encounter, resolve_monster_encounter,
};
pub use events::{
    EventCardId, EventCardResult, ResourceChange, resolve_event_card, resolve_event_card_by_id,
};
pub use flee::{FleePhase, FleeResolution, Threat, resolve_flee_choice};
pub use interceptors::{
    BackpackLoot, CursedAmuletDonation, Defeat, DefeatCause, DefeatInterceptor, InterceptOutcome,
    InterceptPoint, InterceptorRegistry, PaddedHelmetRespawn,
};
pub use log::{LogCategory, LogSink, MemorySink, TracingSink};
pub use protocol::decide;
