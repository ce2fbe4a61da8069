//! Item-effect interceptors for defeat handling.
//!
//! An interceptor overrides one step of the default defeat path when the
//! beaten champion carries a particular item. Each one is a guard plus an
//! override: a false guard means "no effect" and the default runs.
//!
//! # Points
//!
//! Defeat is handled in three steps, each with its own interception point:
//!
//! 1. [`InterceptPoint::Loot`]: what the victor takes (champion duels only)
//! 2. [`InterceptPoint::AfterDefeat`]: extra consequences; no default
//! 3. [`InterceptPoint::Respawn`]: where the champion reappears
//!
//! Overrides draw their options from the same generators as the default
//! path (`loot_options`, `resource_options`, `respawn_options`) and only
//! narrow or re-target them.

mod donation;
mod loot;
mod registry;
mod respawn;

pub use donation::CursedAmuletDonation;
pub use loot::BackpackLoot;
pub use registry::InterceptorRegistry;
pub use respawn::PaddedHelmetRespawn;

use async_trait::async_trait;
use doomspire_core::{ChampionId, GameState, Item, LootOption, PlayerId};

use crate::api::ResolveError;
use crate::context::TurnContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptPoint {
    Loot,
    AfterDefeat,
    Respawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatCause {
    Champion,
    Monster,
    Dragon,
}

/// A champion has just lost a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defeat {
    pub loser: PlayerId,
    pub loser_champion: ChampionId,
    /// The winning champion, for duels.
    pub victor: Option<(PlayerId, ChampionId)>,
    pub cause: DefeatCause,
}

impl Defeat {
    /// True if the beaten champion carries an item matching `predicate`.
    pub fn loser_holds(&self, state: &GameState, predicate: impl Fn(&Item) -> bool) -> bool {
        state
            .require_champion(self.loser, self.loser_champion)
            .map(|champion| champion.holds(predicate))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    NoEffect,
    Applied {
        interceptor: &'static str,
        detail: String,
        /// What the victor took, for interceptors at the loot step.
        loot: Option<LootOption>,
        simulated: bool,
    },
}

impl InterceptOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn loot(&self) -> Option<LootOption> {
        match self {
            Self::Applied { loot, .. } => *loot,
            Self::NoEffect => None,
        }
    }
}

#[async_trait]
pub trait DefeatInterceptor: Send + Sync {
    /// Used in logging.
    fn name(&self) -> &'static str;

    fn point(&self) -> InterceptPoint;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn guard(&self, state: &GameState, defeat: &Defeat) -> bool;

    async fn apply(
        &self,
        ctx: &mut TurnContext<'_>,
        defeat: &Defeat,
    ) -> Result<InterceptOutcome, ResolveError>;
}
