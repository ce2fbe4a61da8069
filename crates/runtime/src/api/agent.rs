//! Asynchronous abstraction for sourcing player judgment.
//!
//! Runtime users plug in [`DecisionAgent`] implementations so a game can run
//! with human input, scripted fixtures, or a reasoning model, chosen per
//! player. Resolvers never branch on which kind is bound.
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use doomspire_core::PlayerId;

use super::decision::{Decision, DecisionContext};
use super::errors::AgentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Human,
    Scripted,
    Model,
    Random,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgentKind::Human => "human",
            AgentKind::Scripted => "scripted",
            AgentKind::Model => "model",
            AgentKind::Random => "random",
        };
        write!(f, "{}", label)
    }
}

/// Anything that can pick one option out of a [`DecisionContext`].
///
/// Implementations may take arbitrarily long; the caller suspends until the
/// returned future completes. Returning an option id that is not in the
/// context counts as a failure and is replaced by a random pick.
#[async_trait]
pub trait DecisionAgent: Send + Sync {
    fn kind(&self) -> AgentKind;

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError>;
}

#[async_trait]
impl<A: DecisionAgent + ?Sized> DecisionAgent for Arc<A> {
    fn kind(&self) -> AgentKind {
        (**self).kind()
    }

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError> {
        (**self).request_decision(context).await
    }
}

/// Looks up the agent bound to another player.
///
/// Handed to resolvers that need a third party's judgment during someone
/// else's turn.
pub trait AgentResolver: Send + Sync {
    fn agent_for(&self, player: PlayerId) -> Option<Arc<dyn DecisionAgent>>;
}
