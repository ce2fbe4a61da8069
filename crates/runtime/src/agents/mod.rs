//! Built-in [`DecisionAgent`](crate::api::DecisionAgent) implementations.
//!
//! - [`HumanAgent`]: forwards prompts to a UI over a channel
//! - [`ScriptedAgent`]: queued answers and keyword preferences
//! - [`ModelAgent`]: reasoning model behind a [`ModelClient`]
//! - [`RandomAgent`]: uniform choice

mod human;
mod model;
mod random;
mod scripted;

pub use human::{DecisionPrompt, HumanAgent};
pub use model::{ModelAgent, ModelClient, ModelRequest};
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;
