//! Records exchanged with decision agents.
//!
//! These types cross process boundaries (remote model agents, UIs), so they
//! carry plain data only and round-trip through JSON unchanged.
use doomspire_core::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    /// Unique within one context.
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl DecisionOption {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// A question put to one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub player: PlayerId,
    pub description: String,
    pub options: Vec<DecisionOption>,
}

impl DecisionContext {
    pub fn option(&self, id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|option| option.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub choice: DecisionOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// True when no agent made this choice (auto-resolved or random).
    #[serde(default)]
    pub simulated: bool,
}

impl Decision {
    pub fn chosen(choice: DecisionOption) -> Self {
        Self {
            choice,
            rationale: None,
            simulated: false,
        }
    }

    pub fn simulated(choice: DecisionOption) -> Self {
        Self {
            choice,
            rationale: None,
            simulated: true,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

/// Option set paired with the local values the options stand for.
///
/// Resolvers build one of these, hand it to [`crate::decide`], and get the
/// typed value back; payloads never need to be parsed again.
#[derive(Clone, Debug)]
pub struct Choices<T> {
    player: PlayerId,
    description: String,
    entries: Vec<(DecisionOption, T)>,
}

impl<T> Choices<T> {
    pub fn new(player: PlayerId, description: impl Into<String>) -> Self {
        Self {
            player,
            description: description.into(),
            entries: Vec::new(),
        }
    }

    pub fn option(
        mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        value: T,
    ) -> Self {
        self.push(DecisionOption::new(id, description), value);
        self
    }

    pub fn push(&mut self, option: DecisionOption, value: T) {
        self.entries.push((option, value));
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The serializable question, without the local values.
    pub fn context(&self) -> DecisionContext {
        DecisionContext {
            player: self.player,
            description: self.description.clone(),
            options: self.entries.iter().map(|(option, _)| option.clone()).collect(),
        }
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(option, _)| option.id == id)
    }

    /// Take the value at `index`, dropping the rest.
    pub(crate) fn into_entry(self, index: usize) -> Option<(DecisionOption, T)> {
        self.entries.into_iter().nth(index)
    }
}

/// A resolved choice: the typed value plus the record of how it was made.
#[derive(Clone, Debug)]
pub struct Decided<T> {
    pub value: T,
    pub decision: Decision,
}
