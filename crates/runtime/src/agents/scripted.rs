//! Heuristic agent for fixtures and unattended seats.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{AgentError, AgentKind, Decision, DecisionAgent, DecisionContext};

/// Answers from a queue of option ids first, then by keyword preference.
///
/// Keyword matching is case-insensitive over option ids and descriptions;
/// earlier keywords win. With no match the first option is taken.
#[derive(Debug, Default)]
pub struct ScriptedAgent {
    script: Mutex<VecDeque<String>>,
    preferences: Vec<String>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue option ids to answer with, one per request.
    pub fn with_script<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut script) = self.script.lock() {
            script.extend(ids.into_iter().map(Into::into));
        }
        self
    }

    pub fn with_preferences<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = keywords
            .into_iter()
            .map(|keyword| keyword.into().to_lowercase())
            .collect();
        self
    }

    /// Ids still queued.
    pub fn remaining(&self) -> usize {
        self.script.lock().map(|script| script.len()).unwrap_or(0)
    }

    fn next_scripted(&self) -> Option<String> {
        self.script.lock().ok()?.pop_front()
    }

    fn preferred(&self, context: &DecisionContext) -> Option<usize> {
        self.preferences.iter().find_map(|keyword| {
            context.options.iter().position(|option| {
                option.id.to_lowercase().contains(keyword.as_str())
                    || option.description.to_lowercase().contains(keyword.as_str())
            })
        })
    }
}

#[async_trait]
impl DecisionAgent for ScriptedAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Scripted
    }

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError> {
        if let Some(id) = self.next_scripted() {
            return context
                .option(&id)
                .cloned()
                .map(|option| Decision::chosen(option).with_rationale("scripted"))
                .ok_or(AgentError::UnknownOption(id));
        }

        let index = self.preferred(context).unwrap_or(0);
        context
            .options
            .get(index)
            .cloned()
            .map(Decision::chosen)
            .ok_or_else(|| AgentError::UnknownOption(String::new()))
    }
}
