//! Agent backed by a reasoning model.
//!
//! The decision context is rendered into a prompt, sent through a
//! [`ModelClient`], and the answer is expected to contain a JSON object
//! `{"optionId": "...", "reasoning": "..."}`. Models tend to wrap that object
//! in prose or code fences, so the first parseable object in the reply wins.

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::{AgentError, AgentKind, Decision, DecisionAgent, DecisionContext};

const SYSTEM_PROMPT: &str = "You are playing a four-player board game of dice, \
territory and dragons. When asked to decide, pick exactly one of the offered \
options. Reply with a JSON object {\"optionId\": \"<id>\", \"reasoning\": \"<one sentence>\"}.";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Transport to a completion endpoint.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: ModelRequest) -> Result<String, AgentError>;
}

#[derive(Debug, Deserialize)]
struct ModelAnswer {
    #[serde(rename = "optionId")]
    option_id: String,
    #[serde(default)]
    reasoning: Option<String>,
}

pub struct ModelAgent<C> {
    client: C,
    persona: Option<String>,
    temperature: f32,
}

impl<C: ModelClient> ModelAgent<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            persona: None,
            temperature: 0.2,
        }
    }

    /// Extra strategy guidance appended to the system prompt.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn render_prompt(context: &DecisionContext) -> String {
        let mut prompt = format!(
            "You are {}.\n{}\n\nOptions:\n",
            context.player, context.description
        );
        for option in &context.options {
            prompt.push_str(&format!("- {}: {}", option.id, option.description));
            if !option.payload.is_null() {
                prompt.push_str(&format!(" {}", option.payload));
            }
            prompt.push('\n');
        }
        prompt
    }

    fn request(&self, context: &DecisionContext) -> ModelRequest {
        let system = match &self.persona {
            Some(persona) => format!("{SYSTEM_PROMPT}\n{persona}"),
            None => SYSTEM_PROMPT.to_string(),
        };
        ModelRequest {
            system,
            prompt: Self::render_prompt(context),
            temperature: self.temperature,
        }
    }
}

/// First `{...}` in `text` that parses as a model answer.
fn parse_answer(text: &str) -> Option<ModelAnswer> {
    text.match_indices('{').find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<ModelAnswer>()
            .next()?
            .ok()
    })
}

#[async_trait]
impl<C: ModelClient> DecisionAgent for ModelAgent<C> {
    fn kind(&self) -> AgentKind {
        AgentKind::Model
    }

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError> {
        let reply = self.client.complete(self.request(context)).await?;
        let answer = parse_answer(&reply).ok_or_else(|| AgentError::Unparseable(reply.clone()))?;

        let choice = context
            .option(&answer.option_id)
            .cloned()
            .ok_or(AgentError::UnknownOption(answer.option_id))?;

        Ok(Decision {
            choice,
            rationale: answer.reasoning,
            simulated: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DecisionOption;
    use doomspire_core::PlayerId;
    use std::sync::Mutex;

    struct CannedModel {
        reply: Result<String, AgentError>,
        seen: Mutex<Vec<ModelRequest>>,
    }

    impl CannedModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for CannedModel {
        async fn complete(&self, request: ModelRequest) -> Result<String, AgentError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn context() -> DecisionContext {
        DecisionContext {
            player: PlayerId(4),
            description: "Sea serpents attack your boats".into(),
            options: vec![
                DecisionOption::new("fight", "Fight the serpents"),
                DecisionOption::new("flee", "Sail away"),
            ],
        }
    }

    #[tokio::test]
    async fn answer_is_found_inside_prose() {
        let model = CannedModel::replying(
            "Thinking it over: {not json} ```json\n{\"optionId\": \"flee\", \"reasoning\": \"boats are precious\"}\n``` done",
        );
        let agent = ModelAgent::new(model).with_persona("Play cautiously.");
        let decision = agent.request_decision(&context()).await.unwrap();

        assert_eq!(decision.choice.id, "flee");
        assert_eq!(decision.rationale.as_deref(), Some("boats are precious"));

        let seen = agent.client.seen.lock().unwrap();
        assert!(seen[0].prompt.contains("- fight: Fight the serpents"));
        assert!(seen[0].system.ends_with("Play cautiously."));
    }

    #[tokio::test]
    async fn garbage_and_unknown_ids_are_errors() {
        let agent = ModelAgent::new(CannedModel::replying("I would rather not say."));
        assert!(matches!(
            agent.request_decision(&context()).await,
            Err(AgentError::Unparseable(_))
        ));

        let agent = ModelAgent::new(CannedModel::replying(r#"{"optionId": "bribe"}"#));
        assert_eq!(
            agent.request_decision(&context()).await,
            Err(AgentError::UnknownOption("bribe".into()))
        );
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let model = CannedModel {
            reply: Err(AgentError::Transport("timeout".into())),
            seen: Mutex::new(Vec::new()),
        };
        let agent = ModelAgent::new(model);
        assert_eq!(
            agent.request_decision(&context()).await,
            Err(AgentError::Transport("timeout".into()))
        );
    }
}
