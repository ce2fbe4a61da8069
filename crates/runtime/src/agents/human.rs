//! Channel-backed agent for a person at a UI.
//!
//! The agent forwards each question as a [`DecisionPrompt`] over an `mpsc`
//! channel and waits on a `oneshot` for the answer. Rendering and input are
//! the UI's business.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::api::{AgentError, AgentKind, Decision, DecisionAgent, DecisionContext};

/// A pending question for the UI.
#[derive(Debug)]
pub struct DecisionPrompt {
    pub context: DecisionContext,
    reply: oneshot::Sender<HumanAnswer>,
}

#[derive(Debug, Clone)]
struct HumanAnswer {
    option_id: String,
    rationale: Option<String>,
}

impl DecisionPrompt {
    /// Answer with an option id. Returns false if the agent stopped waiting.
    pub fn answer(self, option_id: impl Into<String>) -> bool {
        self.reply
            .send(HumanAnswer {
                option_id: option_id.into(),
                rationale: None,
            })
            .is_ok()
    }

    pub fn answer_with_reason(
        self,
        option_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> bool {
        self.reply
            .send(HumanAnswer {
                option_id: option_id.into(),
                rationale: Some(reason.into()),
            })
            .is_ok()
    }
}

#[derive(Debug, Clone)]
pub struct HumanAgent {
    prompts: mpsc::Sender<DecisionPrompt>,
}

impl HumanAgent {
    /// Create an agent and the receiver the UI reads prompts from.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<DecisionPrompt>) {
        let (prompts, rx) = mpsc::channel(buffer.max(1));
        (Self { prompts }, rx)
    }
}

#[async_trait]
impl DecisionAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError> {
        let (reply, answer) = oneshot::channel();
        self.prompts
            .send(DecisionPrompt {
                context: context.clone(),
                reply,
            })
            .await
            .map_err(|_| AgentError::ChannelClosed)?;

        let answer = answer.await.map_err(|_| AgentError::NoReply)?;
        let choice = context
            .option(&answer.option_id)
            .cloned()
            .ok_or(AgentError::UnknownOption(answer.option_id))?;

        Ok(Decision {
            choice,
            rationale: answer.rationale,
            simulated: false,
        })
    }
}
