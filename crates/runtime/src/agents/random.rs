use async_trait::async_trait;

use crate::api::{AgentError, AgentKind, Decision, DecisionAgent, DecisionContext};
use crate::protocol::random_index;

/// Picks uniformly among the offered options. Every pick is flagged simulated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAgent;

#[async_trait]
impl DecisionAgent for RandomAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Random
    }

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError> {
        if context.options.is_empty() {
            return Err(AgentError::UnknownOption(String::new()));
        }
        let choice = context.options[random_index(context.options.len())].clone();
        Ok(Decision::simulated(choice))
    }
}
