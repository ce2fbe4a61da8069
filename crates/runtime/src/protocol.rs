//! The decision protocol every resolver goes through.
//!
//! Policy, applied uniformly:
//! - one option: chosen without prompting
//! - agent present: asked; errors or unknown ids fall back to random
//! - no agent: uniform random
//!
//! Anything not picked by an agent is flagged `simulated`.
use rand::Rng;
use tracing::{debug, warn};

use crate::api::{Choices, Decided, Decision, DecisionAgent};
use crate::log::{LogCategory, LogSink};

/// Uniform pick for fallback decisions; not tied to the session seed.
pub(crate) fn random_index(len: usize) -> usize {
    rand::thread_rng().gen_range(0..len)
}

/// Resolve `choices` to exactly one value.
///
/// Returns `None` only for an empty option set, which resolvers never build.
pub async fn decide<T: Send>(
    agent: Option<&dyn DecisionAgent>,
    choices: Choices<T>,
    log: &dyn LogSink,
) -> Option<Decided<T>> {
    if choices.is_empty() {
        warn!(
            target: "doomspire::decisions",
            player = %choices.player(),
            description = choices.description(),
            "empty option set"
        );
        return None;
    }

    if choices.len() == 1 {
        let (option, value) = choices.into_entry(0)?;
        return Some(Decided {
            value,
            decision: Decision::simulated(option),
        });
    }

    let player = choices.player();
    if let Some(agent) = agent {
        let context = choices.context();
        match agent.request_decision(&context).await {
            Ok(decision) => match choices.position(&decision.choice.id) {
                Some(index) => {
                    debug!(
                        target: "doomspire::decisions",
                        %player,
                        agent = %agent.kind(),
                        choice = %decision.choice.id,
                        "decision made"
                    );
                    let (option, value) = choices.into_entry(index)?;
                    return Some(Decided {
                        value,
                        decision: Decision {
                            choice: option,
                            rationale: decision.rationale,
                            simulated: decision.simulated,
                        },
                    });
                }
                None => log.log(
                    LogCategory::System,
                    &format!(
                        "{player} chose unknown option '{}'; picking at random",
                        decision.choice.id
                    ),
                ),
            },
            Err(error) => log.log(
                LogCategory::System,
                &format!("{player}'s {} agent failed ({error}); picking at random", agent.kind()),
            ),
        }
    } else {
        log.log(
            LogCategory::System,
            &format!("no agent for {player}; picking at random"),
        );
    }

    let index = random_index(choices.len());
    let (option, value) = choices.into_entry(index)?;
    Some(Decided {
        value,
        decision: Decision::simulated(option),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ScriptedAgent;
    use crate::api::{AgentError, AgentKind, DecisionContext};
    use crate::log::MemorySink;
    use async_trait::async_trait;
    use doomspire_core::PlayerId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAgent {
        calls: AtomicUsize,
        answer: Result<&'static str, AgentError>,
    }

    #[async_trait]
    impl DecisionAgent for CountingAgent {
        fn kind(&self) -> AgentKind {
            AgentKind::Scripted
        }

        async fn request_decision(
            &self,
            context: &DecisionContext,
        ) -> Result<Decision, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let id = self.answer.clone()?;
            let option = context
                .option(id)
                .cloned()
                .unwrap_or_else(|| crate::api::DecisionOption::new(id, id));
            Ok(Decision::chosen(option))
        }
    }

    fn pair() -> Choices<u8> {
        Choices::new(PlayerId(1), "Fight or flee?")
            .option("fight", "Fight", 0)
            .option("flee", "Flee", 1)
    }

    #[tokio::test]
    async fn single_option_never_prompts() {
        let agent = CountingAgent {
            calls: AtomicUsize::new(0),
            answer: Ok("fight"),
        };
        let sink = MemorySink::new();
        let choices = Choices::new(PlayerId(1), "Only way").option("home", "Go home", 7u8);

        let decided = decide(Some(&agent), choices, &sink).await.unwrap();
        assert_eq!(decided.value, 7);
        assert!(decided.decision.simulated);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn agent_answer_is_used() {
        let agent = ScriptedAgent::new().with_script(["flee"]);
        let decided = decide(Some(&agent), pair(), &MemorySink::new()).await.unwrap();
        assert_eq!(decided.value, 1);
        assert!(!decided.decision.simulated);
    }

    #[tokio::test]
    async fn unknown_choice_degrades_to_random() {
        let agent = CountingAgent {
            calls: AtomicUsize::new(0),
            answer: Ok("surrender"),
        };
        let sink = MemorySink::new();
        let decided = decide(Some(&agent), pair(), &sink).await.unwrap();
        assert!(decided.decision.simulated);
        assert!(decided.value <= 1);
        assert!(sink.contains(LogCategory::System, "unknown option 'surrender'"));
    }

    #[tokio::test]
    async fn failing_agent_degrades_to_random() {
        let agent = CountingAgent {
            calls: AtomicUsize::new(0),
            answer: Err(AgentError::NoReply),
        };
        let sink = MemorySink::new();
        let decided = decide(Some(&agent), pair(), &sink).await.unwrap();
        assert!(decided.decision.simulated);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
        assert!(sink.contains(LogCategory::System, "agent failed"));
    }

    #[tokio::test]
    async fn missing_agent_is_random_and_empty_set_is_none() {
        let sink = MemorySink::new();
        let decided = decide(None, pair(), &sink).await.unwrap();
        assert!(decided.decision.simulated);
        assert!(sink.contains(LogCategory::System, "no agent"));

        let empty: Choices<u8> = Choices::new(PlayerId(1), "Nothing");
        assert!(decide(None, empty, &sink).await.is_none());
    }
}
