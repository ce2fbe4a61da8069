use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use doomspire_core::{
    ChampionId, GameConfig, GameState, OceanZone, Player, PlayerId, Resources, ScriptedDice,
};
use doomspire_runtime::{
    AgentError, AgentKind, AgentRegistry, Decision, DecisionAgent, DecisionContext, EventCardId,
    HumanAgent, LogCategory, MemorySink, ModelAgent, ModelClient, ModelRequest, RandomAgent,
    TurnContext, resolve_event_card,
};
use tokio::sync::Barrier;
use tokio::time::timeout;

fn four_players() -> GameState {
    let homes = GameState::corner_homes();
    GameState::standard(vec![
        Player::new(PlayerId(1), "Red", homes[0]),
        Player::new(PlayerId(2), "Blue", homes[1]),
        Player::new(PlayerId(3), "Green", homes[2]),
        Player::new(PlayerId(4), "Yellow", homes[3]),
    ])
}

/// Answers every request with the same canned reply and counts calls.
struct CannedModel {
    reply: String,
    calls: Arc<AtomicUsize>,
}

impl CannedModel {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ModelClient for CannedModel {
    async fn complete(&self, _request: ModelRequest) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

#[tokio::test]
async fn human_answers_arrive_over_the_prompt_channel() {
    let (agent, mut prompts) = HumanAgent::channel(4);
    let ui = tokio::spawn(async move {
        let prompt = prompts.recv().await.expect("one prompt");
        let offered: Vec<String> = prompt.context.options.iter().map(|o| o.id.clone()).collect();
        assert!(prompt.answer_with_reason("zone:south-west", "their fleet is there"));
        offered
    });

    let mut state = four_players();
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
        .with_agent(Arc::new(agent));

    let result = resolve_event_card(EventCardId::SuddenStorm, &mut ctx).await;
    assert_eq!(result.boats_moved, 1);
    assert_eq!(state.players[3].boats[0].zone, OceanZone::NorthWest);

    let offered = ui.await.unwrap();
    assert_eq!(offered.len(), 4);
    assert!(offered.contains(&"zone:north-west".to_string()));
}

#[tokio::test]
async fn dropped_human_channel_falls_back_to_random() {
    let (agent, prompts) = HumanAgent::channel(1);
    drop(prompts);

    let mut state = four_players();
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
        .with_agent(Arc::new(agent));

    let result = resolve_event_card(EventCardId::SuddenStorm, &mut ctx).await;
    assert!(result.event_processed);
    assert_eq!(result.boats_moved, 1);
    assert!(log.contains(LogCategory::System, "human agent failed"));
}

#[tokio::test]
async fn model_reply_wrapped_in_prose_is_understood() {
    let model = CannedModel::new(
        "Gold wins games.\n```json\n{\"optionId\": \"resource:gold\", \"reasoning\": \"rivals hoard gold\"}\n```",
    );
    let calls = Arc::clone(&model.calls);
    let mut state = four_players();
    state.players[1].resources = Resources::new(3, 0, 0, 2);
    state.players[2].resources = Resources::new(1, 0, 0, 0);

    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
        .with_agent(Arc::new(ModelAgent::new(model)));

    let result = resolve_event_card(EventCardId::ThievingCrows, &mut ctx).await;
    assert_eq!(result.players_affected, vec![PlayerId(2)]);
    assert_eq!(state.players[1].resources.gold, 1);
    assert_eq!(state.players[2].resources.food, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn registry_fallback_covers_unbound_rivals() {
    let mut registry = AgentRegistry::new();
    registry.set_fallback(RandomAgent);

    let mut state = four_players();
    for player in &mut state.players {
        player.fame = 2;
    }
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
        .with_agents(&registry);

    // Nobody holds food, so every rival can only refuse.
    let result = resolve_event_card(EventCardId::RivalFeud, &mut ctx).await;
    assert_eq!(result.players_affected, vec![PlayerId(2), PlayerId(3), PlayerId(4)]);
    assert_eq!(state.players[0].fame, 2);
    assert!(state.players[1..].iter().all(|p| p.fame == 1));
    assert!(log.messages(LogCategory::System).is_empty());
}

/// Answers only once every agent sharing the barrier has been asked.
struct RendezvousAgent {
    barrier: Arc<Barrier>,
    answer: &'static str,
}

#[async_trait]
impl DecisionAgent for RendezvousAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Scripted
    }

    async fn request_decision(&self, context: &DecisionContext) -> Result<Decision, AgentError> {
        self.barrier.wait().await;
        context
            .option(self.answer)
            .cloned()
            .map(Decision::chosen)
            .ok_or_else(|| AgentError::UnknownOption(self.answer.to_string()))
    }
}

fn rendezvous(players: &[PlayerId], answer: &'static str) -> AgentRegistry {
    let barrier = Arc::new(Barrier::new(players.len()));
    let mut registry = AgentRegistry::new();
    for &player in players {
        registry.bind(
            player,
            RendezvousAgent {
                barrier: Arc::clone(&barrier),
                answer,
            },
        );
    }
    registry
}

#[tokio::test]
async fn serpent_owners_are_asked_together() {
    let registry = rendezvous(&[PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)], "flee");

    let mut state = four_players();
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
        .with_agents(&registry);

    let result = timeout(
        Duration::from_secs(5),
        resolve_event_card(EventCardId::SeaSerpents, &mut ctx),
    )
    .await
    .expect("owners were asked one after another");
    assert_eq!(result.boats_moved, 4);
    assert_eq!(state.players[0].boats[0].zone, OceanZone::NorthEast);
    assert!(log.messages(LogCategory::System).is_empty());
}

#[tokio::test]
async fn feuding_rivals_are_asked_together() {
    let registry = rendezvous(&[PlayerId(2), PlayerId(3), PlayerId(4)], "refuse");

    let mut state = four_players();
    for player in &mut state.players {
        player.fame = 2;
        player.resources = Resources::new(1, 0, 0, 0);
    }
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
        .with_agents(&registry);

    let result = timeout(
        Duration::from_secs(5),
        resolve_event_card(EventCardId::RivalFeud, &mut ctx),
    )
    .await
    .expect("rivals were asked one after another");
    assert_eq!(result.players_affected, vec![PlayerId(2), PlayerId(3), PlayerId(4)]);
    assert!(state.players[1..].iter().all(|p| p.fame == 1 && p.resources.food == 1));
    assert_eq!(state.players[0].resources.food, 1);
}
