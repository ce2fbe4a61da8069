use std::sync::Arc;

use doomspire_core::{
    ChampionId, FleePenalty, FleeRoll, GameConfig, GameState, Item, LootOption, Monster, Player,
    PlayerId, Position, ResourceKind, Resources, ScriptedDice, TraderItem, TreasureCard,
    VictoryCondition, check_victory,
};
use doomspire_runtime::{
    AgentRegistry, CombatDetail, EncounterOutcome, InterceptOutcome, LogCategory, MemorySink,
    ScriptedAgent, TurnContext, resolve_champion_duel, resolve_dragon_encounter,
    resolve_monster_encounter,
};

const RED: PlayerId = PlayerId(1);
const BLUE: PlayerId = PlayerId(2);
const FIRST: ChampionId = ChampionId(1);

fn two_players() -> GameState {
    let homes = GameState::corner_homes();
    GameState::standard(vec![
        Player::new(RED, "Red", homes[0]),
        Player::new(BLUE, "Blue", homes[1]),
    ])
}

fn applied_by(outcome: &InterceptOutcome) -> Option<&'static str> {
    match outcome {
        InterceptOutcome::Applied { interceptor, .. } => Some(*interceptor),
        InterceptOutcome::NoEffect => None,
    }
}

#[tokio::test]
async fn duel_winner_loots_and_loser_goes_home() {
    let mut state = two_players();
    let arena = Position::new(2, 4);
    state.place_champion(RED, FIRST, arena).unwrap();
    state.place_champion(BLUE, FIRST, arena).unwrap();
    state.players[0].might = 2;
    state.players[1].resources = Resources::new(0, 0, 0, 2);

    let mut registry = AgentRegistry::new();
    registry.bind(BLUE, ScriptedAgent::new().with_script(["fight"]));

    // Red 2 + 3 against Blue 0 + 1.
    let mut dice = ScriptedDice::new([3, 1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agents(&registry);

    let report = resolve_champion_duel(&mut ctx, BLUE, FIRST).await.unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Won);
    assert!(matches!(report.combat, Some(CombatDetail::Duel(ref duel)) if duel.round_count() == 1));

    let defeat = report.defeat.unwrap();
    assert!(defeat.loot.is_some_and(|loot| loot.is_resource()));
    assert_eq!(defeat.respawned_at, Some(state.players[1].home));
    assert_eq!(state.players[0].resources.gold, 1);
    assert_eq!(state.players[1].resources.gold, 1);
    assert_eq!(state.players[1].champions[0].position, state.players[1].home);
    assert_eq!(state.players[0].champions[0].position, arena);
}

#[tokio::test]
async fn duel_ties_are_rerolled() {
    let mut state = two_players();
    let arena = Position::new(2, 4);
    state.place_champion(RED, FIRST, arena).unwrap();
    state.place_champion(BLUE, FIRST, arena).unwrap();

    let mut registry = AgentRegistry::new();
    registry.bind(BLUE, ScriptedAgent::new().with_script(["fight"]));

    // 2-2 tie, then Blue wins 3-1.
    let mut dice = ScriptedDice::new([2, 2, 1, 3]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agents(&registry);

    let report = resolve_champion_duel(&mut ctx, BLUE, FIRST).await.unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Lost);
    let Some(CombatDetail::Duel(duel)) = report.combat else {
        panic!("expected a duel");
    };
    assert_eq!(duel.round_count(), 2);
    assert!(!duel.capped);
    assert_eq!(state.players[0].champions[0].position, state.players[0].home);
}

#[tokio::test]
async fn backpack_keeps_items_from_the_victor() {
    let mut state = two_players();
    let arena = Position::new(2, 4);
    state.place_champion(RED, FIRST, arena).unwrap();
    state.place_champion(BLUE, FIRST, arena).unwrap();
    state.players[0].might = 3;
    state.players[1].resources = Resources::new(0, 1, 0, 0);
    {
        let items = &mut state.players[1].champions[0].items;
        items.push(Item::trader(TraderItem::Backpack));
        items.push(Item::treasure(TreasureCard::EnchantedSword));
    }

    let mut registry = AgentRegistry::new();
    registry.bind(RED, ScriptedAgent::new().with_script(["item:1"]));
    registry.bind(BLUE, ScriptedAgent::new().with_script(["fight"]));

    let mut dice = ScriptedDice::new([3, 1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agents(&registry);

    let report = resolve_champion_duel(&mut ctx, BLUE, FIRST).await.unwrap();
    let defeat = report.defeat.unwrap();
    assert_eq!(defeat.loot, Some(LootOption::Resource { kind: ResourceKind::Wood }));
    assert_eq!(
        defeat.interceptions.iter().find_map(applied_by),
        Some("backpack_loot")
    );
    // Only the wood was on offer, so it was taken without asking.
    assert_eq!(state.players[0].resources.wood, 1);
    assert_eq!(state.players[1].champions[0].items.len(), 2);
    assert!(state.players[0].champions[0].items.is_empty());
}

#[tokio::test]
async fn padded_helmet_respawns_on_a_nearby_claim() {
    let mut state = two_players();
    let lair = Position::new(3, 3);
    let outpost = Position::new(1, 3);
    state.tile_mut(outpost).unwrap().claimed_by = Some(RED);
    state.tile_mut(lair).unwrap().monster = Some(Monster::new("Troll", 6));
    state.place_champion(RED, FIRST, lair).unwrap();
    state.players[0].champions[0]
        .items
        .push(Item::treasure(TreasureCard::PaddedHelmet));

    let agent = Arc::new(ScriptedAgent::new().with_script(["fight", "tile:1:3"]));
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let monster = state.tile(lair).unwrap().monster.clone().unwrap();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agent(agent);

    let report = resolve_monster_encounter(&mut ctx, &monster, Some(lair), false)
        .await
        .unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Lost);
    let defeat = report.defeat.unwrap();
    assert_eq!(defeat.respawned_at, Some(outpost));
    assert_eq!(
        defeat.interceptions.iter().find_map(applied_by),
        Some("padded_helmet_respawn")
    );
    assert_eq!(state.players[0].champions[0].position, outpost);
    assert!(state.tile(lair).unwrap().monster.is_some());
}

#[tokio::test]
async fn cursed_amulet_pays_the_bank_after_a_monster_defeat() {
    let mut state = two_players();
    state.players[0].resources = Resources::new(1, 0, 1, 0);
    state.players[0].champions[0]
        .items
        .push(Item::treasure(TreasureCard::CursedAmulet));

    let agent = Arc::new(ScriptedAgent::new().with_script(["fight", "resource:ore"]));
    let mut dice = ScriptedDice::new([1]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agent(agent);

    let ogre = Monster::new("Ogre", 5);
    let report = resolve_monster_encounter(&mut ctx, &ogre, None, false).await.unwrap();
    let defeat = report.defeat.unwrap();
    assert_eq!(
        defeat.interceptions.iter().find_map(applied_by),
        Some("cursed_amulet_donation")
    );
    assert_eq!(state.players[0].resources, Resources::new(1, 0, 0, 0));
    assert_eq!(state.players[1].resources, Resources::ZERO);
    assert!(log.contains(LogCategory::Combat, "the bank"));
}

#[tokio::test]
async fn slain_lair_monster_pays_once_and_leaves() {
    let mut state = two_players();
    let lair = Position::new(2, 2);
    let wolf = Monster::new("Wolf", 2).with_reward(2, Resources::new(1, 0, 0, 0));
    state.tile_mut(lair).unwrap().monster = Some(wolf.clone());

    let mut dice = ScriptedDice::new([2]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx = TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config);

    let report = resolve_monster_encounter(&mut ctx, &wolf, Some(lair), true).await.unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Won);
    assert!(report.flee.is_none());
    assert_eq!(state.players[0].fame, 2);
    assert_eq!(state.players[0].resources.food, 1);
    assert!(state.tile(lair).unwrap().monster.is_none());
}

#[tokio::test]
async fn partial_flee_costs_a_resource() {
    let mut state = two_players();
    let lair = Position::new(4, 2);
    let claim = Position::new(5, 2);
    state.tile_mut(claim).unwrap().claimed_by = Some(RED);
    state.place_champion(RED, FIRST, lair).unwrap();
    state.players[0].resources = Resources::new(0, 2, 0, 0);

    let agent = Arc::new(ScriptedAgent::new().with_script(["flee"]));
    let mut dice = ScriptedDice::new([2]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agent(agent);

    let report = resolve_monster_encounter(&mut ctx, &Monster::new("Bear", 9), Some(lair), false)
        .await
        .unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Escaped);
    let flee = report.flee.unwrap();
    assert_eq!(flee.outcome, FleeRoll::Partial);
    assert_eq!(
        flee.penalty,
        FleePenalty::Resource {
            kind: doomspire_core::ResourceKind::Wood
        }
    );
    assert_eq!(state.players[0].champions[0].position, claim);
    assert_eq!(state.players[0].resources.wood, 1);
}

#[tokio::test]
async fn slaying_the_dragon_wins_the_game() {
    let mut state = two_players();
    let doomspire = state.doomspire;
    state.place_champion(RED, FIRST, doomspire).unwrap();
    state.players[0].might = 5;

    // Dragon rolls 1 (might 8); the champion rolls 3 (5 + 3).
    let agent = Arc::new(ScriptedAgent::new().with_script(["fight"]));
    let mut dice = ScriptedDice::new([1, 3]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agent(agent);

    let report = resolve_dragon_encounter(&mut ctx).await.unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Won);
    let victory = report.victory.unwrap();
    assert_eq!(victory.condition, VictoryCondition::DragonSlain);
    assert_eq!(check_victory(&state, &config), Some(victory));
}

#[tokio::test]
async fn fleeing_the_dragon_always_works_but_costs_fame() {
    let mut state = two_players();
    let doomspire = state.doomspire;
    state.place_champion(RED, FIRST, doomspire).unwrap();
    state.players[0].fame = 4;

    let agent = Arc::new(ScriptedAgent::new().with_script(["flee"]));
    let mut dice = ScriptedDice::new([3]);
    let log = MemorySink::new();
    let config = GameConfig::default();
    let mut ctx =
        TurnContext::new(&mut state, RED, FIRST, &mut dice, &log, &config).with_agent(agent);

    let report = resolve_dragon_encounter(&mut ctx).await.unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Escaped);
    assert_eq!(report.flee.unwrap().roll, None);
    assert_eq!(state.players[0].fame, 3);
    assert_eq!(state.players[0].champions[0].position, state.players[0].home);
    assert!(state.winner.is_none());
}
