//! Cards offering the acting player a deal.

use doomspire_core::{Follower, Item, ResourceKind, Resources, TraderItem, TreasureCard};

use super::EventCardResult;
use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

const TRADER_PRICE: u32 = 2;
const MERCENARY_PRICE: u32 = 1;

/// Swap one unit of a held resource for one unit of another.
pub(super) async fn market_day(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let player = ctx.player;
    let held = ctx.state.require_player(player)?.resources;

    let mut choices = Choices::new(player, "Market day: trade one resource for another")
        .option("decline", "Keep what you have", None);
    for give in held.held_kinds() {
        for receive in ResourceKind::ALL.into_iter().filter(|&kind| kind != give) {
            choices = choices.option(
                format!("trade:{give}:{receive}"),
                format!("Trade 1 {give} for 1 {receive}"),
                Some((give, receive)),
            );
        }
    }

    let mut result = EventCardResult::processed();
    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    let Some((give, receive)) = decided.value else {
        ctx.log.log(LogCategory::Event, &format!("{player} browsed the market"));
        return Ok(result);
    };

    let resources = &mut ctx.state.require_player_mut(player)?.resources;
    if resources.take(give, 1) == 1 {
        resources.add(receive, 1);
        result.record(player, give, -1);
        result.record(player, receive, 1);
        ctx.log.log(
            LogCategory::Event,
            &format!("{player} traded 1 {give} for 1 {receive}"),
        );
    }
    Ok(result)
}

/// Buy one trader item, if the champion has room and the player has gold.
pub(super) async fn wandering_trader(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    let (player, champion) = (ctx.player, ctx.champion);
    let gold = ctx.state.require_player(player)?.resources.gold;
    let has_room = ctx.state.require_champion(player, champion)?.has_free_slot();

    let mut result = EventCardResult::processed();
    if !has_room || gold < TRADER_PRICE {
        ctx.log.log(
            LogCategory::Event,
            &format!("A trader passes by, but {player} cannot buy anything"),
        );
        return Ok(result);
    }

    let mut choices = Choices::new(
        player,
        format!("A wandering trader offers wares for {TRADER_PRICE} gold"),
    )
    .option("decline", "Send the trader on", None);
    for ware in TraderItem::ALL {
        let item = Item::trader(ware);
        choices = choices.option(
            format!("buy:{}", item.name().to_lowercase()),
            format!("Buy the {item}"),
            Some(item),
        );
    }

    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    let Some(item) = decided.value else {
        ctx.log.log(LogCategory::Event, &format!("{player} sent the trader on"));
        return Ok(result);
    };

    let price = Resources::single(ResourceKind::Gold, TRADER_PRICE);
    let owner = ctx.state.require_player_mut(player)?;
    if !owner.resources.covers(&price) {
        return Ok(result);
    }
    let bearer = owner
        .champion_mut(champion)
        .ok_or(ResolveError::ChampionNotFound { player, champion })?;
    if bearer.items.try_push(item).is_err() {
        return Ok(result);
    }
    owner.resources.try_pay(&price);
    result.record(player, ResourceKind::Gold, -i64::from(TRADER_PRICE));
    ctx.log.log(LogCategory::Event, &format!("{player} bought the {item}"));
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TreasureChoice {
    /// Drop the item in this slot onto the tile and take the treasure.
    Drop(usize),
    Leave,
}

/// The acting champion finds a golden idol. With both hands full, something
/// non-stuck has to go onto the tile, or the idol stays behind.
pub(super) async fn hidden_treasure(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    let (player, champion) = (ctx.player, ctx.champion);
    let idol = Item::treasure(TreasureCard::GoldenIdol);
    let bearer = ctx.state.require_champion(player, champion)?;
    let position = bearer.position;

    let mut result = EventCardResult::processed();
    result.affect(player);

    if bearer.has_free_slot() {
        ctx.state.require_champion_mut(player, champion)?.items.push(idol);
        ctx.log.log(LogCategory::Event, &format!("{player} found the {idol}"));
        return Ok(result);
    }

    let mut choices = Choices::new(player, format!("You found the {idol}, but your hands are full"))
        .option("leave", format!("Leave the {idol} behind"), TreasureChoice::Leave);
    for (slot, item) in bearer.items.iter().enumerate() {
        if item.is_droppable() {
            choices = choices.option(
                format!("drop:{slot}"),
                format!("Drop the {item} and take the {idol}"),
                TreasureChoice::Drop(slot),
            );
        }
    }

    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    match decided.value {
        TreasureChoice::Leave => {
            ctx.state.require_tile_mut(position)?.items.push(idol);
            ctx.log.log(
                LogCategory::Event,
                &format!("{player} left the {idol} at {position}"),
            );
        }
        TreasureChoice::Drop(slot) => {
            let bearer = ctx.state.require_champion_mut(player, champion)?;
            let dropped = bearer.items.remove(slot);
            bearer.items.push(idol);
            ctx.state.require_tile_mut(position)?.items.push(dropped);
            ctx.log.log(
                LogCategory::Event,
                &format!("{player} dropped the {dropped} at {position} for the {idol}"),
            );
        }
    }
    Ok(result)
}

/// Hire a mercenary follower for the acting champion.
pub(super) async fn mercenary_offer(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    let (player, champion) = (ctx.player, ctx.champion);
    ctx.state.require_champion(player, champion)?;
    let gold = ctx.state.require_player(player)?.resources.gold;

    let mut result = EventCardResult::processed();
    if gold < MERCENARY_PRICE {
        ctx.log.log(
            LogCategory::Event,
            &format!("A mercenary offers service, but {player} cannot pay"),
        );
        return Ok(result);
    }

    let choices = Choices::new(
        player,
        format!("A mercenary offers service for {MERCENARY_PRICE} gold"),
    )
    .option("hire", "Hire the mercenary", true)
    .option("decline", "Turn the mercenary away", false);
    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    if !decided.value {
        return Ok(result);
    }

    let owner = ctx.state.require_player_mut(player)?;
    let paid = owner.resources.take(ResourceKind::Gold, MERCENARY_PRICE);
    if let Some(bearer) = owner.champion_mut(champion) {
        bearer.followers.push(Follower::Mercenary);
    }
    result.record(player, ResourceKind::Gold, -i64::from(paid));
    ctx.log.log(LogCategory::Event, &format!("{player} hired a mercenary"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use doomspire_core::{ChampionId, PlayerId};

    use super::super::fixtures::*;
    use super::*;
    use crate::agents::ScriptedAgent;
    use crate::events::{EventCardId, resolve_event_card};
    use crate::log::MemorySink;

    #[tokio::test]
    async fn market_trade_swaps_one_unit() {
        let mut state = four_players();
        state.players[0].resources = Resources::new(2, 0, 0, 0);
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let agent = Arc::new(ScriptedAgent::new().with_script(["trade:food:ore"]));
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
                .with_agent(agent);

        let result = resolve_event_card(EventCardId::MarketDay, &mut ctx).await;
        assert_eq!(result.resources_changed.len(), 2);
        assert_eq!(state.players[0].resources, Resources::new(1, 0, 1, 0));
    }

    #[tokio::test]
    async fn market_with_empty_stores_only_declines() {
        let mut state = four_players();
        let before = state.clone();
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config);

        let result = resolve_event_card(EventCardId::MarketDay, &mut ctx).await;
        assert!(result.event_processed);
        assert!(result.resources_changed.is_empty());
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn trader_sells_for_two_gold() {
        let mut state = four_players();
        state.players[0].resources = Resources::new(0, 0, 0, 3);
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let agent = Arc::new(ScriptedAgent::new().with_script(["buy:backpack"]));
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
                .with_agent(agent);

        resolve_event_card(EventCardId::WanderingTrader, &mut ctx).await;
        assert_eq!(state.players[0].resources.gold, 1);
        assert_eq!(
            state.players[0].champions[0].items.as_slice(),
            &[Item::trader(TraderItem::Backpack)]
        );
    }

    #[tokio::test]
    async fn trader_keeps_the_gold_of_a_missing_champion() {
        let mut state = four_players();
        state.players[0].resources = Resources::new(0, 0, 0, 3);
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let agent = Arc::new(ScriptedAgent::new().with_script(["buy:spear"]));
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(2), &mut dice, &log, &config)
                .with_agent(agent);

        let result = resolve_event_card(EventCardId::WanderingTrader, &mut ctx).await;
        assert!(!result.event_processed);
        assert_eq!(state.players[0].resources.gold, 3);
        assert!(state.players[0].champions[0].items.is_empty());
    }

    #[tokio::test]
    async fn trader_ignores_the_poor() {
        let mut state = four_players();
        state.players[0].resources = Resources::new(0, 0, 0, 1);
        let before = state.clone();
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config);

        let result = resolve_event_card(EventCardId::WanderingTrader, &mut ctx).await;
        assert!(result.event_processed);
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn full_hands_drop_an_item_for_the_idol() {
        let mut state = four_players();
        let position = state.players[0].home;
        {
            let items = &mut state.players[0].champions[0].items;
            items.push(Item::treasure(TreasureCard::CursedAmulet));
            items.push(Item::trader(TraderItem::Lantern));
        }
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
                .with_agent(Arc::new(ScriptedAgent::new().with_script(["drop:1"])));

        resolve_event_card(EventCardId::HiddenTreasure, &mut ctx).await;
        let items = &state.players[0].champions[0].items;
        assert!(items.contains(&Item::treasure(TreasureCard::GoldenIdol)));
        assert!(items.contains(&Item::treasure(TreasureCard::CursedAmulet)));
        assert_eq!(
            state.tile(position).unwrap().items,
            vec![Item::trader(TraderItem::Lantern)]
        );
    }

    #[tokio::test]
    async fn cursed_hands_leave_the_idol() {
        let mut state = four_players();
        let position = state.players[0].home;
        {
            let items = &mut state.players[0].champions[0].items;
            items.push(Item::treasure(TreasureCard::CursedAmulet));
            items.push(Item::treasure(TreasureCard::CursedAmulet));
        }
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config);

        resolve_event_card(EventCardId::HiddenTreasure, &mut ctx).await;
        let items = &state.players[0].champions[0].items;
        assert!(!items.contains(&Item::treasure(TreasureCard::GoldenIdol)));
        assert_eq!(state.tile(position).unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn mercenary_joins_for_a_gold() {
        let mut state = four_players();
        state.players[0].resources = Resources::new(0, 0, 0, 1);
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
                .with_agent(Arc::new(ScriptedAgent::new().with_script(["hire"])));

        let result = resolve_event_card(EventCardId::MercenaryOffer, &mut ctx).await;
        assert_eq!(result.players_affected, vec![PlayerId(1)]);
        assert_eq!(state.players[0].resources.gold, 0);
        assert_eq!(state.players[0].champions[0].followers, vec![Follower::Mercenary]);
    }
}
