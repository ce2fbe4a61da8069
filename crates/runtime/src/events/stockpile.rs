//! Cards that only move resources and fame around.

use doomspire_core::{Building, PlayerId, ResourceKind};

use super::{EventCardResult, drain_all};
use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

/// The acting player names a resource; everyone holding it loses one.
pub(super) async fn thieving_crows(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    ctx.state.require_player(ctx.player)?;
    let mut choices =
        Choices::new(ctx.player, "Thieving crows! Choose what they steal from everyone");
    for kind in ResourceKind::ALL {
        choices = choices.option(format!("resource:{kind}"), format!("Crows steal {kind}"), kind);
    }

    let mut result = EventCardResult::processed();
    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    drain_all(ctx, decided.value, 1, &mut result);

    let message = if result.players_affected.is_empty() {
        format!("The crows found no {} to steal", decided.value)
    } else {
        format!(
            "The crows stole {} from {} player(s)",
            decided.value,
            result.players_affected.len()
        )
    };
    ctx.log.log(LogCategory::Event, &message);
    Ok(result)
}

/// The acting player sends pests into another player's stores.
pub(super) async fn hungry_pests(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    let acting = ctx.player;
    ctx.state.require_player(acting)?;
    let mut choices = Choices::new(acting, "Hungry pests! Choose whose food they eat");
    for player in ctx.state.players.iter().filter(|p| p.id != acting) {
        choices = choices.option(
            format!("player:{}", player.id.0),
            format!("Send the pests to {}", player.name),
            player.id,
        );
    }

    let mut result = EventCardResult::processed();
    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        ctx.log.log(LogCategory::Event, "The pests found nobody else to bother");
        return Ok(result);
    };
    let target = ctx.state.require_player_mut(decided.value)?;
    let eaten = target.resources.take(ResourceKind::Food, 1);
    result.record(target.id, ResourceKind::Food, -i64::from(eaten));
    ctx.log.log(
        LogCategory::Event,
        &format!("The pests ate {eaten} food of {}", decided.value),
    );
    Ok(result)
}

pub(super) fn drought(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let mut result = EventCardResult::processed();
    drain_all(ctx, ResourceKind::Food, 1, &mut result);
    ctx.log.log(
        LogCategory::Event,
        &format!("Drought: {} player(s) lost food", result.players_affected.len()),
    );
    Ok(result)
}

pub(super) fn forest_fire(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let mut result = EventCardResult::processed();
    drain_all(ctx, ResourceKind::Wood, 1, &mut result);
    ctx.log.log(
        LogCategory::Event,
        &format!("Forest fire: {} player(s) lost wood", result.players_affected.len()),
    );
    Ok(result)
}

/// One food per claimed food-producing tile, for every player.
pub(super) fn bountiful_harvest(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    let gains: Vec<(PlayerId, u32)> = ctx
        .state
        .players
        .iter()
        .map(|player| {
            let fields = ctx
                .state
                .claimed_tiles(player.id)
                .filter(|tile| tile.production.food > 0)
                .count();
            (player.id, u32::try_from(fields).unwrap_or(u32::MAX))
        })
        .collect();

    let mut result = EventCardResult::processed();
    for (id, gain) in gains {
        if let Some(player) = ctx.state.player_mut(id) {
            player.resources.add(ResourceKind::Food, gain);
            result.record(id, ResourceKind::Food, i64::from(gain));
        }
    }
    ctx.log.log(LogCategory::Event, "A bountiful harvest fills the granaries");
    Ok(result)
}

/// Two ore when the acting champion stands on an ore tile, one otherwise.
pub(super) fn mother_lode(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let position = ctx.state.require_champion(ctx.player, ctx.champion)?.position;
    let on_ore = ctx
        .state
        .tile(position)
        .is_some_and(|tile| tile.production.ore > 0);
    let amount = if on_ore { 2 } else { 1 };

    ctx.state
        .require_player_mut(ctx.player)?
        .resources
        .add(ResourceKind::Ore, amount);
    let mut result = EventCardResult::processed();
    result.record(ctx.player, ResourceKind::Ore, i64::from(amount));
    ctx.log.log(
        LogCategory::Event,
        &format!("{} struck a mother lode: +{amount} ore", ctx.player),
    );
    Ok(result)
}

pub(super) fn dragon_stirs(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let mut result = EventCardResult::processed();
    drain_all(ctx, ResourceKind::Gold, 1, &mut result);
    ctx.log.log(
        LogCategory::Event,
        &format!(
            "The dragon stirs; {} player(s) pay a gold in tribute",
            result.players_affected.len()
        ),
    );
    Ok(result)
}

/// Fame for holy buildings: a chapel gives 1, a monastery 2.
pub(super) fn pilgrimage(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let mut result = EventCardResult::processed();
    for player in &mut ctx.state.players {
        let fame = if player.has_building(Building::Monastery) {
            2
        } else if player.has_building(Building::Chapel) {
            1
        } else {
            0
        };
        if fame > 0 {
            player.fame += fame;
            result.affect(player.id);
        }
    }
    ctx.log.log(
        LogCategory::Event,
        &format!("Pilgrims honour {} player(s)", result.players_affected.len()),
    );
    Ok(result)
}
