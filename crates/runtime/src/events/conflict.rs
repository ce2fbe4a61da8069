//! Cards that set players against bandits or each other.

use std::sync::Arc;

use doomspire_core::{Monster, PlayerId, Position, ResourceKind, Resources};
use futures::future::join_all;

use super::EventCardResult;
use crate::api::{Choices, DecisionAgent, ResolveError};
use crate::context::TurnContext;
use crate::encounter::{EncounterOutcome, resolve_monster_encounter};
use crate::log::LogCategory;
use crate::protocol::decide;

/// Claims of rivals within this distance of one of the acting player's own
/// claims can be disputed.
const DISPUTE_REACH: u32 = 2;

/// Bandits jump the acting champion. It did not start the fight, so it may
/// try to flee.
pub(super) async fn ambush(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let player = ctx.player;
    let before = ctx.state.require_player(player)?.resources;
    let bandit = Monster::new("Bandit", ctx.config.bandit_might)
        .with_reward(1, Resources::single(ResourceKind::Gold, 1));

    let report = resolve_monster_encounter(ctx, &bandit, None, false).await?;

    let mut result = EventCardResult::processed();
    result.affect(player);
    let after = ctx.state.require_player(player)?.resources;
    result.record_diff(player, &before, &after);
    let summary = match report.outcome {
        EncounterOutcome::Won => "fought off the bandits",
        EncounterOutcome::Lost => "was beaten by the bandits",
        EncounterOutcome::Escaped => "escaped the bandits",
    };
    ctx.log.log(LogCategory::Event, &format!("{player} {summary}"));
    Ok(result)
}

/// Rival claims the acting player can contest.
fn disputed_claims(ctx: &TurnContext<'_>) -> Vec<(Position, PlayerId)> {
    let own: Vec<Position> = ctx
        .state
        .claimed_tiles(ctx.player)
        .map(|tile| tile.position)
        .collect();
    ctx.state
        .tiles
        .iter()
        .filter_map(|tile| {
            let owner = tile.claimed_by.filter(|&owner| owner != ctx.player)?;
            own.iter()
                .any(|&mine| ctx.state.distance(mine, tile.position) <= DISPUTE_REACH)
                .then_some((tile.position, owner))
        })
        .collect()
}

/// The acting player contests a nearby rival claim; the claim is revoked.
pub(super) async fn border_dispute(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    ctx.state.require_player(ctx.player)?;
    let candidates = disputed_claims(ctx);

    let mut result = EventCardResult::processed();
    if candidates.is_empty() {
        ctx.log.log(
            LogCategory::Event,
            &format!("{} has no borders to dispute", ctx.player),
        );
        return Ok(result);
    }

    let mut choices = Choices::new(ctx.player, "Border dispute: choose a rival claim to contest");
    for (position, owner) in candidates {
        choices = choices.option(
            format!("tile:{}:{}", position.row, position.col),
            format!("Contest {owner}'s claim at {position}"),
            (position, owner),
        );
    }

    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    let (position, owner) = decided.value;
    ctx.state.require_tile_mut(position)?.claimed_by = None;
    result.affect(owner);
    ctx.log.log(
        LogCategory::Event,
        &format!("{} had {owner}'s claim at {position} revoked", ctx.player),
    );
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeudAnswer {
    Tribute,
    LoseFame,
}

/// Every rival decides at once: pay the acting player a food, or lose fame.
pub(super) async fn rival_feud(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let acting = ctx.player;
    ctx.state.require_player(acting)?;
    let rivals: Vec<(PlayerId, bool, Option<Arc<dyn DecisionAgent>>)> = ctx
        .state
        .players
        .iter()
        .filter(|p| p.id != acting)
        .map(|p| (p.id, p.resources.food > 0, ctx.agent_for(p.id)))
        .collect();

    let log = ctx.log;
    let answers = join_all(rivals.iter().map(|(rival, has_food, agent)| {
        let mut choices = Choices::new(*rival, format!("{acting} demands tribute in a rival feud"));
        if *has_food {
            choices =
                choices.option("tribute", format!("Pay 1 food to {acting}"), FeudAnswer::Tribute);
        }
        let choices = choices.option("refuse", "Refuse and lose 1 fame", FeudAnswer::LoseFame);
        decide(agent.as_deref(), choices, log)
    }))
    .await;

    let mut result = EventCardResult::processed();
    for ((rival, _, _), answer) in rivals.iter().zip(answers) {
        let Some(answer) = answer else {
            continue;
        };
        match answer.value {
            FeudAnswer::Tribute => {
                let paid = ctx
                    .state
                    .require_player_mut(*rival)?
                    .resources
                    .take(ResourceKind::Food, 1);
                ctx.state
                    .require_player_mut(acting)?
                    .resources
                    .add(ResourceKind::Food, paid);
                result.record(*rival, ResourceKind::Food, -i64::from(paid));
                result.record(acting, ResourceKind::Food, i64::from(paid));
                ctx.log.log(LogCategory::Event, &format!("{rival} paid tribute to {acting}"));
            }
            FeudAnswer::LoseFame => {
                let lost = ctx.state.require_player_mut(*rival)?.lose_fame(1);
                if lost > 0 {
                    result.affect(*rival);
                }
                ctx.log.log(
                    LogCategory::Event,
                    &format!("{rival} refused {acting} and lost {lost} fame"),
                );
            }
        }
    }
    Ok(result)
}
