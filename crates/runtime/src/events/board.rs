//! Cards acting on tiles and boats.

use std::sync::Arc;

use doomspire_core::{OceanZone, PlayerId, ResourceKind, TileKind, fight_monster};
use futures::future::join_all;
use strum::IntoEnumIterator;

use super::EventCardResult;
use crate::api::{Choices, DecisionAgent, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

pub(super) fn oasis_bloom(ctx: &mut TurnContext<'_>) -> Result<EventCardResult, ResolveError> {
    let mut result = EventCardResult::processed();
    for tile in ctx.state.tiles.iter_mut().filter(|t| t.kind == TileKind::Oasis) {
        tile.adventure_tokens += 1;
        result.oasis_tokens_added += 1;
    }
    ctx.log.log(
        LogCategory::Event,
        &format!("The oases bloom: {} new adventure token(s)", result.oasis_tokens_added),
    );
    Ok(result)
}

/// Every boat in `zone` drifts one zone clockwise.
fn drift_zone(ctx: &mut TurnContext<'_>, zone: OceanZone, result: &mut EventCardResult) {
    for player in &mut ctx.state.players {
        for boat in player.boats.iter_mut().filter(|b| b.zone == zone) {
            boat.zone = zone.clockwise();
            result.boats_moved += 1;
            result.affect(player.id);
        }
    }
}

/// The acting player picks the zone the storm strikes.
pub(super) async fn sudden_storm(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    ctx.state.require_player(ctx.player)?;
    let mut choices = Choices::new(ctx.player, "A sudden storm! Choose the ocean it strikes");
    for zone in OceanZone::iter() {
        choices =
            choices.option(format!("zone:{zone}"), format!("Storm over the {zone} sea"), zone);
    }

    let mut result = EventCardResult::processed();
    let Some(decided) = decide(ctx.agent.as_deref(), choices, ctx.log).await else {
        return Ok(result);
    };
    drift_zone(ctx, decided.value, &mut result);
    ctx.log.log(
        LogCategory::Event,
        &format!(
            "The storm over the {} sea pushed {} boat(s) to the {} sea",
            decided.value,
            result.boats_moved,
            decided.value.clockwise()
        ),
    );
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SerpentResponse {
    Fight,
    Flee,
}

/// Every boat owner answers the serpents at once; the answers are then
/// applied one owner at a time.
pub(super) async fn sea_serpents(
    ctx: &mut TurnContext<'_>,
) -> Result<EventCardResult, ResolveError> {
    let owners: Vec<(PlayerId, Option<Arc<dyn DecisionAgent>>)> = ctx
        .state
        .players
        .iter()
        .filter(|p| !p.boats.is_empty())
        .map(|p| (p.id, ctx.agent_for(p.id)))
        .collect();

    let mut result = EventCardResult::processed();
    if owners.is_empty() {
        ctx.log.log(LogCategory::Event, "Sea serpents circle, but no boats are afloat");
        return Ok(result);
    }

    let serpent_might = ctx.config.serpent_might;
    let log = ctx.log;
    let responses = join_all(owners.iter().map(|(owner, agent)| {
        let choices = Choices::new(
            *owner,
            format!("Sea serpents (might {serpent_might}) attack your boats"),
        )
        .option("fight", "Fight the serpents", SerpentResponse::Fight)
        .option("flee", "Sail away one zone clockwise", SerpentResponse::Flee);
        decide(agent.as_deref(), choices, log)
    }))
    .await;

    for ((owner, _), response) in owners.iter().zip(responses) {
        let Some(response) = response else {
            continue;
        };
        match response.value {
            SerpentResponse::Fight => {
                let might = ctx.state.require_player(*owner)?.might;
                let fight = fight_monster(might, serpent_might, ctx.dice);
                let player = ctx.state.require_player_mut(*owner)?;
                if fight.champion_won {
                    player.fame += 1;
                    result.affect(*owner);
                    ctx.log.log(
                        LogCategory::Combat,
                        &format!(
                            "{owner} drove off the serpents ({} vs {serpent_might})",
                            fight.champion_total
                        ),
                    );
                } else {
                    let lost = player.resources.take(ResourceKind::Gold, 1);
                    result.record(*owner, ResourceKind::Gold, -i64::from(lost));
                    ctx.log.log(
                        LogCategory::Combat,
                        &format!(
                            "The serpents beat {owner} ({} vs {serpent_might}); {lost} gold lost",
                            fight.champion_total
                        ),
                    );
                }
            }
            SerpentResponse::Flee => {
                let player = ctx.state.require_player_mut(*owner)?;
                for boat in player.boats.iter_mut() {
                    boat.zone = boat.zone.clockwise();
                    result.boats_moved += 1;
                }
                result.affect(*owner);
                ctx.log.log(LogCategory::Event, &format!("{owner}'s boats fled the serpents"));
            }
        }
    }
    Ok(result)
}
