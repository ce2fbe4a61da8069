//! Event cards.
//!
//! Every card is a free `async fn` over the shared [`TurnContext`]; the
//! dispatcher maps a card id onto its handler and turns resolution errors
//! into an `errorMessage` on the result.

mod board;
mod conflict;
mod result;
mod stockpile;
mod trade;

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

pub use result::{EventCardResult, ResourceChange};

use crate::api::ResolveError;
use crate::context::TurnContext;
use crate::log::LogCategory;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EventCardId {
    ThievingCrows,
    HungryPests,
    Drought,
    ForestFire,
    BountifulHarvest,
    MotherLode,
    OasisBloom,
    SuddenStorm,
    SeaSerpents,
    MarketDay,
    WanderingTrader,
    HiddenTreasure,
    Ambush,
    DragonStirs,
    Pilgrimage,
    MercenaryOffer,
    BorderDispute,
    RivalFeud,
}

/// Resolve `card` for the acting player of `ctx`.
pub async fn resolve_event_card(card: EventCardId, ctx: &mut TurnContext<'_>) -> EventCardResult {
    debug!(target: "doomspire::events", %card, player = %ctx.player, "resolving event card");
    ctx.log.log(LogCategory::Event, &format!("{} draws {card}", ctx.player));

    let outcome = match card {
        EventCardId::ThievingCrows => stockpile::thieving_crows(ctx).await,
        EventCardId::HungryPests => stockpile::hungry_pests(ctx).await,
        EventCardId::Drought => stockpile::drought(ctx),
        EventCardId::ForestFire => stockpile::forest_fire(ctx),
        EventCardId::BountifulHarvest => stockpile::bountiful_harvest(ctx),
        EventCardId::MotherLode => stockpile::mother_lode(ctx),
        EventCardId::DragonStirs => stockpile::dragon_stirs(ctx),
        EventCardId::Pilgrimage => stockpile::pilgrimage(ctx),
        EventCardId::OasisBloom => board::oasis_bloom(ctx),
        EventCardId::SuddenStorm => board::sudden_storm(ctx).await,
        EventCardId::SeaSerpents => board::sea_serpents(ctx).await,
        EventCardId::MarketDay => trade::market_day(ctx).await,
        EventCardId::WanderingTrader => trade::wandering_trader(ctx).await,
        EventCardId::HiddenTreasure => trade::hidden_treasure(ctx).await,
        EventCardId::MercenaryOffer => trade::mercenary_offer(ctx).await,
        EventCardId::Ambush => conflict::ambush(ctx).await,
        EventCardId::BorderDispute => conflict::border_dispute(ctx).await,
        EventCardId::RivalFeud => conflict::rival_feud(ctx).await,
    };

    outcome.unwrap_or_else(|error| {
        ctx.log.log(LogCategory::System, &format!("{card} aborted: {error}"));
        EventCardResult::failed(error.to_string())
    })
}

/// Like [`resolve_event_card`], for a card id arriving as text.
pub async fn resolve_event_card_by_id(id: &str, ctx: &mut TurnContext<'_>) -> EventCardResult {
    match EventCardId::from_str(id) {
        Ok(card) => resolve_event_card(card, ctx).await,
        Err(_) => {
            let error = ResolveError::UnknownCard(id.to_string());
            ctx.log.log(LogCategory::System, &error.to_string());
            EventCardResult::failed(error.to_string())
        }
    }
}

/// Take up to `amount` of `kind` from every player, recording the losses.
fn drain_all(
    ctx: &mut TurnContext<'_>,
    kind: doomspire_core::ResourceKind,
    amount: u32,
    result: &mut EventCardResult,
) {
    for player in &mut ctx.state.players {
        let lost = player.resources.take(kind, amount);
        result.record(player.id, kind, -i64::from(lost));
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use doomspire_core::{ChampionId, PlayerId, ResourceKind, Resources};
    use strum::IntoEnumIterator;

    use super::fixtures::*;
    use super::*;
    use crate::agents::ScriptedAgent;
    use crate::log::MemorySink;

    #[test]
    fn card_ids_are_kebab_case() {
        assert_eq!(EventCardId::ThievingCrows.to_string(), "thieving-crows");
        assert_eq!(EventCardId::from_str("sea-serpents"), Ok(EventCardId::SeaSerpents));
        assert_eq!(EventCardId::iter().count(), 18);
        let json = serde_json::to_string(&EventCardId::RivalFeud).unwrap();
        assert_eq!(json, "\"rival-feud\"");
    }

    #[tokio::test]
    async fn unknown_card_reports_error_message() {
        let mut state = four_players();
        let before = state.clone();
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config);

        let result = resolve_event_card_by_id("plague-of-frogs", &mut ctx).await;
        assert!(!result.event_processed);
        assert_eq!(
            result.error_message.as_deref(),
            Some("unknown event card 'plague-of-frogs'")
        );
        assert!(log.contains(LogCategory::System, "plague-of-frogs"));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn missing_player_aborts_with_error_message() {
        let mut state = four_players();
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(9), ChampionId(1), &mut dice, &log, &config);

        let result = resolve_event_card(EventCardId::MotherLode, &mut ctx).await;
        assert!(!result.event_processed);
        assert_eq!(result.error_message.as_deref(), Some("player 9 not found"));
    }

    #[tokio::test]
    async fn crows_with_nothing_to_steal_is_a_processed_no_op() {
        let mut state = four_players();
        let before = state.clone();
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let agent = Arc::new(ScriptedAgent::new().with_script(["resource:ore"]));
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config)
                .with_agent(agent);

        let result = resolve_event_card(EventCardId::ThievingCrows, &mut ctx).await;
        assert!(result.event_processed);
        assert!(result.players_affected.is_empty());
        assert!(result.resources_changed.is_empty());
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn dispatch_by_id_runs_the_card() {
        let mut state = four_players();
        state.players[1].resources = Resources::new(2, 0, 0, 0);
        let mut dice = dice(&[]);
        let log = MemorySink::new();
        let config = config();
        let mut ctx =
            TurnContext::new(&mut state, PlayerId(1), ChampionId(1), &mut dice, &log, &config);

        let result = resolve_event_card_by_id("drought", &mut ctx).await;
        assert!(result.event_processed);
        assert_eq!(result.players_affected, vec![PlayerId(2)]);
        assert_eq!(state.players[1].resources.get(ResourceKind::Food), 1);
        assert!(log.contains(LogCategory::Event, "drought"));
    }
}
