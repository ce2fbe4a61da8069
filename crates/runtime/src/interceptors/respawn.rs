use async_trait::async_trait;
use doomspire_core::{GameState, ItemKind, TreasureCard, respawn, respawn_options};

use super::{Defeat, DefeatInterceptor, InterceptOutcome, InterceptPoint};
use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

/// A beaten bearer of the padded helmet may respawn on one of its own
/// claimed, unoccupied tiles within the configured band of home, instead of
/// at home.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddedHelmetRespawn;

#[async_trait]
impl DefeatInterceptor for PaddedHelmetRespawn {
    fn name(&self) -> &'static str {
        "padded_helmet_respawn"
    }

    fn point(&self) -> InterceptPoint {
        InterceptPoint::Respawn
    }

    fn guard(&self, state: &GameState, defeat: &Defeat) -> bool {
        defeat.loser_holds(state, |item| {
            item.kind == ItemKind::Treasure(TreasureCard::PaddedHelmet)
        })
    }

    async fn apply(
        &self,
        ctx: &mut TurnContext<'_>,
        defeat: &Defeat,
    ) -> Result<InterceptOutcome, ResolveError> {
        let loser = defeat.loser;
        let home = ctx.state.require_player(loser)?.home;
        let options = respawn_options(ctx.state, loser, ctx.config.helmet_respawn_band)?;

        let mut choices =
            Choices::new(loser, "Your padded helmet lets you choose where to respawn");
        for position in options {
            let label = if position == home {
                "Respawn at home".to_string()
            } else {
                format!("Respawn at claimed tile {position}")
            };
            choices =
                choices.option(format!("tile:{}:{}", position.row, position.col), label, position);
        }

        let agent = ctx.agent_for(loser);
        let Some(decided) = decide(agent.as_deref(), choices, ctx.log).await else {
            return Ok(InterceptOutcome::NoEffect);
        };
        respawn(ctx.state, loser, defeat.loser_champion, decided.value)?;

        let detail = format!("{} of {loser} respawned at {}", defeat.loser_champion, decided.value);
        ctx.log.log(LogCategory::Combat, &format!("Padded helmet: {detail}"));
        Ok(InterceptOutcome::Applied {
            interceptor: self.name(),
            detail,
            loot: None,
            simulated: decided.decision.simulated,
        })
    }
}
