use async_trait::async_trait;
use doomspire_core::{GameState, ItemKind, TreasureCard, donate, resource_options};

use super::{Defeat, DefeatInterceptor, InterceptOutcome, InterceptPoint};
use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

/// A beaten bearer of the cursed amulet must give away one resource of
/// their choice: to the victorious player, or to the bank when the victor
/// was a monster or the dragon.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursedAmuletDonation;

#[async_trait]
impl DefeatInterceptor for CursedAmuletDonation {
    fn name(&self) -> &'static str {
        "cursed_amulet_donation"
    }

    fn point(&self) -> InterceptPoint {
        InterceptPoint::AfterDefeat
    }

    fn guard(&self, state: &GameState, defeat: &Defeat) -> bool {
        defeat.loser_holds(state, |item| {
            item.kind == ItemKind::Treasure(TreasureCard::CursedAmulet)
        })
    }

    async fn apply(
        &self,
        ctx: &mut TurnContext<'_>,
        defeat: &Defeat,
    ) -> Result<InterceptOutcome, ResolveError> {
        let loser = defeat.loser;
        let recipient = defeat.victor.map(|(player, _)| player);
        let held = resource_options(&ctx.state.require_player(loser)?.resources);
        if held.is_empty() {
            ctx.log.log(
                LogCategory::Combat,
                &format!("The cursed amulet finds nothing to take from {loser}"),
            );
            return Ok(InterceptOutcome::NoEffect);
        }

        let to = match recipient {
            Some(player) => player.to_string(),
            None => "the bank".to_string(),
        };
        let mut choices =
            Choices::new(loser, format!("The cursed amulet demands a donation to {to}"));
        for kind in held {
            choices = choices.option(format!("resource:{kind}"), format!("Give 1 {kind}"), kind);
        }

        let agent = ctx.agent_for(loser);
        let Some(decided) = decide(agent.as_deref(), choices, ctx.log).await else {
            return Ok(InterceptOutcome::NoEffect);
        };
        let given = donate(ctx.state, loser, recipient, decided.value)?;

        let detail = format!("{loser} gave {given} {} to {to}", decided.value);
        ctx.log.log(LogCategory::Combat, &format!("Cursed amulet: {detail}"));
        Ok(InterceptOutcome::Applied {
            interceptor: self.name(),
            detail,
            loot: None,
            simulated: decided.decision.simulated,
        })
    }
}
