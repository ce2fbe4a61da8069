use async_trait::async_trait;
use doomspire_core::{GameState, ItemKind, LootOption, TraderItem, apply_loot, loot_options};

use super::{Defeat, DefeatCause, DefeatInterceptor, InterceptOutcome, InterceptPoint};
use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

/// A beaten bearer of the backpack keeps its items packed: the victor may
/// only take resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackpackLoot;

#[async_trait]
impl DefeatInterceptor for BackpackLoot {
    fn name(&self) -> &'static str {
        "backpack_loot"
    }

    fn point(&self) -> InterceptPoint {
        InterceptPoint::Loot
    }

    fn guard(&self, state: &GameState, defeat: &Defeat) -> bool {
        defeat.cause == DefeatCause::Champion
            && defeat.victor.is_some()
            && defeat.loser_holds(state, |item| item.kind == ItemKind::Trader(TraderItem::Backpack))
    }

    async fn apply(
        &self,
        ctx: &mut TurnContext<'_>,
        defeat: &Defeat,
    ) -> Result<InterceptOutcome, ResolveError> {
        let Some((victor, victor_champion)) = defeat.victor else {
            return Ok(InterceptOutcome::NoEffect);
        };
        let options: Vec<LootOption> = loot_options(
            ctx.state,
            defeat.loser,
            defeat.loser_champion,
            victor,
            victor_champion,
        )?
        .into_iter()
        .filter(LootOption::is_resource)
        .collect();

        if options.is_empty() {
            let detail = format!("{} kept everything packed; nothing to take", defeat.loser);
            ctx.log.log(LogCategory::Combat, &format!("Backpack: {detail}"));
            return Ok(InterceptOutcome::Applied {
                interceptor: self.name(),
                detail,
                loot: None,
                simulated: true,
            });
        }

        let mut choices = Choices::new(
            victor,
            format!("{}'s backpack is shut tight. Take a resource", defeat.loser),
        );
        for option in options {
            choices = choices.option(option.id(), option.describe(), option);
        }

        let agent = ctx.agent_for(victor);
        let Some(decided) = decide(agent.as_deref(), choices, ctx.log).await else {
            return Ok(InterceptOutcome::NoEffect);
        };
        let taken = apply_loot(
            ctx.state,
            decided.value,
            defeat.loser,
            defeat.loser_champion,
            victor,
            victor_champion,
        )?;

        let detail = format!("{victor} took {}", decided.value.describe().to_lowercase());
        ctx.log.log(LogCategory::Combat, &format!("Backpack: {detail}"));
        Ok(InterceptOutcome::Applied {
            interceptor: self.name(),
            detail,
            loot: taken.then_some(decided.value),
            simulated: decided.decision.simulated,
        })
    }
}
