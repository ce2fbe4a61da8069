//! Fights as they happen on the board.
//!
//! Each resolver runs the fight/flee choice for the non-initiating side,
//! rolls the fight with the pure combat functions, applies rewards, and
//! walks the loser through loot, after-defeat effects and respawn with the
//! interceptors given a chance at each step.

use doomspire_core::{
    ChampionId, DragonEncounter, DuelResult, FleeReport, HOME_ONLY, LootOption, Monster, PlayerId,
    Position, Side, ThresholdResult, Victory, VictoryCondition, apply_loot, claim_monster_reward,
    fight_champions, fight_monster, loot_options, respawn, respawn_options,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::flee::{Threat, resolve_flee_choice};
use crate::interceptors::{Defeat, DefeatCause, InterceptOutcome, InterceptPoint};
use crate::log::LogCategory;
use crate::protocol::decide;

/// Outcome from the acting player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterOutcome {
    Won,
    Lost,
    /// Someone fled successfully; no fight took place.
    Escaped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CombatDetail {
    Duel(DuelResult),
    Threshold(ThresholdResult),
}

/// What happened to a beaten champion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefeatReport {
    pub loot: Option<LootOption>,
    /// Interceptors that applied, in step order.
    pub interceptions: Vec<InterceptOutcome>,
    pub respawned_at: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterReport {
    pub outcome: EncounterOutcome,
    pub flee: Option<FleeReport>,
    pub combat: Option<CombatDetail>,
    pub defeat: Option<DefeatReport>,
    /// Set when the dragon was slain in this encounter.
    pub victory: Option<Victory>,
}

impl EncounterReport {
    fn escaped(flee: Option<FleeReport>) -> Self {
        Self {
            outcome: EncounterOutcome::Escaped,
            flee,
            combat: None,
            defeat: None,
            victory: None,
        }
    }
}

fn require_might(
    ctx: &TurnContext<'_>,
    player: PlayerId,
    champion: ChampionId,
) -> Result<u32, ResolveError> {
    ctx.champion_might(player, champion)
        .ok_or(ResolveError::ChampionNotFound { player, champion })
}

/// The acting champion fights a rival champion standing on the same tile.
///
/// The acting side initiated and must fight; the defender may try to flee.
/// The loser is looted by the winner and respawns.
pub async fn resolve_champion_duel(
    ctx: &mut TurnContext<'_>,
    defender: PlayerId,
    defender_champion: ChampionId,
) -> Result<EncounterReport, ResolveError> {
    let (attacker, attacker_champion) = (ctx.player, ctx.champion);
    let attacker_might = require_might(ctx, attacker, attacker_champion)?;
    let defender_might = require_might(ctx, defender, defender_champion)?;

    let flee =
        resolve_flee_choice(ctx, defender, defender_champion, false, Threat::Champion).await?;
    if flee.phase.escaped() {
        return Ok(EncounterReport::escaped(flee.report));
    }

    let duel = fight_champions(attacker_might, defender_might, ctx.dice);
    let (winner, loser) = match duel.winner {
        Side::Attacker => ((attacker, attacker_champion), (defender, defender_champion)),
        Side::Defender => ((defender, defender_champion), (attacker, attacker_champion)),
    };
    if let Some(round) = duel.decisive_round() {
        ctx.log.log(
            LogCategory::Combat,
            &format!(
                "{attacker} ({}) vs {defender} ({}) after {} round(s): {} wins",
                round.attacker_total,
                round.defender_total,
                duel.round_count(),
                winner.0
            ),
        );
    }
    debug!(
        target: "doomspire::combat",
        %attacker,
        %defender,
        rounds = duel.round_count(),
        capped = duel.capped,
        "duel resolved"
    );

    let defeat = Defeat {
        loser: loser.0,
        loser_champion: loser.1,
        victor: Some(winner),
        cause: DefeatCause::Champion,
    };
    let report = handle_defeat(ctx, &defeat).await?;

    Ok(EncounterReport {
        outcome: if duel.attacker_won() {
            EncounterOutcome::Won
        } else {
            EncounterOutcome::Lost
        },
        flee: flee.report,
        combat: Some(CombatDetail::Duel(duel)),
        defeat: Some(report),
        victory: None,
    })
}

/// The acting champion fights `monster`.
///
/// With a `lair`, the monster is the one guarding that tile and is removed on
/// defeat; without one (an ambush) its reward is paid directly.
pub async fn resolve_monster_encounter(
    ctx: &mut TurnContext<'_>,
    monster: &Monster,
    lair: Option<Position>,
    initiated: bool,
) -> Result<EncounterReport, ResolveError> {
    let (player, champion) = (ctx.player, ctx.champion);
    let might = require_might(ctx, player, champion)?;

    let flee = resolve_flee_choice(ctx, player, champion, initiated, Threat::Monster).await?;
    if flee.phase.escaped() {
        return Ok(EncounterReport::escaped(flee.report));
    }

    let fight = fight_monster(might, monster.might, ctx.dice);
    ctx.log.log(
        LogCategory::Combat,
        &format!(
            "{player} rolled {} ({} total) against the {} ({}): {}",
            fight.roll,
            fight.champion_total,
            monster.name,
            monster.might,
            if fight.champion_won { "victory" } else { "defeat" }
        ),
    );

    if fight.champion_won {
        match lair {
            Some(position) => {
                claim_monster_reward(ctx.state, player, position)?;
            }
            None => {
                let owner = ctx.state.require_player_mut(player)?;
                owner.fame += monster.fame;
                owner.resources.add_all(&monster.resources);
            }
        }
        return Ok(EncounterReport {
            outcome: EncounterOutcome::Won,
            flee: flee.report,
            combat: Some(CombatDetail::Threshold(fight)),
            defeat: None,
            victory: None,
        });
    }

    let defeat = Defeat {
        loser: player,
        loser_champion: champion,
        victor: None,
        cause: DefeatCause::Monster,
    };
    let report = handle_defeat(ctx, &defeat).await?;
    Ok(EncounterReport {
        outcome: EncounterOutcome::Lost,
        flee: flee.report,
        combat: Some(CombatDetail::Threshold(fight)),
        defeat: Some(report),
        victory: None,
    })
}

/// The acting champion meets the dragon on the doomspire.
///
/// The dragon attacks whoever arrives, so the champion may flee (always
/// successfully, at a fame cost). Slaying the dragon wins the game.
pub async fn resolve_dragon_encounter(
    ctx: &mut TurnContext<'_>,
) -> Result<EncounterReport, ResolveError> {
    let (player, champion) = (ctx.player, ctx.champion);
    let might = require_might(ctx, player, champion)?;
    let dragon = DragonEncounter::begin(ctx.config.dragon_base_might, ctx.dice);
    ctx.log.log(
        LogCategory::Combat,
        &format!("The dragon rises with might {}", dragon.might()),
    );

    let flee = resolve_flee_choice(ctx, player, champion, false, Threat::Dragon).await?;
    if flee.phase.escaped() {
        return Ok(EncounterReport::escaped(flee.report));
    }

    let fight = dragon.fight(might, ctx.dice);
    if fight.champion_won {
        let victory = Victory::new(player, VictoryCondition::DragonSlain);
        if ctx.state.winner.is_none() {
            ctx.state.winner = Some(victory);
        }
        ctx.log.log(
            LogCategory::Combat,
            &format!("{player} slew the dragon ({} vs {})", fight.champion_total, fight.target),
        );
        return Ok(EncounterReport {
            outcome: EncounterOutcome::Won,
            flee: flee.report,
            combat: Some(CombatDetail::Threshold(fight)),
            defeat: None,
            victory: Some(victory),
        });
    }

    ctx.log.log(
        LogCategory::Combat,
        &format!("The dragon overpowered {player} ({} vs {})", fight.champion_total, fight.target),
    );
    let defeat = Defeat {
        loser: player,
        loser_champion: champion,
        victor: None,
        cause: DefeatCause::Dragon,
    };
    let report = handle_defeat(ctx, &defeat).await?;
    Ok(EncounterReport {
        outcome: EncounterOutcome::Lost,
        flee: flee.report,
        combat: Some(CombatDetail::Threshold(fight)),
        defeat: Some(report),
        victory: None,
    })
}

/// Loot, after-defeat effects and respawn for a beaten champion.
pub async fn handle_defeat(
    ctx: &mut TurnContext<'_>,
    defeat: &Defeat,
) -> Result<DefeatReport, ResolveError> {
    let interceptors = ctx.interceptors.clone();
    let mut report = DefeatReport::default();

    if defeat.victor.is_some() {
        match interceptors.run(InterceptPoint::Loot, ctx, defeat).await {
            InterceptOutcome::NoEffect => report.loot = default_loot(ctx, defeat).await?,
            applied => {
                report.loot = applied.loot();
                report.interceptions.push(applied);
            }
        }
    }

    let after = interceptors.run(InterceptPoint::AfterDefeat, ctx, defeat).await;
    if after.is_applied() {
        report.interceptions.push(after);
    }

    match interceptors.run(InterceptPoint::Respawn, ctx, defeat).await {
        InterceptOutcome::NoEffect => {
            let home = default_respawn(ctx, defeat)?;
            report.respawned_at = Some(home);
        }
        applied => {
            report.respawned_at = ctx
                .state
                .require_champion(defeat.loser, defeat.loser_champion)
                .ok()
                .map(|champion| champion.position);
            report.interceptions.push(applied);
        }
    }

    Ok(report)
}

/// The victor picks one resource or lootable item.
async fn default_loot(
    ctx: &mut TurnContext<'_>,
    defeat: &Defeat,
) -> Result<Option<LootOption>, ResolveError> {
    let Some((victor, victor_champion)) = defeat.victor else {
        return Ok(None);
    };
    let options = loot_options(
        ctx.state,
        defeat.loser,
        defeat.loser_champion,
        victor,
        victor_champion,
    )?;
    if options.is_empty() {
        ctx.log.log(
            LogCategory::Combat,
            &format!("{} had nothing worth taking", defeat.loser),
        );
        return Ok(None);
    }

    let mut choices =
        Choices::new(victor, format!("You beat {}. Choose your spoils", defeat.loser));
    for option in options {
        choices = choices.option(option.id(), option.describe(), option);
    }
    let agent = ctx.agent_for(victor);
    let Some(decided) = decide(agent.as_deref(), choices, ctx.log).await else {
        return Ok(None);
    };

    let taken = apply_loot(
        ctx.state,
        decided.value,
        defeat.loser,
        defeat.loser_champion,
        victor,
        victor_champion,
    )?;
    if !taken {
        return Ok(None);
    }
    ctx.log.log(
        LogCategory::Combat,
        &format!("{victor} took {} from {}", decided.value.describe().to_lowercase(), defeat.loser),
    );
    Ok(Some(decided.value))
}

fn default_respawn(ctx: &mut TurnContext<'_>, defeat: &Defeat) -> Result<Position, ResolveError> {
    let options = respawn_options(ctx.state, defeat.loser, HOME_ONLY)?;
    let home = match options.first() {
        Some(&position) => position,
        None => ctx.state.require_player(defeat.loser)?.home,
    };
    respawn(ctx.state, defeat.loser, defeat.loser_champion, home)?;
    ctx.log.log(
        LogCategory::Combat,
        &format!("{} of {} returns home to {home}", defeat.loser_champion, defeat.loser),
    );
    Ok(home)
}
