//! The fight-or-flee state machine.
//!
//! ```text
//! Eligible ──fight──▶ Fighting
//!     │
//!     └──flee──▶ Fleeing ──1──▶ Failed ──▶ Fighting
//!                   ├──────2──▶ PartialSuccess
//!                   └──────3──▶ FullSuccess
//! ```
//!
//! Only a side that did not start the fight is eligible. Against the dragon
//! fleeing never fails.

use doomspire_core::{ChampionId, FleeReport, FleeRoll, PlayerId, apply_dragon_flee, apply_flee};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{Choices, ResolveError};
use crate::context::TurnContext;
use crate::log::LogCategory;
use crate::protocol::decide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FleePhase {
    Eligible,
    Fighting,
    Fleeing,
    Failed,
    PartialSuccess,
    FullSuccess,
}

impl FleePhase {
    /// `Eligible` after the fight/flee choice; other phases are unchanged.
    pub const fn choose(self, flee: bool) -> Self {
        match self {
            Self::Eligible if flee => Self::Fleeing,
            Self::Eligible => Self::Fighting,
            other => other,
        }
    }

    /// `Fleeing` after the roll; other phases are unchanged.
    pub const fn rolled(self, outcome: FleeRoll) -> Self {
        match (self, outcome) {
            (Self::Fleeing, FleeRoll::Failed) => Self::Failed,
            (Self::Fleeing, FleeRoll::Partial) => Self::PartialSuccess,
            (Self::Fleeing, FleeRoll::Full) => Self::FullSuccess,
            (other, _) => other,
        }
    }

    /// A failed flee falls back into the fight.
    pub const fn settle(self) -> Self {
        match self {
            Self::Failed => Self::Fighting,
            other => other,
        }
    }

    pub const fn escaped(self) -> bool {
        matches!(self, Self::PartialSuccess | Self::FullSuccess)
    }
}

/// What the fleeing side faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threat {
    Champion,
    Monster,
    Dragon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleeResolution {
    /// `Fighting`, `PartialSuccess` or `FullSuccess`.
    pub phase: FleePhase,
    pub report: Option<FleeReport>,
}

impl FleeResolution {
    fn fighting() -> Self {
        Self {
            phase: FleePhase::Fighting,
            report: None,
        }
    }
}

/// Offer `champion` the fight/flee choice and carry it out.
///
/// An initiator goes straight to `Fighting` without being asked.
pub async fn resolve_flee_choice(
    ctx: &mut TurnContext<'_>,
    player: PlayerId,
    champion: ChampionId,
    initiated: bool,
    threat: Threat,
) -> Result<FleeResolution, ResolveError> {
    if initiated {
        return Ok(FleeResolution::fighting());
    }

    let foe = match threat {
        Threat::Champion => "a rival champion",
        Threat::Monster => "a monster",
        Threat::Dragon => "the dragon",
    };
    let choices = Choices::new(player, format!("Your {champion} faces {foe}. Fight or flee?"))
        .option("fight", "Stand and fight", false)
        .option("flee", "Attempt to flee", true);
    let agent = ctx.agent_for(player);
    let Some(decided) = decide(agent.as_deref(), choices, ctx.log).await else {
        return Ok(FleeResolution::fighting());
    };

    let phase = FleePhase::Eligible.choose(decided.value);
    if phase == FleePhase::Fighting {
        ctx.log.log(LogCategory::Combat, &format!("{player} stands and fights {foe}"));
        return Ok(FleeResolution::fighting());
    }

    let report = if threat == Threat::Dragon {
        apply_dragon_flee(ctx.state, player, champion, ctx.config)?
    } else {
        let roll = ctx.dice.roll();
        apply_flee(ctx.state, player, champion, roll)?
    };
    let phase = phase.rolled(report.outcome).settle();

    debug!(
        target: "doomspire::flee",
        %player,
        %champion,
        ?phase,
        roll = ?report.roll,
        "flee resolved"
    );
    let message = match phase {
        FleePhase::Fighting => format!("{player} failed to flee {foe} and must fight"),
        FleePhase::PartialSuccess => {
            format!("{player} barely escaped {foe}, losing something on the way")
        }
        _ => format!("{player} escaped {foe}"),
    };
    ctx.log.log(LogCategory::Combat, &message);

    Ok(FleeResolution {
        phase,
        report: Some(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_the_roll() {
        let fleeing = FleePhase::Eligible.choose(true);
        assert_eq!(fleeing, FleePhase::Fleeing);
        assert_eq!(fleeing.rolled(FleeRoll::Failed).settle(), FleePhase::Fighting);
        assert_eq!(fleeing.rolled(FleeRoll::Partial), FleePhase::PartialSuccess);
        assert!(fleeing.rolled(FleeRoll::Full).escaped());
        assert_eq!(FleePhase::Eligible.choose(false), FleePhase::Fighting);
    }

    #[test]
    fn transitions_outside_their_phase_are_inert() {
        assert_eq!(FleePhase::Fighting.rolled(FleeRoll::Full), FleePhase::Fighting);
        assert_eq!(FleePhase::FullSuccess.choose(false), FleePhase::FullSuccess);
        assert_eq!(FleePhase::PartialSuccess.settle(), FleePhase::PartialSuccess);
    }
}
