//! Flee outcomes and their effect on the board.
//!
//! The decision to flee (and who may make it) is taken by the runtime. This
//! module owns what happens once the die has been rolled:
//!
//! | roll | outcome | effect |
//! |---|---|---|
//! | 1 | [`FleeRoll::Failed`]  | nothing moves; the fight goes ahead |
//! | 2 | [`FleeRoll::Partial`] | nearest unoccupied own claim (else home), lose one unit |
//! | 3 | [`FleeRoll::Full`]    | home, no penalty |
//!
//! Fleeing from the dragon always succeeds: home, minus a fixed fame penalty.

use tracing::debug;

use crate::config::GameConfig;
use crate::state::{ChampionId, GameState, Player, PlayerId, Position, ResourceKind, StateError};

/// Outcome class of a flee roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FleeRoll {
    Failed,
    Partial,
    Full,
}

impl FleeRoll {
    pub const fn from_roll(roll: u8) -> Self {
        match roll {
            0 | 1 => Self::Failed,
            2 => Self::Partial,
            _ => Self::Full,
        }
    }

    pub const fn escaped(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// What a successful escape cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum FleePenalty {
    None,
    Resource { kind: ResourceKind },
    /// `lost` is zero when the player had no fame left either.
    Fame { lost: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeReport {
    pub outcome: FleeRoll,
    /// Die shown; `None` for the dragon, which needs no roll.
    pub roll: Option<u8>,
    /// Where the champion ended up; `None` when it did not move.
    pub destination: Option<Position>,
    pub penalty: FleePenalty,
}

/// Nearest tile claimed by `player` with no champion on it, measured from
/// `from`. Ties break in board order. `from` itself is never returned.
pub fn nearest_unoccupied_claim(
    state: &GameState,
    player: PlayerId,
    from: Position,
) -> Option<Position> {
    state
        .claimed_tiles(player)
        .filter(|tile| tile.position != from && !state.is_occupied(tile.position))
        .min_by_key(|tile| (state.distance(from, tile.position), tile.position))
        .map(|tile| tile.position)
}

/// Forfeit one unit of the first held resource in
/// [`ResourceKind::LOSS_PRIORITY`], or one fame when no resources remain.
pub fn forfeit_one_unit(player: &mut Player) -> FleePenalty {
    match player.resources.first_held() {
        Some(kind) => {
            player.resources.take(kind, 1);
            FleePenalty::Resource { kind }
        }
        None => FleePenalty::Fame {
            lost: player.lose_fame(1),
        },
    }
}

/// Apply a rolled flee outcome to `champion`.
pub fn apply_flee(
    state: &mut GameState,
    player: PlayerId,
    champion: ChampionId,
    roll: u8,
) -> Result<FleeReport, StateError> {
    let outcome = FleeRoll::from_roll(roll);
    let from = state.require_champion(player, champion)?.position;

    let report = match outcome {
        FleeRoll::Failed => FleeReport {
            outcome,
            roll: Some(roll),
            destination: None,
            penalty: FleePenalty::None,
        },
        FleeRoll::Partial => {
            let home = state.require_player(player)?.home;
            let destination = nearest_unoccupied_claim(state, player, from).unwrap_or(home);
            state.place_champion(player, champion, destination)?;
            let penalty = forfeit_one_unit(state.require_player_mut(player)?);
            FleeReport {
                outcome,
                roll: Some(roll),
                destination: Some(destination),
                penalty,
            }
        }
        FleeRoll::Full => {
            let home = state.require_player(player)?.home;
            state.place_champion(player, champion, home)?;
            FleeReport {
                outcome,
                roll: Some(roll),
                destination: Some(home),
                penalty: FleePenalty::None,
            }
        }
    };

    debug!(
        target: "doomspire::flee",
        %player,
        %champion,
        roll,
        outcome = ?report.outcome,
        "flee applied"
    );
    Ok(report)
}

/// Fleeing from the dragon: always home, always the fixed fame penalty.
pub fn apply_dragon_flee(
    state: &mut GameState,
    player: PlayerId,
    champion: ChampionId,
    config: &GameConfig,
) -> Result<FleeReport, StateError> {
    let home = state.require_player(player)?.home;
    state.place_champion(player, champion, home)?;
    let lost = state
        .require_player_mut(player)?
        .lose_fame(config.dragon_flee_fame_penalty);

    Ok(FleeReport {
        outcome: FleeRoll::Full,
        roll: None,
        destination: Some(home),
        penalty: FleePenalty::Fame { lost },
    })
}
