//! Win conditions.
//!
//! Three of the four conditions are checked at the doomspire: a champion
//! standing there wins for its owner once fame, gold or starred claims reach
//! their threshold. Slaying the dragon wins immediately and is recorded by
//! the encounter that slew it.

use core::fmt;

use crate::config::GameConfig;
use crate::state::{GameState, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VictoryCondition {
    Fame,
    Gold,
    StarredTiles,
    DragonSlain,
}

impl VictoryCondition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fame => "fame",
            Self::Gold => "gold",
            Self::StarredTiles => "starred tiles",
            Self::DragonSlain => "dragon slain",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Victory {
    pub player: PlayerId,
    pub condition: VictoryCondition,
}

impl Victory {
    pub const fn new(player: PlayerId, condition: VictoryCondition) -> Self {
        Self { player, condition }
    }
}

impl fmt::Display for Victory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wins by {}", self.player, self.condition.as_str())
    }
}

/// Evaluate the doomspire conditions in turn order.
///
/// An already recorded winner is returned unchanged.
pub fn check_victory(state: &GameState, config: &GameConfig) -> Option<Victory> {
    if let Some(winner) = state.winner {
        return Some(winner);
    }

    state
        .players
        .iter()
        .filter(|player| {
            player
                .champions
                .iter()
                .any(|champion| champion.position == state.doomspire)
        })
        .find_map(|player| {
            let condition = if player.fame >= config.fame_to_win {
                VictoryCondition::Fame
            } else if player.resources.gold >= config.gold_to_win {
                VictoryCondition::Gold
            } else if state.starred_claims(player.id) >= config.starred_tiles_to_win {
                VictoryCondition::StarredTiles
            } else {
                return None;
            };
            Some(Victory::new(player.id, condition))
        })
}
