//! Threshold fights: champion vs monster and champion vs dragon.

use super::result::ThresholdResult;
use crate::dice::Dice;

fn resolve_threshold(champion_might: u32, target: u32, roll: u8) -> ThresholdResult {
    let champion_total = champion_might + u32::from(roll);
    ThresholdResult {
        roll,
        champion_might,
        champion_total,
        target,
        champion_won: champion_total >= target,
    }
}

/// Resolve a champion vs monster fight.
///
/// The champion rolls once and wins iff `might + roll >= monster_might`.
/// There is no reroll.
pub fn fight_monster(
    champion_might: u32,
    monster_might: u32,
    dice: &mut dyn Dice,
) -> ThresholdResult {
    resolve_threshold(champion_might, monster_might, dice.roll())
}

/// A single encounter with the dragon.
///
/// The dragon's might is `base + roll`, drawn once in [`DragonEncounter::begin`]
/// and reused for every check made during the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragonEncounter {
    base: u32,
    roll: u8,
}

impl DragonEncounter {
    pub fn begin(base_might: u32, dice: &mut dyn Dice) -> Self {
        Self {
            base: base_might,
            roll: dice.roll(),
        }
    }

    pub const fn might(&self) -> u32 {
        self.base + self.roll as u32
    }

    pub const fn dragon_roll(&self) -> u8 {
        self.roll
    }

    /// Champion rolls once against the fixed dragon might.
    pub fn fight(&self, champion_might: u32, dice: &mut dyn Dice) -> ThresholdResult {
        resolve_threshold(champion_might, self.might(), dice.roll())
    }
}
