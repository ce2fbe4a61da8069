//! Champion vs champion duels.

use tracing::trace;

use super::result::{DuelResult, DuelRound, Side};
use crate::config::GameConfig;
use crate::dice::Dice;

/// Resolve a duel between two champions.
///
/// # Formula
///
/// ```text
/// attacker_total = attacker_might + roll
/// defender_total = defender_might + roll
/// repeat while attacker_total == defender_total
/// ```
///
/// Ties are rerolled until the totals differ. The loop is bounded by
/// [`GameConfig::MAX_DUEL_ROUNDS`] so a degenerate dice source (for example a
/// script of identical rolls with equal might) cannot spin forever; reaching
/// the cap leaves the defender in place and marks the result `capped`.
pub fn fight_champions(
    attacker_might: u32,
    defender_might: u32,
    dice: &mut dyn Dice,
) -> DuelResult {
    let mut rounds = Vec::new();

    for _ in 0..GameConfig::MAX_DUEL_ROUNDS {
        let attacker_roll = dice.roll();
        let defender_roll = dice.roll();
        let round = DuelRound {
            attacker_roll,
            defender_roll,
            attacker_total: attacker_might + u32::from(attacker_roll),
            defender_total: defender_might + u32::from(defender_roll),
        };
        rounds.push(round);

        if round.is_tie() {
            trace!(
                target: "doomspire::combat",
                total = round.attacker_total,
                "duel tied, rerolling"
            );
            continue;
        }

        let winner = if round.attacker_total > round.defender_total {
            Side::Attacker
        } else {
            Side::Defender
        };
        return DuelResult {
            rounds,
            winner,
            capped: false,
        };
    }

    DuelResult {
        rounds,
        winner: Side::Defender,
        capped: true,
    }
}
