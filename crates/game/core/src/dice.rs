//! Dice sources for combat and flee resolution.
//!
//! Every random outcome in the rules is a single die showing 1, 2 or 3.
//! Resolvers take the source as `&mut dyn Dice` so tests can substitute a
//! fixed sequence instead of mocking randomness.

use std::collections::VecDeque;

/// Number of faces on the game die.
pub const DIE_FACES: u8 = 3;

/// Source of uniformly distributed die rolls in `1..=3`.
pub trait Dice: Send {
    /// Roll the die once.
    fn roll(&mut self) -> u8;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Same seed always produces
/// the same roll sequence. Only the rolls repeat: random picks made for
/// absent agents are not drawn from here.
#[derive(Clone, Copy, Debug)]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut dice = Self { state: 0 };
        dice.step();
        dice.state = dice.state.wrapping_add(seed);
        dice.step();
        dice
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation of the current state.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

impl Dice for PcgDice {
    fn roll(&mut self) -> u8 {
        // Rejection sampling keeps the three faces exactly uniform.
        let zone = u32::MAX - (u32::MAX % u32::from(DIE_FACES));
        loop {
            let value = self.next_u32();
            if value < zone {
                return (value % u32::from(DIE_FACES)) as u8 + 1;
            }
        }
    }
}

/// Replays a fixed roll sequence, cycling when it runs out.
///
/// Rolls outside `1..=3` are clamped into range.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: Vec<u8>,
    upcoming: VecDeque<u8>,
    drawn: usize,
}

impl ScriptedDice {
    /// An empty script rolls 1 forever.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        let script: Vec<u8> = rolls
            .into_iter()
            .map(|r| r.clamp(1, DIE_FACES))
            .collect();
        Self {
            upcoming: script.iter().copied().collect(),
            script,
            drawn: 0,
        }
    }

    /// Total number of rolls drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        if self.upcoming.is_empty() {
            self.upcoming.extend(self.script.iter().copied());
        }
        self.drawn += 1;
        self.upcoming.pop_front().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_rolls_stay_in_range_and_cover_all_faces() {
        let mut dice = PcgDice::new(42);
        let mut seen = [0u32; 3];
        for _ in 0..3_000 {
            let roll = dice.roll();
            assert!((1..=DIE_FACES).contains(&roll));
            seen[usize::from(roll - 1)] += 1;
        }
        assert!(seen.iter().all(|&count| count > 800));
    }

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let a: Vec<u8> = {
            let mut d = PcgDice::new(7);
            (0..32).map(|_| d.roll()).collect()
        };
        let b: Vec<u8> = {
            let mut d = PcgDice::new(7);
            (0..32).map(|_| d.roll()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn scripted_dice_cycle_and_count() {
        let mut dice = ScriptedDice::new([2, 3]);
        let rolls: Vec<u8> = (0..5).map(|_| dice.roll()).collect();
        assert_eq!(rolls, vec![2, 3, 2, 3, 2]);
        assert_eq!(dice.drawn(), 5);
    }
}
