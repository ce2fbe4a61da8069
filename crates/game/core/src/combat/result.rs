//! Combat result types.

/// Which side of a duel an outcome refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// The side that initiated the fight.
    Attacker,
    Defender,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// One exchange of rolls in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelRound {
    pub attacker_roll: u8,
    pub defender_roll: u8,
    pub attacker_total: u32,
    pub defender_total: u32,
}

impl DuelRound {
    pub const fn is_tie(&self) -> bool {
        self.attacker_total == self.defender_total
    }
}

/// Result of a champion vs champion fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelResult {
    /// Every round rolled, ties included; never empty.
    pub rounds: Vec<DuelRound>,
    pub winner: Side,
    /// Set when the reroll cap was reached; the defender holds the field.
    pub capped: bool,
}

impl DuelResult {
    /// The deciding round.
    pub fn decisive_round(&self) -> Option<&DuelRound> {
        self.rounds.last()
    }

    /// Number of rounds rolled (always at least one).
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn attacker_won(&self) -> bool {
        self.winner == Side::Attacker
    }
}

/// Result of a threshold fight (monster or dragon).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdResult {
    pub roll: u8,
    pub champion_might: u32,
    pub champion_total: u32,
    /// Might the champion had to reach.
    pub target: u32,
    pub champion_won: bool,
}
