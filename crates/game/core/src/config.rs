/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Fame needed on the doomspire tile to win.
    pub fame_to_win: u32,
    /// Gold needed on the doomspire tile to win.
    pub gold_to_win: u32,
    /// Claimed starred tiles needed on the doomspire tile to win.
    pub starred_tiles_to_win: usize,
    /// Fixed part of the dragon's might; one die roll is added per encounter.
    pub dragon_base_might: u32,
    /// Fame lost when fleeing from the dragon.
    pub dragon_flee_fame_penalty: u32,
    /// Step distance from home (inclusive) within which a padded helmet lets
    /// a defeated champion respawn on a claimed tile.
    pub helmet_respawn_band: (u32, u32),
    /// Might of the serpents that attack boats.
    pub serpent_might: u32,
    /// Might of the bandit met in an ambush.
    pub bandit_might: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const BOARD_SIZE: u8 = 8;
    pub const MAX_PLAYERS: usize = 4;
    pub const MAX_CHAMPIONS: usize = 3;
    pub const MAX_BOATS: usize = 2;
    pub const MAX_ITEMS: usize = 2;
    /// Upper bound on tie rerolls in a champion duel.
    pub const MAX_DUEL_ROUNDS: u32 = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FAME_TO_WIN: u32 = 15;
    pub const DEFAULT_GOLD_TO_WIN: u32 = 20;
    pub const DEFAULT_STARRED_TILES_TO_WIN: usize = 4;
    pub const DEFAULT_DRAGON_BASE_MIGHT: u32 = 7;
    pub const DEFAULT_DRAGON_FLEE_FAME_PENALTY: u32 = 1;
    pub const DEFAULT_HELMET_RESPAWN_BAND: (u32, u32) = (1, 3);
    pub const DEFAULT_SERPENT_MIGHT: u32 = 4;
    pub const DEFAULT_BANDIT_MIGHT: u32 = 4;

    pub fn new() -> Self {
        Self {
            fame_to_win: Self::DEFAULT_FAME_TO_WIN,
            gold_to_win: Self::DEFAULT_GOLD_TO_WIN,
            starred_tiles_to_win: Self::DEFAULT_STARRED_TILES_TO_WIN,
            dragon_base_might: Self::DEFAULT_DRAGON_BASE_MIGHT,
            dragon_flee_fame_penalty: Self::DEFAULT_DRAGON_FLEE_FAME_PENALTY,
            helmet_respawn_band: Self::DEFAULT_HELMET_RESPAWN_BAND,
            serpent_might: Self::DEFAULT_SERPENT_MIGHT,
            bandit_might: Self::DEFAULT_BANDIT_MIGHT,
        }
    }

    pub fn with_victory_thresholds(fame: u32, gold: u32, starred_tiles: usize) -> Self {
        Self {
            fame_to_win: fame,
            gold_to_win: gold,
            starred_tiles_to_win: starred_tiles,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
