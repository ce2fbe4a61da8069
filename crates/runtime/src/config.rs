//! Runtime configuration.

use std::env;

use doomspire_core::GameConfig;

/// Settings shared by every resolver in a session.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Seed for the session dice; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Buffer of the human agent's prompt channel.
    pub prompt_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: None,
            prompt_buffer: 8,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DOOMSPIRE_FAME_TO_WIN` - Fame threshold (default: 15)
    /// - `DOOMSPIRE_GOLD_TO_WIN` - Gold threshold (default: 20)
    /// - `DOOMSPIRE_STARRED_TO_WIN` - Starred claims threshold (default: 4)
    /// - `DOOMSPIRE_DRAGON_BASE` - Dragon base might (default: 7)
    /// - `DOOMSPIRE_SEED` - Dice seed (default: clock)
    /// - `DOOMSPIRE_PROMPT_BUFFER` - Human prompt queue size (default: 8)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(fame) = read_env::<u32>("DOOMSPIRE_FAME_TO_WIN") {
            config.game.fame_to_win = fame.max(1);
        }
        if let Some(gold) = read_env::<u32>("DOOMSPIRE_GOLD_TO_WIN") {
            config.game.gold_to_win = gold.max(1);
        }
        if let Some(starred) = read_env::<usize>("DOOMSPIRE_STARRED_TO_WIN") {
            config.game.starred_tiles_to_win = starred.max(1);
        }
        if let Some(base) = read_env::<u32>("DOOMSPIRE_DRAGON_BASE") {
            config.game.dragon_base_might = base;
        }
        config.seed = read_env::<u64>("DOOMSPIRE_SEED");
        if let Some(buffer) = read_env::<usize>("DOOMSPIRE_PROMPT_BUFFER") {
            config.prompt_buffer = buffer.max(1);
        }

        config
    }

    /// Configured seed, or one derived from the clock.
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_is_kept() {
        let config = RuntimeConfig {
            seed: Some(99),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.seed_or_clock(), 99);
        assert_eq!(config.game.fame_to_win, GameConfig::DEFAULT_FAME_TO_WIN);
    }
}
