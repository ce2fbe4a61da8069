//! Deterministic rules shared by the resolution runtime and its tools.
//!
//! `doomspire-core` owns the board state and every rule that can be resolved
//! without asking a player anything: dice, combat math, flee outcomes, defeat
//! aftermath, the build economy and the doomspire win conditions. Anything
//! that needs a player's judgment lives in `doomspire-runtime`, which calls
//! back into the functions re-exported here.
pub mod combat;
pub mod config;
pub mod defeat;
pub mod dice;
pub mod economy;
pub mod error;
pub mod flee;
pub mod state;
pub mod victory;

pub use combat::{
    DragonEncounter, DuelResult, DuelRound, Side, ThresholdResult, fight_champions, fight_monster,
};
pub use config::GameConfig;
pub use defeat::{
    HOME_ONLY, LootOption, apply_loot, claim_monster_reward, donate, loot_options, resource_options,
    respawn, respawn_options,
};
pub use dice::{DIE_FACES, Dice, PcgDice, ScriptedDice};
pub use economy::{
    BuildAction, BuildEffect, BuildError, BuildReceipt, HarvestReport, available_builds, harvest,
    resolve_build,
};
pub use error::{ErrorSeverity, GameError};
pub use flee::{
    FleePenalty, FleeReport, FleeRoll, apply_dragon_flee, apply_flee, forfeit_one_unit,
    nearest_unoccupied_claim,
};
pub use state::{
    Boat, BoatId, Building, Champion, ChampionId, Follower, GameState, Item, ItemKind, ItemSlots,
    Monster, OceanZone, Player, PlayerId, Position, ResourceKind, Resources, StateError, Tile,
    TileKind, TraderItem, TreasureCard,
};
pub use victory::{Victory, VictoryCondition, check_victory};
