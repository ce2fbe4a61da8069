//! Combat resolution system.
//!
//! Pure functions over might values and die rolls. Nothing here touches game
//! state: callers apply rewards, respawns and loot from the returned results.
//!
//! # Core Functions
//!
//! - [`fight_champions`]: champion vs champion, rerolling ties
//! - [`fight_monster`]: champion vs monster, inclusive threshold
//! - [`DragonEncounter`]: champion vs dragon, dragon might drawn once

pub mod duel;
pub mod result;
pub mod threshold;

pub use duel::fight_champions;
pub use result::{DuelResult, DuelRound, Side, ThresholdResult};
pub use threshold::{DragonEncounter, fight_monster};
