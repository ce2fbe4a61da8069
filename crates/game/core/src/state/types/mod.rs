pub mod common;
pub mod item;
pub mod player;
pub mod resources;
pub mod tile;

pub use common::{BoatId, ChampionId, OceanZone, PlayerId, Position};
pub use item::{Item, ItemKind, TraderItem, TreasureCard};
pub use player::{Boat, Building, Champion, Follower, ItemSlots, Player};
pub use resources::{ResourceKind, Resources};
pub use tile::{Monster, Tile, TileKind};
