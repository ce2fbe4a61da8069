//! Authoritative game state representation.
//!
//! This module owns the data structures that describe players, their units,
//! and the board. Resolvers receive the state explicitly as `&mut GameState`;
//! there is no ambient or global game state.
mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    Boat, BoatId, Building, Champion, ChampionId, Follower, Item, ItemKind, ItemSlots, Monster,
    OceanZone, Player, PlayerId, Position, ResourceKind, Resources, Tile, TileKind, TraderItem,
    TreasureCard,
};

use crate::config::GameConfig;
use crate::victory::Victory;

/// Canonical snapshot of a game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seated players in turn order.
    pub players: Vec<Player>,
    /// Board tiles, at most one per position.
    pub tiles: Vec<Tile>,
    /// Position of the designated final tile.
    pub doomspire: Position,
    /// Set once a player has won; never cleared.
    pub winner: Option<Victory>,
}

impl GameState {
    pub fn new(players: Vec<Player>, tiles: Vec<Tile>, doomspire: Position) -> Self {
        Self {
            players,
            tiles,
            doomspire,
            winner: None,
        }
    }

    /// A standard 8×8 board: four corner homes, an empty doomspire in the
    /// middle and plain resource tiles everywhere else.
    ///
    /// Intended for fixtures and demos; real boards come from the board
    /// generator, which is not part of this crate.
    pub fn standard(players: Vec<Player>) -> Self {
        let size = GameConfig::BOARD_SIZE;
        let doomspire = Position::new(size / 2, size / 2);
        let homes: Vec<Position> = players.iter().map(|p| p.home).collect();

        let mut tiles = Vec::with_capacity(usize::from(size) * usize::from(size));
        for row in 1..=size {
            for col in 1..=size {
                let position = Position::new(row, col);
                let kind = if homes.contains(&position) {
                    TileKind::Home
                } else if position == doomspire {
                    TileKind::Doomspire
                } else {
                    TileKind::Resource
                };
                tiles.push(Tile::new(position, kind));
            }
        }

        Self::new(players, tiles, doomspire)
    }

    /// Home positions for the four seats, one per board corner.
    pub const fn corner_homes() -> [Position; 4] {
        let size = GameConfig::BOARD_SIZE;
        [
            Position::new(1, 1),
            Position::new(1, size),
            Position::new(size, size),
            Position::new(size, 1),
        ]
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn require_player(&self, id: PlayerId) -> Result<&Player, StateError> {
        self.player(id).ok_or(StateError::PlayerNotFound(id))
    }

    pub fn require_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, StateError> {
        self.player_mut(id).ok_or(StateError::PlayerNotFound(id))
    }

    pub fn require_champion(
        &self,
        player: PlayerId,
        champion: ChampionId,
    ) -> Result<&Champion, StateError> {
        self.require_player(player)?
            .champion(champion)
            .ok_or(StateError::ChampionNotFound { player, champion })
    }

    pub fn require_champion_mut(
        &mut self,
        player: PlayerId,
        champion: ChampionId,
    ) -> Result<&mut Champion, StateError> {
        self.require_player_mut(player)?
            .champion_mut(champion)
            .ok_or(StateError::ChampionNotFound { player, champion })
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position == position)
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.position == position)
    }

    pub fn require_tile_mut(&mut self, position: Position) -> Result<&mut Tile, StateError> {
        self.tile_mut(position)
            .ok_or(StateError::TileNotFound(position))
    }

    /// Tiles currently claimed by `player`, in board order.
    pub fn claimed_tiles(&self, player: PlayerId) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(move |t| t.is_claimed_by(player))
    }

    pub fn starred_claims(&self, player: PlayerId) -> usize {
        self.claimed_tiles(player).filter(|t| t.is_starred).count()
    }

    /// Champions (of any player) standing on `position`.
    pub fn champions_at(&self, position: Position) -> Vec<(PlayerId, ChampionId)> {
        self.players
            .iter()
            .flat_map(|p| {
                p.champions
                    .iter()
                    .filter(move |c| c.position == position)
                    .map(move |c| (p.id, c.id))
            })
            .collect()
    }

    /// A tile is occupied while any champion stands on it.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.players
            .iter()
            .flat_map(|p| p.champions.iter())
            .any(|c| c.position == position)
    }

    /// Step distance between two tiles on the square grid.
    pub fn distance(&self, from: Position, to: Position) -> u32 {
        u32::from(from.row.abs_diff(to.row)) + u32::from(from.col.abs_diff(to.col))
    }

    /// Moves a champion without any rule checks.
    pub fn place_champion(
        &mut self,
        player: PlayerId,
        champion: ChampionId,
        position: Position,
    ) -> Result<(), StateError> {
        self.require_champion_mut(player, champion)?.position = position;
        Ok(())
    }
}
