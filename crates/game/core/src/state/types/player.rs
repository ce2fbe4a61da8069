//! Players and the units they own.

use arrayvec::ArrayVec;
use std::collections::BTreeSet;

use super::{BoatId, ChampionId, Item, OceanZone, PlayerId, Position, Resources};
use crate::config::GameConfig;

/// Buildings a player can construct at home. Each is held at most once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Building {
    Chapel,
    /// Upgrade of [`Building::Chapel`]; the two are never held together.
    Monastery,
    Blacksmith,
    Market,
    Fletcher,
}

impl Building {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chapel => "chapel",
            Self::Monastery => "monastery",
            Self::Blacksmith => "blacksmith",
            Self::Market => "market",
            Self::Fletcher => "fletcher",
        }
    }
}

/// Followers accompany a champion and are never stolen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Follower {
    Porter,
    Mercenary,
    Priest,
}

/// Item slots of a single champion.
pub type ItemSlots = ArrayVec<Item, { GameConfig::MAX_ITEMS }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Champion {
    pub id: ChampionId,
    pub position: Position,
    pub items: ItemSlots,
    pub followers: Vec<Follower>,
}

impl Champion {
    pub fn new(id: ChampionId, position: Position) -> Self {
        Self {
            id,
            position,
            items: ArrayVec::new(),
            followers: Vec::new(),
        }
    }

    pub fn has_free_slot(&self) -> bool {
        !self.items.is_full()
    }

    pub fn holds(&self, predicate: impl Fn(&Item) -> bool) -> bool {
        self.items.iter().any(predicate)
    }

    /// Sum of the might bonuses of carried items.
    pub fn item_might(&self) -> u32 {
        self.items.iter().map(|item| item.might_bonus).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boat {
    pub id: BoatId,
    pub zone: OceanZone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub fame: u32,
    pub might: u32,
    pub resources: Resources,
    pub buildings: BTreeSet<Building>,
    pub champions: ArrayVec<Champion, { GameConfig::MAX_CHAMPIONS }>,
    pub boats: ArrayVec<Boat, { GameConfig::MAX_BOATS }>,
    /// Fixed for the whole game; never claimable or raidable.
    pub home: Position,
}

impl Player {
    /// Creates a player with one champion and one boat, as seated at game start.
    pub fn new(id: PlayerId, name: impl Into<String>, home: Position) -> Self {
        let mut champions = ArrayVec::new();
        champions.push(Champion::new(ChampionId(1), home));
        let mut boats = ArrayVec::new();
        boats.push(Boat {
            id: BoatId(1),
            zone: OceanZone::nearest_to(home, GameConfig::BOARD_SIZE),
        });
        Self {
            id,
            name: name.into(),
            fame: 0,
            might: 0,
            resources: Resources::ZERO,
            buildings: BTreeSet::new(),
            champions,
            boats,
            home,
        }
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_fame(mut self, fame: u32) -> Self {
        self.fame = fame;
        self
    }

    pub fn with_might(mut self, might: u32) -> Self {
        self.might = might;
        self
    }

    pub fn champion(&self, id: ChampionId) -> Option<&Champion> {
        self.champions.iter().find(|c| c.id == id)
    }

    pub fn champion_mut(&mut self, id: ChampionId) -> Option<&mut Champion> {
        self.champions.iter_mut().find(|c| c.id == id)
    }

    pub fn boat_mut(&mut self, id: BoatId) -> Option<&mut Boat> {
        self.boats.iter_mut().find(|b| b.id == id)
    }

    /// Player might plus the item bonuses of the given champion.
    pub fn champion_might(&self, id: ChampionId) -> Option<u32> {
        self.champion(id).map(|c| self.might + c.item_might())
    }

    pub fn has_building(&self, building: Building) -> bool {
        self.buildings.contains(&building)
    }

    /// Fame loss, clamped at zero. Returns the amount actually lost.
    pub fn lose_fame(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.fame);
        self.fame -= lost;
        lost
    }

    pub(crate) fn next_champion_id(&self) -> ChampionId {
        ChampionId(self.champions.iter().map(|c| c.id.0).max().unwrap_or(0) + 1)
    }

    pub(crate) fn next_boat_id(&self) -> BoatId {
        BoatId(self.boats.iter().map(|b| b.id.0).max().unwrap_or(0) + 1)
    }
}
