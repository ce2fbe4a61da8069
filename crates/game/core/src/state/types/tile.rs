//! Board tiles and the monsters that guard them.

use super::{Item, PlayerId, Position, Resources};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TileKind {
    Home,
    Resource,
    Adventure,
    Oasis,
    Trader,
    Temple,
    Mercenary,
    /// The designated final tile; the dragon lives here.
    Doomspire,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub name: String,
    pub might: u32,
    pub fame: u32,
    pub resources: Resources,
    /// Relevant to champion abilities that target beasts.
    pub is_beast: bool,
}

impl Monster {
    pub fn new(name: impl Into<String>, might: u32) -> Self {
        Self {
            name: name.into(),
            might,
            fame: 0,
            resources: Resources::ZERO,
            is_beast: false,
        }
    }

    pub fn with_reward(mut self, fame: u32, resources: Resources) -> Self {
        self.fame = fame;
        self.resources = resources;
        self
    }

    pub fn beast(mut self) -> Self {
        self.is_beast = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub kind: TileKind,
    /// Yield collected by the claiming player (or a blockading rival).
    pub production: Resources,
    pub monster: Option<Monster>,
    pub claimed_by: Option<PlayerId>,
    pub is_starred: bool,
    pub adventure_tokens: u32,
    pub items: Vec<Item>,
}

impl Tile {
    pub fn new(position: Position, kind: TileKind) -> Self {
        Self {
            position,
            kind,
            production: Resources::ZERO,
            monster: None,
            claimed_by: None,
            is_starred: false,
            adventure_tokens: 0,
            items: Vec::new(),
        }
    }

    pub fn with_production(mut self, production: Resources) -> Self {
        self.production = production;
        self
    }

    pub fn with_monster(mut self, monster: Monster) -> Self {
        self.monster = Some(monster);
        self
    }

    pub fn claimed(mut self, player: PlayerId) -> Self {
        self.claimed_by = Some(player);
        self
    }

    pub fn starred(mut self) -> Self {
        self.is_starred = true;
        self
    }

    /// Home tiles and the doomspire can never carry a claim.
    pub fn is_claimable(&self) -> bool {
        !matches!(self.kind, TileKind::Home | TileKind::Doomspire)
    }

    pub fn is_claimed_by(&self, player: PlayerId) -> bool {
        self.claimed_by == Some(player)
    }
}
