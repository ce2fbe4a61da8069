//! Player resource stockpile.
//!
//! All four counters are unsigned. Every decrement goes through
//! [`Resources::take`] or [`Resources::try_pay`], which clamp or refuse rather
//! than underflow.

use core::fmt;

/// The four tradeable resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceKind {
    Food,
    Wood,
    Ore,
    Gold,
}

impl ResourceKind {
    /// Order in which a single unit is forfeited when a penalty does not let
    /// the player choose.
    pub const LOSS_PRIORITY: [ResourceKind; 4] = [Self::Food, Self::Wood, Self::Ore, Self::Gold];

    pub const ALL: [ResourceKind; 4] = Self::LOSS_PRIORITY;

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Wood => "wood",
            Self::Ore => "ore",
            Self::Gold => "gold",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource amounts held by a player, required by a cost, or yielded by a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub food: u32,
    pub wood: u32,
    pub ore: u32,
    pub gold: u32,
}

impl Resources {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(food: u32, wood: u32, ore: u32, gold: u32) -> Self {
        Self {
            food,
            wood,
            ore,
            gold,
        }
    }

    /// A stockpile holding `amount` of a single resource.
    pub fn single(kind: ResourceKind, amount: u32) -> Self {
        let mut resources = Self::ZERO;
        *resources.get_mut(kind) = amount;
        resources
    }

    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Wood => self.wood,
            ResourceKind::Ore => self.ore,
            ResourceKind::Gold => self.gold,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Ore => &mut self.ore,
            ResourceKind::Gold => &mut self.gold,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.get_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn take(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let slot = self.get_mut(kind);
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }

    pub fn add_all(&mut self, other: &Resources) {
        for kind in ResourceKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    /// True when every counter is at least the matching counter of `cost`.
    pub fn covers(&self, cost: &Resources) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|&kind| self.get(kind) >= cost.get(kind))
    }

    /// Deducts `cost` in full, or leaves `self` untouched and returns false.
    pub fn try_pay(&mut self, cost: &Resources) -> bool {
        if !self.covers(cost) {
            return false;
        }
        for kind in ResourceKind::ALL {
            *self.get_mut(kind) -= cost.get(kind);
        }
        true
    }

    pub fn total(&self) -> u32 {
        self.food + self.wood + self.ore + self.gold
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Kinds with a non-zero amount, in loss-priority order.
    pub fn held_kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        ResourceKind::LOSS_PRIORITY
            .into_iter()
            .filter(|&kind| self.get(kind) > 0)
    }

    /// First held kind in [`ResourceKind::LOSS_PRIORITY`].
    pub fn first_held(&self) -> Option<ResourceKind> {
        self.held_kinds().next()
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} food, {} wood, {} ore, {} gold",
            self.food, self.wood, self.ore, self.gold
        )
    }
}
