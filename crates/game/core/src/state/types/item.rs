//! Items carried by champions or dropped on tiles.

use core::fmt;

/// Cards drawn from the treasure deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TreasureCard {
    RustyDagger,
    EnchantedSword,
    DragonScaleShield,
    /// Cannot be dropped; forces a resource donation when its bearer is defeated.
    CursedAmulet,
    /// Lets a defeated bearer respawn on a claimed tile near home.
    PaddedHelmet,
    GoldenIdol,
}

/// Goods sold by traders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TraderItem {
    Spear,
    /// Keeps the bearer's items out of a victor's reach.
    Backpack,
    Lantern,
}

impl TraderItem {
    pub const ALL: [TraderItem; 3] = [Self::Spear, Self::Backpack, Self::Lantern];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "deck", content = "card", rename_all = "lowercase"))]
pub enum ItemKind {
    Treasure(TreasureCard),
    Trader(TraderItem),
}

impl ItemKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Treasure(TreasureCard::RustyDagger) => "Rusty Dagger",
            Self::Treasure(TreasureCard::EnchantedSword) => "Enchanted Sword",
            Self::Treasure(TreasureCard::DragonScaleShield) => "Dragon Scale Shield",
            Self::Treasure(TreasureCard::CursedAmulet) => "Cursed Amulet",
            Self::Treasure(TreasureCard::PaddedHelmet) => "Padded Helmet",
            Self::Treasure(TreasureCard::GoldenIdol) => "Golden Idol",
            Self::Trader(TraderItem::Spear) => "Spear",
            Self::Trader(TraderItem::Backpack) => "Backpack",
            Self::Trader(TraderItem::Lantern) => "Lantern",
        }
    }

    const fn might_bonus(self) -> u32 {
        match self {
            Self::Treasure(TreasureCard::RustyDagger) => 1,
            Self::Treasure(TreasureCard::EnchantedSword) => 2,
            Self::Treasure(TreasureCard::DragonScaleShield) => 1,
            Self::Trader(TraderItem::Spear) => 1,
            _ => 0,
        }
    }

    const fn is_stuck(self) -> bool {
        matches!(self, Self::Treasure(TreasureCard::CursedAmulet))
    }

    const fn is_unstealable(self) -> bool {
        matches!(
            self,
            Self::Treasure(TreasureCard::DragonScaleShield) | Self::Trader(TraderItem::Backpack)
        )
    }
}

/// A concrete item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    /// Added to the bearer's might in every fight.
    pub might_bonus: u32,
    /// Cannot be dropped or looted.
    pub stuck: bool,
    /// Cannot be taken in combat, but may be dropped voluntarily.
    pub unstealable: bool,
}

impl Item {
    /// Creates an item with the catalogue values for its kind.
    pub const fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            might_bonus: kind.might_bonus(),
            stuck: kind.is_stuck(),
            unstealable: kind.is_unstealable(),
        }
    }

    pub const fn treasure(card: TreasureCard) -> Self {
        Self::new(ItemKind::Treasure(card))
    }

    pub const fn trader(item: TraderItem) -> Self {
        Self::new(ItemKind::Trader(item))
    }

    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether a victor may take this item as loot.
    pub const fn is_lootable(&self) -> bool {
        !self.stuck && !self.unstealable
    }

    /// Whether the bearer may put this item down.
    pub const fn is_droppable(&self) -> bool {
        !self.stuck
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
