//! Aftermath of a fight: monster rewards, loot, donation and respawn.
//!
//! The option generators in this module are the single source of truth for
//! both the default defeat path and the item interceptors that override it.
//! An interceptor narrows or re-targets these options; it never builds its
//! own list.

use tracing::debug;

use crate::state::{
    ChampionId, GameState, Item, Monster, PlayerId, Position, ResourceKind, Resources, StateError,
};

/// Remove the monster guarding `position` and pay its reward to `player`.
///
/// Returns the slain monster, or `None` when the tile was already empty, so a
/// repeated call never pays twice.
pub fn claim_monster_reward(
    state: &mut GameState,
    player: PlayerId,
    position: Position,
) -> Result<Option<Monster>, StateError> {
    state.require_player(player)?;
    let Some(monster) = state.require_tile_mut(position)?.monster.take() else {
        return Ok(None);
    };
    let victor = state.require_player_mut(player)?;
    victor.fame += monster.fame;
    victor.resources.add_all(&monster.resources);
    debug!(
        target: "doomspire::combat",
        %player,
        monster = %monster.name,
        fame = monster.fame,
        "monster slain"
    );
    Ok(Some(monster))
}

/// One thing a victorious champion may take from the loser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum LootOption {
    Resource { kind: ResourceKind },
    /// Item in the loser champion's slot `slot`.
    Item { slot: usize, item: Item },
}

impl LootOption {
    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Resource { .. })
    }

    /// Stable identifier used when the option is offered to an agent.
    pub fn id(&self) -> String {
        match self {
            Self::Resource { kind } => format!("resource:{kind}"),
            Self::Item { slot, .. } => format!("item:{slot}"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Resource { kind } => format!("Take 1 {kind}"),
            Self::Item { item, .. } => format!("Take the {item}"),
        }
    }
}

/// One resource option per kind the player holds, in loss-priority order.
pub fn resource_options(resources: &Resources) -> Vec<ResourceKind> {
    resources.held_kinds().collect()
}

/// Everything `victor` could take from a beaten champion.
///
/// Resources held by the losing player come first, then lootable items of
/// the losing champion (only while the victor's champion has a free slot).
pub fn loot_options(
    state: &GameState,
    loser: PlayerId,
    loser_champion: ChampionId,
    victor: PlayerId,
    victor_champion: ChampionId,
) -> Result<Vec<LootOption>, StateError> {
    let losing_player = state.require_player(loser)?;
    let losing_champion = state.require_champion(loser, loser_champion)?;
    let victor_has_room = state.require_champion(victor, victor_champion)?.has_free_slot();

    let mut options: Vec<LootOption> = resource_options(&losing_player.resources)
        .into_iter()
        .map(|kind| LootOption::Resource { kind })
        .collect();

    if victor_has_room {
        options.extend(
            losing_champion
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.is_lootable())
                .map(|(slot, item)| LootOption::Item { slot, item: *item }),
        );
    }

    Ok(options)
}

/// Move the chosen loot from loser to victor.
///
/// Returns false (and changes nothing) if the option no longer applies.
pub fn apply_loot(
    state: &mut GameState,
    option: LootOption,
    loser: PlayerId,
    loser_champion: ChampionId,
    victor: PlayerId,
    victor_champion: ChampionId,
) -> Result<bool, StateError> {
    match option {
        LootOption::Resource { kind } => {
            let taken = state.require_player_mut(loser)?.resources.take(kind, 1);
            state.require_player_mut(victor)?.resources.add(kind, taken);
            Ok(taken > 0)
        }
        LootOption::Item { slot, item } => {
            if !state.require_champion(victor, victor_champion)?.has_free_slot() {
                return Ok(false);
            }
            let slots = &mut state.require_champion_mut(loser, loser_champion)?.items;
            if slots.get(slot) != Some(&item) || !item.is_lootable() {
                return Ok(false);
            }
            slots.remove(slot);
            state
                .require_champion_mut(victor, victor_champion)?
                .items
                .push(item);
            debug!(target: "doomspire::combat", %loser, %victor, item = item.name(), "item looted");
            Ok(true)
        }
    }
}

/// Hand one unit of `kind` from `from` to `to`, or to the bank when `to` is
/// `None`. Returns the amount transferred (0 or 1).
pub fn donate(
    state: &mut GameState,
    from: PlayerId,
    to: Option<PlayerId>,
    kind: ResourceKind,
) -> Result<u32, StateError> {
    let given = state.require_player_mut(from)?.resources.take(kind, 1);
    if let Some(recipient) = to {
        state.require_player_mut(recipient)?.resources.add(kind, given);
    }
    Ok(given)
}

/// Tiles a defeated champion of `player` may respawn on.
///
/// Home always comes first. Own claimed, unoccupied tiles whose step
/// distance from home lies in `band` (inclusive) follow in board order. The
/// default respawn path uses the band `(0, 0)`, which leaves home alone.
pub fn respawn_options(
    state: &GameState,
    player: PlayerId,
    band: (u32, u32),
) -> Result<Vec<Position>, StateError> {
    let home = state.require_player(player)?.home;
    let (near, far) = band;

    let mut options = vec![home];
    options.extend(
        state
            .claimed_tiles(player)
            .map(|tile| tile.position)
            .filter(|&position| position != home)
            .filter(|&position| {
                let steps = state.distance(home, position);
                steps >= near && steps <= far
            })
            .filter(|&position| !state.is_occupied(position)),
    );
    Ok(options)
}

/// Default respawn band: home only.
pub const HOME_ONLY: (u32, u32) = (0, 0);

pub fn respawn(
    state: &mut GameState,
    player: PlayerId,
    champion: ChampionId,
    position: Position,
) -> Result<(), StateError> {
    state.place_champion(player, champion, position)
}
