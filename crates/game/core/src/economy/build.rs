//! Buildings, units and might purchases.

use tracing::debug;

use super::error::BuildError;
use crate::config::GameConfig;
use crate::state::{
    Boat, BoatId, Building, Champion, ChampionId, GameState, OceanZone, Player, PlayerId, Resources,
};

/// Everything a player can pay for at home.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BuildAction {
    Chapel,
    /// Replaces an existing chapel.
    Monastery,
    Blacksmith,
    Market,
    Fletcher,
    RecruitChampion,
    BuildBoat,
    /// One point of might; needs a blacksmith.
    BuyMight,
}

impl BuildAction {
    pub const ALL: [BuildAction; 8] = [
        Self::Chapel,
        Self::Monastery,
        Self::Blacksmith,
        Self::Market,
        Self::Fletcher,
        Self::RecruitChampion,
        Self::BuildBoat,
        Self::BuyMight,
    ];

    /// Cost as `(food, wood, ore, gold)`.
    pub const fn cost(self) -> Resources {
        match self {
            Self::Chapel => Resources::new(0, 6, 0, 2),
            Self::Monastery => Resources::new(0, 8, 3, 3),
            Self::Blacksmith => Resources::new(2, 0, 2, 0),
            Self::Market => Resources::new(2, 2, 0, 0),
            Self::Fletcher => Resources::new(0, 3, 1, 0),
            Self::RecruitChampion => Resources::new(3, 0, 1, 3),
            Self::BuildBoat => Resources::new(0, 2, 0, 2),
            Self::BuyMight => Resources::new(1, 0, 2, 0),
        }
    }

    /// One-time fame awarded on completion.
    pub const fn fame_award(self) -> u32 {
        match self {
            Self::Chapel => 3,
            Self::Monastery => 5,
            _ => 0,
        }
    }

    pub const fn building(self) -> Option<Building> {
        match self {
            Self::Chapel => Some(Building::Chapel),
            Self::Monastery => Some(Building::Monastery),
            Self::Blacksmith => Some(Building::Blacksmith),
            Self::Market => Some(Building::Market),
            Self::Fletcher => Some(Building::Fletcher),
            Self::RecruitChampion | Self::BuildBoat | Self::BuyMight => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chapel => "chapel",
            Self::Monastery => "monastery",
            Self::Blacksmith => "blacksmith",
            Self::Market => "market",
            Self::Fletcher => "fletcher",
            Self::RecruitChampion => "recruit-champion",
            Self::BuildBoat => "build-boat",
            Self::BuyMight => "buy-might",
        }
    }
}

impl core::fmt::Display for BuildAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State change produced by a successful build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum BuildEffect {
    Built { building: Building },
    Upgraded { from: Building, to: Building },
    ChampionRecruited { champion: ChampionId },
    BoatLaunched { boat: BoatId, zone: OceanZone },
    MightIncreased { might: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildReceipt {
    pub action: BuildAction,
    pub paid: Resources,
    pub fame_awarded: u32,
    pub effect: BuildEffect,
}

/// Prerequisite and cardinality checks, independent of cost.
fn check_constraints(player: &Player, action: BuildAction) -> Result<(), BuildError> {
    match action {
        BuildAction::Chapel => {
            if player.has_building(Building::Monastery) {
                return Err(BuildError::AlreadyBuilt(Building::Monastery));
            }
            if player.has_building(Building::Chapel) {
                return Err(BuildError::AlreadyBuilt(Building::Chapel));
            }
        }
        BuildAction::Monastery => {
            if player.has_building(Building::Monastery) {
                return Err(BuildError::AlreadyBuilt(Building::Monastery));
            }
            if !player.has_building(Building::Chapel) {
                return Err(BuildError::NoChapelToUpgrade);
            }
        }
        BuildAction::Blacksmith | BuildAction::Market | BuildAction::Fletcher => {
            if let Some(building) = action.building()
                && player.has_building(building)
            {
                return Err(BuildError::AlreadyBuilt(building));
            }
        }
        BuildAction::RecruitChampion => {
            if player.champions.len() >= GameConfig::MAX_CHAMPIONS {
                return Err(BuildError::ChampionLimitReached);
            }
        }
        BuildAction::BuildBoat => {
            if player.boats.len() >= GameConfig::MAX_BOATS {
                return Err(BuildError::BoatLimitReached);
            }
        }
        BuildAction::BuyMight => {
            if !player.has_building(Building::Blacksmith) {
                return Err(BuildError::BlacksmithRequired);
            }
        }
    }
    Ok(())
}

fn check(player: &Player, action: BuildAction) -> Result<(), BuildError> {
    check_constraints(player, action)?;
    if !player.resources.covers(&action.cost()) {
        return Err(BuildError::InsufficientResources);
    }
    Ok(())
}

fn construct(player: &mut Player, building: Building) -> BuildEffect {
    player.buildings.insert(building);
    BuildEffect::Built { building }
}

fn apply(player: &mut Player, action: BuildAction) -> BuildEffect {
    match action {
        BuildAction::Monastery => {
            player.buildings.remove(&Building::Chapel);
            player.buildings.insert(Building::Monastery);
            BuildEffect::Upgraded {
                from: Building::Chapel,
                to: Building::Monastery,
            }
        }
        BuildAction::Chapel => construct(player, Building::Chapel),
        BuildAction::Blacksmith => construct(player, Building::Blacksmith),
        BuildAction::Market => construct(player, Building::Market),
        BuildAction::Fletcher => construct(player, Building::Fletcher),
        BuildAction::RecruitChampion => {
            let champion = player.next_champion_id();
            player.champions.push(Champion::new(champion, player.home));
            BuildEffect::ChampionRecruited { champion }
        }
        BuildAction::BuildBoat => {
            let boat = player.next_boat_id();
            let zone = OceanZone::nearest_to(player.home, GameConfig::BOARD_SIZE);
            player.boats.push(Boat { id: boat, zone });
            BuildEffect::BoatLaunched { boat, zone }
        }
        BuildAction::BuyMight => {
            player.might += 1;
            BuildEffect::MightIncreased {
                might: player.might,
            }
        }
    }
}

/// Validate and perform a build for `player`.
///
/// Prerequisites and limits are checked before affordability, so an
/// impossible action reports the structural reason rather than its price.
pub fn resolve_build(
    state: &mut GameState,
    player: PlayerId,
    action: BuildAction,
) -> Result<BuildReceipt, BuildError> {
    let owner = state
        .player_mut(player)
        .ok_or(BuildError::PlayerNotFound(player))?;

    check(owner, action)?;

    let cost = action.cost();
    if !owner.resources.try_pay(&cost) {
        return Err(BuildError::InsufficientResources);
    }
    let effect = apply(owner, action);
    let fame_awarded = action.fame_award();
    owner.fame += fame_awarded;

    debug!(target: "doomspire::economy", %player, ?action, ?effect, "build completed");

    Ok(BuildReceipt {
        action,
        paid: cost,
        fame_awarded,
        effect,
    })
}

/// Build actions `player` could perform right now.
pub fn available_builds(state: &GameState, player: PlayerId) -> Vec<BuildAction> {
    let Some(owner) = state.player(player) else {
        return Vec::new();
    };
    BuildAction::ALL
        .into_iter()
        .filter(|&action| check(owner, action).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(resources: Resources) -> GameState {
        let homes = GameState::corner_homes();
        GameState::standard(vec![
            Player::new(PlayerId(1), "Red", homes[0]).with_resources(resources),
        ])
    }

    fn player(state: &GameState) -> &Player {
        state.player(PlayerId(1)).unwrap()
    }

    #[test]
    fn monastery_without_chapel_is_refused_untouched() {
        let rich = Resources::new(20, 20, 20, 20);
        let mut state = state_with(rich);
        let err = resolve_build(&mut state, PlayerId(1), BuildAction::Monastery).unwrap_err();
        assert_eq!(err.to_string(), "no chapel to upgrade");
        assert_eq!(player(&state).resources, rich);
    }

    #[test]
    fn unaffordable_build_leaves_resources_unchanged() {
        let poor = Resources::new(0, 5, 0, 2);
        let mut state = state_with(poor);
        let err = resolve_build(&mut state, PlayerId(1), BuildAction::Chapel).unwrap_err();
        assert_eq!(err, BuildError::InsufficientResources);
        assert_eq!(player(&state).resources, poor);
        assert!(player(&state).buildings.is_empty());
        assert_eq!(player(&state).fame, 0);
    }

    #[test]
    fn chapel_then_monastery_replaces_and_awards_fame_once_each() {
        let mut state = state_with(Resources::new(0, 14, 3, 5));
        resolve_build(&mut state, PlayerId(1), BuildAction::Chapel).unwrap();
        assert!(player(&state).has_building(Building::Chapel));
        assert_eq!(player(&state).fame, 3);

        let receipt = resolve_build(&mut state, PlayerId(1), BuildAction::Monastery).unwrap();
        assert_eq!(
            receipt.effect,
            BuildEffect::Upgraded {
                from: Building::Chapel,
                to: Building::Monastery
            }
        );
        let owner = player(&state);
        assert!(owner.has_building(Building::Monastery));
        assert!(!owner.has_building(Building::Chapel));
        assert_eq!(owner.fame, 8);
        assert_eq!(owner.resources, Resources::ZERO);

        let err = resolve_build(&mut state, PlayerId(1), BuildAction::Chapel).unwrap_err();
        assert_eq!(err, BuildError::AlreadyBuilt(Building::Monastery));
    }

    #[test]
    fn champion_cap_is_enforced() {
        let mut state = state_with(Resources::new(20, 0, 20, 20));
        resolve_build(&mut state, PlayerId(1), BuildAction::RecruitChampion).unwrap();
        let receipt = resolve_build(&mut state, PlayerId(1), BuildAction::RecruitChampion).unwrap();
        assert_eq!(
            receipt.effect,
            BuildEffect::ChampionRecruited {
                champion: ChampionId(3)
            }
        );
        let before = player(&state).resources;
        let err = resolve_build(&mut state, PlayerId(1), BuildAction::RecruitChampion).unwrap_err();
        assert_eq!(err, BuildError::ChampionLimitReached);
        assert_eq!(player(&state).resources, before);
        assert_eq!(player(&state).champions[2].position, player(&state).home);
    }

    #[test]
    fn boat_cap_is_enforced() {
        let mut state = state_with(Resources::new(0, 10, 0, 10));
        resolve_build(&mut state, PlayerId(1), BuildAction::BuildBoat).unwrap();
        let err = resolve_build(&mut state, PlayerId(1), BuildAction::BuildBoat).unwrap_err();
        assert_eq!(err, BuildError::BoatLimitReached);
        assert_eq!(player(&state).boats.len(), GameConfig::MAX_BOATS);
    }

    #[test]
    fn might_needs_a_blacksmith() {
        let mut state = state_with(Resources::new(5, 0, 6, 0));
        assert_eq!(
            resolve_build(&mut state, PlayerId(1), BuildAction::BuyMight).unwrap_err(),
            BuildError::BlacksmithRequired
        );
        resolve_build(&mut state, PlayerId(1), BuildAction::Blacksmith).unwrap();
        resolve_build(&mut state, PlayerId(1), BuildAction::BuyMight).unwrap();
        assert_eq!(player(&state).might, 1);
    }

    #[test]
    fn available_builds_lists_only_affordable_valid_actions() {
        let state = state_with(Resources::new(2, 2, 0, 0));
        assert_eq!(available_builds(&state, PlayerId(1)), vec![BuildAction::Market]);
    }
}
