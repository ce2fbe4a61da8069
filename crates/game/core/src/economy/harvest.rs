//! Collecting tile production.

use tracing::debug;

use super::error::BuildError;
use crate::state::{GameState, PlayerId, Position, Resources};

/// Where a harvest's production went.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HarvestReport {
    /// Total credited to the harvesting player.
    pub collected: Resources,
    /// Tiles whose yield went to a blockading rival instead.
    pub blockaded: Vec<(Position, PlayerId)>,
}

/// First rival champion standing on `position`, if any.
fn blockader(state: &GameState, owner: PlayerId, position: Position) -> Option<PlayerId> {
    state
        .champions_at(position)
        .into_iter()
        .map(|(player, _)| player)
        .find(|&player| player != owner)
}

/// Collect production from `player`'s home and claimed tiles.
///
/// A claimed tile with a rival champion on it is blockaded: its yield goes to
/// the blockader's owner. Home is never blockaded.
pub fn harvest(state: &mut GameState, player: PlayerId) -> Result<HarvestReport, BuildError> {
    let home = state
        .player(player)
        .ok_or(BuildError::PlayerNotFound(player))?
        .home;

    let mut report = HarvestReport::default();
    let mut diverted: Vec<(PlayerId, Resources)> = Vec::new();

    if let Some(tile) = state.tile(home) {
        report.collected.add_all(&tile.production);
    }
    for tile in state.claimed_tiles(player).filter(|t| t.position != home) {
        match blockader(state, player, tile.position) {
            Some(rival) => {
                report.blockaded.push((tile.position, rival));
                diverted.push((rival, tile.production));
            }
            None => report.collected.add_all(&tile.production),
        }
    }

    for (rival, production) in diverted {
        if let Some(rival) = state.player_mut(rival) {
            rival.resources.add_all(&production);
        }
    }
    if let Some(owner) = state.player_mut(player) {
        owner.resources.add_all(&report.collected);
    }

    debug!(
        target: "doomspire::economy",
        %player,
        collected = %report.collected,
        blockaded = report.blockaded.len(),
        "harvest collected"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ChampionId, Player};

    #[test]
    fn blockaded_claim_yields_to_the_rival() {
        let homes = GameState::corner_homes();
        let mut state = GameState::standard(vec![
            Player::new(PlayerId(1), "Red", homes[0]),
            Player::new(PlayerId(2), "Blue", homes[1]),
        ]);
        state.tile_mut(homes[0]).unwrap().production = Resources::new(1, 0, 0, 0);
        for (position, production) in [
            (Position::new(2, 2), Resources::new(0, 2, 0, 0)),
            (Position::new(3, 3), Resources::new(0, 0, 1, 0)),
        ] {
            let tile = state.tile_mut(position).unwrap();
            tile.claimed_by = Some(PlayerId(1));
            tile.production = production;
        }
        state.place_champion(PlayerId(2), ChampionId(1), Position::new(3, 3)).unwrap();
        // Own champion on a claim does not blockade it.
        state.place_champion(PlayerId(1), ChampionId(1), Position::new(2, 2)).unwrap();

        let report = harvest(&mut state, PlayerId(1)).unwrap();
        assert_eq!(report.collected, Resources::new(1, 2, 0, 0));
        assert_eq!(report.blockaded, vec![(Position::new(3, 3), PlayerId(2))]);
        assert_eq!(state.player(PlayerId(1)).unwrap().resources, Resources::new(1, 2, 0, 0));
        assert_eq!(state.player(PlayerId(2)).unwrap().resources, Resources::new(0, 0, 1, 0));
    }
}
