//! State lookup errors.
//!
//! Raised when a resolver is asked about an entity the state does not hold.
//! Resolvers surface these as the `errorMessage` of their result and abort
//! only the action at hand.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ChampionId, PlayerId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("{0} not found")]
    PlayerNotFound(PlayerId),

    #[error("{champion} of {player} not found")]
    ChampionNotFound {
        player: PlayerId,
        champion: ChampionId,
    },

    #[error("no tile at {0}")]
    TileNotFound(Position),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "STATE_PLAYER_NOT_FOUND",
            Self::ChampionNotFound { .. } => "STATE_CHAMPION_NOT_FOUND",
            Self::TileNotFound(_) => "STATE_TILE_NOT_FOUND",
        }
    }
}
