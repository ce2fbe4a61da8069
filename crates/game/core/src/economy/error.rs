//! Build and recruitment failures.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Building, PlayerId};

/// Why a build action was refused. `Display` is the reason shown to players.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildError {
    #[error("{0} not found")]
    PlayerNotFound(PlayerId),

    #[error("insufficient resources")]
    InsufficientResources,

    #[error("no chapel to upgrade")]
    NoChapelToUpgrade,

    #[error("{} already built", .0.as_str())]
    AlreadyBuilt(Building),

    #[error("blacksmith required")]
    BlacksmithRequired,

    #[error("champion limit reached")]
    ChampionLimitReached,

    #[error("boat limit reached")]
    BoatLimitReached,
}

impl GameError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PlayerNotFound(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "BUILD_PLAYER_NOT_FOUND",
            Self::InsufficientResources => "BUILD_INSUFFICIENT_RESOURCES",
            Self::NoChapelToUpgrade => "BUILD_NO_CHAPEL",
            Self::AlreadyBuilt(_) => "BUILD_ALREADY_BUILT",
            Self::BlacksmithRequired => "BUILD_BLACKSMITH_REQUIRED",
            Self::ChampionLimitReached => "BUILD_CHAMPION_LIMIT",
            Self::BoatLimitReached => "BUILD_BOAT_LIMIT",
        }
    }
}
