//! Unified error types surfaced by the runtime API.
//!
//! Agent failures never abort a resolution: [`crate::decide`] catches them and
//! falls back to a random pick. Missing entities abort the current action only.
use doomspire_core::{ErrorSeverity, GameError, PlayerId, StateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no decision agent bound for {player}")]
    AgentNotSet { player: PlayerId },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// An entity a resolution refers to does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{0} not found")]
    PlayerNotFound(PlayerId),

    #[error("{champion} of {player} not found")]
    ChampionNotFound {
        player: PlayerId,
        champion: doomspire_core::ChampionId,
    },

    #[error("no tile at {0}")]
    TileNotFound(doomspire_core::Position),

    #[error("unknown event card '{0}'")]
    UnknownCard(String),

    /// A decision was requested over an empty option set.
    #[error("no options to decide between: {0}")]
    NoOptions(String),
}

impl From<StateError> for ResolveError {
    fn from(error: StateError) -> Self {
        match error {
            StateError::PlayerNotFound(player) => Self::PlayerNotFound(player),
            StateError::ChampionNotFound { player, champion } => {
                Self::ChampionNotFound { player, champion }
            }
            StateError::TileNotFound(position) => Self::TileNotFound(position),
        }
    }
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoOptions(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "RESOLVE_PLAYER_NOT_FOUND",
            Self::ChampionNotFound { .. } => "RESOLVE_CHAMPION_NOT_FOUND",
            Self::TileNotFound(_) => "RESOLVE_TILE_NOT_FOUND",
            Self::UnknownCard(_) => "RESOLVE_UNKNOWN_CARD",
            Self::NoOptions(_) => "RESOLVE_NO_OPTIONS",
        }
    }
}

/// Why an agent could not produce a decision.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("decision prompt channel closed")]
    ChannelClosed,

    #[error("prompt was dropped without an answer")]
    NoReply,

    #[error("option '{0}' is not on offer")]
    UnknownOption(String),

    #[error("model transport failed: {0}")]
    Transport(String),

    #[error("model answer could not be parsed: {0}")]
    Unparseable(String),
}

impl GameError for AgentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownOption(_) | Self::Unparseable(_) => ErrorSeverity::Validation,
            Self::ChannelClosed | Self::NoReply | Self::Transport(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ChannelClosed => "AGENT_CHANNEL_CLOSED",
            Self::NoReply => "AGENT_NO_REPLY",
            Self::UnknownOption(_) => "AGENT_UNKNOWN_OPTION",
            Self::Transport(_) => "AGENT_TRANSPORT",
            Self::Unparseable(_) => "AGENT_UNPARSEABLE",
        }
    }
}
