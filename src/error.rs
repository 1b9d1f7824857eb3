//! Errors surfaced to callers of the orchestrator.

use derive_more::Display;

use crate::games::gomoku::{MoveError, UnknownVariant};
use crate::store::{GameId, LobbyId, StoreError, UserId};

/// Failure of a game or lobby operation.
#[derive(Debug, Clone, Display)]
pub enum GameError {
    /// No game with this id.
    #[display("{} not found", _0)]
    GameNotFound(GameId),

    /// The caller is neither host nor guest.
    #[display("{} does not play in {}", user, game)]
    UserNotInGame {
        /// The caller.
        user: UserId,
        /// The game.
        game: GameId,
    },

    /// The rules rejected the move.
    #[display("Move not valid: {}", _0)]
    MoveNotValid(MoveError),

    /// The game already ended.
    #[display("{} is already finished", _0)]
    GameAlreadyFinished(GameId),

    /// No variant under this name.
    #[display("{}", _0)]
    VariantNotFound(UnknownVariant),

    /// The lobby does not exist or belongs to someone else.
    #[display("{} not found", _0)]
    LobbyNotFound(LobbyId),

    /// The persistence collaborator failed.
    #[display("{}", _0)]
    Store(StoreError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::MoveNotValid(e) => Some(e),
            GameError::VariantNotFound(e) => Some(e),
            GameError::Store(e) => Some(e),
            GameError::GameNotFound(_)
            | GameError::UserNotInGame { .. }
            | GameError::GameAlreadyFinished(_)
            | GameError::LobbyNotFound(_) => None,
        }
    }
}

impl From<MoveError> for GameError {
    fn from(err: MoveError) -> Self {
        GameError::MoveNotValid(err)
    }
}

impl From<UnknownVariant> for GameError {
    fn from(err: UnknownVariant) -> Self {
        GameError::VariantNotFound(err)
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        GameError::Store(err)
    }
}
