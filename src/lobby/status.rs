//! Answers returned to polling clients.

use serde::{Deserialize, Serialize};

use crate::store::{GameId, LobbyId};

/// Outcome of asking for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "id", rename_all = "snake_case")]
pub enum MatchStatus {
    /// No opponent was waiting; the caller now waits in this lobby.
    LobbyCreated(LobbyId),
    /// The caller plays in this game.
    GameMatch(GameId),
    /// The caller was already waiting in this lobby.
    StillInLobby(LobbyId),
}

/// Outcome of polling a lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "id", rename_all = "snake_case")]
pub enum LobbyStatus {
    /// Nobody claimed the lobby yet.
    WaitingInLobby,
    /// A guest claimed the lobby; the game is ready.
    GameMatch(GameId),
}
