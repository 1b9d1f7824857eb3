//! Persistence contract the core depends on.

use chrono::{DateTime, Utc};

use crate::games::gomoku::Board;
use crate::store::{
    ClaimOutcome, GameId, GameRecord, GameState, LobbyId, LobbyRecord, NewLobby, PlayerStats,
    PointsAward, StoreError, UserId,
};

/// Storage for games, lobbies and player points.
///
/// Every method is one atomic unit: implementations must not let another
/// caller observe a half-applied operation.
pub trait GameStore: std::fmt::Debug + Send + Sync {
    /// Loads a game. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn get_game(&self, id: GameId) -> Result<Option<GameRecord>, StoreError>;

    /// Replaces a game's board and state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the game does not exist or the store is unavailable.
    fn update_game(
        &self,
        id: GameId,
        board: Board,
        state: GameState,
        now: DateTime<Utc>,
    ) -> Result<GameRecord, StoreError>;

    /// The in-progress game `user` takes part in, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn active_game_for_user(&self, user: UserId) -> Result<Option<GameRecord>, StoreError>;

    /// The game created by claiming `lobby`, if it was claimed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn game_for_lobby(&self, lobby: LobbyId) -> Result<Option<GameRecord>, StoreError>;

    /// Loads a lobby. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn get_lobby(&self, id: LobbyId) -> Result<Option<LobbyRecord>, StoreError>;

    /// The lobby `user` waits in, whatever its variant.
    ///
    /// A user waits in at most one lobby at a time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn lobby_for_user(&self, user: UserId) -> Result<Option<LobbyRecord>, StoreError>;

    /// Oldest lobby for `variant` whose waiting user is not `excluding` and
    /// is not already playing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn find_open_lobby(
        &self,
        variant: &str,
        excluding: UserId,
    ) -> Result<Option<LobbyRecord>, StoreError>;

    /// Inserts a lobby.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the user already waits in a lobby, already
    /// plays a game, or the store is unavailable.
    fn insert_lobby(&self, lobby: NewLobby) -> Result<LobbyRecord, StoreError>;

    /// Deletes a lobby. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn delete_lobby(&self, id: LobbyId) -> Result<bool, StoreError>;

    /// Removes `lobby` and creates a game with its waiting user as host and
    /// `guest` as guest, as one step.
    ///
    /// Neither side may already play an in-progress game: a busy guest gets
    /// [`ClaimOutcome::GuestPlaying`] and the lobby stays; a busy host's
    /// lobby is dropped and reported [`ClaimOutcome::Gone`]. Any lobby the
    /// guest was waiting in is closed with the match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn claim_lobby(
        &self,
        lobby: LobbyId,
        guest: UserId,
        board: Board,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, StoreError>;

    /// Credits both sides of a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn update_player_points(&self, award: &PointsAward) -> Result<(), StoreError>;

    /// Accumulated stats of `user`; empty stats if they never finished a game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    fn player_stats(&self, user: UserId) -> Result<PlayerStats, StoreError>;
}
