//! In-memory [`GameStore`].

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::games::gomoku::Board;
use crate::store::{
    ClaimOutcome, GameId, GameRecord, GameState, GameStore, LobbyId, LobbyRecord, NewLobby, PlayerStats,
    PointsAward, StoreError, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    games: BTreeMap<GameId, GameRecord>,
    lobbies: BTreeMap<LobbyId, LobbyRecord>,
    stats: HashMap<UserId, PlayerStats>,
    next_game: u64,
    next_lobby: u64,
}

impl Tables {
    fn active_game(&self, user: UserId) -> Option<&GameRecord> {
        self.games
            .values()
            .find(|game| *game.state() == GameState::InProgress && game.involves(user))
    }

    fn lobby_of(&self, user: UserId) -> Option<&LobbyRecord> {
        self.lobbies
            .values()
            .find(|lobby| *lobby.waiting_user() == user)
    }
}

/// Store that keeps everything in process memory behind one lock.
///
/// Each trait method holds the lock for its whole body, which is what makes
/// every operation atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory store");
        Self::default()
    }

    /// Number of lobbies currently waiting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lock is poisoned.
    pub fn lobby_count(&self) -> Result<usize, StoreError> {
        Ok(self.tables.lock()?.lobbies.len())
    }

    /// Number of games ever created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lock is poisoned.
    pub fn game_count(&self) -> Result<usize, StoreError> {
        Ok(self.tables.lock()?.games.len())
    }
}

impl GameStore for InMemoryStore {
    #[instrument(skip(self))]
    fn get_game(&self, id: GameId) -> Result<Option<GameRecord>, StoreError> {
        debug!("Loading game");
        Ok(self.tables.lock()?.games.get(&id).cloned())
    }

    #[instrument(skip(self, board))]
    fn update_game(
        &self,
        id: GameId,
        board: Board,
        state: GameState,
        now: DateTime<Utc>,
    ) -> Result<GameRecord, StoreError> {
        debug!("Updating game");
        let mut tables = self.tables.lock()?;
        let game = tables
            .games
            .get_mut(&id)
            .ok_or_else(|| StoreError::new(format!("Cannot update missing {}", id)))?;
        game.advance(board, state, now);
        Ok(game.clone())
    }

    #[instrument(skip(self))]
    fn active_game_for_user(&self, user: UserId) -> Result<Option<GameRecord>, StoreError> {
        debug!("Looking up active game");
        Ok(self.tables.lock()?.active_game(user).cloned())
    }

    #[instrument(skip(self))]
    fn game_for_lobby(&self, lobby: LobbyId) -> Result<Option<GameRecord>, StoreError> {
        debug!("Looking up game by lobby");
        let tables = self.tables.lock()?;
        Ok(tables
            .games
            .values()
            .find(|game| *game.lobby() == lobby)
            .cloned())
    }

    #[instrument(skip(self))]
    fn get_lobby(&self, id: LobbyId) -> Result<Option<LobbyRecord>, StoreError> {
        debug!("Loading lobby");
        Ok(self.tables.lock()?.lobbies.get(&id).cloned())
    }

    #[instrument(skip(self))]
    fn lobby_for_user(&self, user: UserId) -> Result<Option<LobbyRecord>, StoreError> {
        debug!("Looking up waiting lobby");
        Ok(self.tables.lock()?.lobby_of(user).cloned())
    }

    #[instrument(skip(self))]
    fn find_open_lobby(
        &self,
        variant: &str,
        excluding: UserId,
    ) -> Result<Option<LobbyRecord>, StoreError> {
        debug!("Searching for open lobby");
        let tables = self.tables.lock()?;
        // Ids grow monotonically, so map order is creation order.
        Ok(tables
            .lobbies
            .values()
            .find(|lobby| {
                lobby.variant() == variant
                    && *lobby.waiting_user() != excluding
                    && tables.active_game(*lobby.waiting_user()).is_none()
            })
            .cloned())
    }

    #[instrument(skip(self, lobby), fields(variant = %lobby.variant(), user = %lobby.waiting_user()))]
    fn insert_lobby(&self, lobby: NewLobby) -> Result<LobbyRecord, StoreError> {
        let mut tables = self.tables.lock()?;
        if let Some(existing) = tables.lobby_of(*lobby.waiting_user()) {
            warn!(lobby_id = %existing.id(), "User already waiting");
            return Err(StoreError::new(format!(
                "{} already waits in {}",
                lobby.waiting_user(),
                existing.id()
            )));
        }
        if let Some(game) = tables.active_game(*lobby.waiting_user()) {
            warn!(game_id = %game.id(), "User already playing");
            return Err(StoreError::new(format!(
                "{} already plays in {}",
                lobby.waiting_user(),
                game.id()
            )));
        }

        tables.next_lobby += 1;
        let id = LobbyId::from(tables.next_lobby);
        let record = LobbyRecord::from_new(id, lobby);
        tables.lobbies.insert(id, record.clone());
        info!(lobby_id = %id, "Lobby inserted");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn delete_lobby(&self, id: LobbyId) -> Result<bool, StoreError> {
        let removed = self.tables.lock()?.lobbies.remove(&id).is_some();
        debug!(removed, "Lobby delete");
        Ok(removed)
    }

    #[instrument(skip(self, board))]
    fn claim_lobby(
        &self,
        lobby: LobbyId,
        guest: UserId,
        board: Board,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, StoreError> {
        let mut tables = self.tables.lock()?;
        if let Some(game) = tables.active_game(guest) {
            warn!(game_id = %game.id(), "Guest already playing");
            return Ok(ClaimOutcome::GuestPlaying(game.clone()));
        }
        let Some(claimed) = tables.lobbies.remove(&lobby) else {
            debug!("Lobby already gone");
            return Ok(ClaimOutcome::Gone);
        };
        if let Some(game) = tables.active_game(*claimed.waiting_user()) {
            warn!(game_id = %game.id(), host = %claimed.waiting_user(), "Dropped lobby of a playing host");
            return Ok(ClaimOutcome::Gone);
        }
        tables
            .lobbies
            .retain(|_, waiting| *waiting.waiting_user() != guest);

        tables.next_game += 1;
        let id = GameId::from(tables.next_game);
        let game = GameRecord::matched(id, &claimed, guest, board, now);
        tables.games.insert(id, game.clone());
        info!(game_id = %id, host = %claimed.waiting_user(), "Lobby claimed");
        Ok(ClaimOutcome::Matched(game))
    }

    #[instrument(skip(self, award), fields(winner = %award.winner(), loser = %award.loser()))]
    fn update_player_points(&self, award: &PointsAward) -> Result<(), StoreError> {
        let mut tables = self.tables.lock()?;
        tables
            .stats
            .entry(*award.winner())
            .or_insert_with(|| PlayerStats::empty(*award.winner()))
            .record(*award.winner_amount(), *award.counts_as_win());
        tables
            .stats
            .entry(*award.loser())
            .or_insert_with(|| PlayerStats::empty(*award.loser()))
            .record(*award.loser_amount(), false);
        info!(
            winner_amount = award.winner_amount(),
            loser_amount = award.loser_amount(),
            "Points recorded"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    fn player_stats(&self, user: UserId) -> Result<PlayerStats, StoreError> {
        let tables = self.tables.lock()?;
        Ok(tables
            .stats
            .get(&user)
            .copied()
            .unwrap_or_else(|| PlayerStats::empty(user)))
    }
}
