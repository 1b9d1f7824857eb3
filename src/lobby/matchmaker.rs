//! Concurrency-safe pairing of players into games.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::clock::Clock;
use crate::error::GameError;
use crate::games::gomoku::Board;
use crate::lobby::{LobbyStatus, MatchStatus};
use crate::locks::KeyedLocks;
use crate::store::{ClaimOutcome, GameStore, LobbyId, NewLobby, UserId};

/// Attempts to claim a vanished lobby before falling back to creating one.
const MAX_CLAIM_ATTEMPTS: usize = 3;

/// Pairs players waiting for the same variant.
///
/// A request holds the requester's user lock and then the variant lock, so
/// one user's requests never interleave and the look-up, claim and
/// fallback insert for a variant form one critical section. The store's
/// [`claim_lobby`](GameStore::claim_lobby) removes the lobby and creates
/// the game in one step and refuses players who already play, so a lobby
/// becomes at most one game and nobody plays two games at once.
#[derive(Debug)]
pub struct LobbyMatchmaker {
    store: Arc<dyn GameStore>,
    clock: Arc<dyn Clock>,
    user_locks: KeyedLocks<UserId>,
    variant_locks: KeyedLocks<String>,
}

impl LobbyMatchmaker {
    /// Creates a matchmaker over `store`.
    #[instrument(skip(store, clock))]
    pub fn new(store: Arc<dyn GameStore>, clock: Arc<dyn Clock>) -> Self {
        info!("Creating lobby matchmaker");
        Self {
            store,
            clock,
            user_locks: KeyedLocks::new(),
            variant_locks: KeyedLocks::new(),
        }
    }

    /// Matches `user` with a waiting opponent for `variant` or parks them in
    /// a new lobby.
    ///
    /// A user already waiting (in any variant) or already in a game gets
    /// that state back instead of a second lobby or game. `initial_board`
    /// seeds the game if a lobby is claimed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Store`] if persistence fails.
    #[instrument(skip(self, initial_board))]
    pub fn request_match(
        &self,
        variant: &str,
        user: UserId,
        initial_board: &Board,
    ) -> Result<MatchStatus, GameError> {
        self.user_locks.with(user, || {
            self.variant_locks.with(variant.to_string(), || {
                self.match_or_wait(variant, user, initial_board)
            })
        })
    }

    fn match_or_wait(
        &self,
        variant: &str,
        user: UserId,
        initial_board: &Board,
    ) -> Result<MatchStatus, GameError> {
        // Lobby first: if a guest claims it between the two reads, the game
        // is visible by the time the second read runs.
        if let Some(lobby) = self.store.lobby_for_user(user)? {
            debug!(lobby_id = %lobby.id(), lobby_variant = %lobby.variant(), "User already waiting");
            return Ok(MatchStatus::StillInLobby(*lobby.id()));
        }
        if let Some(game) = self.store.active_game_for_user(user)? {
            debug!(game_id = %game.id(), "User already in a game");
            return Ok(MatchStatus::GameMatch(*game.id()));
        }

        for attempt in 1..=MAX_CLAIM_ATTEMPTS {
            let Some(lobby) = self.store.find_open_lobby(variant, user)? else {
                break;
            };
            match self
                .store
                .claim_lobby(*lobby.id(), user, initial_board.clone(), self.clock.now())?
            {
                ClaimOutcome::Matched(game) => {
                    info!(
                        game_id = %game.id(),
                        host = %game.host(),
                        guest = %game.guest(),
                        "Matched into game"
                    );
                    return Ok(MatchStatus::GameMatch(*game.id()));
                }
                ClaimOutcome::GuestPlaying(game) => {
                    debug!(game_id = %game.id(), "User started playing meanwhile");
                    return Ok(MatchStatus::GameMatch(*game.id()));
                }
                ClaimOutcome::Gone => {
                    warn!(lobby_id = %lobby.id(), attempt, "Lobby vanished before claim");
                }
            }
        }

        let lobby = self
            .store
            .insert_lobby(NewLobby::new(variant.to_string(), user, self.clock.now()))?;
        info!(lobby_id = %lobby.id(), "Lobby created");
        Ok(MatchStatus::LobbyCreated(*lobby.id()))
    }

    /// Current state of `user`'s lobby. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LobbyNotFound`] if the lobby is unknown, belongs
    /// to someone else, or was closed without a game.
    #[instrument(skip(self))]
    pub fn wait_in_lobby(&self, lobby: LobbyId, user: UserId) -> Result<LobbyStatus, GameError> {
        if let Some(record) = self.store.get_lobby(lobby)? {
            if *record.waiting_user() == user {
                return Ok(LobbyStatus::WaitingInLobby);
            }
            warn!(owner = %record.waiting_user(), "Lobby polled by non-owner");
            return Err(GameError::LobbyNotFound(lobby));
        }

        match self.store.game_for_lobby(lobby)? {
            Some(game) if *game.host() == user => {
                debug!(game_id = %game.id(), "Lobby was claimed");
                Ok(LobbyStatus::GameMatch(*game.id()))
            }
            _ => Err(GameError::LobbyNotFound(lobby)),
        }
    }

    /// Removes `user`'s lobby.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LobbyNotFound`] if the lobby is gone (for
    /// instance already claimed) or belongs to someone else.
    #[instrument(skip(self))]
    pub fn exit_lobby(&self, lobby: LobbyId, user: UserId) -> Result<(), GameError> {
        let Some(record) = self.store.get_lobby(lobby)? else {
            debug!("Lobby already gone");
            return Err(GameError::LobbyNotFound(lobby));
        };
        if *record.waiting_user() != user {
            warn!(owner = %record.waiting_user(), "Exit requested by non-owner");
            return Err(GameError::LobbyNotFound(lobby));
        }

        self.user_locks.with(user, || {
            self.variant_locks.with(record.variant().clone(), || -> Result<(), GameError> {
                if self.store.delete_lobby(lobby)? {
                    info!("Lobby closed");
                    Ok(())
                } else {
                    debug!("Lobby claimed before exit");
                    Err(GameError::LobbyNotFound(lobby))
                }
            })
        })
    }
}
