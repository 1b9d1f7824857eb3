//! Entry point for outside callers: matchmaking, moves, forfeits.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::GameError;
use crate::games::gomoku::{BoardStateMachine, Square, VariantRegistry, VariantRules};
use crate::lobby::{LobbyMatchmaker, LobbyStatus, MatchStatus};
use crate::locks::KeyedLocks;
use crate::scoring::Scoring;
use crate::store::{GameId, GameRecord, GameState, GameStore, InMemoryStore, LobbyId, PlayerStats, UserId};

/// Runs games for many players at once.
///
/// Operations on one game are serialized by a per-game mutex that exists
/// only while the game is being worked on; different games never wait on
/// each other. Scoring happens inside that critical
/// section on the single transition from in progress to finished.
#[derive(Debug)]
pub struct GameOrchestrator {
    registry: Arc<VariantRegistry>,
    store: Arc<dyn GameStore>,
    clock: Arc<dyn Clock>,
    matchmaker: LobbyMatchmaker,
    game_locks: KeyedLocks<GameId>,
}

impl GameOrchestrator {
    /// Creates an orchestrator over the given collaborators.
    #[instrument(skip_all)]
    pub fn new(
        registry: Arc<VariantRegistry>,
        store: Arc<dyn GameStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!(variants = ?registry.names(), "Creating game orchestrator");
        let matchmaker = LobbyMatchmaker::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            registry,
            store,
            clock,
            matchmaker,
            game_locks: KeyedLocks::new(),
        }
    }

    /// Orchestrator backed by an [`InMemoryStore`] and the system clock.
    pub fn in_memory(registry: VariantRegistry) -> Self {
        Self::new(
            Arc::new(registry),
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
        )
    }

    /// The variants on offer.
    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    fn rules(&self, variant: &str) -> Result<Arc<dyn VariantRules>, GameError> {
        Ok(self.registry.require(variant)?)
    }

    /// Finds an opponent for `user` or opens a lobby for them.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::VariantNotFound`] for unknown variants and
    /// [`GameError::Store`] if persistence fails.
    #[instrument(skip(self))]
    pub fn find_or_join_game(&self, variant: &str, user: UserId) -> Result<MatchStatus, GameError> {
        let rules = self.rules(variant)?;
        self.matchmaker
            .request_match(variant, user, &rules.initial_board())
    }

    /// Polls a lobby.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LobbyNotFound`] if the lobby is not `user`'s.
    pub fn wait_in_lobby(&self, lobby: LobbyId, user: UserId) -> Result<LobbyStatus, GameError> {
        self.matchmaker.wait_in_lobby(lobby, user)
    }

    /// Leaves a lobby.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LobbyNotFound`] if the lobby is not `user`'s.
    pub fn exit_lobby(&self, lobby: LobbyId, user: UserId) -> Result<(), GameError> {
        self.matchmaker.exit_lobby(lobby, user)
    }

    /// Loads a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] if there is no such game.
    #[instrument(skip(self))]
    pub fn get_game_by_id(&self, id: GameId) -> Result<GameRecord, GameError> {
        self.store.get_game(id)?.ok_or(GameError::GameNotFound(id))
    }

    /// Places `user`'s piece on `square`.
    ///
    /// On the move that ends the game the state becomes finished and both
    /// players are scored.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameNotFound`] if there is no such game
    /// - [`GameError::UserNotInGame`] if `user` plays in it on neither side
    /// - [`GameError::MoveNotValid`] if the rules reject the move
    #[instrument(skip(self))]
    pub fn make_move(&self, id: GameId, user: UserId, square: Square) -> Result<GameRecord, GameError> {
        self.game_locks.with(id, || -> Result<GameRecord, GameError> {
            let game = self.get_game_by_id(id)?;
            let side = game.side_of(user).ok_or_else(|| {
                warn!("Move by user outside the game");
                GameError::UserNotInGame { user, game: id }
            })?;
            let rules = self.rules(game.variant())?;

            let next =
                BoardStateMachine::new(Arc::clone(&rules)).apply(game.board(), side, square)?;
            let state = GameState::of(&next);
            let updated = self.store.update_game(id, next, state, self.clock.now())?;
            debug!(%side, %state, "Move stored");

            if state == GameState::Finished {
                self.settle(&updated, &*rules)?;
            }
            Ok(updated)
        })
    }

    /// Forfeits the game on behalf of `user`.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameNotFound`] if there is no such game
    /// - [`GameError::UserNotInGame`] if `user` plays in it on neither side
    /// - [`GameError::GameAlreadyFinished`] if the game has ended
    #[instrument(skip(self))]
    pub fn exit_game(&self, id: GameId, user: UserId) -> Result<GameRecord, GameError> {
        self.game_locks.with(id, || -> Result<GameRecord, GameError> {
            let game = self.get_game_by_id(id)?;
            let side = game
                .side_of(user)
                .ok_or(GameError::UserNotInGame { user, game: id })?;
            if *game.state() == GameState::Finished {
                debug!("Exit from finished game");
                return Err(GameError::GameAlreadyFinished(id));
            }
            let board = game
                .board()
                .forfeit(side)
                .ok_or(GameError::GameAlreadyFinished(id))?;
            let rules = self.rules(game.variant())?;

            let updated = self
                .store
                .update_game(id, board, GameState::Finished, self.clock.now())?;
            info!(leaver = %user, "Game forfeited");
            self.settle(&updated, &*rules)?;
            Ok(updated)
        })
    }

    /// Sets the clock of the player to move, as reported by the external
    /// turn timer. A move made on a clock of zero loses on time.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameNotFound`] if there is no such game
    /// - [`GameError::GameAlreadyFinished`] if the game has ended
    #[instrument(skip(self))]
    pub fn set_turn_clock(&self, id: GameId, seconds: u32) -> Result<GameRecord, GameError> {
        self.game_locks.with(id, || -> Result<GameRecord, GameError> {
            let game = self.get_game_by_id(id)?;
            if *game.state() == GameState::Finished {
                return Err(GameError::GameAlreadyFinished(id));
            }
            let board = game.board().with_seconds_remaining(seconds);
            let updated = self
                .store
                .update_game(id, board, GameState::InProgress, self.clock.now())?;
            debug!("Turn clock set");
            Ok(updated)
        })
    }

    /// Accumulated points of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Store`] if persistence fails.
    pub fn player_stats(&self, user: UserId) -> Result<PlayerStats, GameError> {
        Ok(self.store.player_stats(user)?)
    }

    /// Applies the scoring policy to a game that just finished.
    fn settle(&self, game: &GameRecord, rules: &dyn VariantRules) -> Result<(), GameError> {
        if let Some(award) = Scoring::new(rules.points()).award(game, game.board()) {
            self.store.update_player_points(&award)?;
            info!(
                game_id = %game.id(),
                winner = %award.winner(),
                winner_amount = award.winner_amount(),
                loser_amount = award.loser_amount(),
                "Game scored"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(raw: i64) -> UserId {
        UserId::new(raw).unwrap()
    }

    #[test]
    fn test_game_locks_do_not_accumulate() {
        let orchestrator = GameOrchestrator::in_memory(VariantRegistry::standard());
        let square = Square::new(0, 0, 15).unwrap();
        for raw in 1..=20u64 {
            let missing = GameId::from(1000 + raw);
            assert!(orchestrator.make_move(missing, user(1), square).is_err());
            assert!(orchestrator.exit_game(missing, user(1)).is_err());
        }
        assert!(orchestrator.game_locks.is_empty());

        orchestrator.find_or_join_game("freestyle", user(1)).unwrap();
        let MatchStatus::GameMatch(id) = orchestrator.find_or_join_game("freestyle", user(2)).unwrap()
        else {
            panic!("Expected match");
        };
        orchestrator.make_move(id, user(1), Square::new(7, 7, 15).unwrap()).unwrap();
        assert!(orchestrator.game_locks.is_empty(), "Running game keeps no lock");
    }
}
