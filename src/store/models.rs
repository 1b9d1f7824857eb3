//! Stored records and identifiers.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::games::gomoku::{Board, Player};

/// Identifier of a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[display("game#{}", _0)]
pub struct GameId(u64);

/// Identifier of a stored lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[display("lobby#{}", _0)]
pub struct LobbyId(u64);

/// User identifiers must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("User id must be positive, got {}", _0)]
pub struct UserIdError(i64);

impl std::error::Error for UserIdError {}

/// Opaque identifier handed out by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("user#{}", _0)]
pub struct UserId(u64);

impl UserId {
    /// Validates a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserIdError`] for zero or negative values.
    #[instrument]
    pub fn new(raw: i64) -> Result<Self, UserIdError> {
        u64::try_from(raw)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or(UserIdError(raw))
    }

    /// The raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Lifecycle of a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Moves are accepted.
    #[display("in_progress")]
    InProgress,
    /// Won, drawn or forfeited.
    #[display("finished")]
    Finished,
}

impl GameState {
    /// State matching a board snapshot.
    pub fn of(board: &Board) -> Self {
        if board.is_terminal() {
            GameState::Finished
        } else {
            GameState::InProgress
        }
    }
}

/// A game between a host (first player) and a guest (second player).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    id: GameId,
    state: GameState,
    variant: String,
    board: Board,
    host: UserId,
    guest: UserId,
    lobby: LobbyId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GameRecord {
    /// Creates the record for a freshly claimed lobby.
    pub(crate) fn matched(
        id: GameId,
        lobby: &LobbyRecord,
        guest: UserId,
        board: Board,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            state: GameState::of(&board),
            variant: lobby.variant.clone(),
            board,
            host: lobby.waiting_user,
            guest,
            lobby: lobby.id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the board and state, stamping the update time.
    pub(crate) fn advance(&mut self, board: Board, state: GameState, now: DateTime<Utc>) {
        self.board = board;
        self.state = state;
        self.updated_at = now;
    }

    /// Side played by `user`, if they take part.
    pub fn side_of(&self, user: UserId) -> Option<Player> {
        if user == self.host {
            Some(Player::First)
        } else if user == self.guest {
            Some(Player::Second)
        } else {
            None
        }
    }

    /// User playing `side`.
    pub fn user_for(&self, side: Player) -> UserId {
        match side {
            Player::First => self.host,
            Player::Second => self.guest,
        }
    }

    /// Whether `user` is host or guest.
    pub fn involves(&self, user: UserId) -> bool {
        self.side_of(user).is_some()
    }
}

/// A player waiting for an opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LobbyRecord {
    id: LobbyId,
    variant: String,
    waiting_user: UserId,
    created_at: DateTime<Utc>,
}

impl LobbyRecord {
    pub(crate) fn from_new(id: LobbyId, new: NewLobby) -> Self {
        Self {
            id,
            variant: new.variant,
            waiting_user: new.waiting_user,
            created_at: new.created_at,
        }
    }
}

/// Insertable lobby.
#[derive(Debug, Clone, new, Getters)]
pub struct NewLobby {
    variant: String,
    waiting_user: UserId,
    created_at: DateTime<Utc>,
}

/// Result of trying to turn a lobby into a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The lobby became this game.
    Matched(GameRecord),
    /// The lobby no longer exists, or its waiting user is already playing.
    Gone,
    /// The guest already plays in this game; the lobby was left alone.
    GuestPlaying(GameRecord),
}

/// One scoring event: both sides of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new, Getters)]
pub struct PointsAward {
    winner: UserId,
    loser: UserId,
    winner_amount: u32,
    loser_amount: u32,
    counts_as_win: bool,
}

/// Accumulated points and record of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerStats {
    user: UserId,
    points: u64,
    wins: u32,
    games: u32,
}

impl PlayerStats {
    /// Stats of a user with no finished games.
    pub fn empty(user: UserId) -> Self {
        Self {
            user,
            points: 0,
            wins: 0,
            games: 0,
        }
    }

    /// Adds one finished game worth `amount` points.
    pub(crate) fn record(&mut self, amount: u32, won: bool) {
        self.points += u64::from(amount);
        self.games += 1;
        if won {
            self.wins += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_must_be_positive() {
        assert!(UserId::new(0).is_err());
        assert!(UserId::new(-4).is_err());
        assert_eq!(UserId::new(7).map(UserId::get), Ok(7));
    }

    #[test]
    fn test_stats_record() {
        let user = UserId::new(1).unwrap();
        let mut stats = PlayerStats::empty(user);
        stats.record(10, true);
        stats.record(5, false);
        assert_eq!(*stats.points(), 15);
        assert_eq!(*stats.wins(), 1);
        assert_eq!(*stats.games(), 2);
    }
}
