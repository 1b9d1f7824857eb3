//! Variant contract shared by every ruleset.

use super::rules::{full_board, is_board_full, is_winning_placement};
use super::{Board, Grid, Player, Square, Turn, WinReason};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Constraint on where the opening pieces may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OpeningRule {
    /// Any empty square at any time.
    Unrestricted,
    /// First piece on the center; the first player's second piece at
    /// Chebyshev distance of at least `min_distance` from it.
    Pro {
        /// Required gap for the first player's second piece.
        min_distance: u16,
    },
}

/// Immutable identity of a ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct VariantConfig {
    /// Stable registry key.
    name: String,
    /// Opening constraint.
    opening_rule: OpeningRule,
    /// Board edge length.
    board_size: u16,
}

/// Points for the two sides of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct FinishPoints {
    /// Awarded to the winner.
    pub winner: u32,
    /// Awarded to the loser.
    pub loser: u32,
}

/// Points each side receives on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct DrawPoints {
    /// Awarded to both players.
    pub shared: u32,
}

/// Points for a game decided by a forfeit or an expired clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ForfeitPoints {
    /// Awarded to the remaining player.
    pub winner: u32,
    /// Awarded to the player who left or ran out of time.
    pub forfeiter: u32,
}

/// Scoring table of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct GamePoints {
    /// Game won on the board.
    pub on_finish: FinishPoints,
    /// Game drawn.
    pub on_draw: DrawPoints,
    /// Game won by forfeit or timeout.
    pub on_forfeit_or_timer: ForfeitPoints,
}

/// Error that can occur when validating a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The square already holds a piece.
    #[display("Square {} is already occupied", _0)]
    PositionTaken(Square),

    /// It's not this player's turn.
    #[display("It's not the {} player's turn", _0)]
    NotYourTurn(Player),

    /// The square breaks a placement constraint of the variant.
    #[display("Square {} is not a legal placement", _0)]
    InvalidPosition(Square),
}

impl std::error::Error for MoveError {}

/// Rules of one game variant.
///
/// Implementations supply static data and may tighten
/// [`check_placement`](VariantRules::check_placement); the move pipeline in
/// [`is_move_valid`](VariantRules::is_move_valid) is shared.
pub trait VariantRules: std::fmt::Debug + Send + Sync {
    /// Identity of the ruleset.
    fn config(&self) -> &VariantConfig;

    /// Scoring table.
    fn points(&self) -> &GamePoints;

    /// Seconds each player gets per turn.
    fn turn_timer(&self) -> u32;

    /// Piece count at which the board counts as full.
    fn draw_threshold(&self) -> usize {
        full_board(*self.config().board_size())
    }

    /// Variant-specific placement constraint for `player` on `square`.
    ///
    /// Called on a running board after occupancy and turn order have been
    /// checked. The default only enforces the board bounds.
    fn check_placement(&self, _grid: &Grid, _player: Player, square: Square) -> Result<(), MoveError> {
        within_bounds(square, *self.config().board_size())
    }

    /// Empty running board with the first player to move.
    fn initial_board(&self) -> Board {
        Board::Running {
            grid: Grid::new(),
            turn: Turn::new(Player::First, self.turn_timer()),
        }
    }

    /// Validates `player` placing on `square` and returns the next board.
    ///
    /// Checks run in a fixed order: terminal board, occupied square, turn
    /// order, expired clock, placement constraints. An expired clock ends
    /// the game in the opponent's favor without placing the piece.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] the move trips.
    #[instrument(skip(self, board), fields(variant = %self.config().name()))]
    fn is_move_valid(&self, board: &Board, player: Player, square: Square) -> Result<Board, MoveError> {
        let (grid, turn) = match board {
            Board::Running { grid, turn } => (grid, turn),
            Board::Won { .. } | Board::Drawn { .. } => return Err(MoveError::GameOver),
        };

        if grid.is_occupied(square) {
            return Err(MoveError::PositionTaken(square));
        }
        if turn.player != player {
            return Err(MoveError::NotYourTurn(player));
        }
        if turn.seconds_remaining == 0 {
            debug!(%player, "Turn clock expired");
            return Ok(Board::Won {
                grid: grid.clone(),
                winner: player.opponent(),
                reason: WinReason::Timeout,
            });
        }
        self.check_placement(grid, player, square)?;

        let size = *self.config().board_size();
        let grid = grid.with(square, player);
        if is_winning_placement(&grid, square, player, size) {
            return Ok(Board::Won {
                grid,
                winner: player,
                reason: WinReason::FiveInRow,
            });
        }
        if is_board_full(&grid, self.draw_threshold()) {
            return Ok(Board::Drawn { grid });
        }
        Ok(Board::Running {
            grid,
            turn: Turn::new(player.opponent(), self.turn_timer()),
        })
    }
}

/// Rejects squares that do not fit a `size`x`size` board.
pub fn within_bounds(square: Square, size: u16) -> Result<(), MoveError> {
    if square.fits(size) {
        Ok(())
    } else {
        Err(MoveError::InvalidPosition(square))
    }
}
