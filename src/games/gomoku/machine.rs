//! Board state machine: one validated move in, the next snapshot out.

use super::variant::{MoveError, VariantRules};
use super::{Board, Player, Square};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Applies moves to board snapshots for one variant.
///
/// Inputs are never mutated, so earlier snapshots stay valid for anyone
/// still holding them. Persisting the result is the caller's job.
#[derive(Debug, Clone)]
pub struct BoardStateMachine {
    rules: Arc<dyn VariantRules>,
}

impl BoardStateMachine {
    /// Creates a state machine driven by `rules`.
    pub fn new(rules: Arc<dyn VariantRules>) -> Self {
        Self { rules }
    }

    /// The rules in use.
    pub fn rules(&self) -> &Arc<dyn VariantRules> {
        &self.rules
    }

    /// Starting board for the variant.
    pub fn initial_board(&self) -> Board {
        self.rules.initial_board()
    }

    /// Validates and applies `player` placing on `square`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] when the variant rejects the move.
    #[instrument(skip(self, board), fields(variant = %self.rules.config().name(), pieces = board.grid().len()))]
    pub fn apply(&self, board: &Board, player: Player, square: Square) -> Result<Board, MoveError> {
        let next = self.rules.is_move_valid(board, player, square).map_err(|e| {
            warn!(error = %e, "Move rejected");
            e
        })?;

        match &next {
            Board::Running { turn, .. } => debug!(next = %turn.player, "Move applied"),
            Board::Won { winner, reason, .. } => info!(%winner, %reason, "Game won"),
            Board::Drawn { .. } => info!("Game drawn"),
        }
        Ok(next)
    }

    /// Replays `squares` from the initial board, sides alternating from the
    /// first player.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] of the first rejected move.
    #[instrument(skip(self, squares), fields(moves = squares.len()))]
    pub fn replay(&self, squares: &[Square]) -> Result<Board, MoveError> {
        squares
            .iter()
            .try_fold(self.initial_board(), |board, &square| {
                let player = board.turn().map_or(Player::First, |turn| turn.player);
                self.apply(&board, player, square)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gomoku::variants::{Freestyle, Tiny};

    fn sq(col: u16, row: u16) -> Square {
        Square::new(col, row, 15).unwrap()
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let machine = BoardStateMachine::new(Arc::new(Freestyle::new()));
        let start = machine.initial_board();
        let next = machine.apply(&start, Player::First, sq(7, 7)).unwrap();
        assert!(start.grid().is_empty());
        assert_eq!(next.grid().len(), 1);
    }

    #[test]
    fn test_replay_stops_at_first_error() {
        let machine = BoardStateMachine::new(Arc::new(Freestyle::new()));
        let result = machine.replay(&[sq(0, 0), sq(1, 1), sq(0, 0)]);
        assert_eq!(result, Err(MoveError::PositionTaken(sq(0, 0))));
    }

    #[test]
    fn test_replay_after_game_over() {
        let machine = BoardStateMachine::new(Arc::new(Tiny::new()));
        let squares: Vec<Square> = [
            (0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1), (4, 0), (4, 1),
        ]
        .iter()
        .map(|&(col, row)| Square::new(col, row, 7).unwrap())
        .collect();
        assert_eq!(machine.replay(&squares), Err(MoveError::GameOver));
    }
}
