//! Scoring policy: turns a finished game into a points award.

use tracing::{debug, instrument};

use crate::games::gomoku::{Board, GamePoints, WinReason};
use crate::store::{GameRecord, PointsAward};

/// Decides who gets what when a game ends.
///
/// Boards won on the grid use the finish table; forfeits and expired clocks
/// use the forfeit table; draws split the shared amount.
#[derive(Debug, Clone, Copy)]
pub struct Scoring<'a> {
    points: &'a GamePoints,
}

impl<'a> Scoring<'a> {
    /// Scoring against a variant's table.
    pub fn new(points: &'a GamePoints) -> Self {
        Self { points }
    }

    /// Award for `game` ending on `board`. Running boards award nothing.
    #[instrument(skip(self, game, board), fields(game_id = %game.id()))]
    pub fn award(&self, game: &GameRecord, board: &Board) -> Option<PointsAward> {
        let award = match board {
            Board::Running { .. } => return None,
            Board::Won { winner, reason, .. } => {
                let (winner_amount, loser_amount) = match reason {
                    WinReason::FiveInRow => {
                        (self.points.on_finish.winner, self.points.on_finish.loser)
                    }
                    WinReason::Timeout | WinReason::Forfeit => (
                        self.points.on_forfeit_or_timer.winner,
                        self.points.on_forfeit_or_timer.forfeiter,
                    ),
                };
                PointsAward::new(
                    game.user_for(*winner),
                    game.user_for(winner.opponent()),
                    winner_amount,
                    loser_amount,
                    true,
                )
            }
            Board::Drawn { .. } => {
                let shared = self.points.on_draw.shared;
                PointsAward::new(*game.host(), *game.guest(), shared, shared, false)
            }
        };
        debug!(?award, "Award computed");
        Some(award)
    }
}
