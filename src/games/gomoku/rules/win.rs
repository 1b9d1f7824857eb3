//! Win detection for five-in-a-row.
//!
//! Only the four lines through the square just played can have changed, so
//! those are the only lines inspected.

use super::super::geometry::{Direction, count_towards};
use super::super::{Grid, Player, Square};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Run length that wins the game.
pub const WIN_LENGTH: usize = 5;

/// Longest run of `player`'s pieces on any line through `square`.
///
/// `square` counts as one of the player's pieces whether or not the grid
/// already holds it.
#[instrument(skip(grid))]
pub fn longest_run_through(grid: &Grid, square: Square, player: Player, size: u16) -> usize {
    Direction::iter()
        .map(|direction| {
            let (d_col, d_row) = direction.delta();
            1 + count_towards(grid, square, player, (d_col, d_row), size)
                + count_towards(grid, square, player, (-d_col, -d_row), size)
        })
        .max()
        .unwrap_or(1)
}

/// Whether placing on `square` gives `player` five or more in a line.
#[instrument(skip(grid))]
pub fn is_winning_placement(grid: &Grid, square: Square, player: Player, size: u16) -> bool {
    longest_run_through(grid, square, player, size) >= WIN_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: u16 = 15;

    fn grid_of(player: Player, squares: &[(u16, u16)]) -> Grid {
        squares.iter().fold(Grid::new(), |grid, &(col, row)| {
            grid.with(Square::new(col, row, SIZE).unwrap(), player)
        })
    }

    fn sq(col: u16, row: u16) -> Square {
        Square::new(col, row, SIZE).unwrap()
    }

    #[test]
    fn test_no_winner_four_in_row() {
        let grid = grid_of(Player::First, &[(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert!(!is_winning_placement(&grid, sq(3, 0), Player::First, SIZE));
    }

    #[test]
    fn test_winner_row_completed_in_middle() {
        let grid = grid_of(Player::First, &[(3, 7), (4, 7), (5, 7), (6, 7), (7, 7)]);
        assert!(is_winning_placement(&grid, sq(5, 7), Player::First, SIZE));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let grid = grid_of(Player::Second, &[(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]);
        assert!(is_winning_placement(&grid, sq(4, 0), Player::Second, SIZE));
    }

    #[test]
    fn test_overline_still_wins() {
        let grid = grid_of(
            Player::First,
            &[(2, 2), (3, 3), (4, 4), (5, 5), (6, 6), (7, 7)],
        );
        assert_eq!(longest_run_through(&grid, sq(4, 4), Player::First, SIZE), 6);
        assert!(is_winning_placement(&grid, sq(4, 4), Player::First, SIZE));
    }

    #[test]
    fn test_opponent_piece_breaks_run() {
        let grid = grid_of(Player::First, &[(0, 0), (0, 1), (0, 3), (0, 4)])
            .with(sq(0, 2), Player::Second);
        assert!(!is_winning_placement(&grid, sq(0, 4), Player::First, SIZE));
    }

    #[test]
    fn test_run_along_board_edge() {
        let grid = grid_of(Player::First, &[(14, 10), (14, 11), (14, 12), (14, 13), (14, 14)]);
        assert!(is_winning_placement(&grid, sq(14, 14), Player::First, SIZE));
    }
}
