//! Draw detection for five-in-a-row.

use super::super::Grid;
use tracing::instrument;

/// Number of squares on a `size`x`size` board.
pub fn full_board(size: u16) -> usize {
    usize::from(size) * usize::from(size)
}

/// Checks if the grid has reached the variant's "board full" threshold.
///
/// A full board with no winner on the last placement is a draw.
#[instrument(skip(grid), fields(pieces = grid.len()))]
pub fn is_board_full(grid: &Grid, threshold: usize) -> bool {
    grid.len() >= threshold
}

#[cfg(test)]
mod tests {
    use super::super::super::{Player, Square};
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_board_full(&Grid::new(), full_board(15)));
    }

    #[test]
    fn test_full_three_by_three() {
        let grid = (0..3u16)
            .flat_map(|row| (0..3u16).map(move |col| (col, row)))
            .enumerate()
            .fold(Grid::new(), |grid, (i, (col, row))| {
                let player = if i % 2 == 0 { Player::First } else { Player::Second };
                grid.with(Square::new(col, row, 3).unwrap(), player)
            });
        assert_eq!(grid.len(), 9);
        assert!(is_board_full(&grid, full_board(3)));
    }

    #[test]
    fn test_reduced_threshold() {
        let grid = Grid::new()
            .with(Square::new(0, 0, 7).unwrap(), Player::First)
            .with(Square::new(6, 6, 7).unwrap(), Player::Second);
        assert!(is_board_full(&grid, 2));
        assert!(!is_board_full(&grid, 3));
    }
}
