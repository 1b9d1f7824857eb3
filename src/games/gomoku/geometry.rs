//! Board geometry: line directions and distances.

use super::types::{Grid, Player, Square};
use strum::EnumIter;

/// The four lines that pass through any square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
    /// Column and row both increasing.
    Diagonal,
    /// Column increasing while row decreases.
    AntiDiagonal,
}

impl Direction {
    /// Unit step `(d_col, d_row)` along this line.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Chebyshev distance: the larger of the column and row deltas.
pub fn chebyshev_distance(a: Square, b: Square) -> u16 {
    let d_col = a.col().abs_diff(b.col());
    let d_row = a.row().abs_diff(b.row());
    d_col.max(d_row)
}

/// Counts `player`'s pieces contiguous with `origin` in one direction.
///
/// `origin` itself is not counted.
pub fn count_towards(
    grid: &Grid,
    origin: Square,
    player: Player,
    (d_col, d_row): (i32, i32),
    size: u16,
) -> usize {
    std::iter::successors(origin.step(d_col, d_row, size), |square| {
        square.step(d_col, d_row, size)
    })
    .take_while(|square| grid.get(*square) == Some(player))
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u16, row: u16) -> Square {
        Square::new(col, row, 19).unwrap()
    }

    #[test]
    fn test_chebyshev_takes_larger_delta() {
        assert_eq!(chebyshev_distance(sq(9, 9), sq(0, 0)), 9);
        assert_eq!(chebyshev_distance(sq(9, 9), sq(9, 10)), 1);
        assert_eq!(chebyshev_distance(sq(9, 9), sq(12, 7)), 3);
        assert_eq!(chebyshev_distance(sq(4, 4), sq(4, 4)), 0);
    }

    #[test]
    fn test_count_towards_stops_at_gap() {
        let grid = Grid::new()
            .with(sq(1, 0), Player::First)
            .with(sq(2, 0), Player::First)
            .with(sq(4, 0), Player::First);
        assert_eq!(count_towards(&grid, sq(0, 0), Player::First, (1, 0), 19), 2);
    }

    #[test]
    fn test_count_towards_stops_at_opponent() {
        let grid = Grid::new()
            .with(sq(5, 6), Player::Second)
            .with(sq(5, 7), Player::First);
        assert_eq!(count_towards(&grid, sq(5, 5), Player::Second, (0, 1), 19), 1);
    }

    #[test]
    fn test_count_towards_stops_at_edge() {
        let grid = Grid::new().with(sq(0, 0), Player::First);
        assert_eq!(count_towards(&grid, sq(1, 1), Player::First, (-1, -1), 19), 1);
    }
}
