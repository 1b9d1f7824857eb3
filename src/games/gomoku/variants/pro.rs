//! Pro opening: the game starts on the center and the first player's second
//! stone must keep its distance.

use super::super::geometry::chebyshev_distance;
use super::super::variant::{
    DrawPoints, FinishPoints, ForfeitPoints, GamePoints, MoveError, OpeningRule, VariantConfig,
    VariantRules, within_bounds,
};
use super::super::{Grid, Player, Square};
use tracing::{debug, instrument};

/// Pro-opening five-in-a-row on a 19x19 board.
#[derive(Debug, Clone)]
pub struct Pro {
    config: VariantConfig,
    points: GamePoints,
    center: Square,
    min_distance: u16,
}

impl Pro {
    /// Registry key.
    pub const NAME: &'static str = "pro";
    /// Board edge length.
    pub const BOARD_SIZE: u16 = 19;
    /// Seconds per turn.
    pub const TURN_TIMER: u32 = 60;
    /// Minimum Chebyshev distance of the first player's second stone.
    pub const MIN_DISTANCE: u16 = 3;

    /// Creates the ruleset.
    pub fn new() -> Self {
        let mid = Self::BOARD_SIZE / 2;
        Self {
            config: VariantConfig::new(
                Self::NAME.to_string(),
                OpeningRule::Pro {
                    min_distance: Self::MIN_DISTANCE,
                },
                Self::BOARD_SIZE,
            ),
            points: GamePoints::new(
                FinishPoints::new(20, 5),
                DrawPoints::new(10),
                ForfeitPoints::new(20, 0),
            ),
            center: Square::new(mid, mid, Self::BOARD_SIZE)
                .unwrap_or_else(|e| unreachable!("center of a {} board: {e}", Self::BOARD_SIZE)),
            min_distance: Self::MIN_DISTANCE,
        }
    }

    /// The square every game must open on.
    pub fn center(&self) -> Square {
        self.center
    }
}

impl Default for Pro {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantRules for Pro {
    fn config(&self) -> &VariantConfig {
        &self.config
    }

    fn points(&self) -> &GamePoints {
        &self.points
    }

    fn turn_timer(&self) -> u32 {
        Self::TURN_TIMER
    }

    #[instrument(skip(self, grid))]
    fn check_placement(&self, grid: &Grid, player: Player, square: Square) -> Result<(), MoveError> {
        within_bounds(square, Self::BOARD_SIZE)?;

        if grid.is_empty() {
            if square != self.center {
                debug!(center = %self.center, "Opening stone must go on the center");
                return Err(MoveError::InvalidPosition(square));
            }
            return Ok(());
        }

        if player == Player::First {
            let mut own = grid.squares_of(Player::First);
            if let (Some(first), None) = (own.next(), own.next())
                && chebyshev_distance(first, square) < self.min_distance
            {
                debug!(%first, min_distance = self.min_distance, "Second stone too close to the first");
                return Err(MoveError::InvalidPosition(square));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u16, row: u16) -> Square {
        Square::new(col, row, Pro::BOARD_SIZE).unwrap()
    }

    #[test]
    fn test_center_is_nine_nine() {
        assert_eq!(Pro::new().center(), sq(9, 9));
    }

    #[test]
    fn test_opening_off_center_rejected() {
        let pro = Pro::new();
        assert_eq!(
            pro.check_placement(&Grid::new(), Player::First, sq(3, 3)),
            Err(MoveError::InvalidPosition(sq(3, 3)))
        );
    }

    #[test]
    fn test_second_player_unconstrained() {
        let pro = Pro::new();
        let grid = Grid::new().with(sq(9, 9), Player::First);
        assert!(pro.check_placement(&grid, Player::Second, sq(9, 10)).is_ok());
    }

    #[test]
    fn test_exactly_min_distance_allowed() {
        let pro = Pro::new();
        let grid = Grid::new()
            .with(sq(9, 9), Player::First)
            .with(sq(10, 10), Player::Second);
        assert!(pro.check_placement(&grid, Player::First, sq(12, 9)).is_ok());
        assert_eq!(
            pro.check_placement(&grid, Player::First, sq(11, 11)),
            Err(MoveError::InvalidPosition(sq(11, 11)))
        );
    }

    #[test]
    fn test_third_stone_unconstrained() {
        let pro = Pro::new();
        let grid = Grid::new()
            .with(sq(9, 9), Player::First)
            .with(sq(10, 10), Player::Second)
            .with(sq(0, 0), Player::First)
            .with(sq(1, 1), Player::Second);
        assert!(pro.check_placement(&grid, Player::First, sq(9, 10)).is_ok());
    }
}
