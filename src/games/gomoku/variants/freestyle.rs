//! Freestyle: any empty square, five or more in a row wins.

use super::super::variant::{
    DrawPoints, FinishPoints, ForfeitPoints, GamePoints, OpeningRule, VariantConfig, VariantRules,
};

/// Freestyle five-in-a-row on a 15x15 board.
#[derive(Debug, Clone)]
pub struct Freestyle {
    config: VariantConfig,
    points: GamePoints,
}

impl Freestyle {
    /// Registry key.
    pub const NAME: &'static str = "freestyle";
    /// Board edge length.
    pub const BOARD_SIZE: u16 = 15;
    /// Seconds per turn.
    pub const TURN_TIMER: u32 = 60;

    /// Creates the ruleset.
    pub fn new() -> Self {
        Self {
            config: VariantConfig::new(
                Self::NAME.to_string(),
                OpeningRule::Unrestricted,
                Self::BOARD_SIZE,
            ),
            points: GamePoints::new(
                FinishPoints::new(10, 2),
                DrawPoints::new(5),
                ForfeitPoints::new(10, 0),
            ),
        }
    }
}

impl Default for Freestyle {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantRules for Freestyle {
    fn config(&self) -> &VariantConfig {
        &self.config
    }

    fn points(&self) -> &GamePoints {
        &self.points
    }

    fn turn_timer(&self) -> u32 {
        Self::TURN_TIMER
    }
}
