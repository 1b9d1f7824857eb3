//! Tiny: a small board with a low draw threshold, used to exercise every
//! terminal path of the engine quickly.

use super::super::variant::{
    DrawPoints, FinishPoints, ForfeitPoints, GamePoints, OpeningRule, VariantConfig, VariantRules,
};

/// Minimal 7x7 ruleset that is drawn once twelve pieces are down.
#[derive(Debug, Clone)]
pub struct Tiny {
    config: VariantConfig,
    points: GamePoints,
}

impl Tiny {
    /// Registry key.
    pub const NAME: &'static str = "tiny";
    /// Board edge length.
    pub const BOARD_SIZE: u16 = 7;
    /// Seconds per turn.
    pub const TURN_TIMER: u32 = 10;
    /// Pieces at which the game is drawn.
    pub const DRAW_THRESHOLD: usize = 12;

    /// Creates the ruleset.
    pub fn new() -> Self {
        Self {
            config: VariantConfig::new(
                Self::NAME.to_string(),
                OpeningRule::Unrestricted,
                Self::BOARD_SIZE,
            ),
            points: GamePoints::new(
                FinishPoints::new(1, 0),
                DrawPoints::new(1),
                ForfeitPoints::new(1, 0),
            ),
        }
    }
}

impl Default for Tiny {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantRules for Tiny {
    fn config(&self) -> &VariantConfig {
        &self.config
    }

    fn points(&self) -> &GamePoints {
        &self.points
    }

    fn turn_timer(&self) -> u32 {
        Self::TURN_TIMER
    }

    fn draw_threshold(&self) -> usize {
        Self::DRAW_THRESHOLD
    }
}
