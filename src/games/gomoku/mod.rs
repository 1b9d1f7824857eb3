//! Five-in-a-row: board types, variant rules and the board state machine.

mod geometry;
mod machine;
mod registry;
pub mod rules;
mod types;
mod variant;
mod variants;

pub use geometry::{Direction, chebyshev_distance};
pub use machine::BoardStateMachine;
pub use registry::{UnknownVariant, VariantKind, VariantRegistry};
pub use types::{Board, Grid, MAX_BOARD_SIZE, Player, Square, SquareError, Turn, WinReason};
pub use variant::{
    DrawPoints, FinishPoints, ForfeitPoints, GamePoints, MoveError, OpeningRule, VariantConfig,
    VariantRules, within_bounds,
};
pub use variants::{Freestyle, Pro, Tiny};
