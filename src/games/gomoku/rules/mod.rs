//! Game rules for five-in-a-row.
//!
//! Pure functions for evaluating a board after a placement. Rules are kept
//! apart from variant data so every variant composes the same checks.

pub mod draw;
pub mod win;

pub use draw::{full_board, is_board_full};
pub use win::{WIN_LENGTH, is_winning_placement, longest_run_through};
