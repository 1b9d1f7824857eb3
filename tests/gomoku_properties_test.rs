//! Property tests for the rule engine.

use proptest::prelude::*;
use std::sync::Arc;

use strictly_gomoku::{
    Board, BoardStateMachine, Freestyle, Grid, MoveError, Player, Square, VariantRules, rules,
};

const SIZE: u16 = Freestyle::BOARD_SIZE;

fn square() -> impl Strategy<Value = Square> {
    (0..SIZE, 0..SIZE).prop_map(|(col, row)| Square::new(col, row, SIZE).expect("In range"))
}

fn pieces() -> impl Strategy<Value = Vec<(Square, Player)>> {
    prop::collection::vec(
        (square(), prop_oneof![Just(Player::First), Just(Player::Second)]),
        0..60,
    )
}

proptest! {
    #[test]
    fn win_detection_symmetric_under_transposition(pieces in pieces(), last in square()) {
        let grid = Grid::from(pieces).with(last, Player::First);
        let transposed = grid.transposed();
        prop_assert_eq!(
            rules::is_winning_placement(&grid, last, Player::First, SIZE),
            rules::is_winning_placement(&transposed, last.transposed(), Player::First, SIZE)
        );
        prop_assert_eq!(
            rules::longest_run_through(&grid, last, Player::First, SIZE),
            rules::longest_run_through(&transposed, last.transposed(), Player::First, SIZE)
        );
    }

    #[test]
    fn five_in_column_matches_five_in_row(col in 0..SIZE, start in 0..SIZE - 4, pick in 0usize..5) {
        let row_grid = (0..5).fold(Grid::new(), |grid, i| {
            grid.with(Square::new(start + i, col, SIZE).expect("In range"), Player::Second)
        });
        let column_grid = row_grid.transposed();
        let in_row = Square::new(start + pick as u16, col, SIZE).expect("In range");
        prop_assert!(rules::is_winning_placement(&row_grid, in_row, Player::Second, SIZE));
        prop_assert!(rules::is_winning_placement(&column_grid, in_row.transposed(), Player::Second, SIZE));
    }

    #[test]
    fn moves_grow_grid_and_alternate(squares in prop::collection::vec(square(), 1..80)) {
        let machine = BoardStateMachine::new(Arc::new(Freestyle::new()));
        let mut board = machine.initial_board();
        let mut expected = Player::First;

        for square in squares {
            let Board::Running { turn, .. } = &board else { break };
            prop_assert_eq!(turn.player, expected);

            match machine.apply(&board, expected, square) {
                Ok(next) => {
                    prop_assert_eq!(next.grid().len(), board.grid().len() + 1);
                    prop_assert_eq!(
                        machine.apply(&next, expected.opponent(), square),
                        Err(if next.is_terminal() {
                            MoveError::GameOver
                        } else {
                            MoveError::PositionTaken(square)
                        })
                    );
                    if let Some(turn) = next.turn() {
                        prop_assert_eq!(turn.player, expected.opponent());
                    }
                    board = next;
                    expected = expected.opponent();
                }
                Err(error) => {
                    prop_assert_eq!(error, MoveError::PositionTaken(square));
                }
            }
        }
    }

    #[test]
    fn every_variant_rejects_wrong_side_first(col in 0..SIZE, row in 0..SIZE) {
        let rules = Freestyle::new();
        let square = Square::new(col, row, SIZE).expect("In range");
        prop_assert_eq!(
            rules.is_move_valid(&rules.initial_board(), Player::Second, square),
            Err(MoveError::NotYourTurn(Player::Second))
        );
    }
}
