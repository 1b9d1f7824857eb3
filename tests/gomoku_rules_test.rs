//! Tests for variant rules and the board state machine.

use std::sync::Arc;

use strictly_gomoku::{
    Board, BoardStateMachine, Freestyle, MoveError, Player, Pro, Square, Tiny, Turn,
    VariantRegistry, VariantRules, WinReason,
};

fn sq(col: u16, row: u16, size: u16) -> Square {
    Square::new(col, row, size).expect("Valid square")
}

fn play(rules: &dyn VariantRules, moves: &[(u16, u16)]) -> Result<Board, MoveError> {
    let size = *rules.config().board_size();
    moves.iter().try_fold(rules.initial_board(), |board, &(col, row)| {
        let player = board.turn().map_or(Player::First, |turn| turn.player);
        rules.is_move_valid(&board, player, sq(col, row, size))
    })
}

#[test]
fn test_initial_board_for_every_variant() {
    let registry = VariantRegistry::standard();
    for rules in registry.iter() {
        match rules.initial_board() {
            Board::Running { grid, turn } => {
                assert!(grid.is_empty(), "{} starts empty", rules.config().name());
                assert_eq!(turn.player, Player::First);
                assert_eq!(turn.seconds_remaining, rules.turn_timer());
            }
            other => panic!("{} starts terminal: {:?}", rules.config().name(), other),
        }
    }
}

#[test]
fn test_freestyle_column_scenario() {
    let rules = Freestyle::new();
    let moves = [
        (0, 0),
        (1, 1),
        (1, 0),
        (2, 1),
        (2, 0),
        (3, 1),
        (3, 0),
        (4, 1),
    ];
    let board = play(&rules, &moves).expect("Valid moves");
    assert!(!board.is_terminal(), "No five yet after eight moves");

    let board = rules
        .is_move_valid(&board, Player::First, sq(4, 0, 15))
        .expect("Winning move");
    match board {
        Board::Won { winner, reason, grid } => {
            assert_eq!(winner, Player::First);
            assert_eq!(reason, WinReason::FiveInRow);
            assert_eq!(grid.len(), 9);
        }
        other => panic!("Expected win, got {:?}", other),
    }
}

#[test]
fn test_game_over_checked_first() {
    let rules = Freestyle::new();
    let won = Board::Won {
        grid: Default::default(),
        winner: Player::Second,
        reason: WinReason::FiveInRow,
    };
    // Wrong player on an unplayable square still reports the finished game.
    assert_eq!(
        rules.is_move_valid(&won, Player::Second, sq(0, 0, 15)),
        Err(MoveError::GameOver)
    );
}

#[test]
fn test_position_taken_before_turn_order() {
    let rules = Freestyle::new();
    let board = play(&rules, &[(5, 5)]).expect("Valid move");
    // First player moving again on an occupied square: occupancy wins.
    assert_eq!(
        rules.is_move_valid(&board, Player::First, sq(5, 5, 15)),
        Err(MoveError::PositionTaken(sq(5, 5, 15)))
    );
}

#[test]
fn test_not_your_turn() {
    let rules = Freestyle::new();
    let board = rules.initial_board();
    assert_eq!(
        rules.is_move_valid(&board, Player::Second, sq(5, 5, 15)),
        Err(MoveError::NotYourTurn(Player::Second))
    );
}

#[test]
fn test_square_outside_variant_board_is_invalid() {
    let rules = Freestyle::new();
    let board = rules.initial_board();
    let far = sq(16, 2, 19);
    assert_eq!(
        rules.is_move_valid(&board, Player::First, far),
        Err(MoveError::InvalidPosition(far))
    );
}

#[test]
fn test_pro_opening_must_be_center() {
    let rules = Pro::new();
    let board = rules.initial_board();
    assert_eq!(
        rules.is_move_valid(&board, Player::First, sq(0, 0, 19)),
        Err(MoveError::InvalidPosition(sq(0, 0, 19)))
    );
    assert!(rules.is_move_valid(&board, Player::First, sq(9, 9, 19)).is_ok());
}

#[test]
fn test_pro_second_stone_far_enough_accepted() {
    let rules = Pro::new();
    let board = play(&rules, &[(9, 9), (10, 10)]).expect("Opening");
    let board = rules
        .is_move_valid(&board, Player::First, sq(0, 0, 19))
        .expect("Distance 9 is allowed");
    assert_eq!(board.grid().len(), 3);
}

#[test]
fn test_pro_second_stone_too_close_rejected() {
    let rules = Pro::new();
    let board = play(&rules, &[(9, 9), (3, 3)]).expect("Opening");
    assert_eq!(
        rules.is_move_valid(&board, Player::First, sq(9, 10, 19)),
        Err(MoveError::InvalidPosition(sq(9, 10, 19)))
    );
}

#[test]
fn test_expired_clock_loses_without_placing() {
    let rules = Freestyle::new();
    let board = play(&rules, &[(7, 7)]).expect("Valid move");
    let expired = board.with_seconds_remaining(0);

    let result = rules
        .is_move_valid(&expired, Player::Second, sq(8, 8, 15))
        .expect("Timeout is an outcome, not an error");
    match result {
        Board::Won { grid, winner, reason } => {
            assert_eq!(winner, Player::First);
            assert_eq!(reason, WinReason::Timeout);
            assert_eq!(grid.len(), 1, "Timed-out move is not placed");
        }
        other => panic!("Expected timeout win, got {:?}", other),
    }
}

#[test]
fn test_turn_flips_and_clock_resets() {
    let rules = Tiny::new();
    let board = rules.initial_board().with_seconds_remaining(3);
    let board = rules
        .is_move_valid(&board, Player::First, sq(0, 0, 7))
        .expect("Valid move");
    assert_eq!(board.turn(), Some(Turn::new(Player::Second, Tiny::TURN_TIMER)));
}

#[test]
fn test_tiny_draws_at_threshold() {
    let rules = Tiny::new();
    // Paired columns of four so nobody gets five.
    let moves = [
        (0, 0),
        (1, 0),
        (0, 1),
        (1, 1),
        (0, 2),
        (1, 2),
        (0, 3),
        (1, 3),
        (2, 0),
        (3, 0),
        (2, 1),
    ];
    let board = play(&rules, &moves).expect("Valid moves");
    assert!(!board.is_terminal());

    let board = rules
        .is_move_valid(&board, Player::Second, sq(3, 1, 7))
        .expect("Valid move");
    assert!(matches!(board, Board::Drawn { ref grid } if grid.len() == Tiny::DRAW_THRESHOLD));
}

#[test]
fn test_machine_rejects_replayed_move() {
    let machine = BoardStateMachine::new(Arc::new(Freestyle::new()));
    let before = machine.initial_board();
    let after = machine
        .apply(&before, Player::First, sq(3, 4, 15))
        .expect("Valid move");
    assert_eq!(
        machine.apply(&after, Player::Second, sq(3, 4, 15)),
        Err(MoveError::PositionTaken(sq(3, 4, 15)))
    );
    assert!(before.grid().is_empty(), "Earlier snapshot untouched");
}

#[test]
fn test_machine_replay_scenario() {
    let machine = BoardStateMachine::new(Arc::new(Freestyle::new()));
    let squares: Vec<Square> = [
        (0, 0),
        (1, 1),
        (1, 0),
        (2, 1),
        (2, 0),
        (3, 1),
        (3, 0),
        (4, 1),
        (4, 0),
    ]
    .iter()
    .map(|&(col, row)| sq(col, row, 15))
    .collect();
    let board = machine.replay(&squares).expect("Valid replay");
    assert_eq!(board.winner(), Some(Player::First));
}
