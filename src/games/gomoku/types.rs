//! Core domain types for five-in-a-row.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Largest board edge a [`Square`] can be validated against.
pub const MAX_BOARD_SIZE: u16 = 64;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// First-moving side, played by the game host.
    #[display("first")]
    First,
    /// Second-moving side, played by the guest.
    #[display("second")]
    Second,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Single-character mark used when rendering a board.
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

/// Error constructing a [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SquareError {
    /// Coordinates fall outside the board.
    #[display("Square ({}, {}) is outside a {}x{} board", col, row, size, size)]
    OutOfBounds {
        /// Requested column.
        col: u16,
        /// Requested row.
        row: u16,
        /// Board edge length.
        size: u16,
    },
    /// The board edge itself cannot be represented.
    #[display("Board size {} is not in 1..={}", _0, MAX_BOARD_SIZE)]
    UnsupportedBoardSize(u16),
}

impl std::error::Error for SquareError {}

/// A playable coordinate on the board.
///
/// Squares are validated once against a board size when constructed and
/// compare by coordinates only. Deserialized squares are checked against
/// [`MAX_BOARD_SIZE`]; the variant's own bounds apply when a move is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(try_from = "SquareCoords")]
#[display("({}, {})", col, row)]
pub struct Square {
    col: u16,
    row: u16,
}

/// Unchecked wire form of a [`Square`].
#[derive(Deserialize)]
struct SquareCoords {
    col: u16,
    row: u16,
}

impl TryFrom<SquareCoords> for Square {
    type Error = SquareError;

    fn try_from(coords: SquareCoords) -> Result<Self, Self::Error> {
        Square::new(coords.col, coords.row, MAX_BOARD_SIZE)
    }
}

impl Square {
    /// Creates a square, checking it lies on a `size`x`size` board.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError`] if the board size is unsupported or the
    /// coordinates fall outside it.
    #[instrument]
    pub fn new(col: u16, row: u16, size: u16) -> Result<Self, SquareError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(SquareError::UnsupportedBoardSize(size));
        }
        if col >= size || row >= size {
            return Err(SquareError::OutOfBounds { col, row, size });
        }
        Ok(Self { col, row })
    }

    /// Column index.
    pub fn col(&self) -> u16 {
        self.col
    }

    /// Row index.
    pub fn row(&self) -> u16 {
        self.row
    }

    /// Returns a copy with rows and columns swapped.
    pub fn transposed(self) -> Self {
        Self {
            col: self.row,
            row: self.col,
        }
    }

    /// Whether the square lies on a `size`x`size` board.
    pub fn fits(&self, size: u16) -> bool {
        self.col < size && self.row < size
    }

    /// Steps by `(d_col, d_row)`, staying on a `size`x`size` board.
    pub(crate) fn step(self, d_col: i32, d_row: i32, size: u16) -> Option<Self> {
        let col = i32::from(self.col) + d_col;
        let row = i32::from(self.row) + d_row;
        let size = i32::from(size);
        if (0..size).contains(&col) && (0..size).contains(&row) {
            // Both values are within 0..size, which came from a u16.
            Some(Self {
                col: col as u16,
                row: row as u16,
            })
        } else {
            None
        }
    }
}

/// Immutable mapping from squares to the player whose piece occupies them.
///
/// Adding a piece returns a new grid; the persistent map underneath shares
/// structure with earlier snapshots, so old boards stay valid and cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Square, Player)>", into = "Vec<(Square, Player)>")]
pub struct Grid {
    pieces: im::HashMap<Square, Player>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the owner of the piece on `square`, if any.
    pub fn get(&self, square: Square) -> Option<Player> {
        self.pieces.get(&square).copied()
    }

    /// Whether `square` already holds a piece.
    pub fn is_occupied(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether no piece has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns a new grid with `player`'s piece added on `square`.
    pub fn with(&self, square: Square, player: Player) -> Self {
        Self {
            pieces: self.pieces.update(square, player),
        }
    }

    /// Iterates over all pieces in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Player)> + '_ {
        self.pieces.iter().map(|(square, player)| (*square, *player))
    }

    /// Squares holding `player`'s pieces.
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(move |(_, owner)| *owner == player)
            .map(|(square, _)| square)
    }

    /// Returns the grid with every square transposed.
    pub fn transposed(&self) -> Self {
        self.iter()
            .map(|(square, player)| (square.transposed(), player))
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<(Square, Player)>> for Grid {
    fn from(pieces: Vec<(Square, Player)>) -> Self {
        Self {
            pieces: pieces.into_iter().collect(),
        }
    }
}

impl From<Grid> for Vec<(Square, Player)> {
    fn from(grid: Grid) -> Self {
        let mut pieces: Vec<_> = grid.iter().collect();
        pieces.sort();
        pieces
    }
}

/// Whose move it is and how long they have left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Turn {
    /// Player to move.
    pub player: Player,
    /// Seconds left on the mover's clock. Only an external clock decrements it.
    pub seconds_remaining: u32,
}

/// How a finished game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// Five or more in a line.
    #[display("five in a row")]
    FiveInRow,
    /// The loser's turn clock ran out.
    #[display("timeout")]
    Timeout,
    /// The loser left the game.
    #[display("forfeit")]
    Forfeit,
}

/// Board snapshot.
///
/// `Running` boards accept moves; `Won` and `Drawn` are terminal and never
/// change again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Board {
    /// Game continues.
    Running {
        /// Pieces placed so far.
        grid: Grid,
        /// Player to move and their clock.
        turn: Turn,
    },
    /// Game ended with a winner.
    Won {
        /// Final pieces.
        grid: Grid,
        /// The winner.
        winner: Player,
        /// What decided the game.
        reason: WinReason,
    },
    /// Game ended in a draw.
    Drawn {
        /// Final pieces.
        grid: Grid,
    },
}

impl Board {
    /// Pieces on the board, whatever the phase.
    pub fn grid(&self) -> &Grid {
        match self {
            Board::Running { grid, .. } | Board::Won { grid, .. } | Board::Drawn { grid } => grid,
        }
    }

    /// Whether the game is over.
    pub fn is_terminal(&self) -> bool {
        match self {
            Board::Running { .. } => false,
            Board::Won { .. } | Board::Drawn { .. } => true,
        }
    }

    /// Current turn, for running boards.
    pub fn turn(&self) -> Option<Turn> {
        match self {
            Board::Running { turn, .. } => Some(*turn),
            Board::Won { .. } | Board::Drawn { .. } => None,
        }
    }

    /// The winner, for won boards.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Board::Won { winner, .. } => Some(*winner),
            Board::Running { .. } | Board::Drawn { .. } => None,
        }
    }

    /// Returns a running board with the mover's clock set to `seconds`.
    ///
    /// Terminal boards come back unchanged.
    #[instrument(skip(self))]
    pub fn with_seconds_remaining(&self, seconds: u32) -> Self {
        match self {
            Board::Running { grid, turn } => Board::Running {
                grid: grid.clone(),
                turn: Turn::new(turn.player, seconds),
            },
            Board::Won { .. } | Board::Drawn { .. } => self.clone(),
        }
    }

    /// Ends a running board by `leaver` walking away. Terminal boards yield `None`.
    #[instrument(skip(self))]
    pub fn forfeit(&self, leaver: Player) -> Option<Self> {
        match self {
            Board::Running { grid, .. } => Some(Board::Won {
                grid: grid.clone(),
                winner: leaver.opponent(),
                reason: WinReason::Forfeit,
            }),
            Board::Won { .. } | Board::Drawn { .. } => None,
        }
    }

    /// Formats the board as a `size`x`size` text grid, row 0 on top.
    pub fn render(&self, size: u16) -> String {
        let grid = self.grid();
        let mut out = String::new();
        for row in 0..size {
            for col in 0..size {
                let mark = Square::new(col, row, size)
                    .ok()
                    .and_then(|square| grid.get(square))
                    .map_or('.', Player::symbol);
                out.push(mark);
                if col + 1 < size {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}
