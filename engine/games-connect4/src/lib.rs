//! Connect-four rules oracle.
//!
//! The second game behind the [`GameState`] seam: a 7×6 grid where pieces
//! drop to the lowest free square of a column and four in a line (any
//! direction) wins. Exists to show that the search engine takes any game
//! satisfying the `game-core` contract, not just tic-tac-toe.

use std::fmt;

use game_core::{GameState, IllegalMove, Outcome, Player};

/// Number of columns.
pub const COLS: usize = 7;
/// Number of rows.
pub const ROWS: usize = 6;
/// Total squares on the board.
pub const BOARD_SIZE: usize = COLS * ROWS;

/// Line directions scanned for a win: right, up, up-right, down-right.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A drop: `mover` adds a piece to `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub column: usize,
    pub mover: Player,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in column {}", self.mover, self.column)
    }
}

/// Connect-four position. Row 0 is the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    cells: [Option<Player>; BOARD_SIZE],
    heights: [usize; COLS],
    next_to_move: Player,
}

impl State {
    /// Empty board with X to move.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            heights: [0; COLS],
            next_to_move: Player::X,
        }
    }

    /// Piece at (`column`, `row`), if any. Panics off-board.
    pub fn cell(&self, column: usize, row: usize) -> Option<Player> {
        assert!(
            column < COLS && row < ROWS,
            "cell ({column}, {row}) is off the board"
        );
        self.cells[Self::pos(column, row)]
    }

    /// Number of pieces stacked in `column`.
    #[inline]
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    #[inline]
    fn pos(column: usize, row: usize) -> usize {
        row * COLS + column
    }

    /// Player owning four in a line, if any.
    pub fn winner(&self) -> Option<Player> {
        for column in 0..COLS {
            for row in 0..self.heights[column] {
                let Some(piece) = self.cells[Self::pos(column, row)] else {
                    continue;
                };
                for (dc, dr) in DIRECTIONS {
                    if self.run_from(column, row, dc, dr, piece) {
                        return Some(piece);
                    }
                }
            }
        }
        None
    }

    /// Whether a run of four `piece`s starts at (`column`, `row`) in the
    /// given direction.
    fn run_from(&self, column: usize, row: usize, dc: isize, dr: isize, piece: Player) -> bool {
        for step in 1..4isize {
            let c = column as isize + dc * step;
            let r = row as isize + dr * step;
            if c < 0 || c >= COLS as isize || r < 0 || r >= ROWS as isize {
                return false;
            }
            if self.cells[Self::pos(c as usize, r as usize)] != Some(piece) {
                return false;
            }
        }
        true
    }

    fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == ROWS)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for State {
    type Move = Move;

    fn player_to_move(&self) -> Player {
        self.next_to_move
    }

    /// Columns with a free square, left to right. Occupancy-based; callers
    /// check `is_terminal` first.
    fn legal_actions(&self) -> Vec<Move> {
        (0..COLS)
            .filter(|&column| self.heights[column] < ROWS)
            .map(|column| Move {
                column,
                mover: self.next_to_move,
            })
            .collect()
    }

    fn is_terminal(&self) -> bool {
        self.result().is_some()
    }

    fn result(&self) -> Option<Outcome> {
        if let Some(winner) = self.winner() {
            return Some(Outcome::Win(winner));
        }
        if self.is_full() {
            return Some(Outcome::Draw);
        }
        None
    }

    fn apply(&self, mv: &Move) -> Result<Self, IllegalMove> {
        if mv.mover != self.next_to_move {
            return Err(IllegalMove::WrongPlayer { mover: mv.mover });
        }
        if mv.column >= COLS {
            return Err(IllegalMove::OutOfBounds);
        }
        if self.heights[mv.column] == ROWS {
            return Err(IllegalMove::Occupied);
        }

        let mut next = *self;
        next.cells[Self::pos(mv.column, self.heights[mv.column])] = Some(mv.mover);
        next.heights[mv.column] += 1;
        next.next_to_move = self.next_to_move.opponent();
        Ok(next)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            if row + 1 < ROWS {
                writeln!(f)?;
            }
            for column in 0..COLS {
                if column > 0 {
                    write!(f, " ")?;
                }
                match self.cells[Self::pos(column, row)] {
                    None => write!(f, ".")?,
                    Some(player) => write!(f, "{player}")?,
                }
            }
        }
        Ok(())
    }
}
