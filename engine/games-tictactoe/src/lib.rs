//! Tic-tac-toe rules oracle.
//!
//! The reference game for the search engine: an N×N board (3×3 by default)
//! where a full row, column, or diagonal wins. The state type implements the
//! [`GameState`] trait from `game-core`, so it plugs straight into the
//! `mcts` crate.
//!
//! # Usage
//!
//! ```rust
//! use game_core::{GameState, Player};
//! use games_tictactoe::{Move, State};
//!
//! let board = State::new(3);
//! assert_eq!(board.legal_actions().len(), 9);
//!
//! let mv = Move { row: 1, col: 1, mover: Player::X };
//! let next = board.apply(&mv).unwrap();
//! assert_eq!(next.player_to_move(), Player::O);
//! ```

use std::fmt;

use game_core::{GameState, IllegalMove, Outcome, Player};
use thiserror::Error;

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Owner of the square, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    /// Character used by [`State`]'s `Display` output and layout parsing.
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '.' | '_' => Some(Cell::Empty),
            'x' | 'X' => Some(Cell::X),
            'o' | 'O' => Some(Cell::O),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Cell {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// A placement: `mover` claims the square at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub mover: Player,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.mover, self.row, self.col)
    }
}

/// A malformed textual board layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected} (board must be square)")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell character '{character}' at row {row}, column {col}")]
    UnknownCell {
        character: char,
        row: usize,
        col: usize,
    },
}

/// Tic-tac-toe position: board contents plus the player on turn.
///
/// Immutable in play: [`GameState::apply`] returns a new value and leaves
/// the receiver untouched. The result is derived from the board on demand,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Row-major cells, `size * size` entries.
    cells: Vec<Cell>,
    size: usize,
    next_to_move: Player,
}

impl State {
    /// Empty `size`×`size` board with X to move.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; size * size],
            size,
            next_to_move: Player::X,
        }
    }

    /// Parse a position from text: one line per row, cells written as
    /// `.`/`_` (empty), `X`, or `O`, optionally separated by spaces.
    /// Blank lines are skipped. The grid must be square.
    pub fn from_layout(text: &str, next_to_move: Player) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let marks: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if marks.len() != size {
                return Err(LayoutError::NotSquare {
                    row,
                    found: marks.len(),
                    expected: size,
                });
            }
            for (col, ch) in marks.into_iter().enumerate() {
                let cell = Cell::from_char(ch).ok_or(LayoutError::UnknownCell {
                    character: ch,
                    row,
                    col,
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            cells,
            size,
            next_to_move,
        })
    }

    /// Board side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Square at (`row`, `col`). Panics when the coordinate is off-board.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) is outside a {0}x{0} board",
            self.size
        );
        self.cells[row * self.size + col]
    }

    /// Player holding a full row, column, or diagonal, if any.
    pub fn winner(&self) -> Option<Player> {
        let n = self.size;
        for row in 0..n {
            if let Some(p) = line_owner((0..n).map(|col| self.cells[row * n + col])) {
                return Some(p);
            }
        }
        for col in 0..n {
            if let Some(p) = line_owner((0..n).map(|row| self.cells[row * n + col])) {
                return Some(p);
            }
        }
        if let Some(p) = line_owner((0..n).map(|i| self.cells[i * n + i])) {
            return Some(p);
        }
        if let Some(p) = line_owner((0..n).map(|i| self.cells[i * n + (n - 1 - i)])) {
            return Some(p);
        }
        None
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Owner of a complete line, `None` if it is broken or has an empty square.
fn line_owner(mut line: impl Iterator<Item = Cell>) -> Option<Player> {
    let owner = line.next()?.player()?;
    if line.all(|cell| cell.player() == Some(owner)) {
        Some(owner)
    } else {
        None
    }
}

impl GameState for State {
    type Move = Move;

    fn player_to_move(&self) -> Player {
        self.next_to_move
    }

    /// Empty squares in row-major order, claimed by the player on turn.
    /// Derived from occupancy alone; callers check `is_terminal` first.
    fn legal_actions(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[row * self.size + col] == Cell::Empty {
                    moves.push(Move {
                        row,
                        col,
                        mover: self.next_to_move,
                    });
                }
            }
        }
        moves
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
        if mv.row >= self.size || mv.col >= self.size {
            return Err(IllegalMove::OutOfBounds);
        }
        if self.cells[mv.row * self.size + mv.col] != Cell::Empty {
            return Err(IllegalMove::Occupied);
        }

        let mut next = self.clone();
        next.cells[mv.row * self.size + mv.col] = Cell::from(mv.mover);
        next.next_to_move = self.next_to_move.opponent();
        Ok(next)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cell(row, col).as_char())?;
            }
        }
        Ok(())
    }
}
