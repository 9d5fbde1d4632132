//! Core types shared by every game crate and by the search engine.
//!
//! The engine is game-agnostic: it sees positions only through the
//! [`GameState`] rules oracle. A game crate implements the trait for its own
//! state type and the search plugs in unchanged.
//!
//! The model is deliberately narrow: two players, alternating turns, perfect
//! information, and a zero-sum result. Everything else (board shape, move
//! encoding, win conditions) belongs to the individual game.

use std::fmt;

use thiserror::Error;

/// The two sides of a zero-sum, turn-based game.
///
/// `X` always owns the opening move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Terminal result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Why a proposed move was rejected by [`GameState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// The move was issued for a player whose turn it is not.
    #[error("it is not {mover}'s turn")]
    WrongPlayer { mover: Player },

    /// The move targets a square or column that does not exist.
    #[error("move target is outside the board")]
    OutOfBounds,

    /// The move targets a square that is already taken (for column games,
    /// a column with no free square left).
    #[error("move target is already occupied")]
    Occupied,
}

/// Rules oracle for one concrete game.
///
/// A state value is an immutable snapshot of one position. Applying a move
/// never mutates the receiver; it returns the successor position with the
/// turn passed to the opponent.
///
/// Contract required by the search engine:
///
/// * `is_terminal` and `result` agree: a state is terminal exactly when
///   `result` is `Some`.
/// * Every non-terminal state has at least one legal action, and every
///   action returned by `legal_actions` is accepted by `apply`.
/// * `legal_actions` is exhaustive and its order is stable for a given
///   position. The list is derived from board occupancy alone; callers
///   check `is_terminal` first.
///
/// A game that breaks this contract mid-search is a bug in the game crate,
/// not a recoverable condition.
pub trait GameState: Clone {
    /// Move descriptor for this game. Pure data; the engine never inspects
    /// it beyond cloning and equality.
    type Move: Clone + fmt::Debug + PartialEq;

    /// The player who owns the next move.
    fn player_to_move(&self) -> Player;

    /// All moves available to `player_to_move`, in the game's canonical
    /// order.
    fn legal_actions(&self) -> Vec<Self::Move>;

    /// Whether the game is decided (won or drawn).
    fn is_terminal(&self) -> bool;

    /// Result of the game, `None` while it is still running.
    fn result(&self) -> Option<Outcome>;

    /// Play `mv`, returning the successor state.
    ///
    /// Fails with [`IllegalMove`] when the mover is out of turn, the target
    /// does not exist, or the target is taken. The receiver is left
    /// untouched either way.
    fn apply(&self, mv: &Self::Move) -> Result<Self, IllegalMove>;
}
