//! Rollout policy trait for the simulation phase.
//!
//! A rollout policy picks the move to play at each step of a simulated
//! playout. Plain UCT uses uniform random moves; the trait is the seam for
//! anything smarter (playout heuristics, learned policies).

use game_core::GameState;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Trait for playout move selection.
pub trait RolloutPolicy<G: GameState>: Send + Sync {
    /// Pick one of `moves` to play from `state`.
    ///
    /// `moves` is never empty: rollouts stop before a terminal state is
    /// handed to the policy.
    fn choose(&self, state: &G, moves: &[G::Move], rng: &mut ChaCha20Rng) -> G::Move;
}

/// Uniform random playouts, the classic UCT default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl<G: GameState> RolloutPolicy<G> for UniformRollout {
    fn choose(&self, _state: &G, moves: &[G::Move], rng: &mut ChaCha20Rng) -> G::Move {
        moves[rng.gen_range(0..moves.len())].clone()
    }
}
