//! Monte Carlo Tree Search with UCT selection for two-player zero-sum games.
//!
//! Game-agnostic: works with any rules oracle implementing the `game-core`
//! `GameState` trait.
//!
//! # Overview
//!
//! The search builds a tree by running simulations. Each simulation has
//! four phases:
//!
//! 1. **Selection**: descend from the root by UCT score while nodes are
//!    fully expanded
//! 2. **Expansion**: add one child for an untried action of the node reached
//! 3. **Simulation**: play uniform random moves to the end of the game
//! 4. **Backpropagation**: record the outcome on every node back to the root
//!
//! Once the budget is spent, the child of the root with the best mean value
//! is the decision; the exploration bonus plays no part in the final pick.
//!
//! # Usage
//!
//! ```
//! use games_tictactoe::State;
//! use mcts::best_action;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let decision = best_action(&State::new(3), 200, &mut rng).unwrap();
//!
//! println!("engine plays {}", decision.action);
//! println!("estimated value {:.2}", decision.value);
//! ```
//!
//! # Configuration
//!
//! The [`UctConfig`] struct controls search behavior:
//!
//! - `num_simulations`: number of simulations per search (default: 1000)
//! - `exploration`: UCT exploration constant (default: 1.4)
//!
//! # Rollout policies
//!
//! The simulation phase goes through the [`RolloutPolicy`] trait.
//! [`UniformRollout`] picks uniformly random legal moves; custom policies
//! can plug in playout heuristics.

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::UctConfig;
pub use node::{NodeId, OutcomeCounts, SearchNode};
pub use rollout::{RolloutPolicy, UniformRollout};
pub use search::{best_action, Decision, SearchError, UctSearch};
pub use tree::{SearchTree, TreeStats};
