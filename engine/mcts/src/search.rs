//! UCT search implementation.
//!
//! Implements the classic four-phase loop:
//! 1. Selection: descend from the root by UCT score while nodes are fully
//!    expanded, stopping at a terminal node or one with untried actions
//! 2. Expansion: add one child for one untried action
//! 3. Simulation: random playout from the new node to the end of the game
//! 4. Backpropagation: record the outcome on every node up to the root
//!
//! The final move choice ignores the exploration term entirely and takes
//! the child with the best mean value.

use game_core::GameState;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::UctConfig;
use crate::node::NodeId;
use crate::rollout::{RolloutPolicy, UniformRollout};
use crate::tree::SearchTree;

/// Errors that can occur when setting up a search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("cannot search from a terminal position")]
    TerminalRoot,

    #[error("simulation budget must be at least 1")]
    ZeroBudget,
}

/// Result of a UCT search.
#[derive(Debug, Clone)]
pub struct Decision<G: GameState> {
    /// Best action found.
    pub action: G::Move,

    /// State after playing `action`.
    pub state: G,

    /// Mean value of the chosen child, from the root player's perspective.
    /// Ranges from -1.0 (every simulation lost) to 1.0 (every one won).
    pub value: f64,

    /// Number of simulations performed.
    pub simulations: u32,
}

/// UCT search over one root position.
pub struct UctSearch<'a, G: GameState, P: RolloutPolicy<G>> {
    tree: SearchTree<G>,
    policy: &'a P,
    config: UctConfig,
}

impl<'a, G: GameState, P: RolloutPolicy<G>> UctSearch<'a, G, P> {
    /// Create a new search rooted at `root`.
    ///
    /// Fails if the game is already over or the simulation budget is zero;
    /// both would leave the search with nothing to choose from.
    pub fn new(root: G, policy: &'a P, config: UctConfig) -> Result<Self, SearchError> {
        if config.num_simulations == 0 {
            return Err(SearchError::ZeroBudget);
        }
        if root.is_terminal() {
            return Err(SearchError::TerminalRoot);
        }

        Ok(Self {
            tree: SearchTree::new(root),
            policy,
            config,
        })
    }

    /// Run the configured number of simulations and return the decision.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Decision<G> {
        for _ in 0..self.config.num_simulations {
            self.simulate(rng);
        }

        // Final pick is pure exploitation: best mean value, no bonus term.
        let root = self.tree.root();
        let perspective = self.tree.get(root).state.player_to_move();
        let best = self.tree.select_child(root, 0.0);

        let chosen = self.tree.get(best);
        let decision = Decision {
            action: chosen
                .action
                .clone()
                .expect("child nodes always carry an action"),
            state: chosen.state.clone(),
            value: chosen.mean_value(perspective),
            simulations: self.tree.get(root).visit_count,
        };

        let stats = self.tree.stats();
        debug!(
            simulations = decision.simulations,
            tree_nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            value = decision.value,
            action = ?decision.action,
            "search complete"
        );

        decision
    }

    /// One simulation: select a leaf, roll out, backpropagate.
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        let leaf = self.select_leaf();
        let outcome = self.tree.get(leaf).rollout(self.policy, rng);
        self.tree.backpropagate(leaf, outcome);

        trace!(
            leaf = leaf.0,
            outcome = %outcome,
            tree_nodes = self.tree.len(),
            "simulation complete"
        );
    }

    /// Descend by UCT score until reaching a terminal node, or expand the
    /// first node found with untried actions.
    fn select_leaf(&mut self) -> NodeId {
        let mut current = self.tree.root();
        loop {
            if self.tree.get(current).is_terminal_node() {
                return current;
            }
            if !self.tree.get_mut(current).is_fully_expanded() {
                return self.tree.expand(current);
            }
            current = self.tree.select_child(current, self.config.exploration);
        }
    }

    /// The search tree, for inspection after `run`.
    pub fn tree(&self) -> &SearchTree<G> {
        &self.tree
    }
}

/// Convenience function: search `root` with uniform rollouts and default
/// settings, returning the decision.
pub fn best_action<G: GameState>(
    root: &G,
    simulations: u32,
    rng: &mut ChaCha20Rng,
) -> Result<Decision<G>, SearchError> {
    let policy = UniformRollout;
    let config = UctConfig::default().with_simulations(simulations);
    let mut search = UctSearch::new(root.clone(), &policy, config)?;
    Ok(search.run(rng))
}
