//! Search tree node representation.
//!
//! Each node holds the game state reached by playing an action from its
//! parent, plus the visit statistics UCT selection reads.

use game_core::{GameState, Outcome, Player};
use rand_chacha::ChaCha20Rng;

use crate::rollout::RolloutPolicy;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Tally of simulation outcomes backpropagated through a node.
///
/// Keeping wins per player (rather than a single signed sum) lets a node's
/// value be read from either player's perspective, and keeps draws from
/// counting toward anyone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl OutcomeCounts {
    /// Record one simulation outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Player::X) => self.x_wins += 1,
            Outcome::Win(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Wins recorded for `player`.
    pub fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Total outcomes recorded.
    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<G: GameState> {
    /// Parent node index (NONE for root).
    pub parent: NodeId,

    /// Action that led to this node from the parent (None for root).
    pub action: Option<G::Move>,

    /// Game state at this node.
    pub state: G,

    /// Number of times this node has been visited.
    pub visit_count: u32,

    /// Outcome tallies backpropagated through this node.
    pub outcome_counts: OutcomeCounts,

    /// Actions not yet expanded into children. `None` until first asked for;
    /// the list is computed once and popped from as children are added.
    pub untried: Option<Vec<G::Move>>,

    /// Children in expansion order. Empty until the node is expanded.
    pub children: Vec<NodeId>,
}

impl<G: GameState> SearchNode<G> {
    /// Create a new root node.
    pub fn new_root(state: G) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            visit_count: 0,
            outcome_counts: OutcomeCounts::default(),
            untried: None,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: G::Move, state: G) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            visit_count: 0,
            outcome_counts: OutcomeCounts::default(),
            untried: None,
            children: Vec::new(),
        }
    }

    /// Actions not yet tried from this node, computing the list on first
    /// access. Expansion pops from this list, so it shrinks over time.
    pub fn untried_actions(&mut self) -> &mut Vec<G::Move> {
        let state = &self.state;
        self.untried.get_or_insert_with(|| state.legal_actions())
    }

    /// Whether every legal action already has a child node.
    pub fn is_fully_expanded(&mut self) -> bool {
        self.untried_actions().is_empty()
    }

    /// Whether the game is over at this node.
    #[inline]
    pub fn is_terminal_node(&self) -> bool {
        self.state.is_terminal()
    }

    /// Total value from `perspective`: wins minus losses. Draws contribute
    /// nothing.
    #[inline]
    pub fn q(&self, perspective: Player) -> f64 {
        let wins = self.outcome_counts.wins_for(perspective) as f64;
        let losses = self.outcome_counts.wins_for(perspective.opponent()) as f64;
        wins - losses
    }

    /// Mean value per visit from `perspective`. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self, perspective: Player) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.q(perspective) / self.visit_count as f64
        }
    }

    /// UCT score for child selection, from `perspective` (the player choosing
    /// at the parent):
    ///
    /// ```text
    /// UCT = Q/N + c * sqrt(2 * ln(N_parent) / N)
    /// ```
    ///
    /// Higher is better. Panics on an unvisited node; selection only scores
    /// children once every child has at least one visit.
    pub fn uct_score(&self, perspective: Player, parent_visits: u32, exploration: f64) -> f64 {
        assert!(self.visit_count > 0, "uct_score on unvisited node");

        let n = self.visit_count as f64;
        let exploit = self.q(perspective) / n;
        let explore = exploration * (2.0 * (parent_visits as f64).ln() / n).sqrt();
        exploit + explore
    }

    /// Play random moves from this node's state until the game ends and
    /// return the outcome. The tree is not modified.
    pub fn rollout<P: RolloutPolicy<G>>(&self, policy: &P, rng: &mut ChaCha20Rng) -> Outcome {
        let mut state = self.state.clone();
        while !state.is_terminal() {
            let moves = state.legal_actions();
            let mv = policy.choose(&state, &moves, rng);
            state = state
                .apply(&mv)
                .expect("rollout move came from legal_actions");
        }
        state
            .result()
            .expect("terminal state must have a result")
    }
}
