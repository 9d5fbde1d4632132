//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices,
//! so parent and child links are plain numbers rather than owning pointers.

use game_core::{GameState, Outcome};

use crate::node::{NodeId, SearchNode};

/// UCT search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<G: GameState> {
    /// Arena storing all nodes.
    nodes: Vec<SearchNode<G>>,

    /// Root node index (always 0 after construction).
    root: NodeId,
}

impl<G: GameState> SearchTree<G> {
    /// Create a new tree rooted at the given state.
    pub fn new(root_state: G) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: SearchNode<G>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode<G>] {
        &self.nodes
    }

    /// Expand one untried action of `node_id` into a new child and return
    /// the child's ID. Panics if the node has no untried actions left.
    pub fn expand(&mut self, node_id: NodeId) -> NodeId {
        let action = self
            .get_mut(node_id)
            .untried_actions()
            .pop()
            .expect("expand called on a fully expanded node");
        let child_state = self
            .get(node_id)
            .state
            .apply(&action)
            .expect("rules oracle rejected one of its own legal actions");

        let child_id = self.allocate(SearchNode::new_child(node_id, action, child_state));
        self.get_mut(node_id).children.push(child_id);
        child_id
    }

    /// Select the child of `node_id` with the highest UCT score, from the
    /// perspective of the player to move at `node_id`. Ties keep the
    /// earliest-expanded child.
    ///
    /// Panics if the node has no children or any child is unvisited; callers
    /// only select among fully expanded nodes.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> NodeId {
        let node = self.get(node_id);
        let perspective = node.state.player_to_move();
        let parent_visits = node.visit_count;

        let mut best = *node
            .children
            .first()
            .expect("select_child on childless node");
        let mut best_score = self
            .get(best)
            .uct_score(perspective, parent_visits, exploration);

        for &child_id in &node.children[1..] {
            let score = self
                .get(child_id)
                .uct_score(perspective, parent_visits, exploration);
            if score > best_score {
                best = child_id;
                best_score = score;
            }
        }
        best
    }

    /// Record one simulation outcome on every node from `leaf_id` up to and
    /// including the root.
    pub fn backpropagate(&mut self, leaf_id: NodeId, outcome: Outcome) {
        let mut current = leaf_id;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.outcome_counts.record(outcome);
            current = node.parent;
        }
    }

    /// Statistics about the tree for logging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.get(self.root).visit_count,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|&id| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Player;
    use games_tictactoe::State;

    #[test]
    fn test_new_tree() {
        let tree = SearchTree::new(State::new(3));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert!(root.action.is_none());
    }

    #[test]
    fn test_expand_pops_from_the_end() {
        let mut tree = SearchTree::new(State::new(3));

        // Legal actions are row-major, so the last square expands first.
        let child_id = tree.expand(tree.root());
        let child = tree.get(child_id);
        let action = child.action.clone().unwrap();
        assert_eq!((action.row, action.col), (2, 2));

        let root = tree.get_mut(tree.root());
        assert_eq!(root.untried_actions().len(), 8);
        assert_eq!(root.children, vec![child_id]);
    }

    #[test]
    fn test_expand_applies_the_action() {
        let mut tree = SearchTree::new(State::new(3));
        let child_id = tree.expand(tree.root());

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.state.cell(2, 2).player(), Some(Player::X));
        assert_eq!(child.state.player_to_move(), Player::O);
    }

    #[test]
    fn test_backpropagate_walks_to_the_root() {
        let mut tree = SearchTree::new(State::new(3));
        let child_id = tree.expand(tree.root());
        let grandchild_id = tree.expand(child_id);

        tree.backpropagate(grandchild_id, Outcome::Win(Player::X));
        tree.backpropagate(grandchild_id, Outcome::Draw);

        for id in [grandchild_id, child_id, tree.root()] {
            let node = tree.get(id);
            assert_eq!(node.visit_count, 2);
            assert_eq!(node.outcome_counts.wins_for(Player::X), 1);
            assert_eq!(node.outcome_counts.draws(), 1);
        }
    }

    #[test]
    fn test_backpropagate_touches_only_the_path() {
        let mut tree = SearchTree::new(State::new(3));
        let first = tree.expand(tree.root());
        let second = tree.expand(tree.root());

        tree.backpropagate(first, Outcome::Win(Player::O));

        assert_eq!(tree.get(first).visit_count, 1);
        assert_eq!(tree.get(second).visit_count, 0);
        assert_eq!(tree.get(tree.root()).visit_count, 1);
    }

    #[test]
    fn test_select_child_picks_the_higher_value() {
        let mut tree = SearchTree::new(State::new(3));
        let first = tree.expand(tree.root());
        let second = tree.expand(tree.root());

        // Root is X to move: the second child carries two X wins, the first
        // one win each way.
        tree.backpropagate(first, Outcome::Win(Player::X));
        tree.backpropagate(first, Outcome::Win(Player::O));
        tree.backpropagate(second, Outcome::Win(Player::X));
        tree.backpropagate(second, Outcome::Win(Player::X));

        assert_eq!(tree.select_child(tree.root(), 0.0), second);
    }

    #[test]
    fn test_select_child_breaks_ties_toward_the_first_child() {
        let mut tree = SearchTree::new(State::new(3));
        let first = tree.expand(tree.root());
        let second = tree.expand(tree.root());

        // Identical statistics on both children.
        tree.backpropagate(first, Outcome::Draw);
        tree.backpropagate(second, Outcome::Draw);

        assert_eq!(tree.select_child(tree.root(), 1.4), first);
        assert_eq!(tree.select_child(tree.root(), 0.0), first);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = SearchTree::new(State::new(3));
        let child_id = tree.expand(tree.root());
        let grandchild_id = tree.expand(child_id);
        tree.expand(tree.root());
        tree.backpropagate(grandchild_id, Outcome::Draw);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.root_visits, 1);
        assert_eq!(stats.max_depth, 2);
    }
}
