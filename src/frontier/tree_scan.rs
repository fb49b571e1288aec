use crate::frontier::Frontier;
use crate::node::{NodeId, SearchTree};

/// Reference selection rule: walk the whole tree from the root on every call and return the
/// cheapest leaf. Only a strictly lower cost replaces the current best, so ties go to the
/// leaf visited first. Costs `O(tree size)` per step.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeScan;

impl TreeScan {
    pub fn new() -> TreeScan {
        TreeScan
    }

    /// Cheapest leaf in the subtree under `from` together with its cost.
    pub fn lowest_cost_leaf(tree: &SearchTree, from: NodeId) -> (NodeId, i32) {
        // min_by_key keeps the first of several equal minima.
        tree.leaves(from)
            .into_iter()
            .map(|id| (id, tree[id].cost()))
            .min_by_key(|&(_, cost)| cost)
            .unwrap_or((from, tree[from].cost()))
    }
}

impl Frontier for TreeScan {
    fn insert(&mut self, _tree: &SearchTree, _id: NodeId) {}

    fn select(&mut self, tree: &SearchTree) -> Option<NodeId> {
        if tree.is_empty() {
            return None;
        }
        Some(Self::lowest_cost_leaf(tree, tree.root()).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell;

    #[test]
    fn single_root_is_selected() {
        let tree = SearchTree::new(cell(0, 0), 4);
        let mut scan = TreeScan::new();
        assert_eq!(scan.select(&tree), Some(tree.root()));
    }

    #[test]
    fn strictly_lower_cost_wins() {
        let mut tree = SearchTree::new(cell(1, 1), 2);
        let root = tree.root();
        let _up = tree.add_child(root, cell(0, 1), 3);
        let down = tree.add_child(root, cell(2, 1), 1);
        assert_eq!(TreeScan::lowest_cost_leaf(&tree, root), (down, 2));
    }

    /// A deep leaf found earlier in the walk beats a shallow sibling of equal cost.
    #[test]
    fn ties_follow_depth_first_order() {
        let mut tree = SearchTree::new(cell(1, 1), 2);
        let root = tree.root();
        let up = tree.add_child(root, cell(0, 1), 1);
        let down = tree.add_child(root, cell(2, 1), 2);
        // up's child costs g=2 + h=1 == down's cost of 1 + 2.
        let up_left = tree.add_child(up, cell(0, 0), 1);
        assert_eq!(tree[up_left].cost(), tree[down].cost());
        assert_eq!(TreeScan::lowest_cost_leaf(&tree, root).0, up_left);
    }

    #[test]
    fn dead_ends_lose_to_live_leaves() {
        let mut tree = SearchTree::new(cell(1, 1), 0);
        let root = tree.root();
        let a = tree.add_child(root, cell(0, 1), 0);
        let b = tree.add_child(root, cell(2, 1), 5);
        tree.mark_dead_end(a, 100);
        assert_eq!(TreeScan::lowest_cost_leaf(&tree, root).0, b);
    }
}
