//! Leaf selection strategies.
//!
//! Both strategies pick the leaf with the lowest `g + h` cost and break ties in favour of
//! the leaf met first in a depth-first walk that visits children in generation order
//! (up, down, left, right). They therefore expand the same nodes in the same order.
use crate::node::{NodeId, SearchTree};

pub mod ordered;
pub mod tree_scan;

pub trait Frontier {
    /// Registers a node that became a leaf: a newly generated child, the root, or a dead
    /// end whose cost was raised.
    fn insert(&mut self, tree: &SearchTree, id: NodeId);
    /// Chooses the next leaf to look at, or [None] when nothing is left.
    fn select(&mut self, tree: &SearchTree) -> Option<NodeId>;
}

/// Which [Frontier] a search uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrontierKind {
    /// Re-scans the entire tree on every step, see [tree_scan::TreeScan].
    #[default]
    TreeScan,
    /// Keeps leaves in a binary heap, see [ordered::OrderedFrontier].
    Ordered,
}
