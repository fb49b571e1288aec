//! Heap-backed frontier that reproduces the tree-scan selection order.
//!
//! Every node carries a tree-order key: the child indices on the way down from the root.
//! Comparing keys lexicographically orders leaves exactly as a depth-first, children-ordered
//! walk meets them, because no leaf's key is a prefix of another leaf's key. Popping the
//! smallest `(cost, key)` is therefore equivalent to the full re-scan.
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frontier::Frontier;
use crate::node::{NodeId, SearchTree};

type OrderKey = SmallVec<[u8; 32]>;

struct SmallestCostHolder {
    cost: i32,
    order: OrderKey,
    index: NodeId,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.order == other.order
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys so the max-heap pops the cheapest, earliest leaf.
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

/// Min-heap of leaves keyed by `(cost, tree-order key)`.
#[derive(Default)]
pub struct OrderedFrontier {
    to_see: BinaryHeap<SmallestCostHolder>,
    keys: Vec<OrderKey>,
}

impl OrderedFrontier {
    pub fn new() -> OrderedFrontier {
        OrderedFrontier::default()
    }
    pub fn len(&self) -> usize {
        self.to_see.len()
    }
    pub fn is_empty(&self) -> bool {
        self.to_see.is_empty()
    }

    fn order_key(&mut self, tree: &SearchTree, id: NodeId) -> OrderKey {
        if let Some(key) = self.keys.get(id.index()) {
            return key.clone();
        }
        // Nodes are registered in creation order, so parents always have a key already.
        debug_assert_eq!(id.index(), self.keys.len());
        let key = match (tree[id].parent, tree.child_index(id)) {
            (Some(parent), Some(ix)) => {
                let mut key = self.keys[parent.index()].clone();
                key.push(ix as u8);
                key
            }
            _ => OrderKey::new(),
        };
        self.keys.push(key.clone());
        key
    }
}

impl Frontier for OrderedFrontier {
    fn insert(&mut self, tree: &SearchTree, id: NodeId) {
        let order = self.order_key(tree, id);
        self.to_see.push(SmallestCostHolder {
            cost: tree[id].cost(),
            order,
            index: id,
        });
    }

    fn select(&mut self, _tree: &SearchTree) -> Option<NodeId> {
        self.to_see.pop().map(|holder| holder.index)
    }
}
