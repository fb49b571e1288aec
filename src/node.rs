//! Arena-backed search tree.
//!
//! Nodes live in a [Vec] and refer to each other by [NodeId]. A parent owns its children
//! through the index list; the parent index on a child is only followed when the path is
//! reconstructed.
use core::ops::Index;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Index of a [SearchNode] in its [SearchTree].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One explored grid cell plus its search metadata.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub position: Point,
    pub parent: Option<NodeId>,
    /// Children in up, down, left, right generation order.
    pub children: SmallVec<[NodeId; N_SMALLVEC_SIZE]>,
    /// Set once the node has been grown, whether or not it produced children.
    pub expanded: bool,
    /// Exact path length from the start, or the dead-end cost after a failed expansion.
    pub g_cost: i32,
    /// Manhattan distance to the goal.
    pub h_cost: i32,
}

impl SearchNode {
    fn new(position: Point, parent: Option<NodeId>, g_cost: i32, h_cost: i32) -> SearchNode {
        SearchNode {
            position,
            parent,
            children: SmallVec::new(),
            expanded: false,
            g_cost,
            h_cost,
        }
    }
    /// `g_cost + h_cost`, the ranking key for selection.
    pub fn cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }
    pub fn num_children(&self) -> usize {
        self.children.len()
    }
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
    /// An expanded node that found no occupiable neighbour.
    pub fn is_dead_end(&self) -> bool {
        self.expanded && self.children.is_empty()
    }
}

/// The tree grown by the search, rooted at the start cell. Nodes are never removed.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    by_position: FxIndexMap<Point, NodeId>,
}

impl SearchTree {
    /// Creates a tree holding only the root at `start` with `g_cost = 0`.
    pub fn new(start: Point, h_cost: i32) -> SearchTree {
        let mut by_position = FxIndexMap::default();
        by_position.insert(start, NodeId(0));
        SearchTree {
            nodes: vec![SearchNode::new(start, None, 0, h_cost)],
            by_position,
        }
    }
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
    /// The node generated on `pos`, if any. Each cell is generated at most once.
    pub fn node_at(&self, pos: &Point) -> Option<NodeId> {
        self.by_position.get(pos).copied()
    }
    /// Appends a child of `parent` at `position` with `g_cost = parent.g_cost + 1`.
    pub fn add_child(&mut self, parent: NodeId, position: Point, h_cost: i32) -> NodeId {
        let id = NodeId(self.nodes.len());
        let g_cost = self[parent].g_cost + 1;
        self.nodes
            .push(SearchNode::new(position, Some(parent), g_cost, h_cost));
        self.nodes[parent.0].children.push(id);
        let previous = self.by_position.insert(position, id);
        debug_assert!(previous.is_none(), "{} generated twice", position);
        id
    }
    pub fn mark_expanded(&mut self, id: NodeId) {
        self.nodes[id.0].expanded = true;
    }
    /// Retrofits a dead end: no children and `g_cost` raised to `dead_end_cost`.
    pub fn mark_dead_end(&mut self, id: NodeId, dead_end_cost: i32) {
        let node = &mut self.nodes[id.0];
        node.expanded = true;
        node.children.clear();
        node.g_cost = dead_end_cost;
    }

    /// Walks parent links from `id` up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self[n].parent)
    }
    /// Position of `id` among its siblings, [None] for the root.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self[id].parent?;
        self[parent].children.iter().position(|&c| c == id)
    }
    /// Cells from the root to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<Point> {
        let mut path = self
            .ancestors(id)
            .map(|n| self[n].position)
            .collect::<Vec<_>>();
        path.reverse();
        path
    }
    /// Leaves under `from` in depth-first, children-ordered order.
    pub fn leaves(&self, from: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if node.is_leaf() {
                leaves.push(id);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }
}

impl Index<NodeId> for SearchTree {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}
