//! Coding tree nodes and the merge order used while building the tree.

use std::cmp::Ordering;

/// Index of a node inside a [`crate::huffman::HuffmanCodec`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct CodeNode {
    /// Occurrence count for a leaf, sum of the children otherwise.
    pub weight: u64,
    /// Byte value for a leaf. For an internal node, the sum of its
    /// children's tags; only ever used to break weight ties.
    pub tag: u64,
    pub symbol: Option<u8>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl CodeNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Self {
            weight,
            tag: u64::from(symbol),
            symbol: Some(symbol),
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn internal(weight: u64, tag: u64, left: NodeId, right: Option<NodeId>) -> Self {
        Self {
            weight,
            tag,
            symbol: None,
            left: Some(left),
            right,
            parent: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }
}

/// A node waiting to be merged.
///
/// `BinaryHeap` pops the greatest entry, so "greater" here means "merged
/// first": lower weight, then larger tag, then earlier creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    pub weight: u64,
    pub tag: u64,
    pub id: NodeId,
}

impl Pending {
    pub fn of(id: NodeId, node: &CodeNode) -> Self {
        Self {
            weight: node.weight,
            tag: node.tag,
            id,
        }
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.tag.cmp(&other.tag))
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}
