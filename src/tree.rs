//! Huffman tree nodes and the tree builder

use tracing::{debug, trace};

use crate::frequency::FrequencyTable;
use crate::priority::PriorityList;

/// A node of the Huffman tree. Internal nodes exclusively own both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Merge two nodes; `left` is reached by a 0 bit, `right` by a 1 bit.
    pub fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    /// Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&HuffNode> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A finished Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffTree {
    root: HuffNode,
}

impl HuffTree {
    /// Build the tree for `table`. Returns `None` when the table is empty.
    ///
    /// The same table always produces the same tree: leaves are seeded in
    /// (weight, symbol) order and merged nodes go ahead of equal weights.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut queue = PriorityList::from_table(table);
        let tree = Self::from_queue(&mut queue)?;
        debug!(
            unique = table.unique_count(),
            weight = tree.weight(),
            depth = tree.depth(),
            "huffman tree built"
        );
        Some(tree)
    }

    /// Merge the two front nodes until one remains.
    pub fn from_queue(queue: &mut PriorityList) -> Option<Self> {
        while queue.len() > 1 {
            let left = queue.pop_front()?;
            let right = queue.pop_front()?;
            trace!(left = left.weight(), right = right.weight(), "merge");
            queue.insert_merged(HuffNode::merge(left, right));
        }
        queue.pop_front().map(|root| HuffTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight, equal to the number of encoded symbols.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// The symbol of a single-leaf tree, i.e. input with one distinct byte.
    pub fn single_symbol(&self) -> Option<u8> {
        self.root.symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_has_no_tree() {
        assert!(HuffTree::build(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn test_single_symbol_tree_is_leaf() {
        let tree = HuffTree::build(&FrequencyTable::from_bytes(b"ZZZZZ")).unwrap();
        assert_eq!(tree.single_symbol(), Some(b'Z'));
        assert_eq!(tree.weight(), 5);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_weight_is_total() {
        let table = FrequencyTable::from_bytes(b"AAAAAAAABBBCCD");
        let tree = HuffTree::build(&table).unwrap();
        assert_eq!(tree.weight(), 14);
        assert_eq!(tree.single_symbol(), None);
    }

    #[test]
    fn test_shape_for_abcd() {
        // Queue D1 C2 B3 A8 -> (D,C)3 B3 A8 -> ((D,C),B)6 A8 -> (6,A)14
        let tree = HuffTree::build(&FrequencyTable::from_bytes(b"AAAAAAAABBBCCD")).unwrap();
        let root = tree.root();
        let six = root.child(false).unwrap();
        assert_eq!(six.weight(), 6);
        assert_eq!(root.child(true).unwrap().symbol(), Some(b'A'));
        let three = six.child(false).unwrap();
        assert_eq!(three.weight(), 3);
        assert!(!three.is_leaf());
        assert_eq!(six.child(true).unwrap().symbol(), Some(b'B'));
        assert_eq!(three.child(false).unwrap().symbol(), Some(b'D'));
        assert_eq!(three.child(true).unwrap().symbol(), Some(b'C'));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let leaf = HuffNode::leaf(1, 1);
        assert!(leaf.child(false).is_none());
        assert!(leaf.child(true).is_none());
    }
}
