//! Ordered construction queue for the tree builder
//!
//! Nodes are kept sorted ascending by weight. Ties are broken differently
//! depending on how a node enters the queue:
//! - leaves (`insert_leaf`) go after equal-weight leaves with a smaller symbol
//! - merged nodes (`insert_merged`) go in front of every equal-weight node
//!
//! Both rules are part of the output format: changing either one changes the
//! tree shape and therefore the compressed bytes.

use std::collections::VecDeque;

use crate::frequency::FrequencyTable;
use crate::tree::HuffNode;

#[derive(Debug, Default, Clone)]
pub struct PriorityList {
    nodes: VecDeque<HuffNode>,
}

impl PriorityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the queue with one leaf per present symbol.
    pub fn from_table(table: &FrequencyTable) -> Self {
        let mut list = Self::new();
        for (symbol, count) in table.iter() {
            list.insert_leaf(HuffNode::leaf(symbol, count));
        }
        list
    }

    /// Insert in (weight, symbol) order.
    pub fn insert_leaf(&mut self, node: HuffNode) {
        let weight = node.weight();
        let symbol = node.symbol();
        let at = self.nodes.partition_point(|n| {
            n.weight() < weight || (n.weight() == weight && n.symbol() < symbol)
        });
        self.nodes.insert(at, node);
    }

    /// Insert ahead of the first node whose weight is not smaller.
    pub fn insert_merged(&mut self, node: HuffNode) {
        let weight = node.weight();
        let at = self.nodes.partition_point(|n| n.weight() < weight);
        self.nodes.insert(at, node);
    }

    pub fn pop_front(&mut self) -> Option<HuffNode> {
        self.nodes.pop_front()
    }

    pub fn front(&self) -> Option<&HuffNode> {
        self.nodes.front()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HuffNode> {
        self.nodes.iter()
    }
}
