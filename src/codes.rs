//! Prefix-code derivation from a finished tree

use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use crate::tree::{HuffNode, HuffTree};

/// Bit string from the root to a leaf; `false` is a left edge.
pub type Code = Vec<bool>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Assign every leaf the path leading to it.
    ///
    /// A tree that is a single leaf gets an empty code; such input is
    /// emitted from the header alone.
    pub fn from_tree(tree: &HuffTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut path = Vec::new();
        collect(tree.root(), &mut path, &mut codes);
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// Present symbols with their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_deref().map(|c| (s as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact body size in bits for input with the given counts.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(s, count)| count * self.get(s).map_or(0, |c| c.len() as u64))
            .sum()
    }

    /// Check that no code is a prefix of another symbol's code.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&[bool]> = self.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j && b.starts_with(a) {
                    return false;
                }
            }
        }
        true
    }
}

fn collect(node: &HuffNode, path: &mut Vec<bool>, codes: &mut [Option<Code>]) {
    match node {
        HuffNode::Leaf { symbol, .. } => codes[*symbol as usize] = Some(path.clone()),
        HuffNode::Internal { left, right, .. } => {
            path.push(false);
            collect(left, path, codes);
            path.pop();
            path.push(true);
            collect(right, path, codes);
            path.pop();
        }
    }
}
