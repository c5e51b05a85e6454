//! Huffman tree construction and per-symbol code generation.
//!
//! The tree is built bottom-up from a frequency table through a
//! weight-ordered min-heap. Nodes live in an arena (`Vec<Node>`); children
//! are owned top-down by index and the parent link is a non-owning index
//! back-reference used only for leaf-to-root code walks, so no reference
//! cycles exist.
//!
//! # Tie-break policy
//!
//! The heap orders by `(weight, seq)` where `seq` is an insertion sequence
//! number: leaves enter in ascending symbol order, internal nodes in
//! creation order. Equal weights therefore resolve FIFO, and of each popped
//! pair the first becomes the left child. Two runs over identical input
//! produce identical trees, code tables, and containers on every platform.
//!
//! # Degenerate single-symbol tree
//!
//! A table with one distinct symbol yields a lone leaf with no internal
//! nodes. That leaf is assigned the 1-bit code `0`, so the encoder emits one
//! bit per input byte and the decoder walks the one-entry trie normally; no
//! repeat count is needed anywhere in the container.

use crate::error::{Result, TreeError};
use crate::freq::FrequencyTable;
use std::collections::BinaryHeap;

/// Longest code the container's 1-byte length field can describe.
const MAX_CODE_LEN: usize = 255;

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf,
    Internal { left: usize, right: usize },
}

/// One arena slot. Ownership runs top-down (`Internal` owns its children by
/// index); `parent` is a back-reference only.
#[derive(Debug, Clone)]
struct Node {
    weight: u64,
    parent: Option<usize>,
    kind: NodeKind,
}

/// Entry in the construction heap, ordered for min-extraction by
/// `(weight, seq)`.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    seq: u32,
    node: usize,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed for min-heap behavior: lightest first, FIFO on ties
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree over the distinct symbols of one input.
///
/// Pure data after construction: deriving the code table needs no I/O.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
    /// `(symbol, leaf index)` in ascending symbol order
    leaves: Vec<(u8, usize)>,
}

impl HuffmanTree {
    /// Build a tree from a non-empty frequency table.
    ///
    /// # Errors
    /// `TreeError::EmptyFrequencyTable` if no symbol has a non-zero count.
    /// Encoding an empty input is handled before this point; reaching the
    /// error here is caller misuse.
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        let distinct = freq.distinct_symbols();
        let mut nodes: Vec<Node> = Vec::with_capacity(distinct.saturating_mul(2));
        let mut leaves = Vec::with_capacity(distinct);
        let mut heap = BinaryHeap::with_capacity(distinct);
        let mut seq = 0u32;

        for (symbol, count) in freq.iter() {
            let idx = nodes.len();
            nodes.push(Node {
                weight: count,
                parent: None,
                kind: NodeKind::Leaf,
            });
            leaves.push((symbol, idx));
            heap.push(HeapEntry {
                weight: count,
                seq,
                node: idx,
            });
            seq += 1;
        }

        let root = loop {
            let first = match heap.pop() {
                Some(entry) => entry,
                None => return Err(TreeError::EmptyFrequencyTable.into()),
            };
            let second = match heap.pop() {
                Some(entry) => entry,
                // Last node standing is the root
                None => break first.node,
            };

            // First popped becomes the left child
            let idx = nodes.len();
            let weight = first.weight + second.weight;
            nodes.push(Node {
                weight,
                parent: None,
                kind: NodeKind::Internal {
                    left: first.node,
                    right: second.node,
                },
            });
            nodes[first.node].parent = Some(idx);
            nodes[second.node].parent = Some(idx);

            heap.push(HeapEntry {
                weight,
                seq,
                node: idx,
            });
            seq += 1;
        };

        Ok(Self {
            nodes,
            root,
            leaves,
        })
    }

    /// Derive the per-symbol code table by walking each leaf up to the root
    /// and reversing the collected bits (1 = right child, 0 = left).
    ///
    /// # Errors
    /// `TreeError::CodeTooLong` if a path exceeds 255 bits. Unreachable for
    /// a 256-symbol alphabet, but the container's length field caps there.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable::new();

        for &(symbol, leaf) in &self.leaves {
            let mut path = Vec::new();
            let mut current = leaf;

            while let Some(parent) = self.nodes[current].parent {
                path.push(self.is_right_child(parent, current));
                current = parent;
            }
            path.reverse();

            // Lone leaf: no parent, empty path. Assign the 1-bit code 0.
            if path.is_empty() {
                path.push(false);
            }

            if path.len() > MAX_CODE_LEN {
                return Err(TreeError::CodeTooLong { length: path.len() }.into());
            }

            table.insert(symbol, path);
        }

        Ok(table)
    }

    /// Total weight of the root (sum of all frequencies).
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    fn is_right_child(&self, parent: usize, child: usize) -> bool {
        matches!(
            self.nodes[parent].kind,
            NodeKind::Internal { right, .. } if right == child
        )
    }
}

/// Mapping from byte value to its prefix code (root-to-leaf bit path).
///
/// Derived once from a [`HuffmanTree`] and never mutated; prefix-freeness is
/// structural (codes are tree leaves) and never re-checked. Iteration order
/// is ascending symbol value.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
    present: usize,
}

impl CodeTable {
    pub(crate) fn new() -> Self {
        Self {
            codes: vec![None; 256],
            present: 0,
        }
    }

    fn insert(&mut self, symbol: u8, bits: Vec<bool>) {
        if self.codes[symbol as usize].is_none() {
            self.present += 1;
        }
        self.codes[symbol as usize] = Some(bits);
    }

    /// Code for one symbol, if it occurred in the input.
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.present
    }

    /// True if no symbol has a code (empty input).
    pub fn is_empty(&self) -> bool {
        self.present == 0
    }

    /// Iterate `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|bits| (symbol as u8, bits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_for(data: &[u8]) -> CodeTable {
        let freq = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        tree.code_table().unwrap()
    }

    fn is_prefix(a: &[bool], b: &[bool]) -> bool {
        a.len() <= b.len() && a == &b[..a.len()]
    }

    #[test]
    fn test_empty_table_rejected() {
        let freq = FrequencyTable::from_bytes(b"");
        let result = HuffmanTree::from_frequencies(&freq);
        assert!(matches!(
            result,
            Err(crate::error::Error::Tree(TreeError::EmptyFrequencyTable))
        ));
    }

    #[test]
    fn test_single_symbol_one_bit_code() {
        let table = codes_for(b"zzzz");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'z').unwrap(), &[false]);
        assert_eq!(table.get(b'a'), None);
    }

    #[test]
    fn test_two_symbols() {
        // b (weight 1) pops first and becomes the left child
        let table = codes_for(b"aaab");
        assert_eq!(table.get(b'a').unwrap(), &[true]);
        assert_eq!(table.get(b'b').unwrap(), &[false]);
    }

    #[test]
    fn test_tie_break_is_fifo_by_symbol_order() {
        // a:1, b:1, c:2 -- a and b tie, merge into a weight-2 internal;
        // c (seq 2) then ties with that internal (seq 3) and pops first.
        let table = codes_for(b"abcc");
        assert_eq!(table.get(b'c').unwrap(), &[false]);
        assert_eq!(table.get(b'a').unwrap(), &[true, false]);
        assert_eq!(table.get(b'b').unwrap(), &[true, true]);
    }

    #[test]
    fn test_code_lengths_optimal() {
        // a:5, b:2, c:1, d:1 -- optimal lengths 1, 2, 3, 3
        let data: Vec<u8> = b"aaaaabbcd".to_vec();
        let table = codes_for(&data);
        assert_eq!(table.get(b'a').unwrap().len(), 1);
        assert_eq!(table.get(b'b').unwrap().len(), 2);
        assert_eq!(table.get(b'c').unwrap().len(), 3);
        assert_eq!(table.get(b'd').unwrap().len(), 3);
    }

    #[test]
    fn test_prefix_free() {
        let table = codes_for(b"this is a longer sample with quite a few distinct symbols, 0123456789");
        let codes: Vec<_> = table.iter().collect();

        for (i, (_, a)) in codes.iter().enumerate() {
            for (j, (_, b)) in codes.iter().enumerate() {
                if i != j {
                    assert!(!is_prefix(a, b), "code {:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_across_builds() {
        let data = b"deterministic tie-break check: mississippi river banks";
        let first = codes_for(data);
        let second = codes_for(data);

        for symbol in 0..=255u8 {
            assert_eq!(first.get(symbol), second.get(symbol));
        }
    }

    #[test]
    fn test_all_256_symbols() {
        let data: Vec<u8> = (0..=255u8).collect();
        let table = codes_for(&data);
        assert_eq!(table.len(), 256);

        // Equal weights give a balanced tree: every code is exactly 8 bits
        for (_, code) in table.iter() {
            assert_eq!(code.len(), 8);
        }
    }

    #[test]
    fn test_total_weight() {
        let freq = FrequencyTable::from_bytes(b"aaab");
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        assert_eq!(tree.total_weight(), 4);
    }

    #[test]
    fn test_iteration_ascending() {
        let table = codes_for(&[200, 3, 9, 3]);
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![3, 9, 200]);
    }
}
