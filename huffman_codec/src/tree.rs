//! Huffman tree construction and code extraction.
//!
//! The tree is a short-lived value: built once per `encode` call, walked once to produce a code
//! table, then dropped. Nodes are tagged by a sum type and held by unique ownership (`Box`),
//! following the design note that nothing about this tree needs sharing.

use common::CodecError;
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A Huffman tree node: either a leaf carrying one symbol, or an internal node merging two
/// children.
enum Node {
    Leaf { symbol: u8 },
    Internal { left: Box<Node>, right: Box<Node> },
}

/// A heap entry pairs a node with its weight and the insertion sequence used to break ties, so
/// that repeated encodes of the same input always merge nodes in the same order.
struct HeapItem {
    weight: u64,
    seq: usize,
    node: Box<Node>,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// Counts byte occurrences in `input`, preserving first-occurrence order. That order is what
/// fixes the Huffman tie-break rule (§3, §4.2 of the spec): ties between equal-weight nodes are
/// always broken the same way for the same input.
pub fn tabulate_weights(input: &[u8]) -> IndexMap<u8, u32> {
    let mut weights = IndexMap::new();
    for &byte in input {
        *weights.entry(byte).or_insert(0) += 1;
    }
    weights
}

/// Builds the Huffman tree from a frequency table, and returns it together with the
/// first-occurrence code-table order every downstream consumer must follow.
fn build_tree(weights: &IndexMap<u8, u32>) -> Box<Node> {
    let mut heap = BinaryHeap::new();
    for (seq, (&symbol, &weight)) in weights.iter().enumerate() {
        heap.push(Reverse(HeapItem {
            weight: weight as u64,
            seq,
            node: Box::new(Node::Leaf { symbol }),
        }));
    }

    let mut next_seq = weights.len();
    while heap.len() > 1 {
        let Reverse(a) = heap.pop().unwrap();
        let Reverse(b) = heap.pop().unwrap();
        let seq = next_seq;
        next_seq += 1;
        heap.push(Reverse(HeapItem {
            weight: a.weight + b.weight,
            seq,
            node: Box::new(Node::Internal {
                left: a.node,
                right: b.node,
            }),
        }));
    }

    heap.pop().unwrap().0.node
}

/// Depth-first traversal assigning a bit-path per symbol: `0` on the left edge, `1` on the right.
///
/// A single-leaf tree (one distinct symbol in the input) has no edges to traverse, so it would
/// otherwise receive an empty code; per the resolved open question in SPEC_FULL.md §9 it is
/// assigned the 1-bit code `[false]` instead, so the format stays round-trippable.
fn extract_codes(root: &Node, symbol_count: usize) -> Vec<(u8, Vec<bool>)> {
    let mut codes = Vec::with_capacity(symbol_count);

    if let Node::Leaf { symbol } = root {
        codes.push((*symbol, vec![false]));
        return codes;
    }

    fn walk(node: &Node, path: &mut Vec<bool>, out: &mut Vec<(u8, Vec<bool>)>) {
        match node {
            Node::Leaf { symbol } => out.push((*symbol, path.clone())),
            Node::Internal { left, right } => {
                path.push(false);
                walk(left, path, out);
                path.pop();

                path.push(true);
                walk(right, path, out);
                path.pop();
            }
        }
    }

    let mut path = Vec::new();
    walk(root, &mut path, &mut codes);
    codes
}

/// Builds the per-symbol Huffman code table for `input`, in the first-occurrence order codes
/// must be emitted in the stream header.
///
/// Returns one `(symbol, code)` pair per distinct byte in `input`. Fails with
/// [`CodecError::TableOverflow`] if somehow more than 65,536 distinct symbols were tabulated (with
/// an 8-bit alphabet this can never actually happen; the check exists because the header's count
/// field is only 16 bits wide, per the format's stated forward-compatibility allowance).
pub fn build_code_table(input: &[u8]) -> Result<Vec<(u8, Vec<bool>)>, CodecError> {
    let weights = tabulate_weights(input);
    if weights.len() > 65_536 {
        return Err(CodecError::TableOverflow {
            entries: weights.len(),
        });
    }
    let root = build_tree(&weights);
    let unordered = extract_codes(&root, weights.len());

    // extract_codes() walks the tree depth-first, not in tabulation order; reorder to match the
    // first-occurrence order the header must be written in.
    let mut by_symbol: std::collections::HashMap<u8, Vec<bool>> = unordered.into_iter().collect();
    let ordered = weights
        .keys()
        .map(|&symbol| (symbol, by_symbol.remove(&symbol).expect("every tabulated symbol got a code")))
        .collect();
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_symbol_gets_one_bit_code() {
        let table = build_code_table(b"AAAAA").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0], (b'A', vec![false]));
    }

    #[test]
    fn two_symbols_get_complementary_one_bit_codes() {
        let table = build_code_table(b"ABABAB").unwrap();
        assert_eq!(table.len(), 2);
        let lengths: Vec<usize> = table.iter().map(|(_, c)| c.len()).collect();
        assert_eq!(lengths, vec![1, 1]);
        assert_ne!(table[0].1, table[1].1);
    }

    #[test]
    fn codes_are_prefix_free() {
        let table = build_code_table(b"the quick brown fox jumps over the lazy dog").unwrap();
        for (i, (_, a)) in table.iter().enumerate() {
            for (j, (_, b)) in table.iter().enumerate() {
                if i == j {
                    continue;
                }
                let min_len = a.len().min(b.len());
                assert_ne!(&a[..min_len], &b[..min_len], "code {a:?} prefixes {b:?}");
            }
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let input = b"aaaabbbccccccdddddd";
        let t1 = build_code_table(input).unwrap();
        let t2 = build_code_table(input).unwrap();
        assert_eq!(t1, t2);
    }
}
