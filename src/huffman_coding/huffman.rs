use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::error::{CodecError, Result};
use crate::tools::freq_count::{frequencies, Frequencies};
use crate::tools::symbol_map::{sorted_symbols, Symbol};

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

/// Relative slack allowed when checking that a parent weighs as much as its children.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// One node of a Huffman tree. Internal nodes always own exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<S> {
    Leaf {
        weight: f64,
        symbol: S,
    },
    Internal {
        weight: f64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S: Symbol> Node<S> {
    /// Create a new leaf
    pub fn leaf(weight: f64, symbol: S) -> Self {
        Node::Leaf { weight, symbol }
    }

    /// Create an internal node with an explicit weight. Use merge() to have the weight summed.
    pub fn internal(weight: f64, left: Node<S>, right: Node<S>) -> Self {
        Node::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Join two nodes under a new parent carrying their combined weight. `left` is the
    /// node taken off the queue first.
    pub fn merge(left: Node<S>, right: Node<S>) -> Self {
        let weight = left.weight() + right.weight();
        Node::internal(weight, left, right)
    }

    pub fn weight(&self) -> f64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// The symbol held by a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<S> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn collect_symbols(&self, symbols: &mut Vec<S>) {
        match self {
            Node::Leaf { symbol, .. } => symbols.push(*symbol),
            Node::Internal { left, right, .. } => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
        }
    }

    /// Recursively check weights and leaf uniqueness.
    fn validate(&self, seen: &mut FxHashSet<S>) -> Result<()> {
        let weight = self.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(CodecError::malformed(format!(
                "node weight {} is not a finite non-negative number",
                weight
            )));
        }
        match self {
            Node::Leaf { symbol, .. } => {
                if !seen.insert(*symbol) {
                    return Err(CodecError::malformed(format!(
                        "symbol {:?} appears on more than one leaf",
                        symbol
                    )));
                }
            }
            Node::Internal { left, right, .. } => {
                let sum = left.weight() + right.weight();
                let slack = WEIGHT_TOLERANCE * weight.max(sum).max(1.0);
                if (weight - sum).abs() > slack {
                    return Err(CodecError::malformed(format!(
                        "internal weight {} does not equal child weights {} + {}",
                        weight,
                        left.weight(),
                        right.weight()
                    )));
                }
                left.validate(seen)?;
                right.validate(seen)?;
            }
        }
        Ok(())
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, depth: usize, label: &str) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Node::Leaf { weight, symbol } => {
                writeln!(f, "{}{}-> Leaf: {:?} [weight: {}]", indent, label, symbol, weight)
            }
            Node::Internal {
                weight,
                left,
                right,
            } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
        }
    }
}

/// A complete Huffman tree. Built once, never mutated, and needed again to decode anything
/// encoded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Wrap a hand built root. Nothing is checked here; encode and decode call validate()
    /// before they touch the tree.
    pub fn new(root: Node<S>) -> Self {
        HuffmanTree { root }
    }

    /// Count the symbols in `data` and build the tree for them. None if `data` is empty.
    pub fn from_symbols(data: &[S]) -> Option<Self> {
        build_tree(&frequencies(data))
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight of the tree, 1.0 when built from probabilities.
    pub fn weight(&self) -> f64 {
        self.root.weight()
    }

    /// Longest root to leaf distance. A bare leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Symbols held in the leaves, sorted.
    pub fn symbols(&self) -> Vec<S> {
        let mut symbols = Vec::new();
        self.root.collect_symbols(&mut symbols);
        sorted_symbols(symbols)
    }

    pub fn leaf_count(&self) -> usize {
        let mut symbols = Vec::new();
        self.root.collect_symbols(&mut symbols);
        symbols.len()
    }

    /// Check the tree can safely drive the encoder and decoder: weights are finite and
    /// non-negative, every parent weighs the sum of its children, and no symbol sits on
    /// two leaves.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        self.root.validate(&mut seen)
    }
}

impl<S: Symbol> Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.root.fmt_node(f, 0, "root")
    }
}

/// Queue slot: the node plus the order it was created in, used to break weight ties.
struct QueueEntry<S> {
    node: Node<S>,
    seq: usize,
}

impl<S> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for QueueEntry<S> {}

impl<S> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QueueEntry<S> {
    /// Reversed so the max-heap hands back the lightest, oldest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        let weight = |n: &Node<S>| match n {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        };
        weight(&other.node)
            .total_cmp(&weight(&self.node))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the Huffman tree for a set of symbol frequencies. Returns None for an empty set.
///
/// Equal weights are resolved by creation order: leaves are numbered in ascending symbol
/// order, and each merged node is numbered after every node that exists before it. The
/// lower number leaves the queue first, so the same frequencies always give the same tree.
pub fn build_tree<S: Symbol>(freqs: &Frequencies<S>) -> Option<HuffmanTree<S>> {
    let mut queue: BinaryHeap<QueueEntry<S>> = sorted_symbols(freqs.keys().copied())
        .into_iter()
        .enumerate()
        .map(|(seq, symbol)| QueueEntry {
            node: Node::leaf(freqs[&symbol], symbol),
            seq,
        })
        .collect();
    let mut next_seq = queue.len();

    // Pare the queue down to a single node, always joining the two lightest.
    while queue.len() > 1 {
        let left = queue.pop()?;
        let right = queue.pop()?;
        queue.push(QueueEntry {
            node: Node::merge(left.node, right.node),
            seq: next_seq,
        });
        next_seq += 1;
    }

    let tree = HuffmanTree::new(queue.pop()?.node);
    debug!(
        "Built tree with {} leaves, depth {}.",
        tree.leaf_count(),
        tree.depth()
    );
    trace!("\n{}", tree);
    Some(tree)
}
