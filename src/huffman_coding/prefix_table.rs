//! Turns a Huffman tree into the symbol to bit code table used by the packer.
//!
//! Descending left appends a `0`, descending right appends a `1`. A tree that is a single
//! leaf still needs a one bit code, so it is given `0`.

use log::trace;
use rustc_hash::FxHashMap;

use super::huffman::{HuffmanTree, Node};
use crate::error::{CodecError, Result};
use crate::tools::freq_count::Frequencies;
use crate::tools::symbol_map::Symbol;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A variable length bit code, most significant (first transmitted) bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new(bits: Vec<bool>) -> Self {
        Code { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(CodecError::InvalidCode {
                    code: s.to_string(),
                }),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Code::new)
    }
}

/// Symbol to code mapping derived from one tree (or written by hand).
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixTable<S: Symbol> {
    codes: FxHashMap<S, Code>,
}

impl<S: Symbol> PrefixTable<S> {
    /// Walk the tree depth first and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = FxHashMap::default();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code::new(vec![false]));
            }
            root => walk(root, &mut Vec::new(), &mut codes),
        }
        let table = PrefixTable { codes };
        trace!("Prefix table: {}", table);
        table
    }

    /// Build a table from textual codes such as `("a", "0110")`.
    pub fn from_codes<'a>(pairs: impl IntoIterator<Item = (S, &'a str)>) -> Result<Self> {
        let codes = pairs
            .into_iter()
            .map(|(sym, code)| code.parse::<Code>().map(|c| (sym, c)))
            .collect::<Result<FxHashMap<S, Code>>>()?;
        Ok(PrefixTable { codes })
    }

    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries sorted by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> {
        let mut entries: Vec<(&S, &Code)> = self.codes.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// True when no code is empty and no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.codes.values().collect();
        if codes.iter().any(|c| c.is_empty()) {
            return false;
        }
        // In sorted order a prefix always lands directly before something it prefixes.
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Expected code length in bits per symbol under the given frequencies. Symbols
    /// without a code contribute nothing.
    pub fn average_code_len(&self, freqs: &Frequencies<S>) -> f64 {
        freqs
            .iter()
            .filter_map(|(sym, p)| self.codes.get(sym).map(|c| p * c.len() as f64))
            .sum()
    }
}

impl<S: Symbol> FromIterator<(S, Code)> for PrefixTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, Code)>>(iter: I) -> Self {
        PrefixTable {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<S: Symbol> Display for PrefixTable<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (sym, code)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: \"{}\"", sym, code)?;
        }
        f.write_str("}")
    }
}

fn walk<S: Symbol>(node: &Node<S>, prefix: &mut Vec<bool>, codes: &mut FxHashMap<S, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code::new(prefix.clone()));
        }
        Node::Internal { left, right, .. } => {
            prefix.push(false);
            walk(left, prefix, codes);
            prefix.pop();
            prefix.push(true);
            walk(right, prefix, codes);
            prefix.pop();
        }
    }
}
