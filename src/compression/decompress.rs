use log::{debug, error, info, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::{HuffmanTree, Node};
use crate::tools::symbol_map::Symbol;

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Decode everything in `source` with the tree it was encoded with.
///
/// The artifact carries no length, so zero padding in the last byte may itself decode to
/// extra copies of the all-zeros (leftmost) symbol. The output always starts with the
/// original payload. Use decode_exact() when the symbol count is known.
pub fn decode<R: Read, S: Symbol>(source: R, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    tree.validate()?;
    let mut br = BitReader::new(source);
    let mut result = Vec::new();
    walk_tree(&mut br, tree, None, &mut result)?;
    info!("Decoded {} symbols from {} bits.", result.len(), br.bits_read());
    Ok(result)
}

/// Decode exactly `symbol_count` symbols, ignoring whatever padding follows them.
pub fn decode_exact<R: Read, S: Symbol>(
    source: R,
    tree: &HuffmanTree<S>,
    symbol_count: usize,
) -> Result<Vec<S>> {
    tree.validate()?;
    let mut br = BitReader::new(source);
    let mut result = Vec::with_capacity(symbol_count);
    walk_tree(&mut br, tree, Some(symbol_count), &mut result)?;
    if result.len() < symbol_count {
        error!(
            "Fatal error: ran out of data after {} of {} symbols.",
            result.len(),
            symbol_count
        );
        return Err(CodecError::Truncated {
            expected: symbol_count,
            decoded: result.len(),
        });
    }
    info!("Decoded {} symbols from {} bits.", result.len(), br.bits_read());
    Ok(result)
}

/// Decode the file at `path`.
pub fn decode_from_path<P: AsRef<Path>, S: Symbol>(
    path: P,
    tree: &HuffmanTree<S>,
) -> Result<Vec<S>> {
    let f_in = File::open(path.as_ref())?;
    debug!("Decoding from {}.", path.as_ref().display());
    decode(f_in, tree)
}

/// The decoding state machine. Starting at the root, each bit moves left (0) or right (1);
/// reaching a leaf emits its symbol and returns to the root. Stops when the bits run out at
/// the root or once `limit` symbols have been emitted.
fn walk_tree<R: Read, S: Symbol>(
    br: &mut BitReader<R>,
    tree: &HuffmanTree<S>,
    limit: Option<usize>,
    out: &mut Vec<S>,
) -> Result<()> {
    let root = tree.root();

    // A lone leaf owns the one bit code 0; a 1 can't be part of anything.
    if let Node::Leaf { symbol, .. } = root {
        while limit.map_or(true, |n| out.len() < n) {
            match br.bit()? {
                None => break,
                Some(false) => out.push(*symbol),
                Some(true) => {
                    error!(
                        "Fatal error: found a 1 bit at {} for a single symbol tree.",
                        br.loc()
                    );
                    return Err(CodecError::StreamCorruption {
                        bit_offset: br.bits_read(),
                        depth: 0,
                    });
                }
            }
        }
        return Ok(());
    }

    let mut node = root;
    let mut depth = 0;
    // True while every bit since the last symbol was a 0, which is what padding looks like.
    let mut only_zeros = true;

    while limit.map_or(true, |n| out.len() < n) {
        let bit = match br.bit()? {
            Some(bit) => bit,
            None if depth == 0 => break,
            None if only_zeros && depth < 8 => {
                trace!("Dropped {} bits of padding.", depth);
                break;
            }
            None => {
                error!(
                    "Fatal error: data ended {} levels below the root at {}.",
                    depth,
                    br.loc()
                );
                return Err(CodecError::StreamCorruption {
                    bit_offset: br.bits_read(),
                    depth,
                });
            }
        };
        only_zeros &= !bit;
        depth += 1;

        if let Node::Internal { left, right, .. } = node {
            node = if bit { right.as_ref() } else { left.as_ref() };
        }
        if let Node::Leaf { symbol, .. } = node {
            out.push(*symbol);
            node = root;
            depth = 0;
            only_zeros = true;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{decode, decode_exact};
    use crate::compression::compress::encode;
    use crate::error::CodecError;
    use crate::huffman_coding::huffman::{HuffmanTree, Node};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn ab_tree() -> HuffmanTree<char> {
        HuffmanTree::new(Node::merge(Node::leaf(0.25, 'a'), Node::leaf(0.75, 'b')))
    }

    /// a = 00, b = 01, c = 1
    fn abc_tree() -> HuffmanTree<char> {
        let inner = Node::merge(Node::leaf(1.0, 'a'), Node::leaf(2.0, 'b'));
        HuffmanTree::new(Node::merge(inner, Node::leaf(4.0, 'c')))
    }

    #[test]
    fn single_bits_test() {
        let tree = ab_tree();
        assert_eq!(decode([0b0000_0000_u8].as_slice(), &tree).unwrap(), chars("aaaaaaaa"));
        assert_eq!(decode([0b1111_1111_u8].as_slice(), &tree).unwrap(), chars("bbbbbbbb"));
        assert_eq!(decode_exact([0b0000_0000_u8].as_slice(), &tree, 1).unwrap(), chars("a"));
        assert_eq!(decode_exact([0b1000_0000_u8].as_slice(), &tree, 1).unwrap(), chars("b"));
        assert_eq!(decode_exact([0b0000_0000_u8].as_slice(), &tree, 2).unwrap(), chars("aa"));
    }

    #[test]
    fn padding_ambiguity_test() {
        let tree = ab_tree();
        // "abbb" packs to 0111 plus four padding zeros, which read back as four more a's.
        let decoded = decode([0b0111_0000_u8].as_slice(), &tree).unwrap();
        assert_eq!(decoded, chars("abbbaaaa"));
        assert!(decoded.starts_with(&chars("abbb")));
        let exact = decode_exact([0b0111_0000_u8].as_slice(), &tree, 4).unwrap();
        assert_eq!(exact, chars("abbb"));
    }

    #[test]
    fn padding_mid_descent_test() {
        // c then seven padding zeros: three a's and one left over 0 that is only padding.
        let decoded = decode([0b1000_0000_u8].as_slice(), &abc_tree()).unwrap();
        assert_eq!(decoded, chars("caaa"));
    }

    #[test]
    fn padding_partial_code_test() {
        // 1 1 01 1 1 1 then a lone 0 left over.
        assert_eq!(
            decode([0b1101_1110_u8].as_slice(), &abc_tree()).unwrap(),
            chars("ccbccc")
        );
        // x = 000, y = 001, z = 01, w = 1: a trailing "00" is still only padding.
        let inner = Node::merge(Node::leaf(1.0, 'x'), Node::leaf(1.0, 'y'));
        let deep = Node::merge(Node::merge(inner, Node::leaf(2.0, 'z')), Node::leaf(4.0, 'w'));
        let tree = HuffmanTree::new(deep);
        assert_eq!(decode([0b0101_0100_u8].as_slice(), &tree).unwrap(), chars("zzz"));
        assert_eq!(decode([0b1111_1100_u8].as_slice(), &tree).unwrap(), chars("wwwwww"));
    }

    #[test]
    fn stream_corruption_test() {
        // w = 0, z = 10, y = 110, x = 111: six w's then "11" with nothing after it.
        let inner = Node::merge(Node::leaf(1.0, 'y'), Node::leaf(1.0, 'x'));
        let deep = Node::merge(Node::leaf(4.0, 'w'), Node::merge(Node::leaf(2.0, 'z'), inner));
        let tree = HuffmanTree::new(deep);
        match decode([0b0000_0011_u8].as_slice(), &tree) {
            Err(CodecError::StreamCorruption { bit_offset, depth }) => {
                assert_eq!(bit_offset, 8);
                assert_eq!(depth, 2);
            }
            other => panic!("expected StreamCorruption, got {:?}", other),
        }
    }

    #[test]
    fn long_zero_run_test() {
        // A left leaning chain puts 'a' nine zeros deep; eight zeros can't be padding.
        let mut node = Node::merge(Node::leaf(1.0, 'a'), Node::leaf(1.0, 'b'));
        for sym in 'c'..='j' {
            node = Node::merge(node, Node::leaf(1.0, sym));
        }
        let tree = HuffmanTree::new(node);
        assert_eq!(tree.depth(), 9);
        assert!(matches!(
            decode([0xff_u8, 0x00].as_slice(), &tree),
            Err(CodecError::StreamCorruption { depth: 8, .. })
        ));
    }

    #[test]
    fn single_leaf_test() {
        let data = chars("aaaa");
        let mut out = Vec::new();
        let tree = encode(&mut out, &data, None).unwrap().unwrap();
        assert_eq!(out, [0]);
        assert_eq!(decode_exact(out.as_slice(), &tree, 4).unwrap(), data);
        assert!(decode(out.as_slice(), &tree).unwrap().starts_with(&data));

        assert!(matches!(
            decode([0b0010_0000_u8].as_slice(), &tree),
            Err(CodecError::StreamCorruption { depth: 0, bit_offset: 3 })
        ));
    }

    #[test]
    fn truncated_test() {
        assert!(matches!(
            decode_exact([0b0111_0000_u8].as_slice(), &ab_tree(), 9),
            Err(CodecError::Truncated {
                expected: 9,
                decoded: 8
            })
        ));
    }

    #[test]
    fn empty_source_test() {
        assert!(decode([0_u8; 0].as_slice(), &ab_tree()).unwrap().is_empty());
        assert!(decode_exact([0_u8; 0].as_slice(), &ab_tree(), 0).unwrap().is_empty());
    }

    #[test]
    fn malformed_tree_test() {
        let tree = HuffmanTree::new(Node::merge(Node::leaf(1.0, 'a'), Node::leaf(1.0, 'a')));
        assert!(matches!(
            decode([0xff_u8].as_slice(), &tree),
            Err(CodecError::MalformedTree { .. })
        ));
    }

    #[test]
    fn roundtrip_test() {
        for text in ["abbb", "! %", "Kærlighed og Øl!", "mississippi river"] {
            let data = chars(text);
            let mut out = Vec::new();
            let tree = encode(&mut out, &data, None).unwrap().unwrap();
            assert!(decode(out.as_slice(), &tree).unwrap().starts_with(&data));
            assert_eq!(decode_exact(out.as_slice(), &tree, data.len()).unwrap(), data);
        }
    }
}
