use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::bitstream::bitpacker::pack;
use crate::error::Result;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::prefix_table::PrefixTable;
use crate::tools::symbol_map::Symbol;

/// Huffman encode `payload` and write the packed bits to `destination`.
///
/// When `tree` is None the optimal tree for the payload is built. A supplied tree is
/// validated first and must contain every symbol of the payload. Returns the tree used so
/// the caller can keep it for decoding; an empty payload with no tree writes nothing and
/// returns None.
pub fn encode<W: Write, S: Symbol>(
    mut destination: W,
    payload: &[S],
    tree: Option<HuffmanTree<S>>,
) -> Result<Option<HuffmanTree<S>>> {
    let tree = match tree {
        Some(tree) => {
            tree.validate()?;
            tree
        }
        None => match HuffmanTree::from_symbols(payload) {
            Some(tree) => tree,
            None => {
                info!("Nothing to encode.");
                destination.flush()?;
                return Ok(None);
            }
        },
    };

    let table = PrefixTable::from_tree(&tree);
    let bp = pack(payload, &table)?;
    debug!("Writing {} bytes, ending at {}.", bp.output.len(), bp.loc());

    destination.write_all(&bp.output)?;
    destination.flush()?;

    info!(
        "Encoded {} symbols into {} bytes.",
        payload.len(),
        bp.output.len()
    );
    Ok(Some(tree))
}

/// Encode into the file at `path`, creating or truncating it.
pub fn encode_to_path<P: AsRef<Path>, S: Symbol>(
    path: P,
    payload: &[S],
    tree: Option<HuffmanTree<S>>,
) -> Result<Option<HuffmanTree<S>>> {
    let f_out = File::create(path.as_ref())?;
    debug!("Encoding to {}.", path.as_ref().display());
    encode(BufWriter::new(f_out), payload, tree)
}

#[cfg(test)]
mod test {
    use super::encode;
    use crate::error::CodecError;
    use crate::huffman_coding::huffman::{HuffmanTree, Node};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn abbb_test() {
        let mut out = Vec::new();
        let tree = encode(&mut out, &chars("abbb"), None).unwrap().unwrap();
        assert_eq!(out, [0b0111_0000]);
        let expected = Node::internal(1.0, Node::leaf(0.25, 'a'), Node::leaf(0.75, 'b'));
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn empty_test() {
        let mut out = Vec::new();
        let tree = encode::<_, char>(&mut out, &[], None).unwrap();
        assert!(tree.is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn supplied_tree_test() {
        let tree = HuffmanTree::new(Node::merge(Node::leaf(0.5, 'b'), Node::leaf(0.5, 'a')));
        let mut out = Vec::new();
        let used = encode(&mut out, &chars("ab"), Some(tree.clone()))
            .unwrap()
            .unwrap();
        assert_eq!(used, tree);
        assert_eq!(out, [0b1000_0000]);
    }

    #[test]
    fn supplied_tree_missing_symbol_test() {
        let tree = HuffmanTree::new(Node::merge(Node::leaf(0.5, 'a'), Node::leaf(0.5, 'b')));
        let mut out = Vec::new();
        assert!(matches!(
            encode(&mut out, &chars("abc"), Some(tree)),
            Err(CodecError::UnknownSymbol { position: 2, .. })
        ));
    }

    #[test]
    fn supplied_tree_malformed_test() {
        let tree = HuffmanTree::new(Node::internal(
            5.0,
            Node::leaf(0.5, 'a'),
            Node::leaf(0.5, 'b'),
        ));
        let mut out = Vec::new();
        assert!(matches!(
            encode(&mut out, &chars("ab"), Some(tree)),
            Err(CodecError::MalformedTree { .. })
        ));
        assert!(out.is_empty());
    }
}
