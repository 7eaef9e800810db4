//! Huffman coding of symbol streams.
//!
//! Version 0.1.0
//!
//! Counts how often each symbol occurs, builds the Huffman tree for those frequencies, and
//! packs the payload as codes laid end to end, most significant bit first, with the last byte
//! padded with zeros. The packed bytes carry nothing else: no header, no length, no tree.
//! Encoding hands the tree back, and the caller supplies it again to decode.
//!
//! Any `Copy + Eq + Hash + Ord + Debug` type can be a symbol, so the same codec packs bytes
//! and text alike.
//!
//! Basic usage is as follows:
//!
//! ```
//! use huffpack::{decode_exact, encode};
//!
//! let text: Vec<char> = "abbb".chars().collect();
//! let mut packed = Vec::new();
//! let tree = encode(&mut packed, &text, None)?.expect("non-empty payload");
//! assert_eq!(packed, [0b0111_0000]);
//!
//! let decoded = decode_exact(packed.as_slice(), &tree, text.len())?;
//! assert_eq!(decoded, text);
//! # Ok::<(), huffpack::CodecError>(())
//! ```
//!
//! Decoding without a symbol count (`decode`) may return extra trailing symbols traced by
//! the padding bits; the original payload is always a prefix of its output.
//!
#![warn(rust_2018_idioms)]

pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{encode, encode_to_path};
pub use compression::decompress::{decode, decode_exact, decode_from_path};
pub use error::{CodecError, Result};
pub use huffman_coding::huffman::{build_tree, HuffmanTree, Node};
pub use huffman_coding::prefix_table::{Code, PrefixTable};
pub use tools::freq_count::{frequencies, Frequencies};
pub use tools::logging::{init_logger, Verbosity};
pub use tools::symbol_map::Symbol;
