//! The compression module runs the codec end to end.
//!
//! Encoding happens in the following steps:
//! - Frequency count: the probability of each distinct symbol in the payload.
//! - Tree build: a Huffman tree over those probabilities, unless the caller supplies one.
//! - Prefix table: the bit code for every symbol, read off the tree.
//! - Bit packing: the codes laid end to end and zero padded to a whole byte.
//!
//! The packed bytes are the whole artifact. The tree is handed back to the caller, who
//! must supply it again to decode.
//!
//! Decoding walks the tree one bit at a time, emitting a symbol at every leaf and starting
//! again from the root, until the bits run out.
//!

pub mod compress;
pub mod decompress;
