//! The huffman module builds the coding tree and the code table for the codec.
//!
//! Symbol probabilities seed a min-priority queue of leaves. The two lightest nodes are
//! repeatedly joined under a new parent until one root remains. Walking that tree gives
//! every symbol a code: `0` for each left turn, `1` for each right turn. Frequent symbols
//! end up near the root and get short codes.
//!
//! The tree is never written into the encoded output. Callers keep it and hand it back for
//! decoding.
//!

pub mod huffman;
pub mod prefix_table;
