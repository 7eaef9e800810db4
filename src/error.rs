//! Error type shared by every stage of the codec.
//!
//! An empty payload is not an error: tree building returns `None` and encoding writes an
//! empty artifact. Everything else that can go wrong is a variant of [`CodecError`].

use thiserror::Error;

/// Errors raised while building tables, packing, or decoding.
#[derive(Error, Debug)]
pub enum CodecError {
    /// I/O failure on the destination or source stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload symbol has no code in the prefix table
    #[error("Unknown symbol {symbol} at position {position}")]
    UnknownSymbol {
        /// Debug rendering of the offending symbol
        symbol: String,
        /// Index of the symbol in the payload
        position: usize,
    },

    /// The tree failed validation before use
    #[error("Malformed tree: {reason}")]
    MalformedTree {
        /// What the validation found
        reason: String,
    },

    /// The bit source ran dry part way down the tree, or a bit matched no code
    #[error("Stream corruption at bit {bit_offset}: {depth} level(s) below the root")]
    StreamCorruption {
        /// Number of bits consumed when the problem was found
        bit_offset: usize,
        /// How far below the root the decoder was
        depth: usize,
    },

    /// Fewer symbols were present than the caller said were encoded
    #[error("Truncated stream: expected {expected} symbols, decoded {decoded}")]
    Truncated {
        /// Symbol count supplied by the caller
        expected: usize,
        /// Symbols actually recovered
        decoded: usize,
    },

    /// A hand written code contains something other than `0` and `1`
    #[error("Invalid code: {code:?}")]
    InvalidCode {
        /// The rejected code text
        code: String,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedTree {
            reason: reason.into(),
        }
    }
}
