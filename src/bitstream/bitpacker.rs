use log::{debug, error};

use crate::error::{CodecError, Result};
use crate::huffman_coding::prefix_table::{Code, PrefixTable};
use crate::tools::symbol_map::Symbol;

/// Creates a bitstream for output.
#[derive(Debug, Default)]
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Zero bits added by flush() to reach a byte boundary (0-7).
    padding: u8,
    /// Bits pushed by the caller, padding excluded.
    bit_len: usize,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to
    /// flush the bit queue to the buffer before writing the output anywhere.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            ..Default::default()
        }
    }

    /// Internal bitstream write function common to all push functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn push_bit(&mut self, bit: bool) {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        self.bit_len += 1;
        self.write_stream();
    }

    /// Puts every bit of a code on the stream, first bit first.
    pub fn push_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.push_bit(bit));
    }

    /// Look up each symbol of the payload and put its code on the stream. A symbol with no
    /// code stops packing with UnknownSymbol.
    pub fn push_symbols<S: Symbol>(&mut self, payload: &[S], table: &PrefixTable<S>) -> Result<()> {
        for (position, symbol) in payload.iter().enumerate() {
            match table.get(symbol) {
                Some(code) => self.push_code(code),
                None => {
                    error!("No code for symbol {:?} at position {}.", symbol, position);
                    return Err(CodecError::UnknownSymbol {
                        symbol: format!("{:?}", symbol),
                        position,
                    });
                }
            }
        }
        Ok(())
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.padding = 8 - self.q_bits;
            self.queue <<= self.padding; //pad the queue with zeros
            self.q_bits += self.padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Bits pushed so far, not counting padding.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Padding bits added by the last flush.
    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}

/// Encode a whole payload with the given table and pad it out to a byte boundary.
pub fn pack<S: Symbol>(payload: &[S], table: &PrefixTable<S>) -> Result<BitPacker> {
    let mut bp = BitPacker::new(payload.len() / 2 + 1);
    bp.push_symbols(payload, table)?;
    bp.flush();
    debug!(
        "Packed {} symbols into {} bits plus {} bits of padding.",
        payload.len(),
        bp.bit_len(),
        bp.padding()
    );
    Ok(bp)
}
