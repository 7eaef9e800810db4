//! The bitstream module forms the I/O subsystem of the codec.
//!
//! BitPacker turns a payload into codes laid end to end, most significant bit first, and
//! pads the final byte with zeros. BitReader hands those bits back one at a time and reports
//! exhaustion as `None` rather than an error, so the decoder can tell a clean end of data
//! from a failing source.
//!
//! Nothing but code bits is ever written: no header, no length, no tree.
//!
pub mod bitpacker;
pub mod bitreader;
