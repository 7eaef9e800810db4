//! The tools module provides the helpers the codec stages share.
//!
//! The tools are:
//! - freq_count: Symbol counts and probabilities for a payload.
//! - logging: Verbosity levels and a terminal logger for applications embedding the codec.
//! - symbol_map: The Symbol trait and sorted symbol sets.
//!
pub mod freq_count;
pub mod logging;
pub mod symbol_map;
