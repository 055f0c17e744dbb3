//! Utils Module - Constants & Decoding
//!
//! Shared constants and the Approval log decoder.

pub mod constants;
pub mod decoder;

pub use constants::*;
pub use decoder::*;
