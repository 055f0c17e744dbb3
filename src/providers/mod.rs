//! Providers Module - Chain-State Access
//!
//! The oracle abstraction consumed by the evaluator and its RPC implementation.

pub mod oracle;
pub mod rpc;

pub use oracle::*;
pub use rpc::RpcOracle;
