//! Core Module - Risk Evaluation Engine
//!
//! Rule set, finding composition and the evaluator that drives them.

pub mod composer;
pub mod evaluator;
pub mod rules;

pub use composer::*;
pub use evaluator::*;
pub use rules::*;
