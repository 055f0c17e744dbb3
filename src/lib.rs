//! Approval Sentry Library
//!
//! Per-transaction risk evaluation of ERC-20 `Approval` events, flagging
//! patterns associated with phishing and wallet drainers:
//! - Unlimited (MAX_UINT) approvals
//! - Approvals to externally owned accounts
//! - Approvals to freshly deployed contracts
//! - Approvals to a spender the transaction did not call

pub mod core;
pub mod models;
pub mod providers;
pub mod telemetry;
pub mod utils;

pub use crate::core::{ApprovalRiskEvaluator, ApprovalRule, FindingComposer, RuleContext, RuleSet};
pub use models::{
    AppError, AppResult, ApprovalEvent, ErrorCode, EvaluatorConfig, Finding, FindingSeverity,
    FindingType, RiskReason, SpenderFacts, TransactionEvent, TxContext,
};
pub use providers::{ChainStateOracle, RpcOracle};
pub use telemetry::{EvaluationTelemetry, TelemetryStats};
pub use utils::ApprovalDecoder;
