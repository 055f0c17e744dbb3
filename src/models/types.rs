//! Type definitions for Approval Sentry
//! Transaction input, decoded approvals, risk reasons and findings

use alloy_primitives::{Address, Log, B256, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transaction-level context shared by every log it emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxContext {
    /// Transaction hash
    pub hash: B256,
    /// Sender address
    pub from: Address,
    /// Target address (`None` for contract creation)
    pub to: Option<Address>,
    /// Block the transaction was included in
    pub block_number: u64,
}

/// A transaction together with the logs it emitted
#[derive(Debug, Clone)]
pub struct TransactionEvent {
    pub tx: TxContext,
    pub logs: Vec<Log>,
}

impl TransactionEvent {
    pub fn new(tx: TxContext, logs: Vec<Log>) -> Self {
        Self { tx, logs }
    }
}

/// Decoded ERC-20 Approval, scoped to one transaction evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    /// Token contract that emitted the log
    pub token: Address,
    pub tx_hash: B256,
    pub tx_from: Address,
    pub block_number: u64,
    /// Position of the log within the transaction's log list
    pub log_index: usize,
}

/// Chain-state facts about a spender, fetched once per approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpenderFacts {
    /// Spender has deployed code at the current head
    pub is_contract: bool,
    /// Nonce of the spender at the current head
    pub transaction_count: u64,
}

/// Risk signals an approval can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    /// Value equals the all-bits-set sentinel
    UnlimitedApproval,
    /// Spender has no deployed code
    EoaSpender,
    /// Spender is a contract without transaction history
    FreshContractSpender,
    /// Transaction target is not the spender
    NoPriorInteraction,
}

impl RiskReason {
    pub const COUNT: usize = 4;

    /// Every reason in evaluation order
    pub const ALL: [RiskReason; Self::COUNT] = [
        RiskReason::UnlimitedApproval,
        RiskReason::EoaSpender,
        RiskReason::FreshContractSpender,
        RiskReason::NoPriorInteraction,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            RiskReason::UnlimitedApproval => "Unlimited approval amount (MAX_UINT)",
            RiskReason::EoaSpender => "Approval to an externally owned account (EOA)",
            RiskReason::FreshContractSpender => {
                "Approval to newly deployed contract (no tx history)"
            }
            RiskReason::NoPriorInteraction => "No prior interaction with spender",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskReason::UnlimitedApproval => "unlimited_approval",
            RiskReason::EoaSpender => "eoa_spender",
            RiskReason::FreshContractSpender => "fresh_contract_spender",
            RiskReason::NoPriorInteraction => "no_prior_interaction",
        }
    }

    /// Index into `ALL`
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

/// Finding classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingType {
    Suspicious,
}

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingSeverity {
    High,
}

/// Structured report for one suspicious approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub name: String,
    pub description: String,
    pub alert_id: String,
    pub protocol: String,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub severity: FindingSeverity,
    /// Raw field values as strings, ordered by key
    pub metadata: BTreeMap<String, String>,
}
