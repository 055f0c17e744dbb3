//! Approval Risk Rules
//!
//! Four independent, additive heuristics. Each rule looks at one approval
//! plus the spender facts gathered from the oracle and either yields a
//! `RiskReason` or nothing. A single approval can carry several reasons.

use alloy_primitives::{Address, U256};
use std::fmt::Debug;

use crate::models::types::{ApprovalEvent, RiskReason, SpenderFacts};

/// Everything a rule may inspect for one approval
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub approval: &'a ApprovalEvent,
    /// Target of the approving transaction (`None` for contract creation)
    pub tx_target: Option<Address>,
    pub facts: SpenderFacts,
}

pub trait ApprovalRule: Send + Sync + Debug {
    fn check(&self, ctx: &RuleContext<'_>) -> Option<RiskReason>;
}

/// Value equals the all-bits-set uint256 sentinel
#[derive(Debug)]
pub struct UnlimitedApprovalRule;

impl ApprovalRule for UnlimitedApprovalRule {
    fn check(&self, ctx: &RuleContext<'_>) -> Option<RiskReason> {
        // Decoded values are uint256, so U256::MAX is the only sentinel
        (ctx.approval.value == U256::MAX).then_some(RiskReason::UnlimitedApproval)
    }
}

/// Spender has no deployed code
#[derive(Debug)]
pub struct EoaSpenderRule;

impl ApprovalRule for EoaSpenderRule {
    fn check(&self, ctx: &RuleContext<'_>) -> Option<RiskReason> {
        (!ctx.facts.is_contract).then_some(RiskReason::EoaSpender)
    }
}

/// Spender is a contract that has never sent a transaction
#[derive(Debug)]
pub struct FreshContractRule;

impl ApprovalRule for FreshContractRule {
    fn check(&self, ctx: &RuleContext<'_>) -> Option<RiskReason> {
        (ctx.facts.is_contract && ctx.facts.transaction_count == 0)
            .then_some(RiskReason::FreshContractSpender)
    }
}

/// Transaction target differs from the spender.
///
/// Weak proxy: only the current transaction's target is compared, no
/// interaction history is consulted, so this fires for almost every
/// approval made outside a direct call to the spender.
#[derive(Debug)]
pub struct NoPriorInteractionRule;

impl ApprovalRule for NoPriorInteractionRule {
    fn check(&self, ctx: &RuleContext<'_>) -> Option<RiskReason> {
        // Address equality is byte equality, so checksum casing never matters
        (ctx.tx_target != Some(ctx.approval.spender)).then_some(RiskReason::NoPriorInteraction)
    }
}

/// Ordered collection of rules
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Box<dyn ApprovalRule>>,
}

impl RuleSet {
    /// The four standard rules in reporting order
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Box::new(UnlimitedApprovalRule),
                Box::new(EoaSpenderRule),
                Box::new(FreshContractRule),
                Box::new(NoPriorInteractionRule),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule; reasons come back in rule order
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RiskReason> {
        self.rules.iter().filter_map(|rule| rule.check(ctx)).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
