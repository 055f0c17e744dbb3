//! Approval risk evaluator
//! Orchestrates extraction, evidence gathering, rules and composition
//! for one transaction at a time.

use alloy_primitives::Address;
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::core::composer::FindingComposer;
use crate::core::rules::{RuleContext, RuleSet};
use crate::models::config::EvaluatorConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ApprovalEvent, Finding, TransactionEvent};
use crate::providers::oracle::{gather_spender_facts, ChainStateOracle};
use crate::telemetry::EvaluationTelemetry;
use crate::utils::decoder::ApprovalDecoder;

/// Evaluates every Approval in a transaction against the rule set.
///
/// Holds no per-transaction state: evaluating the same transaction twice
/// against an unchanged chain yields identical findings.
pub struct ApprovalRiskEvaluator {
    /// Chain-state source
    oracle: Arc<dyn ChainStateOracle>,
    rules: RuleSet,
    composer: FindingComposer,
    /// Deadline per oracle lookup
    oracle_timeout: Duration,
    /// Approvals of one transaction evaluated in parallel
    max_concurrent: usize,
    telemetry: Arc<EvaluationTelemetry>,
}

impl ApprovalRiskEvaluator {
    /// Create a new evaluator instance
    pub fn new(oracle: Arc<dyn ChainStateOracle>, config: &EvaluatorConfig) -> Self {
        Self {
            oracle,
            rules: RuleSet::standard(),
            composer: FindingComposer::new(config.protocol.clone()),
            oracle_timeout: config.oracle_timeout,
            max_concurrent: config.max_concurrent_approvals.max(1),
            telemetry: Arc::new(EvaluationTelemetry::new()),
        }
    }

    pub fn telemetry(&self) -> &Arc<EvaluationTelemetry> {
        &self.telemetry
    }

    /// Evaluate every Approval in the transaction.
    ///
    /// Never fails: an approval whose log cannot be decoded or whose oracle
    /// lookups fail is logged, counted, and yields no finding, while its
    /// siblings are still evaluated. Output order follows log order.
    pub async fn evaluate(&self, event: &TransactionEvent) -> Vec<Finding> {
        let start = Instant::now();
        self.telemetry.record_transaction();

        let tx_hash = event.tx.hash;
        let tx_target = event.tx.to;
        let entries = ApprovalDecoder::extract(event);
        let approvals = entries.len();

        let outcomes: Vec<Option<Finding>> = stream::iter(entries)
            .map(|entry| async move {
                let approval = match entry {
                    Ok(approval) => approval,
                    Err(e) => {
                        self.skip(tx_hash, None, &e);
                        return None;
                    }
                };
                self.telemetry.record_decoded();

                match self.evaluate_approval(&approval, tx_target).await {
                    Ok(finding) => finding,
                    Err(e) => {
                        self.skip(tx_hash, Some(&approval), &e);
                        None
                    }
                }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let findings: Vec<Finding> = outcomes.into_iter().flatten().collect();

        if approvals > 0 {
            info!(
                "🔍 TX {} | approvals: {} | findings: {} | {}ms",
                tx_hash,
                approvals,
                findings.len(),
                start.elapsed().as_millis()
            );
        }

        findings
    }

    /// Evaluate one decoded approval.
    /// Oracle failures are returned, never replaced by a default answer.
    pub async fn evaluate_approval(
        &self,
        approval: &ApprovalEvent,
        tx_target: Option<Address>,
    ) -> AppResult<Option<Finding>> {
        let facts =
            gather_spender_facts(self.oracle.as_ref(), approval.spender, self.oracle_timeout)
                .await?;

        let ctx = RuleContext {
            approval,
            tx_target,
            facts,
        };
        let reasons = self.rules.evaluate(&ctx);

        debug!(
            "Approval #{} {} -> {} | reasons: {:?}",
            approval.log_index, approval.owner, approval.spender, reasons
        );

        let finding = self.composer.compose(approval, &reasons);
        if finding.is_some() {
            self.telemetry.record_finding(&reasons);
        }
        Ok(finding)
    }

    // A skipped approval looks exactly like a clean one in the output;
    // this log line and the telemetry counter are the only trace.
    fn skip(&self, tx_hash: impl std::fmt::Display, approval: Option<&ApprovalEvent>, err: &AppError) {
        self.telemetry.record_failure(err);
        match approval {
            Some(approval) => warn!(
                "⚠️ TX {} | approval #{} to {} skipped, no finding emitted: {}",
                tx_hash, approval.log_index, approval.spender, err
            ),
            None => warn!(
                "⚠️ TX {} | undecodable Approval log skipped: {}",
                tx_hash, err
            ),
        }
    }
}
