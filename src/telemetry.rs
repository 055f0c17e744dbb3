//! Telemetry Module for Approval Sentry
//!
//! Counters for what the evaluator did. An approval that failed evaluation
//! produces no finding, exactly like a clean approval, so the failure
//! counters here (and the warn logs) are the only way to tell them apart.
//!
//! Privacy-first: no addresses or transaction hashes are stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::errors::AppError;
use crate::models::types::RiskReason;

/// Snapshot of evaluation counters
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TelemetryStats {
    pub transactions_evaluated: u64,
    pub approvals_decoded: u64,
    pub decode_failures: u64,
    pub oracle_failures: u64,
    pub findings_emitted: u64,
    /// Trigger count per reason tag
    pub reasons: BTreeMap<String, u64>,
    pub period_start: u64,
    pub period_end: u64,
}

impl TelemetryStats {
    /// Approvals that could not be classified
    pub fn failed_approvals(&self) -> u64 {
        self.decode_failures + self.oracle_failures
    }
}

/// Lock-free evaluation counters, shared across concurrent evaluations
#[derive(Debug)]
pub struct EvaluationTelemetry {
    transactions_evaluated: AtomicU64,
    approvals_decoded: AtomicU64,
    decode_failures: AtomicU64,
    oracle_failures: AtomicU64,
    findings_emitted: AtomicU64,
    reason_counts: [AtomicU64; RiskReason::COUNT],
    period_start: u64,
}

impl EvaluationTelemetry {
    pub fn new() -> Self {
        Self {
            transactions_evaluated: AtomicU64::new(0),
            approvals_decoded: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            oracle_failures: AtomicU64::new(0),
            findings_emitted: AtomicU64::new(0),
            reason_counts: Default::default(),
            period_start: current_timestamp(),
        }
    }

    pub fn record_transaction(&self) {
        self.transactions_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decoded(&self) {
        self.approvals_decoded.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a skipped approval by its error category
    pub fn record_failure(&self, err: &AppError) {
        if err.is_decode_error() {
            self.decode_failures.fetch_add(1, Ordering::Relaxed);
        } else if err.is_oracle_error() {
            self.oracle_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_finding(&self, reasons: &[RiskReason]) {
        self.findings_emitted.fetch_add(1, Ordering::Relaxed);
        for reason in reasons {
            self.reason_counts[reason.ordinal()].fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> TelemetryStats {
        let reasons = RiskReason::ALL
            .iter()
            .map(|reason| {
                (
                    reason.as_str().to_string(),
                    self.reason_counts[reason.ordinal()].load(Ordering::Relaxed),
                )
            })
            .collect();

        TelemetryStats {
            transactions_evaluated: self.transactions_evaluated.load(Ordering::Relaxed),
            approvals_decoded: self.approvals_decoded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            oracle_failures: self.oracle_failures.load(Ordering::Relaxed),
            findings_emitted: self.findings_emitted.load(Ordering::Relaxed),
            reasons,
            period_start: self.period_start,
            period_end: current_timestamp(),
        }
    }

    /// Write the current snapshot as pretty JSON into `dir`
    pub fn export_stats_json(&self, dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let stats = self.snapshot();
        let path = dir.join(format!("approval_stats_{}.json", stats.period_end));
        let json = serde_json::to_string_pretty(&stats)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

impl Default for EvaluationTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let telemetry = EvaluationTelemetry::new();
        telemetry.record_transaction();
        telemetry.record_decoded();
        telemetry.record_decoded();
        telemetry.record_failure(&AppError::shape_mismatch("4 topics"));
        telemetry.record_failure(&AppError::oracle_timeout("slow"));
        telemetry.record_finding(&[RiskReason::UnlimitedApproval, RiskReason::EoaSpender]);

        let stats = telemetry.snapshot();
        assert_eq!(stats.transactions_evaluated, 1);
        assert_eq!(stats.approvals_decoded, 2);
        assert_eq!(stats.decode_failures, 1);
        assert_eq!(stats.oracle_failures, 1);
        assert_eq!(stats.failed_approvals(), 2);
        assert_eq!(stats.findings_emitted, 1);
        assert_eq!(stats.reasons["unlimited_approval"], 1);
        assert_eq!(stats.reasons["eoa_spender"], 1);
        assert_eq!(stats.reasons["no_prior_interaction"], 0);
    }

    #[test]
    fn test_config_errors_not_counted() {
        let telemetry = EvaluationTelemetry::new();
        telemetry.record_failure(&AppError::missing_env("ETH_HTTP_URL"));
        assert_eq!(telemetry.snapshot().failed_approvals(), 0);
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let telemetry = EvaluationTelemetry::new();
        telemetry.record_transaction();

        let path = telemetry.export_stats_json(dir.path()).unwrap();
        let raw = fs::read_to_string(path).unwrap();
        let stats: TelemetryStats = serde_json::from_str(&raw).unwrap();
        assert_eq!(stats.transactions_evaluated, 1);
        assert_eq!(stats.reasons.len(), 4);
    }
}
