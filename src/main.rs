//! Approval Sentry - token approval risk checker
//!
//! Evaluates the ERC-20 Approval events of one mined transaction:
//!
//!     ETH_HTTP_URL=https://... approval_sentry <TX_HASH>
//!
//! Findings are printed to stdout as JSON; logs go to stderr. Set
//! `APPROVAL_STATS_DIR` to also write a telemetry snapshot there.

use approval_sentry::providers::rpc;
use approval_sentry::utils::constants::{APP_NAME, APP_VERSION};
use approval_sentry::{ApprovalRiskEvaluator, EvaluatorConfig};

use alloy_primitives::B256;
use eyre::{eyre, Result, WrapErr};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let tx_hash: B256 = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre!("usage: approval_sentry <TX_HASH>"))?
        .parse()
        .wrap_err("TX_HASH must be a 32-byte hex string")?;

    info!("🚀 {} v{} starting", APP_NAME, APP_VERSION);

    let config = EvaluatorConfig::from_env()?;
    info!("📡 RPC: {}", config.masked_url());

    let oracle = Arc::new(rpc::connect(&config.http_url).await?);
    let event = oracle.fetch_transaction_event(tx_hash).await?;

    let evaluator = ApprovalRiskEvaluator::new(oracle, &config);
    let findings = evaluator.evaluate(&event).await;

    let stats = evaluator.telemetry().snapshot();
    info!(
        "📊 Approvals: {} | Findings: {} | Skipped: {}",
        stats.approvals_decoded + stats.decode_failures,
        stats.findings_emitted,
        stats.failed_approvals()
    );

    if let Some(dir) = &config.stats_dir {
        match evaluator.telemetry().export_stats_json(dir) {
            Ok(path) => info!("💾 Stats written to {}", path.display()),
            Err(e) => warn!("⚠️ Failed to write stats to {}: {}", dir.display(), e),
        }
    }

    println!("{}", serde_json::to_string_pretty(&findings)?);

    Ok(())
}
