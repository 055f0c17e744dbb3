//! RPC-backed chain-state oracle
//!
//! Answers `eth_getCode` and `eth_getTransactionCount` at the latest block
//! through an alloy provider. No caching: every evaluation re-queries the
//! current head.

use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionReceipt;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{TransactionEvent, TxContext};
use crate::providers::oracle::ChainStateOracle;

/// Oracle over any alloy `Provider`
pub struct RpcOracle<P> {
    provider: P,
}

impl<P> RpcOracle<P>
where
    P: Provider,
{
    /// Wrap an existing provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch a mined transaction's receipt and turn it into a `TransactionEvent`
    pub async fn fetch_transaction_event(&self, tx_hash: B256) -> AppResult<TransactionEvent> {
        let receipt: TransactionReceipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| {
                AppError::oracle_failed(format!("eth_getTransactionReceipt for {}", tx_hash), e)
            })?
            .ok_or_else(|| AppError::missing_receipt(tx_hash))?;

        let block_number = receipt.block_number.ok_or_else(|| {
            AppError::oracle_invalid_response(format!("receipt for {} has no block number", tx_hash))
        })?;

        let logs = receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect::<Vec<_>>();

        debug!("Fetched receipt {} ({} logs)", tx_hash, logs.len());

        Ok(TransactionEvent::new(
            TxContext {
                hash: receipt.transaction_hash,
                from: receipt.from,
                to: receipt.to,
                block_number,
            },
            logs,
        ))
    }
}

/// Connect to an HTTP/WS/IPC endpoint and build an oracle on top of it
pub async fn connect(url: &str) -> AppResult<RpcOracle<impl Provider + 'static>> {
    let provider = ProviderBuilder::new()
        .on_builtin(url)
        .await
        .map_err(|e| AppError::oracle_failed("Failed to connect to RPC endpoint", e))?;

    info!("✅ Connected to chain-state RPC");
    Ok(RpcOracle::new(provider))
}

#[async_trait]
impl<P> ChainStateOracle for RpcOracle<P>
where
    P: Provider,
{
    async fn get_code(&self, address: Address) -> AppResult<Bytes> {
        self.provider
            .get_code_at(address)
            .latest()
            .await
            .map_err(|e| AppError::oracle_failed(format!("eth_getCode for {}", address), e))
    }

    async fn get_transaction_count(&self, address: Address) -> AppResult<u64> {
        self.provider
            .get_transaction_count(address)
            .latest()
            .await
            .map_err(|e| {
                AppError::oracle_failed(format!("eth_getTransactionCount for {}", address), e)
            })
    }
}
