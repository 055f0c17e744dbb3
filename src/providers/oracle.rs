//! Chain-state oracle
//!
//! The evaluator only needs two read-only facts about a spender: whether
//! it has deployed code and how many transactions it has sent. Any source
//! of those facts (RPC node, mock, cache) implements `ChainStateOracle`.
//!
//! Lookups never fall back to a default answer: an unreachable oracle is
//! an error, not "EOA" or "no history".

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::models::errors::{AppError, AppResult};
use crate::models::types::SpenderFacts;

/// Read-only view of current chain state
#[async_trait]
pub trait ChainStateOracle: Send + Sync {
    /// Deployed bytecode at the current head (empty for EOAs)
    async fn get_code(&self, address: Address) -> AppResult<Bytes>;

    /// Number of transactions sent by `address` at the current head
    async fn get_transaction_count(&self, address: Address) -> AppResult<u64>;
}

/// True iff `address` has non-empty deployed code
pub async fn is_contract_account<O>(oracle: &O, address: Address) -> AppResult<bool>
where
    O: ChainStateOracle + ?Sized,
{
    let code = oracle.get_code(address).await?;
    Ok(!code.is_empty())
}

/// Transaction count of `address`, used as an account-age proxy
pub async fn transaction_count_of<O>(oracle: &O, address: Address) -> AppResult<u64>
where
    O: ChainStateOracle + ?Sized,
{
    oracle.get_transaction_count(address).await
}

/// Fetch both spender facts concurrently, each bounded by `deadline`
pub async fn gather_spender_facts<O>(
    oracle: &O,
    spender: Address,
    deadline: Duration,
) -> AppResult<SpenderFacts>
where
    O: ChainStateOracle + ?Sized,
{
    let (is_contract, transaction_count) = tokio::try_join!(
        with_deadline("eth_getCode", spender, deadline, is_contract_account(oracle, spender)),
        with_deadline(
            "eth_getTransactionCount",
            spender,
            deadline,
            transaction_count_of(oracle, spender)
        ),
    )?;

    debug!(
        "Spender {} | contract: {} | tx count: {}",
        spender, is_contract, transaction_count
    );

    Ok(SpenderFacts {
        is_contract,
        transaction_count,
    })
}

async fn with_deadline<T, F>(
    method: &str,
    address: Address,
    deadline: Duration,
    lookup: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, lookup).await {
        Ok(result) => result,
        Err(_) => Err(AppError::oracle_timeout(format!(
            "{} for {} exceeded {}ms",
            method,
            address,
            deadline.as_millis()
        ))),
    }
}
