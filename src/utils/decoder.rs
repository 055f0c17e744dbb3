//! Approval log decoder
//! Isolates ERC-20 Approval logs in a transaction and decodes them

use alloy_primitives::{Log, B256};
use alloy_sol_types::{sol, SolEvent};

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ApprovalEvent, TransactionEvent, TxContext};
use crate::utils::constants::{ADDRESS_PADDING_LEN, APPROVAL_DATA_LEN, APPROVAL_TOPIC_COUNT};

// ERC-20 Approval event
sol! {
    event Approval(address indexed owner, address indexed spender, uint256 value);
}

/// Decoder for ERC-20 Approval logs
pub struct ApprovalDecoder;

impl ApprovalDecoder {
    /// keccak256("Approval(address,address,uint256)"), computed at compile time
    pub const APPROVAL_TOPIC: B256 = Approval::SIGNATURE_HASH;

    /// True if topic0 is the Approval signature
    #[inline]
    pub fn is_approval_log(log: &Log) -> bool {
        log.data.topics().first() == Some(&Self::APPROVAL_TOPIC)
    }

    /// Decode every Approval log of a transaction, in log order.
    /// Each entry fails independently; non-Approval logs are skipped.
    pub fn extract(event: &TransactionEvent) -> Vec<AppResult<ApprovalEvent>> {
        event
            .logs
            .iter()
            .enumerate()
            .filter(|(_, log)| Self::is_approval_log(log))
            .map(|(log_index, log)| Self::decode(&event.tx, log_index, log))
            .collect()
    }

    /// Decode a single Approval log.
    /// Only the ERC-20 layout is accepted: three topics and a 32-byte value.
    /// ERC-721 Approval shares topic0 but indexes the token id, so it is rejected here.
    pub fn decode(tx: &TxContext, log_index: usize, log: &Log) -> AppResult<ApprovalEvent> {
        let topics = log.data.topics();
        let data = log.data.data.as_ref();

        if topics.len() != APPROVAL_TOPIC_COUNT || data.len() != APPROVAL_DATA_LEN {
            return Err(AppError::shape_mismatch(format!(
                "log #{} from {}: expected {} topics and {} data bytes, got {} topics and {} bytes",
                log_index,
                log.address,
                APPROVAL_TOPIC_COUNT,
                APPROVAL_DATA_LEN,
                topics.len(),
                data.len()
            )));
        }

        // Indexed addresses are left-padded words; dirty padding is not an address
        for (position, topic) in topics.iter().enumerate().skip(1) {
            if topic[..ADDRESS_PADDING_LEN].iter().any(|byte| *byte != 0) {
                return Err(AppError::shape_mismatch(format!(
                    "log #{} from {}: topic {} is not a left-padded address: {}",
                    log_index, log.address, position, topic
                )));
            }
        }

        let decoded = Approval::decode_raw_log(topics.iter().copied(), data, true).map_err(|e| {
            AppError::abi_decode(format!("log #{} from {}", log_index, log.address), e)
        })?;

        Ok(ApprovalEvent {
            owner: decoded.owner,
            spender: decoded.spender,
            value: decoded.value,
            token: log.address,
            tx_hash: tx.hash,
            tx_from: tx.from,
            block_number: tx.block_number,
            log_index,
        })
    }
}
