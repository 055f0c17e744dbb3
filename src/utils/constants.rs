//! Constants Module - Single Source of Truth
//!
//! Alert identity, defaults and environment keys used across the crate.
//! No hardcoded values in other modules.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "ApprovalSentry";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// FINDING IDENTITY
// ============================================

/// Name carried by every emitted finding
pub const FINDING_NAME: &str = "Suspicious Token Approval";

/// Fixed alert code for downstream routing
pub const ALERT_ID: &str = "VENN-APPROVAL-1";

/// Default protocol tag
pub const DEFAULT_PROTOCOL: &str = "ethereum";

/// Separator between reasons in the finding description
pub const DESCRIPTION_REASON_SEPARATOR: &str = "; ";

/// Separator between reasons in the `reasons` metadata field
pub const METADATA_REASON_SEPARATOR: &str = ", ";

// ============================================
// EVENT SIGNATURES
// ============================================

/// ERC-20 Approval event signature
pub const APPROVAL_EVENT_SIGNATURE: &str = "Approval(address,address,uint256)";

/// Topics of an ERC-20 Approval log: signature, owner, spender
pub const APPROVAL_TOPIC_COUNT: usize = 3;

/// ABI-encoded `uint256 value` payload length
pub const APPROVAL_DATA_LEN: usize = 32;

/// Zero bytes ahead of an address in an indexed topic
pub const ADDRESS_PADDING_LEN: usize = 12;

// ============================================
// EVALUATOR DEFAULTS
// ============================================

/// Default deadline for a single oracle lookup (milliseconds)
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 5_000;

/// Default number of approvals evaluated in parallel per transaction
pub const DEFAULT_MAX_CONCURRENT_APPROVALS: usize = 16;

/// Fallback RPC endpoint when nothing is configured
pub const DEFAULT_HTTP_URL: &str = "http://127.0.0.1:8545";

// ============================================
// ENVIRONMENT KEYS
// ============================================

pub const ENV_HTTP_URL: &str = "ETH_HTTP_URL";
pub const ENV_ORACLE_TIMEOUT_MS: &str = "ORACLE_TIMEOUT_MS";
pub const ENV_MAX_CONCURRENT_APPROVALS: &str = "MAX_CONCURRENT_APPROVALS";
pub const ENV_FINDING_PROTOCOL: &str = "FINDING_PROTOCOL";
pub const ENV_STATS_DIR: &str = "APPROVAL_STATS_DIR";

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_signature_matches_erc20_topic() {
        // Well-known topic0 of ERC-20 Approval
        let expected = "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925";
        assert_eq!(
            keccak256(APPROVAL_EVENT_SIGNATURE.as_bytes()).to_string(),
            expected
        );
    }
}
