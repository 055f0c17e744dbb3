//! Finding composition
//! Turns one approval and its triggered reasons into a structured Finding

use std::collections::BTreeMap;

use crate::models::types::{ApprovalEvent, Finding, FindingSeverity, FindingType, RiskReason};
use crate::utils::constants::{
    ALERT_ID, DEFAULT_PROTOCOL, DESCRIPTION_REASON_SEPARATOR, FINDING_NAME,
    METADATA_REASON_SEPARATOR,
};

/// Builds findings stamped with a protocol tag
#[derive(Debug, Clone)]
pub struct FindingComposer {
    protocol: String,
}

impl FindingComposer {
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
        }
    }

    /// One Finding for the approval, or `None` when no reason triggered
    pub fn compose(&self, approval: &ApprovalEvent, reasons: &[RiskReason]) -> Option<Finding> {
        if reasons.is_empty() {
            return None;
        }

        let messages: Vec<&str> = reasons.iter().map(RiskReason::message).collect();

        let description = format!(
            "Suspicious approval from {} to {}. Reason(s): {}",
            approval.owner,
            approval.spender,
            messages.join(DESCRIPTION_REASON_SEPARATOR)
        );

        let mut metadata = BTreeMap::new();
        metadata.insert("owner".to_string(), approval.owner.to_string());
        metadata.insert("spender".to_string(), approval.spender.to_string());
        // Decimal string, never a float: approval amounts exceed 64 bits
        metadata.insert("value".to_string(), approval.value.to_string());
        metadata.insert(
            "reasons".to_string(),
            messages.join(METADATA_REASON_SEPARATOR),
        );
        metadata.insert("token".to_string(), approval.token.to_string());
        metadata.insert("txHash".to_string(), approval.tx_hash.to_string());

        Some(Finding {
            name: FINDING_NAME.to_string(),
            description,
            alert_id: ALERT_ID.to_string(),
            protocol: self.protocol.clone(),
            finding_type: FindingType::Suspicious,
            severity: FindingSeverity::High,
            metadata,
        })
    }
}

impl Default for FindingComposer {
    fn default() -> Self {
        Self::new(DEFAULT_PROTOCOL)
    }
}
