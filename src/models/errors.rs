//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so skipped approvals can be
//! traced in logs. Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - DEC_xxx: log decoding errors (scoped to one log entry)
//! - ORACLE_xxx: chain-state lookup errors (scoped to one approval)
//! - CFG_xxx: configuration / input errors (scoped to one invocation)

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn is_decode_error(&self) -> bool {
        self.code.category() == ErrorCategory::Decode
    }

    pub fn is_oracle_error(&self) -> bool {
        self.code.category() == ErrorCategory::Oracle
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Failure scope of an error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Decode,
    Oracle,
    Config,
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Decode Errors
    // ============================================
    /// Log matched the Approval topic but has the wrong topic/data layout
    ApprovalShapeMismatch,
    /// ABI decoding of the Approval payload failed
    ApprovalAbiDecode,

    // ============================================
    // Oracle Errors
    // ============================================
    /// Chain-state request failed (transport, node error)
    OracleRequestFailed,
    /// Chain-state request exceeded its deadline
    OracleTimeout,
    /// Chain-state response could not be interpreted
    OracleInvalidResponse,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Missing environment variable
    ConfigMissingEnv,
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Transaction receipt not available for the requested hash
    ConfigMissingReceipt,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApprovalShapeMismatch => "DEC_APPROVAL_SHAPE",
            Self::ApprovalAbiDecode => "DEC_APPROVAL_ABI",

            Self::OracleRequestFailed => "ORACLE_REQUEST_FAILED",
            Self::OracleTimeout => "ORACLE_TIMEOUT",
            Self::OracleInvalidResponse => "ORACLE_INVALID_RESPONSE",

            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigMissingReceipt => "CFG_MISSING_RECEIPT",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApprovalShapeMismatch | Self::ApprovalAbiDecode => ErrorCategory::Decode,
            Self::OracleRequestFailed | Self::OracleTimeout | Self::OracleInvalidResponse => {
                ErrorCategory::Oracle
            }
            Self::ConfigMissingEnv | Self::ConfigInvalidValue | Self::ConfigMissingReceipt => {
                ErrorCategory::Config
            }
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Approval log with unexpected topic/data layout
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApprovalShapeMismatch, msg)
    }

    /// Approval payload failed ABI decoding
    pub fn abi_decode(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorCode::ApprovalAbiDecode, msg, source)
    }

    /// Oracle request failed
    pub fn oracle_failed(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorCode::OracleRequestFailed, msg, source)
    }

    /// Oracle request timed out
    pub fn oracle_timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::OracleTimeout, msg)
    }

    /// Oracle answered with something unusable
    pub fn oracle_invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::OracleInvalidResponse, msg)
    }

    /// Missing environment variable
    pub fn missing_env(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingEnv,
            format!("Missing environment variable: {}", key),
        )
    }

    /// Invalid configuration value
    pub fn invalid_value(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }

    /// No receipt for the requested transaction
    pub fn missing_receipt(tx_hash: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConfigMissingReceipt,
            format!("No receipt found for transaction {}", tx_hash),
        )
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::oracle_timeout("eth_getCode exceeded 5000ms");
        assert_eq!(err.code, ErrorCode::OracleTimeout);
        assert_eq!(err.code_str(), "ORACLE_TIMEOUT");
        assert_eq!(err.to_string(), "[ORACLE_TIMEOUT] eth_getCode exceeded 5000ms");
    }

    #[test]
    fn test_categories() {
        assert!(AppError::shape_mismatch("4 topics").is_decode_error());
        assert!(AppError::oracle_timeout("slow").is_oracle_error());
        assert!(!AppError::missing_env("ETH_HTTP_URL").is_oracle_error());
        assert_eq!(ErrorCode::ConfigInvalidValue.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = AppError::oracle_failed("eth_getCode failed", io);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection reset"));
    }
}
