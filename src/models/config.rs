//! Configuration module for Approval Sentry
//!
//! Defaults come from utils/constants.rs; environment overrides are
//! validated in `EvaluatorConfig::from_env`.

use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HTTP_URL, DEFAULT_MAX_CONCURRENT_APPROVALS, DEFAULT_ORACLE_TIMEOUT_MS,
    DEFAULT_PROTOCOL, ENV_FINDING_PROTOCOL, ENV_HTTP_URL, ENV_MAX_CONCURRENT_APPROVALS,
    ENV_ORACLE_TIMEOUT_MS, ENV_STATS_DIR,
};

/// Configuration for the approval risk evaluator
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// HTTP RPC URL for chain-state lookups
    pub http_url: String,
    /// Deadline for a single oracle lookup
    pub oracle_timeout: Duration,
    /// Maximum approvals of one transaction evaluated in parallel
    pub max_concurrent_approvals: usize,
    /// Protocol tag stamped on findings
    pub protocol: String,
    /// Where the binary writes a telemetry snapshot, if anywhere
    pub stats_dir: Option<PathBuf>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            http_url: std::env::var(ENV_HTTP_URL).unwrap_or_else(|_| DEFAULT_HTTP_URL.to_string()),
            oracle_timeout: Duration::from_millis(DEFAULT_ORACLE_TIMEOUT_MS),
            max_concurrent_approvals: DEFAULT_MAX_CONCURRENT_APPROVALS,
            protocol: DEFAULT_PROTOCOL.to_string(),
            stats_dir: None,
        }
    }
}

impl EvaluatorConfig {
    /// Load configuration from the process environment.
    /// `ETH_HTTP_URL` is required; the rest fall back to defaults.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_url = lookup(ENV_HTTP_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::missing_env(ENV_HTTP_URL))?;

        let oracle_timeout = match lookup(ENV_ORACLE_TIMEOUT_MS) {
            Some(raw) => Duration::from_millis(parse_positive(ENV_ORACLE_TIMEOUT_MS, &raw)?),
            None => Duration::from_millis(DEFAULT_ORACLE_TIMEOUT_MS),
        };

        let max_concurrent_approvals = match lookup(ENV_MAX_CONCURRENT_APPROVALS) {
            Some(raw) => parse_positive(ENV_MAX_CONCURRENT_APPROVALS, &raw)? as usize,
            None => DEFAULT_MAX_CONCURRENT_APPROVALS,
        };

        let protocol = match lookup(ENV_FINDING_PROTOCOL) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(AppError::invalid_value(ENV_FINDING_PROTOCOL, &raw))
            }
            Some(raw) => raw.trim().to_string(),
            None => DEFAULT_PROTOCOL.to_string(),
        };

        let stats_dir = lookup(ENV_STATS_DIR)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        info!(
            "⚙️ Config loaded | oracle timeout: {}ms | concurrency: {} | protocol: {}",
            oracle_timeout.as_millis(),
            max_concurrent_approvals,
            protocol
        );

        Ok(Self {
            http_url,
            oracle_timeout,
            max_concurrent_approvals,
            protocol,
            stats_dir,
        })
    }

    /// RPC URL with any path-embedded API key masked (for logging)
    pub fn masked_url(&self) -> String {
        if self.http_url.contains("/v2/") {
            let parts: Vec<&str> = self.http_url.split("/v2/").collect();
            if parts.len() == 2 {
                return format!("{}/v2/***HIDDEN***", parts[0]);
            }
        }
        self.http_url.clone()
    }
}

fn parse_positive(key: &str, raw: &str) -> AppResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AppError::invalid_value(key, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            EvaluatorConfig::from_lookup(lookup_from(&[(ENV_HTTP_URL, "http://node:8545")]))
                .unwrap();
        assert_eq!(config.http_url, "http://node:8545");
        assert_eq!(config.oracle_timeout, Duration::from_millis(DEFAULT_ORACLE_TIMEOUT_MS));
        assert_eq!(config.max_concurrent_approvals, DEFAULT_MAX_CONCURRENT_APPROVALS);
        assert_eq!(config.protocol, "ethereum");
    }

    #[test]
    fn test_missing_url_rejected() {
        let err = EvaluatorConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissingEnv);
    }

    #[test]
    fn test_overrides() {
        let config = EvaluatorConfig::from_lookup(lookup_from(&[
            (ENV_HTTP_URL, "http://node:8545"),
            (ENV_ORACLE_TIMEOUT_MS, "250"),
            (ENV_MAX_CONCURRENT_APPROVALS, "4"),
            (ENV_FINDING_PROTOCOL, "polygon"),
        ]))
        .unwrap();
        assert_eq!(config.oracle_timeout, Duration::from_millis(250));
        assert_eq!(config.max_concurrent_approvals, 4);
        assert_eq!(config.protocol, "polygon");
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        for bad in ["0", "-1", "soon"] {
            let err = EvaluatorConfig::from_lookup(lookup_from(&[
                (ENV_HTTP_URL, "http://node:8545"),
                (ENV_ORACLE_TIMEOUT_MS, bad),
            ]))
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::ConfigInvalidValue, "value {bad:?}");
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = EvaluatorConfig::from_lookup(lookup_from(&[
            (ENV_HTTP_URL, "http://node:8545"),
            (ENV_MAX_CONCURRENT_APPROVALS, "0"),
        ]))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn test_blank_protocol_rejected() {
        for blank in ["", "   "] {
            let err = EvaluatorConfig::from_lookup(lookup_from(&[
                (ENV_HTTP_URL, "http://node:8545"),
                (ENV_FINDING_PROTOCOL, blank),
            ]))
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::ConfigInvalidValue, "value {blank:?}");
        }
    }

    #[test]
    fn test_stats_dir() {
        let unset =
            EvaluatorConfig::from_lookup(lookup_from(&[(ENV_HTTP_URL, "http://node:8545")]))
                .unwrap();
        assert_eq!(unset.stats_dir, None);

        let blank = EvaluatorConfig::from_lookup(lookup_from(&[
            (ENV_HTTP_URL, "http://node:8545"),
            (ENV_STATS_DIR, "  "),
        ]))
        .unwrap();
        assert_eq!(blank.stats_dir, None);

        let set = EvaluatorConfig::from_lookup(lookup_from(&[
            (ENV_HTTP_URL, "http://node:8545"),
            (ENV_STATS_DIR, "/var/lib/approval_sentry"),
        ]))
        .unwrap();
        assert_eq!(set.stats_dir, Some(PathBuf::from("/var/lib/approval_sentry")));
    }

    #[test]
    fn test_masked_url() {
        let config = EvaluatorConfig {
            http_url: "https://eth-mainnet.g.alchemy.com/v2/secret".to_string(),
            ..EvaluatorConfig::default()
        };
        assert_eq!(
            config.masked_url(),
            "https://eth-mainnet.g.alchemy.com/v2/***HIDDEN***"
        );
    }
}
