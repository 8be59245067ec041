//! Configuration for the account service

use std::env;

use chrono::FixedOffset;
use common::error::{Error, Result};

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Offset from UTC, in minutes, used to decide which calendar day an operation belongs to
    pub statement_utc_offset_minutes: i32,
    /// Log every appended operation at info level
    pub operation_logging: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            statement_utc_offset_minutes: 0,
            operation_logging: false,
        }
    }
}

impl AccountServiceConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self {
            statement_utc_offset_minutes: env::var("STATEMENT_UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            operation_logging: env::var("OPERATION_LOGGING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Create a new configuration with custom values
    pub fn new(statement_utc_offset_minutes: i32, operation_logging: bool) -> Self {
        Self {
            statement_utc_offset_minutes,
            operation_logging,
        }
    }

    /// Offset used for statement-by-date filtering
    pub fn statement_offset(&self) -> Result<FixedOffset> {
        self.statement_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::ValidationError(format!(
                    "Invalid statement UTC offset: {} minutes",
                    self.statement_utc_offset_minutes
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_offset() {
        let config = AccountServiceConfig::new(-180, false);
        assert_eq!(config.statement_offset().unwrap().local_minus_utc(), -180 * 60);

        assert_eq!(AccountServiceConfig::default().statement_offset().unwrap().local_minus_utc(), 0);

        let config = AccountServiceConfig::new(24 * 60, false);
        assert!(config.statement_offset().is_err());
    }
}
