//! Error types for the bank ledger
//!
//! One error enum is shared by the account service and the API gateway so that
//! a ledger failure keeps its kind all the way to the HTTP boundary.

use std::fmt::Display;
use thiserror::Error;

/// Ledger error type
#[derive(Debug, Error)]
pub enum Error {
    /// No live account carries the requested tax id
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Tax id is already taken by a live account
    #[error("Customer already exists: {0}")]
    CustomerAlreadyExists(String),

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Amount arithmetic left the decimal range
    #[error("Decimal overflow: {0}")]
    DecimalError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::CustomerNotFound(msg) => Error::CustomerNotFound(format!("{}: {}", context, msg)),
                Error::CustomerAlreadyExists(msg) => Error::CustomerAlreadyExists(format!("{}: {}", context, msg)),
                Error::InsufficientFunds(msg) => Error::InsufficientFunds(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::DecimalError(msg) => Error::DecimalError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_keeps_variant() {
        let result: Result<()> = Err(Error::InsufficientFunds("balance 10 < 20".to_string()));
        let err = result.with_context(|| "Withdraw from 111").unwrap_err();

        match err {
            Error::InsufficientFunds(msg) => assert_eq!(msg, "Withdraw from 111: balance 10 < 20"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
