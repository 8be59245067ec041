//! Decimal type utilities for precise money calculations

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

use crate::error::{Error, Result};

/// Monetary amount with exact decimal precision
pub type Amount = Decimal;

/// Ensure an amount can be recorded on a statement
pub fn ensure_non_negative(amount: Amount) -> Result<Amount> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::ValidationError(format!("Amount must not be negative: {}", amount)));
    }
    Ok(amount)
}
