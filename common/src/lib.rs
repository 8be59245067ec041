//! Common types and utilities for the bank ledger
//!
//! This library contains the domain model (accounts, operations, statements),
//! the unified error type and the decimal helpers shared by the account service
//! and the API gateway.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
