//! API handlers
//!
//! This module contains all the API endpoint handlers organized by resource.
//! Every route except account creation runs behind customer resolution, so
//! handlers receive the resolved account as a [`customer::Customer`] extension
//! and call straight into the ledger.

pub mod account;
pub mod customer;
pub mod operation;
pub mod statement;

pub use customer::{resolve_customer, Customer};
