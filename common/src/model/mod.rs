//! Domain models for the bank ledger

pub mod account;
