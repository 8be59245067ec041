//! Account service holding the in-memory ledger of customer accounts

pub mod service;
pub mod repository;
pub mod config;

pub use service::AccountService;
pub use repository::{LedgerRepository, InMemoryLedgerRepository};
pub use config::AccountServiceConfig;
