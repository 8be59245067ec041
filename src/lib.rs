// This is a metapackage for end-to-end tests
// Re-export crates as modules

pub use account_service;
pub use api_gateway;
pub use common;
