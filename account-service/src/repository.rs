//! Repository for ledger data

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::account::{Account, Operation};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Ledger repository trait defining the interface for account storage
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Create a new account, failing if the tax id is taken
    async fn create_account(&self, tax_id: &str, name: &str) -> Result<Account>;

    /// Get an account by ID
    async fn get_account(&self, id: Uuid) -> Result<Option<Account>>;

    /// Find the live account owning a tax id
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Account>>;

    /// All live accounts in creation order
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Overwrite the display name of an account
    async fn rename_account(&self, id: Uuid, name: &str) -> Result<Account>;

    /// Remove exactly one account by ID
    async fn delete_account(&self, id: Uuid) -> Result<Account>;

    /// Append an operation to an account statement
    ///
    /// The balance check for debits and the append happen under the same
    /// per-account lock.
    async fn record_operation(&self, id: Uuid, operation: Operation) -> Result<Operation>;
}

/// In-memory repository for ledger data
pub struct InMemoryLedgerRepository {
    /// Accounts by ID
    pub accounts: DashMap<Uuid, Account>,
    /// Account ID by tax id
    pub tax_ids: DashMap<String, Uuid>,
}

impl InMemoryLedgerRepository {
    /// Create a new in-memory ledger repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            tax_ids: DashMap::new(),
        }
    }
}

impl Default for InMemoryLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn create_account(&self, tax_id: &str, name: &str) -> Result<Account> {
        // The index entry stays locked until the account is in place
        match self.tax_ids.entry(tax_id.to_string()) {
            Entry::Occupied(entry) => Err(Error::CustomerAlreadyExists(format!(
                "Tax id {} belongs to account {}",
                tax_id,
                entry.get()
            ))),
            Entry::Vacant(entry) => {
                let account = Account::new(tax_id.to_string(), name.to_string());
                debug!("Creating account {} for tax id {}", account.id, tax_id);

                self.accounts.insert(account.id, account.clone());
                entry.insert(account.id);
                Ok(account)
            }
        }
    }

    async fn get_account(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Account>> {
        let id = match self.tax_ids.get(tax_id) {
            Some(id) => *id,
            None => return Ok(None),
        };

        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn rename_account(&self, id: Uuid, name: &str) -> Result<Account> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| Error::CustomerNotFound(format!("Account not found: {}", id)))?;

        account.name = name.to_string();
        Ok(account.clone())
    }

    async fn delete_account(&self, id: Uuid) -> Result<Account> {
        let (_, account) = self
            .accounts
            .remove(&id)
            .ok_or_else(|| Error::CustomerNotFound(format!("Account already removed: {}", id)))?;

        // Only free the tax id if it still points at this account
        self.tax_ids.remove_if(&account.tax_id, |_, owner| *owner == id);
        debug!("Deleted account {} (tax id {})", id, account.tax_id);

        Ok(account)
    }

    async fn record_operation(&self, id: Uuid, operation: Operation) -> Result<Operation> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| Error::CustomerNotFound(format!("Account not found: {}", id)))?;

        let recorded = account.record(operation)?.clone();
        Ok(recorded)
    }
}
