//! Account service implementation

use std::sync::Arc;

use chrono::NaiveDate;
use common::decimal::{ensure_non_negative, Amount};
use common::error::{Error, ErrorExt, Result};
use common::model::account::{Account, Operation};
use tracing::{debug, info};

use crate::config::AccountServiceConfig;
use crate::repository::{InMemoryLedgerRepository, LedgerRepository};

/// Date format accepted by the statement-by-date query
pub const STATEMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ledger of customer accounts and their statements
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn LedgerRepository>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountService {
    /// Create a new account service backed by memory
    pub fn new() -> Self {
        Self::with_config(AccountServiceConfig::default())
    }

    /// Create a new account service with a configuration
    pub fn with_config(config: AccountServiceConfig) -> Self {
        Self {
            repo: Arc::new(InMemoryLedgerRepository::new()),
            config,
        }
    }

    /// Create a new account service over a specific repository
    pub fn with_repository(repo: Arc<dyn LedgerRepository>, config: AccountServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Open an account for a tax id that is not yet in use
    pub async fn create_account(&self, tax_id: &str, name: &str) -> Result<Account> {
        if tax_id.trim().is_empty() {
            return Err(Error::ValidationError("Tax id must not be empty".to_string()));
        }

        let account = self.repo.create_account(tax_id, name).await
            .with_context(|| format!("Failed to create account for tax id {}", tax_id))?;

        info!("Created account {} for tax id {}", account.id, tax_id);
        Ok(account)
    }

    /// Resolve the live account owning a tax id
    pub async fn find_customer(&self, tax_id: &str) -> Result<Account> {
        self.repo.find_by_tax_id(tax_id).await?
            .ok_or_else(|| Error::CustomerNotFound(format!("No account for tax id {}", tax_id)))
    }

    /// Latest state of a resolved account
    pub async fn get_account(&self, customer: &Account) -> Result<Account> {
        self.repo.get_account(customer.id).await?
            .ok_or_else(|| Error::CustomerNotFound(format!("Account not found: {}", customer.id)))
    }

    /// All live accounts in creation order
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repo.list_accounts().await
    }

    /// Change the display name of an account
    pub async fn rename_account(&self, customer: &Account, name: &str) -> Result<Account> {
        debug!("Renaming account {} to {:?}", customer.id, name);
        self.repo.rename_account(customer.id, name).await
    }

    /// Remove an account and return the accounts that remain
    pub async fn delete_account(&self, customer: &Account) -> Result<Vec<Account>> {
        let removed = self.repo.delete_account(customer.id).await
            .with_context(|| format!("Failed to delete account for tax id {}", customer.tax_id))?;

        info!("Deleted account {} for tax id {}", removed.id, removed.tax_id);
        self.repo.list_accounts().await
    }

    /// Credit an account
    pub async fn deposit(
        &self,
        customer: &Account,
        amount: Amount,
        description: Option<String>,
    ) -> Result<Operation> {
        let amount = ensure_non_negative(amount)?;
        let operation = self.repo.record_operation(customer.id, Operation::credit(amount, description)).await
            .with_context(|| format!("Failed to deposit into account {}", customer.id))?;

        self.log_operation(customer, &operation);
        Ok(operation)
    }

    /// Debit an account if its balance covers the amount
    pub async fn withdraw(
        &self,
        customer: &Account,
        amount: Amount,
        description: Option<String>,
    ) -> Result<Operation> {
        let amount = ensure_non_negative(amount)?;
        let operation = self.repo.record_operation(customer.id, Operation::debit(amount, description)).await
            .with_context(|| format!("Cannot withdraw {} from account {}", amount, customer.id))?;

        self.log_operation(customer, &operation);
        Ok(operation)
    }

    /// Full statement in chronological order
    pub async fn get_statement(&self, customer: &Account) -> Result<Vec<Operation>> {
        Ok(self.get_account(customer).await?.statement)
    }

    /// Credits minus debits over the full statement
    pub async fn get_balance(&self, customer: &Account) -> Result<Amount> {
        self.get_account(customer).await?.balance()
    }

    /// Operations created on a calendar day given as `YYYY-MM-DD`
    pub async fn get_statement_by_date(&self, customer: &Account, date: &str) -> Result<Vec<Operation>> {
        let day = NaiveDate::parse_from_str(date.trim(), STATEMENT_DATE_FORMAT)
            .map_err(|e| Error::ValidationError(format!("Invalid date {:?}: {}", date, e)))?;
        let offset = self.config.statement_offset()?;

        let account = self.get_account(customer).await?;
        Ok(account.statement_on(day, &offset))
    }

    fn log_operation(&self, customer: &Account, operation: &Operation) {
        if self.config.operation_logging {
            info!(
                "Recorded {:?} of {} on account {} (tax id {})",
                operation.operation_type, operation.amount, customer.id, customer.tax_id
            );
        } else {
            debug!("Recorded {:?} of {} on account {}", operation.operation_type, operation.amount, customer.id);
        }
    }
}
