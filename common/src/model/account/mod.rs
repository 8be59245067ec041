//! Account models and related types

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Amount;
use crate::error::{Error, Result};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Direction of a statement entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Money coming in (deposit)
    Credit,
    /// Money going out (withdrawal)
    Debit,
}

/// One entry on an account statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Credit or debit
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    /// Amount moved, never negative
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub amount: Amount,
    /// Free text supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// Create a credit stamped with the current time
    pub fn credit(amount: Amount, description: Option<String>) -> Self {
        Self::at(OperationType::Credit, amount, description, Utc::now())
    }

    /// Create a debit stamped with the current time
    pub fn debit(amount: Amount, description: Option<String>) -> Self {
        Self::at(OperationType::Debit, amount, description, Utc::now())
    }

    /// Create an operation with an explicit timestamp
    pub fn at(
        operation_type: OperationType,
        amount: Amount,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            operation_type,
            amount,
            description,
            created_at,
        }
    }

    /// Calendar day of the operation in the given offset
    pub fn local_date(&self, offset: &FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(offset).date_naive()
    }
}

/// Sum of credits minus sum of debits over a statement
pub fn balance(statement: &[Operation]) -> Result<Amount> {
    statement.iter().try_fold(Amount::ZERO, |acc, operation| {
        let next = match operation.operation_type {
            OperationType::Credit => acc.checked_add(operation.amount),
            OperationType::Debit => acc.checked_sub(operation.amount),
        };
        next.ok_or_else(|| Error::DecimalError(format!("Balance overflowed applying {}", operation.amount)))
    })
}

/// Customer account model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Tax identifier, unique across live accounts
    #[serde(alias = "cpf")]
    pub tax_id: String,
    /// Operations in insertion order
    pub statement: Vec<Operation>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with an empty statement
    pub fn new(tax_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tax_id,
            statement: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Current balance derived from the statement
    pub fn balance(&self) -> Result<Amount> {
        balance(&self.statement)
    }

    /// Append an operation, refusing a debit that would overdraw the account
    /// and a credit that would push the balance past the decimal range
    pub fn record(&mut self, operation: Operation) -> Result<&Operation> {
        let available = self.balance()?;
        match operation.operation_type {
            OperationType::Debit if available < operation.amount => {
                return Err(Error::InsufficientFunds(format!(
                    "Insufficient balance: {} < {} for {}",
                    available, operation.amount, self.tax_id
                )));
            }
            OperationType::Credit if available.checked_add(operation.amount).is_none() => {
                return Err(Error::DecimalError(format!(
                    "Deposit of {} would overflow the balance of {}",
                    operation.amount, self.tax_id
                )));
            }
            _ => {}
        }

        self.statement.push(operation);
        Ok(&self.statement[self.statement.len() - 1])
    }

    /// Add a credit to the statement if the balance can hold it
    pub fn credit(&mut self, amount: Amount, description: Option<String>) -> Result<&Operation> {
        self.record(Operation::credit(amount, description))
    }

    /// Add a debit to the statement if the balance covers it
    pub fn debit(&mut self, amount: Amount, description: Option<String>) -> Result<&Operation> {
        self.record(Operation::debit(amount, description))
    }

    /// Operations created on the given calendar day in the given offset
    pub fn statement_on(&self, date: NaiveDate, offset: &FixedOffset) -> Vec<Operation> {
        self.statement
            .iter()
            .filter(|operation| operation.local_date(offset) == date)
            .cloned()
            .collect()
    }
}
