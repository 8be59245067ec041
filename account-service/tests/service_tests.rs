use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig};
use chrono::{Duration, FixedOffset};
use common::decimal::{dec, Amount};
use common::error::Error;
use common::model::account::OperationType;
use futures::future::join_all;

#[tokio::test]
async fn test_create_and_resolve_account() -> anyhow::Result<()> {
    let service = AccountService::new();

    let created = service.create_account("111", "Alice").await?;
    let resolved = service.find_customer("111").await?;
    assert_eq!(resolved, created);

    // Resolution has no side effects
    let again = service.find_customer("111").await?;
    assert_eq!(again, resolved);

    Ok(())
}

#[tokio::test]
async fn test_blank_tax_id_rejected() {
    let service = AccountService::new();
    let result = service.create_account("  ", "Nobody").await;
    assert!(matches!(result, Err(Error::ValidationError(_))));
    assert!(service.list_accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_customer() {
    let service = AccountService::new();
    let result = service.find_customer("999").await;
    assert!(matches!(result, Err(Error::CustomerNotFound(_))));
}

#[tokio::test]
async fn test_deposits_sum_into_balance() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;

    let amounts = [dec!(10), dec!(0.5), dec!(99.99), dec!(0)];
    for amount in amounts {
        service.deposit(&customer, amount, None).await?;
    }

    let expected: Amount = amounts.iter().sum();
    assert_eq!(service.get_balance(&customer).await?, expected);
    assert_eq!(service.get_statement(&customer).await?.len(), amounts.len());

    Ok(())
}

#[tokio::test]
async fn test_negative_amounts_rejected() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;

    let deposit = service.deposit(&customer, dec!(-5), None).await;
    assert!(matches!(deposit, Err(Error::ValidationError(_))));

    let withdraw = service.withdraw(&customer, dec!(-5), None).await;
    assert!(matches!(withdraw, Err(Error::ValidationError(_))));

    assert!(service.get_statement(&customer).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_withdraw_scenario() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;

    service.deposit(&customer, dec!(100), Some("init".to_string())).await?;
    assert_eq!(service.get_balance(&customer).await?, dec!(100));

    let refused = service.withdraw(&customer, dec!(150), None).await;
    assert!(matches!(refused, Err(Error::InsufficientFunds(_))));
    assert_eq!(service.get_balance(&customer).await?, dec!(100));

    let debit = service.withdraw(&customer, dec!(40), None).await?;
    assert_eq!(debit.description, None);
    assert_eq!(service.get_balance(&customer).await?, dec!(60));

    let statement = service.get_statement(&customer).await?;
    assert_eq!(statement.len(), 2);
    assert_eq!(statement[0].operation_type, OperationType::Credit);
    assert_eq!(statement[0].description.as_deref(), Some("init"));
    assert_eq!(statement[1].operation_type, OperationType::Debit);
    assert_eq!(statement[1].amount, dec!(40));

    Ok(())
}

#[tokio::test]
async fn test_withdraw_keeps_optional_description() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;

    service.deposit(&customer, dec!(20), None).await?;
    let debit = service.withdraw(&customer, dec!(5), Some("rent".to_string())).await?;
    assert_eq!(debit.description.as_deref(), Some("rent"));

    Ok(())
}

#[tokio::test]
async fn test_rename_changes_only_name() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;
    service.deposit(&customer, dec!(10), None).await?;
    let before = service.get_account(&customer).await?;

    let renamed = service.rename_account(&customer, "").await?;

    assert_eq!(renamed.name, "");
    assert_eq!(renamed.id, before.id);
    assert_eq!(renamed.tax_id, before.tax_id);
    assert_eq!(renamed.statement, before.statement);
    assert_eq!(service.find_customer("111").await?.name, "");

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_from_resolution() -> anyhow::Result<()> {
    let service = AccountService::new();
    let alice = service.create_account("111", "Alice").await?;
    let bob = service.create_account("222", "Bob").await?;

    let remaining = service.delete_account(&alice).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, bob.id);

    assert!(matches!(service.find_customer("111").await, Err(Error::CustomerNotFound(_))));
    assert!(matches!(service.delete_account(&alice).await, Err(Error::CustomerNotFound(_))));
    assert!(matches!(service.get_balance(&alice).await, Err(Error::CustomerNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_statement_by_date() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;

    service.deposit(&customer, dec!(100), Some("init".to_string())).await?;
    service.withdraw(&customer, dec!(30), None).await?;

    let statement = service.get_statement(&customer).await?;
    let day = statement[0].created_at.date_naive();

    let same_day: Vec<_> = statement
        .iter()
        .filter(|op| op.created_at.date_naive() == day)
        .cloned()
        .collect();
    let filtered = service.get_statement_by_date(&customer, &day.format("%Y-%m-%d").to_string()).await?;
    assert_eq!(filtered, same_day);
    assert!(!filtered.is_empty());

    let other_day = (day - Duration::days(3)).format("%Y-%m-%d").to_string();
    assert!(service.get_statement_by_date(&customer, &other_day).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_statement_by_date_honours_offset() -> anyhow::Result<()> {
    let service = AccountService::with_config(AccountServiceConfig::new(-180, false));
    let customer = service.create_account("111", "Alice").await?;
    service.deposit(&customer, dec!(1), None).await?;

    let operation = service.get_statement(&customer).await?.remove(0);
    let offset = FixedOffset::west_opt(3 * 3600).unwrap();
    let local_day = operation.created_at.with_timezone(&offset).date_naive();

    let filtered = service.get_statement_by_date(&customer, &local_day.to_string()).await?;
    assert_eq!(filtered, vec![operation]);

    Ok(())
}

#[tokio::test]
async fn test_statement_by_invalid_date() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;

    let result = service.get_statement_by_date(&customer, "not-a-date").await;
    assert!(matches!(result, Err(Error::ValidationError(_))));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_withdrawals_never_overdraw() -> anyhow::Result<()> {
    let service = Arc::new(AccountService::new());
    let customer = service.create_account("111", "Alice").await?;
    service.deposit(&customer, dec!(100), None).await?;

    let handles = (0..20).map(|_| {
        let service = service.clone();
        let customer = customer.clone();
        tokio::spawn(async move { service.withdraw(&customer, dec!(20), None).await })
    });

    let results = join_all(handles).await;
    let succeeded = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
    let refused = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(Error::InsufficientFunds(_)))))
        .count();

    assert_eq!(succeeded, 5);
    assert_eq!(refused, 15);
    assert_eq!(service.get_balance(&customer).await?, Amount::ZERO);

    Ok(())
}

#[tokio::test]
async fn test_service_over_shared_repository() -> anyhow::Result<()> {
    let repo = Arc::new(account_service::InMemoryLedgerRepository::new());
    let service = AccountService::with_repository(repo.clone(), AccountServiceConfig::default());

    let customer = service.create_account("111", "Alice").await?;
    service.deposit(&customer, dec!(25), Some("gift".to_string())).await?;

    let stored = repo.accounts.get(&customer.id).unwrap();
    assert_eq!(stored.statement.len(), 1);
    assert_eq!(stored.balance()?, dec!(25));

    Ok(())
}

#[tokio::test]
async fn test_deposit_past_decimal_range_rejected() -> anyhow::Result<()> {
    let service = AccountService::new();
    let customer = service.create_account("111", "Alice").await?;
    let half_range = dec!(50000000000000000000000000000);

    service.deposit(&customer, half_range, None).await?;

    let overflow = service.deposit(&customer, half_range, None).await;
    assert!(matches!(overflow, Err(Error::DecimalError(_))));

    // The account stays usable
    assert_eq!(service.get_statement(&customer).await?.len(), 1);
    assert_eq!(service.get_balance(&customer).await?, half_range);
    service.withdraw(&customer, dec!(1), None).await?;
    assert_eq!(service.get_balance(&customer).await?, half_range - dec!(1));

    Ok(())
}
