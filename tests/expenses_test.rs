mod common;

use anyhow::Result;
use common::{parse_date, test_service, StandardAccounts};
use walletx::application::AppError;

#[tokio::test]
async fn test_expense_debits_account_balance() -> Result<()> {
    let (service, _temp) = test_service().await?;

    // The walkthrough scenario: Cash starts at 5000.
    let cash = StandardAccounts::create_cash(&service).await?;

    let coffee = service
        .create_expense("Coffee", 50.0, Some("Food"), cash.id)
        .await?;
    assert_eq!(service.get_account(cash.id).await?.balance, 4950.0);

    service
        .create_expense("Bus", 20.0, Some("Transport"), cash.id)
        .await?;
    assert_eq!(service.get_account(cash.id).await?.balance, 4930.0);

    service.delete_expense(coffee.id).await?;
    assert_eq!(service.get_account(cash.id).await?.balance, 4980.0);

    let expenses = service.list_expenses_by_account(cash.id).await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].title, "Bus");
    assert_eq!(expenses[0].amount, 20.0);

    Ok(())
}

#[tokio::test]
async fn test_create_then_delete_restores_balance_exactly() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let cash = StandardAccounts::create_cash(&service).await?;
    let before = service.get_account(cash.id).await?.balance;

    let expense = service
        .create_expense("Groceries", 123.25, Some("Food"), cash.id)
        .await?;
    let deleted = service.delete_expense(expense.id).await?;

    assert_eq!(deleted.map(|e| e.id), Some(expense.id));
    assert_eq!(service.get_account(cash.id).await?.balance, before);

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_expense_is_noop() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let cash = StandardAccounts::create_cash(&service).await?;

    let deleted = service.delete_expense(999).await?;
    assert!(deleted.is_none());
    assert_eq!(service.get_account(cash.id).await?.balance, 5000.0);

    Ok(())
}

#[tokio::test]
async fn test_expense_requires_existing_account() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service
        .create_expense("Phantom", 10.0, None, 99)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(99)));

    assert!(service.list_all_expenses().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_expense_amount_must_be_positive() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let cash = StandardAccounts::create_cash(&service).await?;

    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = service
            .create_expense("Bad", bad, None, cash.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
    }

    // Nothing was recorded and the balance is intact.
    assert!(service.list_expenses_by_account(cash.id).await?.is_empty());
    assert_eq!(service.get_account(cash.id).await?.balance, 5000.0);

    Ok(())
}

#[tokio::test]
async fn test_expenses_ordered_by_date_descending() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let cash = StandardAccounts::create_cash(&service).await?;

    service
        .create_expense_at("Middle", 10.0, None, cash.id, parse_date("2024-02-15"))
        .await?;
    service
        .create_expense_at("Newest", 10.0, None, cash.id, parse_date("2024-03-01"))
        .await?;
    // Backdated insert must sort after the existing rows, regardless of
    // insertion order.
    service
        .create_expense_at("Oldest", 10.0, None, cash.id, parse_date("2024-01-05"))
        .await?;

    let titles: Vec<String> = service
        .list_expenses_by_account(cash.id)
        .await?
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, ["Newest", "Middle", "Oldest"]);

    let all_titles: Vec<String> = service
        .list_all_expenses()
        .await?
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(all_titles, ["Newest", "Middle", "Oldest"]);

    Ok(())
}

#[tokio::test]
async fn test_list_all_spans_accounts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let (a, b) = StandardAccounts::create_pair(&service).await?;
    service
        .create_expense_at("First", 5.0, None, a.id, parse_date("2024-01-01"))
        .await?;
    service
        .create_expense_at("Second", 5.0, None, b.id, parse_date("2024-01-02"))
        .await?;

    let all = service.list_all_expenses().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].account_id, b.id);
    assert_eq!(all[1].account_id, a.id);

    Ok(())
}

#[tokio::test]
async fn test_category_is_free_form_and_optional() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let cash = StandardAccounts::create_cash(&service).await?;

    // Storage is permissive: palette membership is a presentation concern.
    service
        .create_expense("Llama rental", 40.0, Some("Exotic Pets"), cash.id)
        .await?;
    service.create_expense("Misc", 10.0, None, cash.id).await?;

    let expenses = service.list_expenses_by_account(cash.id).await?;
    let categories: Vec<Option<String>> =
        expenses.into_iter().map(|e| e.category).collect();
    assert!(categories.contains(&Some("Exotic Pets".to_string())));
    assert!(categories.contains(&None));

    Ok(())
}

#[tokio::test]
async fn test_category_totals() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let cash = StandardAccounts::create_cash(&service).await?;
    service
        .create_expense("Coffee", 50.0, Some("Food"), cash.id)
        .await?;
    service
        .create_expense("Lunch", 75.0, Some("Food"), cash.id)
        .await?;
    service
        .create_expense("Bus", 20.0, Some("Transport"), cash.id)
        .await?;

    let totals = service.category_totals().await?;
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category.as_deref(), Some("Food"));
    assert_eq!(totals[0].total, 125.0);
    assert_eq!(totals[1].category.as_deref(), Some("Transport"));
    assert_eq!(totals[1].total, 20.0);

    Ok(())
}
