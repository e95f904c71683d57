// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use tempfile::TempDir;
use walletx::application::LedgerService;
use walletx::domain::Account;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Test fixture: standard account setup
pub struct StandardAccounts;

impl StandardAccounts {
    /// Create a single "Cash" account with 5000 balance
    pub async fn create_cash(service: &LedgerService) -> Result<Account> {
        Ok(service.create_account("Cash", 5000.0).await?)
    }

    /// Create a pair of accounts: ("A", 100) and ("B", 200)
    pub async fn create_pair(service: &LedgerService) -> Result<(Account, Account)> {
        let a = service.create_account("A", 100.0).await?;
        let b = service.create_account("B", 200.0).await?;
        Ok((a, b))
    }
}
