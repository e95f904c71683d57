use chrono::{DateTime, Utc};

use crate::domain::{Account, AccountId, Expense, ExpenseId};
use crate::storage::{CategoryTotal, Repository};

use super::AppError;

/// Application service providing the account and expense operations.
/// This is the primary interface for any client (CLI, API, TUI, etc.) and
/// the sole gateway to the store.
///
/// Balances are maintained as running counters, not live aggregates: every
/// expense insert or delete adjusts the owning account's balance inside the
/// same repository transaction, so no caller can perform one half of the
/// pair without the other.
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a database at the given path (create + migrate + connect).
    /// Idempotent: safe to call on every process start.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database without running migrations.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Account operations
    // ========================

    /// List all accounts.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.repo.list_accounts().await?)
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, AppError> {
        self.repo
            .get_account(id)
            .await?
            .ok_or(AppError::AccountNotFound(id))
    }

    /// Create a new account with an initial balance.
    /// The balance may be any finite value, including negative: accounts are
    /// running ledgers, not spending caps.
    pub async fn create_account(
        &self,
        name: &str,
        initial_balance: f64,
    ) -> Result<Account, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::EmptyAccountName);
        }
        if !initial_balance.is_finite() {
            return Err(AppError::InvalidAmount(initial_balance.to_string()));
        }

        let id = self.repo.insert_account(name, initial_balance).await?;
        Ok(Account {
            id,
            name: name.to_string(),
            balance: initial_balance,
        })
    }

    /// Overwrite an account's name and balance.
    ///
    /// This is the one sanctioned reset path: the supplied balance becomes
    /// the new baseline and is NOT recomputed from the expense history, so
    /// clients can use it for manual balance correction. Subsequent expenses
    /// debit from the new baseline.
    pub async fn update_account(
        &self,
        id: AccountId,
        name: &str,
        balance: f64,
    ) -> Result<Account, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::EmptyAccountName);
        }
        if !balance.is_finite() {
            return Err(AppError::InvalidAmount(balance.to_string()));
        }

        let updated = self.repo.update_account(id, name, balance).await?;
        if updated == 0 {
            return Err(AppError::AccountNotFound(id));
        }

        Ok(Account {
            id,
            name: name.to_string(),
            balance,
        })
    }

    /// Delete an account and all of its expenses.
    /// The expenses disappear with the account, with no refund (there is
    /// nothing left to refund into). Returns the deleted account.
    pub async fn delete_account(&self, id: AccountId) -> Result<Account, AppError> {
        let account = self.get_account(id).await?;
        self.repo.delete_account(id).await?;
        Ok(account)
    }

    // ========================
    // Expense operations
    // ========================

    /// List expenses for an account, newest first.
    /// An unknown or deleted account id yields an empty list, not an error,
    /// so history views can be refreshed safely after an account delete.
    pub async fn list_expenses_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses_by_account(account_id).await?)
    }

    /// List all expenses across accounts, newest first.
    pub async fn list_all_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses().await?)
    }

    /// Record a new expense against an account, dated now.
    /// Inserts the expense row and debits the account balance in one atomic
    /// unit. The account may go negative.
    pub async fn create_expense(
        &self,
        title: &str,
        amount: f64,
        category: Option<&str>,
        account_id: AccountId,
    ) -> Result<Expense, AppError> {
        self.create_expense_at(title, amount, category, account_id, Utc::now())
            .await
    }

    /// Record an expense with an explicit timestamp (for backfilling).
    pub async fn create_expense_at(
        &self,
        title: &str,
        amount: f64,
        category: Option<&str>,
        account_id: AccountId,
        date: DateTime<Utc>,
    ) -> Result<Expense, AppError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(AppError::InvalidAmount(format!(
                "{} (amount must be positive)",
                amount
            )));
        }

        // The account must exist before we debit it.
        let account = self.get_account(account_id).await?;

        let id = self
            .repo
            .insert_expense(title, amount, category, account.id, date)
            .await?;

        Ok(Expense {
            id,
            title: title.to_string(),
            amount,
            category: category.map(str::to_string),
            date,
            account_id: account.id,
        })
    }

    /// Delete an expense, refunding its amount to the owning account.
    /// Deletes are idempotent: an unknown id is a silent no-op returning
    /// `None`, and no balance is touched.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<Option<Expense>, AppError> {
        Ok(self.repo.delete_expense(id).await?)
    }

    // ========================
    // Stats operations
    // ========================

    /// Total spending per category across all accounts, largest first.
    pub async fn category_totals(&self) -> Result<Vec<CategoryTotal>, AppError> {
        Ok(self.repo.sum_expenses_by_category().await?)
    }
}
