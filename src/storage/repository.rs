use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{Account, AccountId, Expense, ExpenseId};

use super::{MIGRATION_001_INITIAL, MIGRATION_002_CATEGORY};

/// Per-category expense total, as returned by the stats query.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Option<String>,
    pub total: f64,
}

/// Repository for persisting and querying accounts and expenses.
///
/// Created once at process start and passed down to the service layer; this
/// is the only component allowed to touch the store. Every operation that
/// spans more than one statement runs inside a single transaction so the
/// account balance counter can never drift from the expense history.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Idempotent: safe to call on every start.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        // Lazy column migration: a duplicate-column failure means a newer
        // database that already has the column, which is not an error.
        if let Err(err) = sqlx::query(MIGRATION_002_CATEGORY).execute(&self.pool).await {
            if !err.to_string().contains("duplicate column name") {
                return Err(err).context("Failed to run migration 002");
            }
        }

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Account operations
    // ========================

    /// Insert a new account and return its generated id.
    pub async fn insert_account(&self, name: &str, balance: f64) -> Result<AccountId> {
        let result = sqlx::query("INSERT INTO accounts (name, balance) VALUES (?, ?)")
            .bind(name)
            .bind(balance)
            .execute(&self.pool)
            .await
            .context("Failed to insert account")?;
        Ok(result.last_insert_rowid())
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT id, name, balance FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch account")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// List all accounts in storage order.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query("SELECT id, name, balance FROM accounts")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list accounts")?;

        rows.iter().map(Self::row_to_account).collect()
    }

    /// Overwrite an account's name and balance directly.
    /// The stored balance becomes the new baseline; the expense history is
    /// intentionally left untouched. Returns the number of rows updated.
    pub async fn update_account(&self, id: AccountId, name: &str, balance: f64) -> Result<u64> {
        let result = sqlx::query("UPDATE accounts SET name = ?, balance = ? WHERE id = ?")
            .bind(name)
            .bind(balance)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update account")?;
        Ok(result.rows_affected())
    }

    /// Delete an account and all of its expenses in one transaction.
    /// Deleted expenses are not refunded since the account itself goes away.
    pub async fn delete_account(&self, id: AccountId) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        // Expenses first: the foreign key forbids orphaning them.
        sqlx::query("DELETE FROM expenses WHERE accountId = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete account expenses")?;

        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete account")?;

        tx.commit().await.context("Failed to commit account delete")?;
        Ok(())
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        Ok(Account {
            id: row.get("id"),
            name: row.get("name"),
            balance: row.get("balance"),
        })
    }

    // ========================
    // Expense operations
    // ========================

    /// Insert an expense and debit the owning account's balance.
    /// Both writes happen in one transaction; returns the new expense id.
    pub async fn insert_expense(
        &self,
        title: &str,
        amount: f64,
        category: Option<&str>,
        account_id: AccountId,
        date: DateTime<Utc>,
    ) -> Result<ExpenseId> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let result = sqlx::query(
            r#"
            INSERT INTO expenses (title, amount, date, category, accountId)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(amount)
        .bind(date.to_rfc3339())
        .bind(category)
        .bind(account_id)
        .execute(&mut *tx)
        .await
        .context("Failed to insert expense")?;

        sqlx::query("UPDATE accounts SET balance = balance - ? WHERE id = ?")
            .bind(amount)
            .bind(account_id)
            .execute(&mut *tx)
            .await
            .context("Failed to debit account balance")?;

        tx.commit().await.context("Failed to commit expense insert")?;
        Ok(result.last_insert_rowid())
    }

    /// Delete an expense and refund its amount to the owning account.
    /// Read, refund and delete happen in one transaction. Returns the
    /// deleted expense, or `None` (a no-op) if the id does not exist.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<Option<Expense>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let row = sqlx::query(
            "SELECT id, title, amount, date, category, accountId FROM expenses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch expense")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let expense = Self::row_to_expense(&row)?;

        sqlx::query("UPDATE accounts SET balance = balance + ? WHERE id = ?")
            .bind(expense.amount)
            .bind(expense.account_id)
            .execute(&mut *tx)
            .await
            .context("Failed to refund account balance")?;

        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete expense")?;

        tx.commit().await.context("Failed to commit expense delete")?;
        Ok(Some(expense))
    }

    /// List expenses for one account, newest first.
    /// Descending date order is a hard contract relied on by history views.
    pub async fn list_expenses_by_account(&self, account_id: AccountId) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, amount, date, category, accountId
            FROM expenses
            WHERE accountId = ?
            ORDER BY date DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses for account")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// List all expenses across accounts, newest first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, amount, date, category, accountId
            FROM expenses
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Sum expense amounts per category, largest first.
    pub async fn sum_expenses_by_category(&self) -> Result<Vec<CategoryTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT category, SUM(amount) as total
            FROM expenses
            GROUP BY category
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to sum expenses by category")?;

        Ok(rows
            .iter()
            .map(|row| CategoryTotal {
                category: row.get("category"),
                total: row.get("total"),
            })
            .collect())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let date_str: String = row.get("date");
        // Legacy rows may carry a NULL title.
        let title: Option<String> = row.get("title");

        Ok(Expense {
            id: row.get("id"),
            title: title.unwrap_or_default(),
            amount: row.get("amount"),
            category: row.get("category"),
            date: DateTime::parse_from_rfc3339(&date_str)
                .context("Invalid expense date timestamp")?
                .with_timezone(&Utc),
            account_id: row.get("accountId"),
        })
    }
}
