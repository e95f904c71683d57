use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{format_amount, parse_amount, AccountId, ExpenseId};

/// Fixed category palette offered by the UI. Storage accepts any string;
/// this list is a presentation concern only.
pub const CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Bills",
    "Entertainment",
    "Shopping",
    "Health",
    "Other",
];

/// WalletX - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "walletx")]
#[command(about = "A local-first expense tracker with per-account running balances")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "walletx.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database (also done implicitly by every command)
    Init,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show total spending per category
    Stats,

    /// List the category palette
    Categories,
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,

        /// Initial balance (e.g., "5000" or "5000.00")
        balance: String,
    },

    /// List all accounts
    List,

    /// Overwrite an account's name and balance (manual correction)
    Update {
        /// Account id
        id: AccountId,

        /// New account name
        name: String,

        /// New balance; becomes the baseline for future expenses
        balance: String,
    },

    /// Delete an account and all of its expenses
    Delete {
        /// Account id
        id: AccountId,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Expense description
        title: String,

        /// Amount spent (e.g., "50.00" or "50")
        amount: String,

        /// Account to debit
        #[arg(short, long)]
        account: AccountId,

        /// Category label (free-form; see `walletx categories`)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Filter by account id (omit for all accounts)
        #[arg(short, long)]
        account: Option<AccountId>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an expense, refunding its amount to the account
    Delete {
        /// Expense id
        id: ExpenseId,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Every invocation ensures the store is ready; migrations are
        // idempotent so repeated starts are harmless.
        let service = LedgerService::init(&self.database).await?;

        match self.command {
            Commands::Init => {
                println!("Database initialized: {}", self.database);
            }

            Commands::Account(account_cmd) => {
                run_account_command(&service, account_cmd).await?;
            }

            Commands::Expense(expense_cmd) => {
                run_expense_command(&service, expense_cmd).await?;
            }

            Commands::Stats => {
                let totals = service.category_totals().await?;
                if totals.is_empty() {
                    println!("No expenses recorded yet.");
                } else {
                    for entry in totals {
                        let label = entry.category.as_deref().unwrap_or("(uncategorized)");
                        println!("{:<16} {}", label, format_amount(entry.total));
                    }
                }
            }

            Commands::Categories => {
                for category in CATEGORIES {
                    println!("{}", category);
                }
            }
        }

        Ok(())
    }
}

async fn run_account_command(service: &LedgerService, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::Create { name, balance } => {
            let balance =
                parse_amount(&balance).context("Invalid balance format. Use '50.00' or '50'")?;
            let account = service.create_account(&name, balance).await?;
            println!(
                "Created account {} '{}' with balance {}",
                account.id,
                account.name,
                format_amount(account.balance)
            );
        }

        AccountCommands::List => {
            let accounts = service.list_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts yet. Create one with 'walletx account create'.");
            } else {
                for account in accounts {
                    println!(
                        "{:<4} {:<20} {}",
                        account.id,
                        account.name,
                        format_amount(account.balance)
                    );
                }
            }
        }

        AccountCommands::Update { id, name, balance } => {
            let balance =
                parse_amount(&balance).context("Invalid balance format. Use '50.00' or '50'")?;
            let account = service.update_account(id, &name, balance).await?;
            println!(
                "Updated account {} '{}' to balance {}",
                account.id,
                account.name,
                format_amount(account.balance)
            );
        }

        AccountCommands::Delete { id } => {
            let account = service.delete_account(id).await?;
            println!(
                "Deleted account {} '{}' and its expense history",
                account.id, account.name
            );
        }
    }

    Ok(())
}

async fn run_expense_command(service: &LedgerService, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            account,
            category,
        } => {
            let amount =
                parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
            let expense = service
                .create_expense(&title, amount, category.as_deref(), account)
                .await?;
            let balance = service.get_account(account).await?.balance;
            println!(
                "Recorded expense {} '{}' for {} (account balance: {})",
                expense.id,
                expense.title,
                format_amount(expense.amount),
                format_amount(balance)
            );
        }

        ExpenseCommands::List { account, json } => {
            let expenses = match account {
                Some(id) => service.list_expenses_by_account(id).await?,
                None => service.list_all_expenses().await?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&expenses)?);
            } else if expenses.is_empty() {
                println!("No expenses recorded.");
            } else {
                for expense in expenses {
                    println!(
                        "{:<4} {:<10} {:<20} {:<14} {}",
                        expense.id,
                        expense.date.format("%Y-%m-%d"),
                        expense.title,
                        expense.category.as_deref().unwrap_or("-"),
                        format_amount(expense.amount)
                    );
                }
            }
        }

        ExpenseCommands::Delete { id } => match service.delete_expense(id).await? {
            Some(expense) => {
                println!(
                    "Deleted expense {} '{}', refunded {}",
                    expense.id,
                    expense.title,
                    format_amount(expense.amount)
                );
            }
            None => {
                println!("Expense {} not found (nothing to delete)", id);
            }
        },
    }

    Ok(())
}
