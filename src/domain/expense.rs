use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::AccountId;

pub type ExpenseId = i64;

/// A single recorded spend event, owned by exactly one account.
/// Immutable once created except for deletion, which refunds the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: f64,
    /// Free-form label. The UI offers a fixed palette but storage accepts
    /// any string, so imported or legacy rows survive unchanged.
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub account_id: AccountId,
}
