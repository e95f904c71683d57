use serde::{Deserialize, Serialize};

pub type AccountId = i64;

/// A named bucket holding a running balance against which expenses are
/// recorded. `balance` is the current spendable amount, not the original
/// deposit: every expense insert debits it and every expense delete refunds
/// it, so `balance = initial_balance - sum(live expenses)` at all times,
/// unless an explicit account edit resets the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub balance: f64,
}
