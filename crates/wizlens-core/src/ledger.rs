//! Read-only data contract consumed by the analytics engine
//!
//! [`crate::db::Database`] implements it against a MoneyWiz snapshot; tests
//! can substitute an in-memory ledger.

use crate::error::Result;
use crate::models::{Account, CashFlowEntry, Category, Transaction};

/// Primitive views over a ledger snapshot.
///
/// Implementations must be safe to call from concurrent tool invocations.
/// Nothing is cached: every call reads the snapshot again.
pub trait Ledger: Send + Sync {
    /// All named accounts with computed balances, sorted by name
    fn list_accounts(&self) -> Result<Vec<Account>>;

    /// One account with its computed balance; `Error::NotFound` if absent
    fn get_account_balance(&self, account_id: i64) -> Result<Account>;

    /// Most recent transactions first, at most `limit`, optionally restricted
    /// to one account
    fn list_transactions(&self, account_id: Option<i64>, limit: usize) -> Result<Vec<Transaction>>;

    /// All named categories, sorted by name
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Positive-amount transactions, newest first. `months_back == 0` means
    /// the whole history; otherwise the window ends at the latest transaction
    /// in the snapshot.
    fn income_data(&self, months_back: u32) -> Result<Vec<CashFlowEntry>>;

    /// Negative-amount transactions as positive magnitudes, newest first.
    /// Windowing as for [`Ledger::income_data`].
    fn spending_data(&self, months_back: u32) -> Result<Vec<CashFlowEntry>>;
}
