//! Net worth aggregation

use std::collections::BTreeMap;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{Account, AccountSummary, NetWorth};

/// Split balances into assets and liabilities and subtotal them by currency.
///
/// Accounts with an empty currency code still count towards the totals but
/// are left out of `by_currency`.
pub fn calculate_net_worth(accounts: &[Account]) -> NetWorth {
    let mut total_assets = 0.0;
    let mut total_liabilities = 0.0;
    let mut by_currency: BTreeMap<String, f64> = BTreeMap::new();

    for account in accounts {
        if account.balance >= 0.0 {
            total_assets += account.balance;
        } else {
            total_liabilities += account.balance.abs();
        }

        if !account.currency.is_empty() {
            *by_currency.entry(account.currency.clone()).or_insert(0.0) += account.balance;
        }
    }

    NetWorth {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        account_count: accounts.len(),
        by_currency,
        accounts: accounts.iter().map(AccountSummary::from).collect(),
    }
}

pub fn net_worth(ledger: &dyn Ledger) -> Result<NetWorth> {
    let accounts = ledger.list_accounts()?;
    Ok(calculate_net_worth(&accounts))
}
