//! Ledger listing commands

use anyhow::Result;
use wizlens_core::models::format_date;
use wizlens_core::tools::{self, GetAccountBalanceParams, ListTransactionsParams};
use wizlens_core::Ledger;

use super::{print_json, truncate};

pub fn cmd_accounts(ledger: &dyn Ledger, json: bool) -> Result<()> {
    let result = tools::list_accounts(ledger)?;
    if json {
        return print_json(&result);
    }

    if result.accounts.is_empty() {
        println!("No accounts found in this snapshot.");
        return Ok(());
    }

    println!();
    println!("📁 Accounts");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>5} │ {:25} │ {:>12} │ {:8} │ {}",
        "ID", "Name", "Balance", "Currency", "Type"
    );
    println!("   ──────┼───────────────────────────┼──────────────┼──────────┼──────────");

    for account in &result.accounts {
        println!(
            "   {:>5} │ {:25} │ {:>12.2} │ {:8} │ {}",
            account.id,
            truncate(&account.name, 25),
            account.balance,
            account.currency,
            account.account_type
        );
    }

    Ok(())
}

pub fn cmd_balance(ledger: &dyn Ledger, account_id: i64, json: bool) -> Result<()> {
    let account = tools::get_account_balance(
        ledger,
        GetAccountBalanceParams {
            account_id: Some(account_id.into()),
        },
    )?;
    if json {
        return print_json(&account);
    }

    println!();
    println!("💰 {}", account.name);
    println!("   Balance:  {:.2} {}", account.balance, account.currency);
    println!("   Type:     {}", account.account_type);
    println!("   ID:       {}", account.id);

    Ok(())
}

pub fn cmd_transactions(
    ledger: &dyn Ledger,
    account: Option<i64>,
    limit: i64,
    json: bool,
) -> Result<()> {
    let result = tools::list_transactions(
        ledger,
        ListTransactionsParams {
            account_id: account.map(Into::into),
            limit: Some(limit.into()),
        },
    )?;
    if json {
        return print_json(&result);
    }

    if result.transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!();
    println!("📋 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &result.transactions {
        let date = tx
            .date
            .as_ref()
            .map(format_date)
            .unwrap_or_else(|| "(no date)".to_string());
        println!(
            "   {:19} │ {:>12.2} │ {}",
            date,
            tx.amount,
            truncate(&tx.description, 40)
        );
    }

    println!();
    println!("   Showing {} transactions", result.transactions.len());

    Ok(())
}

pub fn cmd_categories(ledger: &dyn Ledger, json: bool) -> Result<()> {
    let result = tools::list_categories(ledger)?;
    if json {
        return print_json(&result);
    }

    if result.categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");

    for category in &result.categories {
        println!("   {:>5}  {}", category.id, category.name);
    }

    Ok(())
}
