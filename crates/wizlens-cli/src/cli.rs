//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wizlens - Read-only analytics for MoneyWiz backups
#[derive(Parser)]
#[command(name = "wizlens")]
#[command(about = "Read-only financial analytics over MoneyWiz backups", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file or backup directory
    ///
    /// A directory gets ipadMoneyWiz.sqlite appended. When omitted, the
    /// working directory and its parent are searched for the most recent
    /// iMoneyWiz-Data-Backup-* directory.
    #[arg(long, env = "WIZLENS_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the tool's JSON output instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the MCP server on stdio
    Serve,

    /// List accounts with computed balances
    Accounts,

    /// Show one account's balance
    Balance {
        /// Account ID
        account_id: i64,
    },

    /// List recent transactions
    Transactions {
        /// Only transactions linked to this account
        #[arg(short, long)]
        account: Option<i64>,

        /// Maximum number of transactions
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// List categories
    Categories,

    /// Spending or income by period and category
    Trends {
        /// Which side of the ledger: spending, income
        #[arg(short, long, default_value = "spending")]
        kind: String,

        /// Period granularity: month, year
        #[arg(short, long, default_value = "month")]
        group_by: String,

        /// Months back from the latest transaction (0 = all history)
        #[arg(short, long, default_value = "0")]
        months: i64,
    },

    /// Savings rate and recommendations
    Savings {
        /// Months back from the latest transaction
        #[arg(short, long, default_value = "6")]
        months: i64,
    },

    /// Assets, liabilities and per-currency balances
    NetWorth,

    /// Whole-history statistics
    Stats,
}
