//! Wizlens Core Library
//!
//! Read-only analytics over MoneyWiz database snapshots:
//! - Snapshot discovery and read-only pooled access
//! - Ledger views (accounts, transactions, categories, income, spending)
//! - Analytics engine (trends, savings, net worth, statistics)
//! - Tool functions shared by the MCP server and the CLI

pub mod analytics;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod snapshot;
pub mod tools;

/// Test utilities including the snapshot fixture builder
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use ledger::Ledger;
pub use models::{
    Account, AccountSummary, CashFlowEntry, Category, CategorySpending, FinancialStats,
    FlowDirection, GroupBy, NetWorth, Priority, RecommendationType, SavingsAnalysis,
    SavingsRecommendation, Transaction, TrendRecord, YearStats,
};
pub use snapshot::resolve_snapshot_path;
pub use tools::ToolOutput;
