//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, JSON output)
//! - `ledger` - Ledger listings (accounts, balance, transactions, categories)
//! - `reports` - Analytics reports (trends, savings, net worth, stats)
//! - `serve` - MCP server command

pub mod core;
pub mod ledger;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use ledger::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
