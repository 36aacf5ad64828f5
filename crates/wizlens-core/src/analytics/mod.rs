//! Analytics Engine
//!
//! Pure derivations over the primitive ledger views. Each analysis has a
//! pure function over already-loaded entries plus a thin wrapper that pulls
//! those entries from a [`Ledger`](crate::ledger::Ledger):
//!
//! - **Trends** - spending or income grouped by month or year and category
//! - **Savings** - income vs spending with rule-based recommendations
//! - **Net worth** - assets, liabilities and per-currency subtotals
//! - **Stats** - whole-history summary statistics
//!
//! Given the same snapshot every function returns the same value.

pub mod net_worth;
pub mod savings;
pub mod stats;
pub mod trends;

pub use net_worth::{calculate_net_worth, net_worth};
pub use savings::{analyze_savings, generate_recommendations, savings_analysis, DEFAULT_SAVINGS_MONTHS};
pub use stats::{compute_stats, financial_stats};
pub use trends::{analyze_trends, trends};

/// Convert a caller-supplied month count into a ledger window, where 0 means
/// the whole history
pub fn months_back(months: i64) -> u32 {
    if months <= 0 {
        0
    } else {
        u32::try_from(months).unwrap_or(u32::MAX)
    }
}
