//! MCP Tool implementations for wizlens
//!
//! Re-exports from wizlens_core::tools for MCP server use.
//! The actual implementations live in wizlens-core so the CLI can run the
//! same tools directly.

pub use wizlens_core::tools::{
    // Functions
    analyze_income_trends,
    analyze_spending_trends,
    calculate_net_worth,
    get_account_balance,
    get_financial_stats,
    get_savings_recommendations,
    list_accounts,
    list_categories,
    list_transactions,
    // Params types
    GetAccountBalanceParams,
    ListTransactionsParams,
    SavingsParams,
    TrendsParams,
    // Result types
    AccountsResult,
    CategoriesResult,
    ToolOutput,
    TransactionsResult,
    TrendsResult,
};
