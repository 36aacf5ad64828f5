//! MCP (Model Context Protocol) Server for wizlens
//!
//! Exposes MoneyWiz snapshot analytics to LLMs via MCP tools.
//! All tools are read-only - the snapshot is opened without write access.
//!
//! # Architecture
//!
//! The server speaks MCP over stdio. The ledger is opened once at startup
//! and shared by every tool call; each call checks out its own pooled
//! connection.
//!
//! # Example
//!
//! ```bash
//! wizlens --db ~/Backups/iMoneyWiz-Data-Backup-2025_12_21-17_23 serve
//! ```
//!
//! # Available Tools
//!
//! - `list_accounts` - Accounts with computed balances
//! - `get_account_balance` - One account's balance
//! - `list_transactions` - Most recent transactions
//! - `list_categories` - Category names
//! - `analyze_spending_trends` - Spending by period and category
//! - `analyze_income_trends` - Income by period and category
//! - `get_savings_recommendations` - Savings rate and recommendations
//! - `calculate_net_worth` - Assets, liabilities, per-currency totals
//! - `get_financial_stats` - Whole-history statistics

mod tools;

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use tracing::info;

use wizlens_core::Ledger;

pub use tools::*;

/// Wizlens MCP Server state
#[derive(Clone)]
pub struct WizlensMcpServer {
    /// Shared read-only ledger
    ledger: Arc<dyn Ledger>,
    /// Tool router for MCP operations
    tool_router: ToolRouter<Self>,
}

impl WizlensMcpServer {
    /// Create a new MCP server over the given ledger
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            ledger,
            tool_router: Self::tool_router(),
        }
    }

    fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }
}

/// Map a rendered tool outcome onto an MCP result. Tool failures stay in
/// band as error results so the session continues.
fn call_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.text)];
    let mut result = if output.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    };
    result.structured_content = output.structured;
    result
}

#[tool_handler]
impl ServerHandler for WizlensMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "wizlens".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Wizlens MoneyWiz Analytics".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Wizlens answers questions about a MoneyWiz backup. \
                 Use the available tools to list accounts, transactions and categories, \
                 analyze spending and income trends, review savings, and compute net worth."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WizlensMcpServer {
    /// List all accounts
    #[tool(
        description = "List all accounts with their computed balances, currency, and type. Balances are opening balance plus every linked transaction."
    )]
    async fn list_accounts(&self) -> Result<CallToolResult, McpError> {
        info!(tool = "list_accounts", "tool call");
        Ok(call_result(ToolOutput::from_result(
            "list_accounts",
            tools::list_accounts(self.ledger()),
        )))
    }

    /// Get one account's balance
    #[tool(description = "Get the computed balance of a single account by ID.")]
    async fn get_account_balance(
        &self,
        Parameters(params): Parameters<GetAccountBalanceParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "get_account_balance", ?params, "tool call");
        Ok(call_result(ToolOutput::from_result(
            "get_account_balance",
            tools::get_account_balance(self.ledger(), params),
        )))
    }

    /// List recent transactions
    #[tool(
        description = "List the most recent transactions, newest first. Optionally filter by account. Amounts are signed: negative for spending."
    )]
    async fn list_transactions(
        &self,
        Parameters(params): Parameters<ListTransactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "list_transactions", ?params, "tool call");
        Ok(call_result(ToolOutput::from_result(
            "list_transactions",
            tools::list_transactions(self.ledger(), params),
        )))
    }

    /// List categories
    #[tool(description = "List all transaction categories sorted by name.")]
    async fn list_categories(&self) -> Result<CallToolResult, McpError> {
        info!(tool = "list_categories", "tool call");
        Ok(call_result(ToolOutput::from_result(
            "list_categories",
            tools::list_categories(self.ledger()),
        )))
    }

    /// Spending trends
    #[tool(
        description = "Analyze spending by month or year with a per-category breakdown. Returns one record per period, oldest first."
    )]
    async fn analyze_spending_trends(
        &self,
        Parameters(params): Parameters<TrendsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "analyze_spending_trends", ?params, "tool call");
        Ok(call_result(ToolOutput::from_result(
            "analyze_spending_trends",
            tools::analyze_spending_trends(self.ledger(), params),
        )))
    }

    /// Income trends
    #[tool(
        description = "Analyze income by month or year with a per-category breakdown. Returns one record per period, oldest first."
    )]
    async fn analyze_income_trends(
        &self,
        Parameters(params): Parameters<TrendsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "analyze_income_trends", ?params, "tool call");
        Ok(call_result(ToolOutput::from_result(
            "analyze_income_trends",
            tools::analyze_income_trends(self.ledger(), params),
        )))
    }

    /// Savings analysis
    #[tool(
        description = "Analyze income vs spending over recent months. Returns savings rate, top spending categories, and prioritized recommendations."
    )]
    async fn get_savings_recommendations(
        &self,
        Parameters(params): Parameters<SavingsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "get_savings_recommendations", ?params, "tool call");
        Ok(call_result(ToolOutput::from_result(
            "get_savings_recommendations",
            tools::get_savings_recommendations(self.ledger(), params),
        )))
    }

    /// Net worth
    #[tool(
        description = "Calculate net worth: total assets, total liabilities, and balances per currency across all accounts."
    )]
    async fn calculate_net_worth(&self) -> Result<CallToolResult, McpError> {
        info!(tool = "calculate_net_worth", "tool call");
        Ok(call_result(ToolOutput::from_result(
            "calculate_net_worth",
            tools::calculate_net_worth(self.ledger()),
        )))
    }

    /// Financial statistics
    #[tool(
        description = "Get statistics over the whole history: totals, largest transactions, date range, and a per-year breakdown."
    )]
    async fn get_financial_stats(&self) -> Result<CallToolResult, McpError> {
        info!(tool = "get_financial_stats", "tool call");
        Ok(call_result(ToolOutput::from_result(
            "get_financial_stats",
            tools::get_financial_stats(self.ledger()),
        )))
    }
}

/// Run the MCP server on stdin/stdout until the client disconnects
pub async fn serve_stdio(ledger: Arc<dyn Ledger>) -> anyhow::Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting MCP server on stdio");

    let service = WizlensMcpServer::new(ledger).serve(stdio()).await?;
    let reason = service.waiting().await?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
