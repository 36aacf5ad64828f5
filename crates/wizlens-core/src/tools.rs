//! Tool implementations for wizlens
//!
//! The nine read-only tools exposed over MCP. They are used by:
//! 1. The MCP server for LLM clients (Claude Desktop, etc.)
//! 2. The CLI report commands
//!
//! Each tool takes a [`Ledger`] and a small parameter struct, validates the
//! parameters before touching the ledger, and returns a serializable result.
//! [`ToolOutput`] renders either outcome as text plus structured JSON.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::analytics;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::{
    Account, Category, FinancialStats, FlowDirection, GroupBy, NetWorth, SavingsAnalysis,
    Transaction, TrendRecord,
};

/// Transactions returned when no usable limit is given
pub const DEFAULT_TRANSACTION_LIMIT: usize = 50;

// =============================================================================
// Tool output
// =============================================================================

/// A rendered tool outcome: human-readable text, an optional structured
/// value, and whether it represents a failure
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub text: String,
    pub structured: Option<Value>,
    pub is_error: bool,
}

impl ToolOutput {
    /// Render a successful result as pretty JSON
    pub fn success<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(structured) => match serde_json::to_string_pretty(&structured) {
                Ok(text) => Self {
                    text,
                    structured: Some(structured),
                    is_error: false,
                },
                Err(e) => Self::failure(&Error::Json(e)),
            },
            Err(e) => Self::failure(&Error::Json(e)),
        }
    }

    /// Render an error as `Error: <message>` with a `{error, kind}` payload
    pub fn failure(error: &Error) -> Self {
        let message = error.to_string();
        Self {
            text: format!("Error: {}", message),
            structured: Some(json!({
                "error": message,
                "kind": error.kind(),
            })),
            is_error: true,
        }
    }

    /// Render a tool result, logging the outcome under the tool's name
    pub fn from_result<T: Serialize>(tool: &str, result: Result<T>) -> Self {
        let output = match result {
            Ok(value) => Self::success(&value),
            Err(e) => Self::failure(&e),
        };

        if output.is_error {
            warn!(tool, error = %output.text, "tool call failed");
        } else {
            info!(tool, bytes = output.text.len(), "tool call succeeded");
        }
        output
    }
}

// =============================================================================
// Argument decoding
// =============================================================================

// Numeric and text arguments arrive as raw JSON so that a mistyped value
// becomes a validation error from the tool instead of a protocol error.

/// Read an optional integer argument. Integral floats (`3.0`) are accepted
/// since some clients encode every number as a double.
fn int_arg(name: &str, value: Option<&Value>) -> Result<Option<i64>> {
    let invalid =
        |raw: &Value| Error::InvalidParams(format!("{} must be an integer, got {}", name, raw));

    let Some(raw) = value else {
        return Ok(None);
    };
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Some(i)),
            (None, Some(f))
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Ok(Some(f as i64))
            }
            _ => Err(invalid(raw)),
        },
        _ => Err(invalid(raw)),
    }
}

/// Read an optional text argument; non-strings are passed on in their JSON
/// rendering so lenient parsers see them as unrecognised values
fn text_arg(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

// =============================================================================
// list_accounts
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountsResult {
    pub accounts: Vec<Account>,
}

pub fn list_accounts(ledger: &dyn Ledger) -> Result<AccountsResult> {
    Ok(AccountsResult {
        accounts: ledger.list_accounts()?,
    })
}

// =============================================================================
// get_account_balance
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetAccountBalanceParams {
    /// Account to look up
    #[schemars(with = "Option<i64>")]
    #[schemars(description = "ID of the account to get the balance for (required)")]
    pub account_id: Option<Value>,
}

pub fn get_account_balance(ledger: &dyn Ledger, params: GetAccountBalanceParams) -> Result<Account> {
    let account_id = int_arg("account_id", params.account_id.as_ref())?
        .ok_or_else(|| Error::InvalidParams("account_id is required".to_string()))?;

    ledger.get_account_balance(account_id)
}

// =============================================================================
// list_transactions
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListTransactionsParams {
    /// Restrict to one account (0 or omitted for all accounts)
    #[schemars(with = "Option<i64>")]
    #[schemars(description = "Filter by account ID (omit or 0 for all accounts)")]
    pub account_id: Option<Value>,

    /// Maximum number of results (default 50)
    #[schemars(with = "Option<i64>")]
    #[schemars(description = "Maximum number of transactions to return (default 50)")]
    pub limit: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResult {
    pub transactions: Vec<Transaction>,
}

pub fn list_transactions(
    ledger: &dyn Ledger,
    params: ListTransactionsParams,
) -> Result<TransactionsResult> {
    let limit = match int_arg("limit", params.limit.as_ref())? {
        Some(limit) if limit > 0 => usize::try_from(limit).unwrap_or(usize::MAX),
        _ => DEFAULT_TRANSACTION_LIMIT,
    };
    let account_id = int_arg("account_id", params.account_id.as_ref())?.filter(|id| *id != 0);

    Ok(TransactionsResult {
        transactions: ledger.list_transactions(account_id, limit)?,
    })
}

// =============================================================================
// list_categories
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResult {
    pub categories: Vec<Category>,
}

pub fn list_categories(ledger: &dyn Ledger) -> Result<CategoriesResult> {
    Ok(CategoriesResult {
        categories: ledger.list_categories()?,
    })
}

// =============================================================================
// analyze_spending_trends / analyze_income_trends
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TrendsParams {
    /// Period granularity
    #[schemars(with = "Option<String>")]
    #[schemars(description = "Group by 'month' or 'year' (default: month)")]
    pub group_by: Option<Value>,

    /// Lookback window in months
    #[schemars(with = "Option<i64>")]
    #[schemars(
        description = "Number of months to analyze, counted back from the latest transaction (default: 0 = all history)"
    )]
    pub months: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendsResult {
    pub trends: Vec<TrendRecord>,
    pub group_by: GroupBy,
    /// Window actually applied; 0 means all history
    pub months: u32,
}

fn trends_for(
    ledger: &dyn Ledger,
    direction: FlowDirection,
    params: TrendsParams,
) -> Result<TrendsResult> {
    let months = analytics::months_back(int_arg("months", params.months.as_ref())?.unwrap_or(0));
    let group_by = GroupBy::parse_lenient(text_arg(params.group_by.as_ref()).as_deref());

    Ok(TrendsResult {
        trends: analytics::trends(ledger, direction, group_by, months)?,
        group_by,
        months,
    })
}

pub fn analyze_spending_trends(ledger: &dyn Ledger, params: TrendsParams) -> Result<TrendsResult> {
    trends_for(ledger, FlowDirection::Spending, params)
}

pub fn analyze_income_trends(ledger: &dyn Ledger, params: TrendsParams) -> Result<TrendsResult> {
    trends_for(ledger, FlowDirection::Income, params)
}

// =============================================================================
// get_savings_recommendations
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SavingsParams {
    /// Lookback window in months
    #[schemars(with = "Option<i64>")]
    #[schemars(description = "Number of months to analyze (default: 6)")]
    pub months: Option<Value>,
}

pub fn get_savings_recommendations(
    ledger: &dyn Ledger,
    params: SavingsParams,
) -> Result<SavingsAnalysis> {
    let months = int_arg("months", params.months.as_ref())?.unwrap_or(0);
    analytics::savings_analysis(ledger, months)
}

// =============================================================================
// calculate_net_worth / get_financial_stats
// =============================================================================

pub fn calculate_net_worth(ledger: &dyn Ledger) -> Result<NetWorth> {
    analytics::net_worth(ledger)
}

pub fn get_financial_stats(ledger: &dyn Ledger) -> Result<FinancialStats> {
    analytics::financial_stats(ledger)
}
