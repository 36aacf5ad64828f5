//! Domain models for wizlens

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Category name reported for transactions without a category assignment
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The one rendering used for every timestamp. Fixed width and zero padded,
/// so rendered dates sort the same way the underlying timestamps do.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in [`DATE_FORMAT`]
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// serde adapters for timestamps rendered with [`DATE_FORMAT`]
pub mod date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| {
                    NaiveDateTime::parse_from_str(&raw, DATE_FORMAT)
                        .map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

// =============================================================================
// Ledger views
// =============================================================================

/// An account with its balance computed from the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    /// Opening balance plus every linked transaction amount
    pub balance: f64,
    pub currency: String,
    pub account_type: String,
}

/// A raw ledger transaction, sign preserved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(with = "date_format::option")]
    pub date: Option<NaiveDateTime>,
    pub description: String,
    pub account_id: Option<i64>,
}

/// A named category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// One side of the income/spending partition, annotated with its category
/// and calendar keys. `amount` is always a positive magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// 0 when the transaction has no category
    pub category_id: i64,
    pub category_name: String,
    pub amount: f64,
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
    /// "YYYY-MM"
    pub month: String,
    /// "YYYY"
    pub year: String,
}

impl CashFlowEntry {
    /// Build an entry, deriving `month` and `year` from `date`
    pub fn new(
        category_id: i64,
        category_name: impl Into<String>,
        amount: f64,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            category_id,
            category_name: category_name.into(),
            amount,
            month: date.format("%Y-%m").to_string(),
            year: date.format("%Y").to_string(),
            date,
        }
    }

    /// Entry with no category assignment
    pub fn uncategorized(amount: f64, date: NaiveDateTime) -> Self {
        Self::new(0, UNCATEGORIZED, amount, date)
    }
}

/// Which side of the ledger a trend covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Income,
    Spending,
}

impl FlowDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Spending => "spending",
        }
    }
}

impl std::str::FromStr for FlowDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "spending" | "expenses" => Ok(Self::Spending),
            _ => Err(format!(
                "Unknown flow direction: {} (valid: income, spending)",
                s
            )),
        }
    }
}

// =============================================================================
// Trends
// =============================================================================

/// Period granularity for trend aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Month,
    Year,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Parse a caller-supplied value, falling back to [`GroupBy::Month`] for
    /// anything unrecognised
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            None => Self::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(group_by = raw, "unknown group_by, using month");
                Self::default()
            }),
        }
    }

    /// The period key this granularity reads from an entry
    pub fn period_of<'a>(&self, entry: &'a CashFlowEntry) -> &'a str {
        match self {
            Self::Month => &entry.month,
            Self::Year => &entry.year,
        }
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(format!("Unknown group_by: {} (valid: month, year)", s)),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Totals for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// "YYYY-MM" or "YYYY"
    pub period: String,
    pub total: f64,
    pub transaction_count: usize,
    pub by_category: BTreeMap<String, f64>,
}

// =============================================================================
// Savings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Warning,
    Suggestion,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A rule-generated savings recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Potential savings amount
    pub impact: f64,
}

/// Spending in one category over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category_name: String,
    pub total_amount: f64,
    /// Share of total spending, 0-100
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Income vs spending over a lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAnalysis {
    pub period: String,
    pub total_income: f64,
    pub total_spending: f64,
    pub net_savings: f64,
    /// Percentage of income saved
    pub savings_rate: f64,
    pub average_monthly_income: f64,
    pub average_monthly_spending: f64,
    pub top_spending_categories: Vec<CategorySpending>,
    pub recommendations: Vec<SavingsRecommendation>,
}

// =============================================================================
// Net worth
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub name: String,
    pub balance: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            balance: account.balance,
            currency: account.currency.clone(),
            account_type: account.account_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorth {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub account_count: usize,
    /// Signed balance per currency code
    pub by_currency: BTreeMap<String, f64>,
    pub accounts: Vec<AccountSummary>,
}

// =============================================================================
// Financial statistics
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    pub year: String,
    pub income: f64,
    pub spending: f64,
    pub net_savings: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStats {
    pub total_transactions: usize,
    pub total_income: f64,
    pub total_spending: f64,
    pub net_savings: f64,
    pub average_transaction: f64,
    pub largest_income: f64,
    pub largest_expense: f64,
    pub account_count: usize,
    pub category_count: usize,
    pub first_transaction_date: String,
    pub last_transaction_date: String,
    pub date_range: String,
    pub income_transactions: usize,
    pub expense_transactions: usize,
    pub by_year: BTreeMap<String, YearStats>,
}
