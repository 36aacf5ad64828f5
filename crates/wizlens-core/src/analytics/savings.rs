//! Savings analysis
//!
//! Compares income with spending over a lookback window and produces an
//! ordered list of recommendations. Rules are evaluated in a fixed order and
//! every applicable rule fires, except the savings-rate tiers where exactly
//! one does.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{
    CashFlowEntry, CategorySpending, Priority, RecommendationType, SavingsAnalysis,
    SavingsRecommendation,
};

/// Window used when the caller asks for zero or fewer months
pub const DEFAULT_SAVINGS_MONTHS: u32 = 6;

/// How many categories are reported as top spenders
const TOP_CATEGORIES: usize = 5;

/// Target share of income to save, as a fraction
const TARGET_SAVINGS_FRACTION: f64 = 0.20;

/// Analyze one window of income and spending entries.
///
/// `months` is the window length used for the monthly averages; 0 is
/// replaced by [`DEFAULT_SAVINGS_MONTHS`].
pub fn analyze_savings(
    income: &[CashFlowEntry],
    spending: &[CashFlowEntry],
    months: u32,
) -> SavingsAnalysis {
    let months = if months == 0 {
        DEFAULT_SAVINGS_MONTHS
    } else {
        months
    };

    let total_income: f64 = income.iter().map(|e| e.amount).sum();
    let total_spending: f64 = spending.iter().map(|e| e.amount).sum();
    let net_savings = total_income - total_spending;
    let savings_rate = if total_income > 0.0 {
        net_savings / total_income * 100.0
    } else {
        0.0
    };

    let month_count = f64::from(months);
    let average_monthly_income = total_income / month_count;
    let average_monthly_spending = total_spending / month_count;

    let top_spending_categories = top_categories(spending, total_spending);

    let recommendations = generate_recommendations(&SavingsFigures {
        savings_rate,
        total_income,
        total_spending,
        average_monthly_income,
        average_monthly_spending,
        months,
        top_categories: &top_spending_categories,
    });

    SavingsAnalysis {
        period: format!("Last {} months", months),
        total_income,
        total_spending,
        net_savings,
        savings_rate,
        average_monthly_income,
        average_monthly_spending,
        top_spending_categories,
        recommendations,
    }
}

/// Rank categories by spending, largest first. Equal totals are ordered by
/// category name so the ranking is stable across runs.
fn top_categories(spending: &[CashFlowEntry], total_spending: f64) -> Vec<CategorySpending> {
    let mut by_category: HashMap<&str, (f64, usize)> = HashMap::new();
    for entry in spending {
        let slot = by_category
            .entry(entry.category_name.as_str())
            .or_insert((0.0, 0));
        slot.0 += entry.amount;
        slot.1 += 1;
    }

    let mut ranked: Vec<(&str, f64, usize)> = by_category
        .into_iter()
        .map(|(name, (amount, count))| (name, amount, count))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|(name, amount, count)| CategorySpending {
            category_name: name.to_string(),
            total_amount: amount,
            percentage: if total_spending > 0.0 {
                amount / total_spending * 100.0
            } else {
                0.0
            },
            transaction_count: count,
        })
        .collect()
}

/// Inputs to the recommendation rules
#[derive(Debug, Clone)]
pub struct SavingsFigures<'a> {
    pub savings_rate: f64,
    pub total_income: f64,
    pub total_spending: f64,
    pub average_monthly_income: f64,
    pub average_monthly_spending: f64,
    pub months: u32,
    /// Already ranked, largest first
    pub top_categories: &'a [CategorySpending],
}

fn recommendation(
    kind: RecommendationType,
    priority: Priority,
    title: impl Into<String>,
    description: String,
    impact: f64,
) -> SavingsRecommendation {
    SavingsRecommendation {
        kind,
        title: title.into(),
        description,
        priority,
        impact,
    }
}

/// Evaluate the recommendation rules in order
pub fn generate_recommendations(figures: &SavingsFigures<'_>) -> Vec<SavingsRecommendation> {
    let mut recommendations = Vec::new();
    let rate = figures.savings_rate;
    let net_savings = figures.total_income - figures.total_spending;
    let gap_to_target = figures.total_income * TARGET_SAVINGS_FRACTION - net_savings;

    recommendations.push(if rate < 0.0 {
        recommendation(
            RecommendationType::Warning,
            Priority::High,
            "Negative Savings Rate",
            format!(
                "You're spending more than you earn ({:.1}% savings rate). Consider reducing expenses or increasing income.",
                rate
            ),
            (figures.total_spending - figures.total_income).abs(),
        )
    } else if rate < 10.0 {
        recommendation(
            RecommendationType::Warning,
            Priority::High,
            "Low Savings Rate",
            format!(
                "Your savings rate is {:.1}%. Financial experts recommend saving at least 20% of income. Consider reducing discretionary spending.",
                rate
            ),
            gap_to_target,
        )
    } else if rate < 20.0 {
        recommendation(
            RecommendationType::Suggestion,
            Priority::Medium,
            "Moderate Savings Rate",
            format!(
                "Your savings rate is {:.1}%. You're on the right track! Aim for 20%+ for better financial security.",
                rate
            ),
            gap_to_target,
        )
    } else {
        recommendation(
            RecommendationType::Positive,
            Priority::Low,
            "Excellent Savings Rate",
            format!(
                "Great job! Your savings rate is {:.1}%, which exceeds the recommended 20%. Keep up the good work!",
                rate
            ),
            0.0,
        )
    });

    if let Some(top) = figures.top_categories.first() {
        if top.percentage > 30.0 {
            let potential = top.total_amount * 0.10;
            recommendations.push(recommendation(
                RecommendationType::Suggestion,
                Priority::Medium,
                format!("Review Spending on {}", top.category_name),
                format!(
                    "{} accounts for {:.1}% of your spending. A 10% reduction could save you {:.2} per month.",
                    top.category_name,
                    top.percentage,
                    potential / f64::from(figures.months.max(1))
                ),
                potential,
            ));
        }

        let high_spending = figures
            .top_categories
            .iter()
            .filter(|c| c.percentage > 15.0)
            .count();
        if high_spending >= 3 {
            recommendations.push(recommendation(
                RecommendationType::Suggestion,
                Priority::Medium,
                "Multiple High-Spending Categories",
                format!(
                    "You have {} categories each accounting for over 15% of spending. Consider reviewing your budget priorities.",
                    high_spending
                ),
                figures.average_monthly_spending * 0.05,
            ));
        }
    }

    if figures.average_monthly_income > 0.0 {
        let spending_ratio =
            figures.average_monthly_spending / figures.average_monthly_income * 100.0;
        if spending_ratio > 90.0 {
            recommendations.push(recommendation(
                RecommendationType::Warning,
                Priority::High,
                "High Spending Ratio",
                format!(
                    "You're spending {:.1}% of your income. This leaves little room for savings and unexpected expenses.",
                    spending_ratio
                ),
                figures.average_monthly_spending * 0.10,
            ));
        }
    }

    if figures.average_monthly_income > 0.0 && figures.average_monthly_spending > 0.0 {
        let months_of_expenses = net_savings / figures.average_monthly_spending;
        if months_of_expenses < 3.0 {
            recommendations.push(recommendation(
                RecommendationType::Suggestion,
                Priority::High,
                "Build Emergency Fund",
                format!(
                    "Aim to save 3-6 months of expenses ({:.2} per month) as an emergency fund. You currently have about {:.1} months saved.",
                    figures.average_monthly_spending, months_of_expenses
                ),
                figures.average_monthly_spending * 3.0,
            ));
        }
    }

    recommendations
}

/// Load the window from the ledger and analyze it.
/// `months <= 0` uses [`DEFAULT_SAVINGS_MONTHS`].
pub fn savings_analysis(ledger: &dyn Ledger, months: i64) -> Result<SavingsAnalysis> {
    let months = match super::months_back(months) {
        0 => DEFAULT_SAVINGS_MONTHS,
        n => n,
    };

    let income = ledger.income_data(months)?;
    let spending = ledger.spending_data(months)?;
    let analysis = analyze_savings(&income, &spending, months);

    debug!(
        months,
        income_entries = income.len(),
        spending_entries = spending.len(),
        recommendations = analysis.recommendations.len(),
        "analyzed savings"
    );
    Ok(analysis)
}
