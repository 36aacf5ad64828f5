//! Report command implementations

use anyhow::Result;
use wizlens_core::models::{FlowDirection, RecommendationType};
use wizlens_core::tools::{self, SavingsParams, TrendsParams};
use wizlens_core::Ledger;

use super::{print_json, truncate};

pub fn cmd_trends(
    ledger: &dyn Ledger,
    kind: &str,
    group_by: &str,
    months: i64,
    json: bool,
) -> Result<()> {
    let direction: FlowDirection = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let params = TrendsParams {
        group_by: Some(group_by.into()),
        months: Some(months.into()),
    };
    let result = match direction {
        FlowDirection::Spending => tools::analyze_spending_trends(ledger, params)?,
        FlowDirection::Income => tools::analyze_income_trends(ledger, params)?,
    };
    if json {
        return print_json(&result);
    }

    println!();
    match direction {
        FlowDirection::Spending => println!("📈 Spending Trends (by {})", result.group_by),
        FlowDirection::Income => println!("📈 Income Trends (by {})", result.group_by),
    }
    if result.months > 0 {
        println!("   Last {} months", result.months);
    } else {
        println!("   All history");
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if result.trends.is_empty() {
        println!("   No transactions in this window.");
        return Ok(());
    }

    println!("   {:10} │ {:>12} │ {:>5} │ Top category", "Period", "Total", "Count");
    println!("   ───────────┼──────────────┼───────┼──────────────────────────");

    for record in &result.trends {
        let top = record
            .by_category
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, amount)| format!("{} ({:.2})", truncate(name, 18), amount))
            .unwrap_or_default();
        println!(
            "   {:10} │ {:>12.2} │ {:>5} │ {}",
            record.period, record.total, record.transaction_count, top
        );
    }

    Ok(())
}

pub fn cmd_savings(ledger: &dyn Ledger, months: i64, json: bool) -> Result<()> {
    let analysis = tools::get_savings_recommendations(
        ledger,
        SavingsParams {
            months: Some(months.into()),
        },
    )?;
    if json {
        return print_json(&analysis);
    }

    println!();
    println!("💡 Savings Analysis ({})", analysis.period);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Income:   {:>12.2}   ({:.2}/month)",
        analysis.total_income, analysis.average_monthly_income
    );
    println!(
        "   Spending: {:>12.2}   ({:.2}/month)",
        analysis.total_spending, analysis.average_monthly_spending
    );
    println!("   Saved:    {:>12.2}", analysis.net_savings);
    println!("   Rate:     {:>11.1}%", analysis.savings_rate);

    if !analysis.top_spending_categories.is_empty() {
        println!();
        println!("   Top spending categories:");
        for category in &analysis.top_spending_categories {
            println!(
                "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
                truncate(&category.category_name, 25),
                category.total_amount,
                category.percentage,
                category.transaction_count
            );
        }
    }

    println!();
    println!("   Recommendations:");
    for rec in &analysis.recommendations {
        let icon = match rec.kind {
            RecommendationType::Warning => "⚠️ ",
            RecommendationType::Suggestion => "💡",
            RecommendationType::Positive => "✅",
        };
        println!("   {} {} [{}]", icon, rec.title, rec.priority.as_str());
        println!("      {}", rec.description);
        if rec.impact > 0.0 {
            println!("      Potential impact: {:.2}", rec.impact);
        }
    }

    Ok(())
}

pub fn cmd_net_worth(ledger: &dyn Ledger, json: bool) -> Result<()> {
    let worth = tools::calculate_net_worth(ledger)?;
    if json {
        return print_json(&worth);
    }

    println!();
    println!("🏦 Net Worth");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Assets:      {:>12.2}", worth.total_assets);
    println!("   Liabilities: {:>12.2}", worth.total_liabilities);
    println!("   Net worth:   {:>12.2}", worth.net_worth);
    println!("   Accounts:    {:>12}", worth.account_count);

    if !worth.by_currency.is_empty() {
        println!();
        println!("   By currency:");
        for (currency, balance) in &worth.by_currency {
            println!("   {:8} {:>12.2}", currency, balance);
        }
    }

    Ok(())
}

pub fn cmd_stats(ledger: &dyn Ledger, json: bool) -> Result<()> {
    let stats = tools::get_financial_stats(ledger)?;
    if json {
        return print_json(&stats);
    }

    println!();
    println!("📊 Financial Statistics");
    if !stats.date_range.is_empty() {
        println!("   {}", stats.date_range);
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Transactions: {} ({} income, {} expenses)",
        stats.total_transactions, stats.income_transactions, stats.expense_transactions
    );
    println!("   Income:       {:>12.2}", stats.total_income);
    println!("   Spending:     {:>12.2}", stats.total_spending);
    println!("   Net savings:  {:>12.2}", stats.net_savings);
    println!("   Average:      {:>12.2}", stats.average_transaction);
    println!("   Largest in:   {:>12.2}", stats.largest_income);
    println!("   Largest out:  {:>12.2}", stats.largest_expense);
    println!(
        "   Accounts: {}   Categories: {}",
        stats.account_count, stats.category_count
    );

    if !stats.by_year.is_empty() {
        println!();
        println!(
            "   {:6} │ {:>12} │ {:>12} │ {:>12} │ {:>5}",
            "Year", "Income", "Spending", "Net", "Count"
        );
        println!("   ───────┼──────────────┼──────────────┼──────────────┼───────");
        for year in stats.by_year.values() {
            println!(
                "   {:6} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>5}",
                year.year, year.income, year.spending, year.net_savings, year.transaction_count
            );
        }
    }

    Ok(())
}
