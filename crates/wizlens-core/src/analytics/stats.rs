//! Whole-history financial statistics

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{format_date, CashFlowEntry, FinancialStats, YearStats};

/// Earliest and latest timestamps seen so far
#[derive(Debug, Default)]
struct DateSpan {
    first: Option<NaiveDateTime>,
    last: Option<NaiveDateTime>,
}

impl DateSpan {
    fn observe(&mut self, date: NaiveDateTime) {
        self.first = Some(self.first.map_or(date, |first| first.min(date)));
        self.last = Some(self.last.map_or(date, |last| last.max(date)));
    }

    fn label(&self) -> String {
        match (self.first, self.last) {
            (Some(first), Some(last)) => {
                format!("{} to {}", format_date(&first), format_date(&last))
            }
            (Some(first), None) => format!("Since {}", format_date(&first)),
            _ => String::new(),
        }
    }
}

fn year_slot<'a>(by_year: &'a mut BTreeMap<String, YearStats>, year: &str) -> &'a mut YearStats {
    by_year.entry(year.to_string()).or_insert_with(|| YearStats {
        year: year.to_string(),
        ..Default::default()
    })
}

/// Compute statistics over the full income and spending history
pub fn compute_stats(
    income: &[CashFlowEntry],
    spending: &[CashFlowEntry],
    account_count: usize,
    category_count: usize,
) -> FinancialStats {
    let mut span = DateSpan::default();
    let mut by_year: BTreeMap<String, YearStats> = BTreeMap::new();

    let mut total_income = 0.0;
    let mut largest_income = 0.0_f64;
    for entry in income {
        total_income += entry.amount;
        largest_income = largest_income.max(entry.amount);
        span.observe(entry.date);
        if !entry.year.is_empty() {
            let slot = year_slot(&mut by_year, &entry.year);
            slot.income += entry.amount;
            slot.transaction_count += 1;
        }
    }

    let mut total_spending = 0.0;
    let mut largest_expense = 0.0_f64;
    for entry in spending {
        total_spending += entry.amount;
        largest_expense = largest_expense.max(entry.amount);
        span.observe(entry.date);
        if !entry.year.is_empty() {
            let slot = year_slot(&mut by_year, &entry.year);
            slot.spending += entry.amount;
            slot.transaction_count += 1;
        }
    }

    for stats in by_year.values_mut() {
        stats.net_savings = stats.income - stats.spending;
    }

    let total_transactions = income.len() + spending.len();
    let average_transaction = if total_transactions > 0 {
        (total_income + total_spending) / total_transactions as f64
    } else {
        0.0
    };

    FinancialStats {
        total_transactions,
        total_income,
        total_spending,
        net_savings: total_income - total_spending,
        average_transaction,
        largest_income,
        largest_expense,
        account_count,
        category_count,
        first_transaction_date: span.first.as_ref().map(format_date).unwrap_or_default(),
        last_transaction_date: span.last.as_ref().map(format_date).unwrap_or_default(),
        date_range: span.label(),
        income_transactions: income.len(),
        expense_transactions: spending.len(),
        by_year,
    }
}

pub fn financial_stats(ledger: &dyn Ledger) -> Result<FinancialStats> {
    let income = ledger.income_data(0)?;
    let spending = ledger.spending_data(0)?;
    let accounts = ledger.list_accounts()?;
    let categories = ledger.list_categories()?;

    Ok(compute_stats(
        &income,
        &spending,
        accounts.len(),
        categories.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn entry(amount: f64, date: NaiveDateTime) -> CashFlowEntry {
        CashFlowEntry::uncategorized(amount, date)
    }

    #[test]
    fn test_stats_over_two_years() {
        let income = vec![
            entry(3000.0, at(2024, 2, 1, 9)),
            entry(2500.0, at(2023, 11, 1, 9)),
        ];
        let spending = vec![
            entry(120.0, at(2024, 2, 10, 18)),
            entry(900.0, at(2023, 11, 3, 8)),
            entry(45.0, at(2023, 9, 30, 23)),
        ];

        let stats = compute_stats(&income, &spending, 4, 12);

        assert_eq!(stats.total_transactions, 5);
        assert_eq!(stats.income_transactions, 2);
        assert_eq!(stats.expense_transactions, 3);
        assert_eq!(stats.total_income, 5500.0);
        assert_eq!(stats.total_spending, 1065.0);
        assert_eq!(stats.net_savings, 4435.0);
        assert_eq!(stats.average_transaction, 6565.0 / 5.0);
        assert_eq!(stats.largest_income, 3000.0);
        assert_eq!(stats.largest_expense, 900.0);
        assert_eq!(stats.account_count, 4);
        assert_eq!(stats.category_count, 12);

        assert_eq!(stats.first_transaction_date, "2023-09-30 23:00:00");
        assert_eq!(stats.last_transaction_date, "2024-02-10 18:00:00");
        assert_eq!(
            stats.date_range,
            "2023-09-30 23:00:00 to 2024-02-10 18:00:00"
        );

        let y2023 = &stats.by_year["2023"];
        assert_eq!(y2023.year, "2023");
        assert_eq!(y2023.income, 2500.0);
        assert_eq!(y2023.spending, 945.0);
        assert_eq!(y2023.net_savings, 1555.0);
        assert_eq!(y2023.transaction_count, 3);

        let y2024 = &stats.by_year["2024"];
        assert_eq!(y2024.net_savings, 2880.0);
        assert_eq!(y2024.transaction_count, 2);
    }

    #[test]
    fn test_empty_history() {
        let stats = compute_stats(&[], &[], 0, 0);
        assert_eq!(stats.total_transactions, 0);
        assert_eq!(stats.average_transaction, 0.0);
        assert_eq!(stats.first_transaction_date, "");
        assert_eq!(stats.last_transaction_date, "");
        assert_eq!(stats.date_range, "");
        assert!(stats.by_year.is_empty());
    }

    #[test]
    fn test_single_entry_range() {
        let stats = compute_stats(&[], &[entry(5.0, at(2020, 1, 2, 3))], 1, 0);
        assert_eq!(
            stats.date_range,
            "2020-01-02 03:00:00 to 2020-01-02 03:00:00"
        );
    }

    #[test]
    fn test_date_range_labels() {
        let first = at(2021, 5, 6, 7);
        let since = DateSpan {
            first: Some(first),
            last: None,
        };
        assert_eq!(since.label(), "Since 2021-05-06 07:00:00");
        assert_eq!(DateSpan::default().label(), "");
    }

    #[test]
    fn test_dates_compare_chronologically_across_widths() {
        // Year 999 would sort after 2000 as an unpadded string
        let income = vec![entry(1.0, at(2000, 1, 1, 0)), entry(1.0, at(999, 12, 31, 0))];
        let stats = compute_stats(&income, &[], 0, 0);
        assert_eq!(stats.first_transaction_date, "0999-12-31 00:00:00");
        assert_eq!(stats.last_transaction_date, "2000-01-01 00:00:00");
    }
}
