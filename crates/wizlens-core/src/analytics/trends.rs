//! Trend aggregation
//!
//! Buckets cash flow entries by period key and category. Period keys are
//! fixed-width ("YYYY-MM" / "YYYY"), so the `BTreeMap` iteration order is
//! chronological.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{CashFlowEntry, FlowDirection, GroupBy, TrendRecord};

/// Group entries into one record per period, oldest period first
pub fn analyze_trends(entries: &[CashFlowEntry], group_by: GroupBy) -> Vec<TrendRecord> {
    let mut buckets: BTreeMap<&str, TrendRecord> = BTreeMap::new();

    for entry in entries {
        let period = group_by.period_of(entry);
        if period.is_empty() {
            continue;
        }

        let record = buckets.entry(period).or_insert_with(|| TrendRecord {
            period: period.to_string(),
            total: 0.0,
            transaction_count: 0,
            by_category: BTreeMap::new(),
        });
        record.total += entry.amount;
        record.transaction_count += 1;
        *record
            .by_category
            .entry(entry.category_name.clone())
            .or_insert(0.0) += entry.amount;
    }

    buckets.into_values().collect()
}

/// Load one side of the ledger and aggregate it
pub fn trends(
    ledger: &dyn Ledger,
    direction: FlowDirection,
    group_by: GroupBy,
    months_back: u32,
) -> Result<Vec<TrendRecord>> {
    let entries = match direction {
        FlowDirection::Income => ledger.income_data(months_back)?,
        FlowDirection::Spending => ledger.spending_data(months_back)?,
    };
    let records = analyze_trends(&entries, group_by);

    debug!(
        direction = direction.as_str(),
        group_by = group_by.as_str(),
        entries = entries.len(),
        periods = records.len(),
        "analyzed trends"
    );
    Ok(records)
}
