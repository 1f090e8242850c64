//! Time-series sales aggregation.
//!
//! This module:
//!   1. Buckets dated sales by year and by (year, month)
//!   2. Sums sales_amount per bucket
//!   3. Counts distinct buying customers per bucket
//!
//! Rows with a null order_date are excluded up front; absent periods
//! produce no row (no zero-filling).

use crate::{calendar::month_bucket, model::SalesRecord, types::CustomerKey};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlySalesSummary {
    pub year:           i32,
    pub total_sales:    f64,
    pub customer_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySalesSummary {
    pub year:           i32,
    pub month:          u32,
    pub total_sales:    f64,
    pub customer_count: i64,
}

// ── Aggregation ──────────────────────────────────────────────────────────────

/// Yearly sales totals and distinct-customer counts, ascending by year.
pub fn yearly_sales_summary(sales: &[SalesRecord]) -> Vec<YearlySalesSummary> {
    let mut buckets: BTreeMap<i32, (f64, HashSet<CustomerKey>)> = BTreeMap::new();

    for record in sales {
        let Some(date) = record.order_date else {
            continue;
        };
        let entry = buckets.entry(date.year()).or_default();
        entry.0 += record.sales_amount;
        entry.1.insert(record.customer_key);
    }

    buckets
        .into_iter()
        .map(|(year, (total_sales, customers))| YearlySalesSummary {
            year,
            total_sales,
            customer_count: customers.len() as i64,
        })
        .collect()
}

/// Monthly sales totals and distinct-customer counts, ascending by
/// (year, month).
pub fn monthly_sales_summary(sales: &[SalesRecord]) -> Vec<MonthlySalesSummary> {
    let mut buckets: BTreeMap<(i32, u32), (f64, HashSet<CustomerKey>)> = BTreeMap::new();

    for record in sales {
        let Some(date) = record.order_date else {
            continue;
        };
        let entry = buckets.entry(month_bucket(date)).or_default();
        entry.0 += record.sales_amount;
        entry.1.insert(record.customer_key);
    }

    buckets
        .into_iter()
        .map(|((year, month), (total_sales, customers))| MonthlySalesSummary {
            year,
            month,
            total_sales,
            customer_count: customers.len() as i64,
        })
        .collect()
}
