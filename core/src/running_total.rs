//! Cumulative sales over the monthly series.
//!
//! Single ordered pass carrying an accumulator: no window machinery,
//! just strictly increasing (year, month) order and a prefix sum.

use crate::time_series::MonthlySalesSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunningSalesTotal {
    pub year:          i32,
    pub month:         u32,
    pub total_sales:   f64,
    pub running_total: f64,
}

/// Prefix sums of monthly totals. Input is re-sorted by (year, month) so
/// the accumulator always advances in calendar order, even if the caller
/// hands the series over shuffled.
pub fn running_sales_total(monthly: &[MonthlySalesSummary]) -> Vec<RunningSalesTotal> {
    let mut ordered: Vec<&MonthlySalesSummary> = monthly.iter().collect();
    ordered.sort_by_key(|m| (m.year, m.month));

    let mut accumulator = 0.0f64;
    ordered
        .into_iter()
        .map(|m| {
            accumulator += m.total_sales;
            RunningSalesTotal {
                year: m.year,
                month: m.month,
                total_sales: m.total_sales,
                running_total: accumulator,
            }
        })
        .collect()
}
