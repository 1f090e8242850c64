//! Full analytics report assembly.
//!
//! Scans the three warehouse tables once and runs every analysis over the
//! same immutable snapshot. Analyses are pure and independent; re-building
//! the report from an unchanged warehouse yields identical output.

use crate::{
    category_contribution::{category_contribution, CategoryContribution},
    config::AnalyticsConfig,
    cost_segmentation::{segment_products_by_cost, CostRangeSegment},
    customer_segmentation::{segment_customers, CustomerSegmentCount},
    error::AnalyticsResult,
    product_performance::{compare_to_benchmarks, yearly_product_sales, ProductPerformanceRow},
    running_total::{running_sales_total, RunningSalesTotal},
    store::WarehouseStore,
    time_series::{monthly_sales_summary, yearly_sales_summary, MonthlySalesSummary, YearlySalesSummary},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub yearly_sales:        Vec<YearlySalesSummary>,
    pub monthly_sales:       Vec<MonthlySalesSummary>,
    pub running_totals:      Vec<RunningSalesTotal>,
    pub product_performance: Vec<ProductPerformanceRow>,
    pub category_shares:     Vec<CategoryContribution>,
    pub cost_segments:       Vec<CostRangeSegment>,
    pub customer_segments:   Vec<CustomerSegmentCount>,
}

impl AnalyticsReport {
    /// Run all analyses against the warehouse behind `store`.
    pub fn build(store: &WarehouseStore, config: &AnalyticsConfig) -> AnalyticsResult<Self> {
        let sales = store.scan_sales()?;
        let products = store.scan_products()?;
        let customers = store.scan_customers()?;
        log::info!(
            "warehouse snapshot: {} sales rows, {} products, {} customers",
            sales.len(),
            products.len(),
            customers.len(),
        );

        let yearly_sales = yearly_sales_summary(&sales);
        let monthly_sales = monthly_sales_summary(&sales);
        let running_totals = running_sales_total(&monthly_sales);
        log::debug!(
            "time series: {} years, {} months",
            yearly_sales.len(),
            monthly_sales.len(),
        );

        let product_performance = compare_to_benchmarks(&yearly_product_sales(&sales, &products));
        let category_shares = category_contribution(&sales, &products);
        let cost_segments = segment_products_by_cost(&products);
        let customer_segments = segment_customers(&sales, &customers, &config.segmentation);
        log::debug!(
            "segmentation: {} product-year rows, {} categories, {} cost ranges, {} customer tiers",
            product_performance.len(),
            category_shares.len(),
            cost_segments.len(),
            customer_segments.len(),
        );

        Ok(Self {
            yearly_sales,
            monthly_sales,
            running_totals,
            product_performance,
            category_shares,
            cost_segments,
            customer_segments,
        })
    }

    pub fn to_json(&self, pretty: bool) -> AnalyticsResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
