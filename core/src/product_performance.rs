//! Product performance versus benchmarks.
//!
//! This module:
//!   1. Derives yearly sales per product from the fact table
//!   2. Benchmarks each year against the product's all-years average
//!   3. Benchmarks each year against the previous year with data
//!
//! The "previous year" is the nearest earlier year that has sales for the
//! product, not necessarily year - 1; the first year has no prior.

use crate::model::{product_index, Product, SalesRecord};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Public types ─────────────────────────────────────────────────────────────

/// One row per (product, year) with summed sales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyProductSales {
    pub year:          i32,
    pub product_name:  String,
    pub current_sales: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPerformanceRow {
    pub year:           i32,
    pub product_name:   String,
    pub current_sales:  f64,
    pub avg_sales:      f64,
    pub diff_sales:     f64,
    pub avg_change:     String,
    pub ly_sales:       Option<f64>,
    pub variance_sales: Option<f64>,
    pub yoy_change:     String,
}

// ── Derivation ───────────────────────────────────────────────────────────────

/// Sum dated sales per (product_name, year). Sales rows whose product_key
/// matches no product are dropped, as are rows with no order_date.
pub fn yearly_product_sales(
    sales: &[SalesRecord],
    products: &[Product],
) -> Vec<YearlyProductSales> {
    let index = product_index(products);
    let mut buckets: BTreeMap<(String, i32), f64> = BTreeMap::new();

    for record in sales {
        let Some(date) = record.order_date else {
            continue;
        };
        let Some(product) = index.get(&record.product_key) else {
            continue;
        };
        *buckets
            .entry((product.product_name.clone(), date.year()))
            .or_default() += record.sales_amount;
    }

    buckets
        .into_iter()
        .map(|((product_name, year), current_sales)| YearlyProductSales {
            year,
            product_name,
            current_sales,
        })
        .collect()
}

// ── Benchmarking ─────────────────────────────────────────────────────────────

/// Compare each product-year to the product's average and to its previous
/// year with data. Output ordered by (product_name, year ascending).
pub fn compare_to_benchmarks(yearly: &[YearlyProductSales]) -> Vec<ProductPerformanceRow> {
    let mut per_product: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();
    for row in yearly {
        per_product
            .entry(&row.product_name)
            .or_default()
            .insert(row.year, row.current_sales);
    }

    let mut report = Vec::new();
    for (product_name, years) in per_product {
        let avg_sales = years.values().sum::<f64>() / years.len() as f64;

        let mut ly_sales: Option<f64> = None;
        for (&year, &current_sales) in &years {
            let diff_sales = current_sales - avg_sales;
            let variance_sales = ly_sales.map(|ly| current_sales - ly);

            report.push(ProductPerformanceRow {
                year,
                product_name: product_name.to_string(),
                current_sales,
                avg_sales,
                diff_sales,
                avg_change: classify_vs_average(diff_sales).to_string(),
                ly_sales,
                variance_sales,
                yoy_change: classify_vs_prior(variance_sales).to_string(),
            });

            ly_sales = Some(current_sales);
        }
    }
    report
}

fn classify_vs_average(diff_sales: f64) -> &'static str {
    if diff_sales > 0.0 {
        "above avg"
    } else if diff_sales < 0.0 {
        "below avg"
    } else {
        "avg"
    }
}

/// First year per product has no prior, which gets its own label rather
/// than masquerading as "no change".
fn classify_vs_prior(variance_sales: Option<f64>) -> &'static str {
    match variance_sales {
        None => "no prior year",
        Some(v) if v > 0.0 => "increase",
        Some(v) if v < 0.0 => "decrease",
        Some(_) => "no change",
    }
}
