//! Category share of overall sales.
//!
//! Left join from the fact side: every sales row survives, and rows whose
//! product_key matches nothing land in the null-category group together
//! with sales of products that carry no category, matching SQL NULL-group
//! semantics. overall_sales is a single broadcast value, not a per-group
//! recompute.

use crate::model::{product_index, Product, SalesRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryContribution {
    pub category:            Option<String>,
    pub total_sales:         f64,
    pub overall_sales:       f64,
    pub percentage_of_total: String,
}

/// Sum sales per product category and express each category's share of
/// overall sales, ordered by total_sales descending.
pub fn category_contribution(
    sales: &[SalesRecord],
    products: &[Product],
) -> Vec<CategoryContribution> {
    // BTreeMap keeps tied totals in a stable category order, so repeated
    // runs over unchanged input emit identical row sequences.
    let index = product_index(products);
    let mut totals: BTreeMap<Option<String>, f64> = BTreeMap::new();

    for record in sales {
        let category = index
            .get(&record.product_key)
            .and_then(|p| p.category.clone());
        *totals.entry(category).or_default() += record.sales_amount;
    }

    let overall_sales: f64 = totals.values().sum();

    let mut contributions: Vec<CategoryContribution> = totals
        .into_iter()
        .map(|(category, total_sales)| CategoryContribution {
            category,
            total_sales,
            overall_sales,
            percentage_of_total: format_percentage(total_sales, overall_sales),
        })
        .collect();

    contributions.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    contributions
}

/// Share of total as "NN.NN %", rounded to two decimals with trailing
/// zeros trimmed ("30 %", "33.33 %"). A zero overall reports the "0 %"
/// sentinel instead of dividing.
fn format_percentage(total_sales: f64, overall_sales: f64) -> String {
    if overall_sales == 0.0 {
        return "0 %".to_string();
    }

    let rounded = (total_sales / overall_sales * 100.0 * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} %")
}
