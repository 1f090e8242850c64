//! Cost-range product segmentation.
//!
//! Products are grouped by the natural (product_id, product_name) pair —
//! not by surrogate key — summing repeated cost contributions, then
//! bucketed by total cost.
//!
//! The four ranges are closed and overlap at their boundaries on purpose:
//! branches are tested top to bottom, so a total cost of exactly 500 lands
//! in "100-500" and exactly 1000 lands in "500-1000". The overlap is part
//! of the reported contract and must not be normalized away.

use crate::model::Product;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostRangeSegment {
    pub cost_range:    String,
    pub product_count: i64,
}

fn cost_range(total_cost: f64) -> &'static str {
    if total_cost < 100.0 {
        "below 100"
    } else if (100.0..=500.0).contains(&total_cost) {
        "100-500"
    } else if (500.0..=1000.0).contains(&total_cost) {
        "500-1000"
    } else {
        "above-1000"
    }
}

/// Count products per cost range.
///
/// `product_count` counts grouped (product_id, product_name) rows; the
/// ordering key is the count of distinct product_name values, which can be
/// smaller when one name spans several product_ids. Both counts are kept
/// deliberately (the source report mixes the two distinctness scopes).
pub fn segment_products_by_cost(products: &[Product]) -> Vec<CostRangeSegment> {
    let mut total_costs: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for product in products {
        *total_costs
            .entry((&product.product_id, &product.product_name))
            .or_default() += product.cost;
    }

    // Segment -> (grouped-row count, distinct names), keyed in branch order.
    let mut segments: BTreeMap<&'static str, (i64, HashSet<&str>)> = BTreeMap::new();
    for ((_, product_name), total_cost) in &total_costs {
        let entry = segments.entry(cost_range(*total_cost)).or_default();
        entry.0 += 1;
        entry.1.insert(*product_name);
    }

    let mut result: Vec<(CostRangeSegment, usize)> = segments
        .into_iter()
        .map(|(range, (product_count, names))| {
            (
                CostRangeSegment {
                    cost_range: range.to_string(),
                    product_count,
                },
                names.len(),
            )
        })
        .collect();

    result.sort_by(|a, b| b.1.cmp(&a.1));
    result.into_iter().map(|(segment, _)| segment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, cost: f64) -> Product {
        Product {
            product_key: 0,
            product_id: id.to_string(),
            product_name: name.to_string(),
            category: None,
            cost,
        }
    }

    #[test]
    fn boundary_500_lands_in_the_first_matching_range() {
        assert_eq!(cost_range(500.0), "100-500");
        assert_eq!(cost_range(1000.0), "500-1000");
        assert_eq!(cost_range(99.99), "below 100");
        assert_eq!(cost_range(100.0), "100-500");
        assert_eq!(cost_range(1000.01), "above-1000");
    }

    #[test]
    fn repeated_cost_rows_sum_before_bucketing() {
        // Two 300-cost rows for the same product: total 600 -> "500-1000".
        let products = vec![
            product("PRD-1", "Trail Bike", 300.0),
            product("PRD-1", "Trail Bike", 300.0),
        ];

        let segments = segment_products_by_cost(&products);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].cost_range, "500-1000");
        assert_eq!(segments[0].product_count, 1);
    }

    #[test]
    fn exactly_500_total_takes_the_tie_break_bucket() {
        let products = vec![product("PRD-1", "Saddle", 500.0)];
        let segments = segment_products_by_cost(&products);
        assert_eq!(segments[0].cost_range, "100-500");
    }

    #[test]
    fn ordering_uses_distinct_names_while_count_uses_grouped_rows() {
        // "Helmet" spans two product_ids in the cheap range: grouped-row
        // count 2, distinct-name count 1. The expensive range has two
        // distinct names, so it sorts first despite equal row counts.
        let products = vec![
            product("PRD-1", "Helmet", 50.0),
            product("PRD-2", "Helmet", 60.0),
            product("PRD-3", "Trail Bike", 2000.0),
            product("PRD-4", "Road Bike", 3000.0),
        ];

        let segments = segment_products_by_cost(&products);
        assert_eq!(segments[0].cost_range, "above-1000");
        assert_eq!(segments[0].product_count, 2);
        assert_eq!(segments[1].cost_range, "below 100");
        assert_eq!(segments[1].product_count, 2);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert!(segment_products_by_cost(&[]).is_empty());
    }
}
