//! End-to-end test: seed an in-memory warehouse, build the full report,
//! and check the cross-analysis contracts (idempotence, null-date
//! exclusion, join semantics).

use chrono::NaiveDate;
use salesmart_core::{
    model::{Customer, Product},
    AnalyticsConfig, AnalyticsReport, WarehouseStore,
};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn seed(store: &WarehouseStore) {
    let products = [
        (1, "PRD-1", "Trail Bike", Some("Bikes"), 850.0),
        (2, "PRD-2", "Road Helmet", Some("Accessories"), 45.0),
        (3, "PRD-3", "Touring Frame", Some("Bikes"), 1400.0),
    ];
    for (product_key, product_id, product_name, category, cost) in products {
        store
            .insert_product(&Product {
                product_key,
                product_id: product_id.to_string(),
                product_name: product_name.to_string(),
                category: category.map(str::to_string),
                cost,
            })
            .unwrap();
    }

    for (customer_key, customer_id) in [(1, "CUST-1"), (2, "CUST-2"), (3, "CUST-3")] {
        store
            .insert_customer(&Customer {
                customer_key,
                customer_id: customer_id.to_string(),
                first_name: "Test".to_string(),
                last_name: "Customer".to_string(),
                country: None,
                birthdate: None,
            })
            .unwrap();
    }

    // CUST-1: 25-month lifespan, 5200 spend -> vip.
    store.insert_sale(date(2021, 1, 10), 1, 1, 2400.0).unwrap();
    store.insert_sale(date(2023, 2, 5), 1, 1, 2800.0).unwrap();
    // CUST-2: 22-month lifespan, 640 spend -> regular.
    store.insert_sale(date(2021, 7, 1), 3, 2, 300.0).unwrap();
    store.insert_sale(date(2023, 5, 30), 3, 2, 340.0).unwrap();
    // CUST-3: single order -> new.
    store.insert_sale(date(2023, 2, 27), 2, 3, 95.0).unwrap();
    // Undated order and an orphan product_key.
    store.insert_sale(None, 2, 3, 40.0).unwrap();
    store.insert_sale(date(2023, 3, 1), 99, 3, 65.0).unwrap();
}

#[test]
fn full_report_over_seeded_warehouse() {
    let store = WarehouseStore::in_memory().unwrap();
    store.migrate().unwrap();
    seed(&store);

    let report = AnalyticsReport::build(&store, &AnalyticsConfig::default()).unwrap();

    // Time series: two dated years, undated row excluded.
    let years: Vec<i32> = report.yearly_sales.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2021, 2023]);
    assert_eq!(report.yearly_sales[0].total_sales, 2700.0);
    assert_eq!(report.yearly_sales[0].customer_count, 2);
    assert_eq!(report.yearly_sales[1].total_sales, 3300.0);

    // Running total ends at the sum of all dated sales.
    let last = report.running_totals.last().unwrap();
    assert_eq!(last.running_total, 6000.0);

    // Product performance: Trail Bike has two years, second is an increase.
    let bike_rows: Vec<_> = report
        .product_performance
        .iter()
        .filter(|r| r.product_name == "Trail Bike")
        .collect();
    assert_eq!(bike_rows.len(), 2);
    assert_eq!(bike_rows[0].yoy_change, "no prior year");
    assert_eq!(bike_rows[1].ly_sales, Some(2400.0));
    assert_eq!(bike_rows[1].yoy_change, "increase");

    // Category shares: orphan sale forms the null-category group, and the
    // broadcast overall includes every fact row (dated or not).
    let overall: f64 = report.category_shares[0].overall_sales;
    assert_eq!(overall, 6040.0);
    assert!(report
        .category_shares
        .iter()
        .any(|c| c.category.is_none() && c.total_sales == 65.0));
    assert_eq!(report.category_shares[0].category.as_deref(), Some("Bikes"));

    // Cost segments: 850 -> "500-1000", 45 -> "below 100", 1400 -> "above-1000".
    assert_eq!(report.cost_segments.len(), 3);
    for segment in &report.cost_segments {
        assert_eq!(segment.product_count, 1);
    }

    // Customer tiers: one of each.
    let mut tiers: Vec<(&str, i64)> = report
        .customer_segments
        .iter()
        .map(|s| (s.customer_segment.as_str(), s.customer_count))
        .collect();
    tiers.sort();
    assert_eq!(tiers, vec![("new", 1), ("regular", 1), ("vip", 1)]);
}

#[test]
fn report_is_idempotent_over_an_unchanged_warehouse() {
    let store = WarehouseStore::in_memory().unwrap();
    store.migrate().unwrap();
    seed(&store);

    let config = AnalyticsConfig::default();
    let first = AnalyticsReport::build(&store, &config).unwrap();
    let second = AnalyticsReport::build(&store, &config).unwrap();

    assert_eq!(
        first.to_json(false).unwrap(),
        second.to_json(false).unwrap()
    );
}

#[test]
fn empty_warehouse_yields_empty_report_sections() {
    let store = WarehouseStore::in_memory().unwrap();
    store.migrate().unwrap();

    let report = AnalyticsReport::build(&store, &AnalyticsConfig::default()).unwrap();
    assert!(report.yearly_sales.is_empty());
    assert!(report.monthly_sales.is_empty());
    assert!(report.running_totals.is_empty());
    assert!(report.product_performance.is_empty());
    assert!(report.category_shares.is_empty());
    assert!(report.cost_segments.is_empty());
    assert!(report.customer_segments.is_empty());
}
