//! report-runner: headless analytics runner for the sales mart.
//!
//! Usage:
//!   report-runner --db warehouse.db
//!   report-runner --db warehouse.db --config analytics.json --out report.json --pretty
//!   report-runner --demo --pretty

use anyhow::Result;
use chrono::NaiveDate;
use salesmart_core::{
    model::{Customer, Product},
    AnalyticsConfig, AnalyticsReport, WarehouseStore,
};
use std::env;
use std::io::Write;

#[derive(serde::Serialize)]
struct RunSummary {
    years_covered:     usize,
    months_covered:    usize,
    product_rows:      usize,
    categories:        usize,
    cost_segments:     usize,
    customer_segments: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = parse_arg(&args, "--db", "warehouse.db".to_string());
    let config_path = parse_opt_arg(&args, "--config");
    let out = parse_opt_arg(&args, "--out");
    let pretty = args.iter().any(|a| a == "--pretty");
    let demo = args.iter().any(|a| a == "--demo");

    let config = match config_path {
        Some(path) => AnalyticsConfig::load(&path)?,
        None => AnalyticsConfig::default(),
    };

    let store = if demo {
        log::info!("seeding in-memory demo warehouse");
        let store = WarehouseStore::in_memory()?;
        store.migrate()?;
        seed_demo_warehouse(&store)?;
        store
    } else {
        log::info!("opening warehouse at {db}");
        let store = WarehouseStore::open(&db)?;
        store.migrate()?;
        store
    };

    let report = AnalyticsReport::build(&store, &config)?;

    let summary = RunSummary {
        years_covered: report.yearly_sales.len(),
        months_covered: report.monthly_sales.len(),
        product_rows: report.product_performance.len(),
        categories: report.category_shares.len(),
        cost_segments: report.cost_segments.len(),
        customer_segments: report.customer_segments.len(),
    };
    log::info!("report sections: {}", serde_json::to_string(&summary)?);

    let json = report.to_json(pretty)?;

    match out {
        Some(path) => {
            std::fs::write(&path, json)?;
            log::info!("report written to {path}");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    parse_opt_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_opt_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// A small fixed dataset covering every analysis: two years of orders,
/// three products in two categories, three customers across all tiers.
fn seed_demo_warehouse(store: &WarehouseStore) -> Result<()> {
    let products = [
        ("PRD-100", "Trail Bike", Some("Bikes"), 850.0),
        ("PRD-200", "Road Helmet", Some("Accessories"), 45.0),
        ("PRD-300", "Touring Frame", Some("Bikes"), 1400.0),
    ];
    for (key, (product_id, product_name, category, cost)) in products.iter().enumerate() {
        store.insert_product(&Product {
            product_key: key as i64 + 1,
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            category: category.map(str::to_string),
            cost: *cost,
        })?;
    }

    let customers = [
        ("CUST-1", "Maya", "Okafor"),
        ("CUST-2", "Jon", "Pertwee"),
        ("CUST-3", "Sara", "Lindqvist"),
    ];
    for (key, (customer_id, first_name, last_name)) in customers.iter().enumerate() {
        store.insert_customer(&Customer {
            customer_key: key as i64 + 1,
            customer_id: customer_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            country: Some("Sweden".to_string()),
            birthdate: None,
        })?;
    }

    let orders = [
        ("2022-01-15", 1, 1, 2400.0),
        ("2022-03-02", 2, 1, 120.0),
        ("2022-07-19", 3, 2, 3100.0),
        ("2023-02-11", 1, 1, 2800.0),
        ("2023-02-27", 2, 3, 95.0),
        ("2023-05-30", 3, 2, 3300.0),
    ];
    for (date, product_key, customer_key, amount) in orders {
        store.insert_sale(
            Some(NaiveDate::parse_from_str(date, "%Y-%m-%d")?),
            product_key,
            customer_key,
            amount,
        )?;
    }
    // One undated order: excluded from every time-based analysis.
    store.insert_sale(None, 2, 3, 40.0)?;

    Ok(())
}
