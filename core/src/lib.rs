//! salesmart-core: descriptive analytics over a star-schema sales warehouse.
//!
//! One fact table of sales line items and two dimension tables (products,
//! customers) come in; six independent, pure, read-only analyses come out:
//!
//!   1. Yearly/monthly sales and customer-count time series
//!   2. Cumulative (running-total) monthly sales
//!   3. Product performance vs. average and prior-year benchmarks
//!   4. Category contribution to overall sales
//!   5. Cost-range product segmentation
//!   6. Customer lifetime-value segmentation
//!
//! The warehouse itself (schema design, loading, transactions) is an
//! external collaborator; the core only scans it through store.rs.

pub mod calendar;
pub mod category_contribution;
pub mod config;
pub mod cost_segmentation;
pub mod customer_segmentation;
pub mod error;
pub mod model;
pub mod product_performance;
pub mod report;
pub mod running_total;
pub mod store;
pub mod time_series;
pub mod types;

pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, AnalyticsResult};
pub use report::AnalyticsReport;
pub use store::WarehouseStore;
