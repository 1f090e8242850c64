//! Source row types for the three warehouse tables, plus the join
//! index helpers shared by every analysis that touches a dimension.
//!
//! All rows are read-only inputs: the core never creates, mutates, or
//! destroys a warehouse entity — it only projects and aggregates.

use crate::types::{CustomerKey, ProductKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line item from `fact_sales`.
///
/// `order_date` is nullable at the source; rows with no date are excluded
/// from every time-based analysis but still contribute to plain sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub order_date:   Option<NaiveDate>,
    pub product_key:  ProductKey,
    pub customer_key: CustomerKey,
    pub sales_amount: f64,
}

/// One row from `dim_products`.
///
/// The same product may appear with repeated cost contributions across
/// source rows; cost segmentation sums them per (product_id, product_name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_key:  ProductKey,
    pub product_id:   String,
    pub product_name: String,
    pub category:     Option<String>,
    pub cost:         f64,
}

/// One row from `dim_customers`.
///
/// `customer_key` is the surrogate join key; `customer_id` is the natural
/// identifier customers are grouped by in segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_key: CustomerKey,
    pub customer_id:  String,
    pub first_name:   String,
    pub last_name:    String,
    pub country:      Option<String>,
    pub birthdate:    Option<NaiveDate>,
}

/// Index the product dimension by surrogate key for O(1) join probes.
/// On duplicate keys the last row wins, matching a scan-order overwrite.
pub fn product_index(products: &[Product]) -> HashMap<ProductKey, &Product> {
    products.iter().map(|p| (p.product_key, p)).collect()
}

/// Index the customer dimension by surrogate key.
pub fn customer_index(customers: &[Customer]) -> HashMap<CustomerKey, &Customer> {
    customers.iter().map(|c| (c.customer_key, c)).collect()
}
