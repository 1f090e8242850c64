//! Behavioural customer segmentation from order history.
//!
//! This module:
//!   1. Builds one lifetime profile per customer_id (spend, first/last
//!      order, whole-month lifespan)
//!   2. Buckets profiles into "vip" / "regular" / "new" tiers
//!
//! The join to the customer dimension is inner: sales rows with an
//! unmatched customer_key, and customers with no sales, are excluded
//! entirely — unlike the left join used for category contribution.

use crate::{
    calendar::month_span,
    config::SegmentationConfig,
    model::{customer_index, Customer, SalesRecord},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Public types ─────────────────────────────────────────────────────────────

/// Per-customer lifetime aggregate feeding segmentation.
///
/// `total_sales` sums every joined row; the order dates and the lifespan
/// consider only dated rows. A customer whose orders all lack dates has
/// no lifespan and falls into "new" regardless of spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerLifetimeProfile {
    pub customer_id:      String,
    pub total_sales:      f64,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date:  Option<NaiveDate>,
    pub lifespan_months:  Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSegmentCount {
    pub customer_segment: String,
    pub customer_count:   i64,
}

// ── Profiles ─────────────────────────────────────────────────────────────────

/// One lifetime profile per customer_id, ascending by customer_id.
pub fn customer_lifetime_profiles(
    sales: &[SalesRecord],
    customers: &[Customer],
) -> Vec<CustomerLifetimeProfile> {
    let index = customer_index(customers);
    let mut profiles: BTreeMap<&str, CustomerLifetimeProfile> = BTreeMap::new();

    for record in sales {
        let Some(customer) = index.get(&record.customer_key) else {
            continue;
        };

        let profile = profiles
            .entry(&customer.customer_id)
            .or_insert_with(|| CustomerLifetimeProfile {
                customer_id: customer.customer_id.clone(),
                total_sales: 0.0,
                first_order_date: None,
                last_order_date: None,
                lifespan_months: None,
            });

        profile.total_sales += record.sales_amount;

        if let Some(date) = record.order_date {
            profile.first_order_date = Some(match profile.first_order_date {
                Some(first) => first.min(date),
                None => date,
            });
            profile.last_order_date = Some(match profile.last_order_date {
                Some(last) => last.max(date),
                None => date,
            });
        }
    }

    let mut result: Vec<CustomerLifetimeProfile> = profiles.into_values().collect();
    for profile in &mut result {
        profile.lifespan_months = match (profile.first_order_date, profile.last_order_date) {
            (Some(first), Some(last)) => Some(month_span(first, last)),
            _ => None,
        };
    }
    result
}

// ── Segmentation ─────────────────────────────────────────────────────────────

fn segment_label(profile: &CustomerLifetimeProfile, config: &SegmentationConfig) -> &'static str {
    let loyal = profile
        .lifespan_months
        .is_some_and(|months| months > config.loyalty_min_months);

    if loyal && profile.total_sales > config.vip_spend_threshold {
        "vip"
    } else if loyal {
        "regular"
    } else {
        "new"
    }
}

/// Count customers per lifetime segment, ordered by count descending.
pub fn segment_customers(
    sales: &[SalesRecord],
    customers: &[Customer],
    config: &SegmentationConfig,
) -> Vec<CustomerSegmentCount> {
    let mut counts: BTreeMap<&'static str, i64> = BTreeMap::new();
    for profile in customer_lifetime_profiles(sales, customers) {
        *counts.entry(segment_label(&profile, config)).or_default() += 1;
    }

    let mut result: Vec<CustomerSegmentCount> = counts
        .into_iter()
        .map(|(segment, customer_count)| CustomerSegmentCount {
            customer_segment: segment.to_string(),
            customer_count,
        })
        .collect();

    result.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));
    result
}
