//! Shared primitive types used across the analytics core.

/// Surrogate key referencing a row of the product dimension.
pub type ProductKey = i64;

/// Surrogate key referencing a row of the customer dimension.
pub type CustomerKey = i64;
