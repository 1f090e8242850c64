//! SQLite warehouse access layer.
//!
//! RULE: Only store.rs talks to the database.
//! Analyses operate on the typed row vectors returned by the scan
//! methods — they never execute SQL directly.
//!
//! The warehouse is read-only from the core's point of view; the insert
//! helpers exist for tests and the report-runner demo seeding path.

use crate::{
    error::AnalyticsResult,
    model::{Customer, Product, SalesRecord},
    types::{CustomerKey, ProductKey},
};
use anyhow::anyhow;
use chrono::NaiveDate;
use rusqlite::{Connection, params};

pub struct WarehouseStore {
    conn: Connection,
}

impl WarehouseStore {
    /// Open (or create) the warehouse database at `path`.
    pub fn open(path: &str) -> AnalyticsResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests and demo mode).
    pub fn in_memory() -> AnalyticsResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> AnalyticsResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_warehouse.sql"))?;
        Ok(())
    }

    // ── Full scans ─────────────────────────────────────────────

    pub fn scan_sales(&self) -> AnalyticsResult<Vec<SalesRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT order_date, product_key, customer_key, sales_amount
             FROM fact_sales ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (raw_date, product_key, customer_key, sales_amount) = row?;
            records.push(SalesRecord {
                order_date: parse_date(raw_date.as_deref())?,
                product_key,
                customer_key,
                sales_amount,
            });
        }
        Ok(records)
    }

    pub fn scan_products(&self) -> AnalyticsResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(
            "SELECT product_key, product_id, product_name, category, cost
             FROM dim_products ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Product {
                product_key:  row.get(0)?,
                product_id:   row.get(1)?,
                product_name: row.get(2)?,
                category:     row.get(3)?,
                cost:         row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn scan_customers(&self) -> AnalyticsResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_key, customer_id, first_name, last_name, country, birthdate
             FROM dim_customers ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut customers = Vec::new();
        for row in rows {
            let (customer_key, customer_id, first_name, last_name, country, raw_birthdate) = row?;
            customers.push(Customer {
                customer_key,
                customer_id,
                first_name,
                last_name,
                country,
                birthdate: parse_date(raw_birthdate.as_deref())?,
            });
        }
        Ok(customers)
    }

    // ── Inserts (tests + demo seeding only) ────────────────────

    pub fn insert_sale(
        &self,
        order_date: Option<NaiveDate>,
        product_key: ProductKey,
        customer_key: CustomerKey,
        sales_amount: f64,
    ) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO fact_sales (order_date, product_key, customer_key, sales_amount)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                order_date.map(|d| d.to_string()),
                product_key,
                customer_key,
                sales_amount
            ],
        )?;
        Ok(())
    }

    pub fn insert_product(&self, p: &Product) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO dim_products (product_key, product_id, product_name, category, cost)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![p.product_key, &p.product_id, &p.product_name, &p.category, p.cost],
        )?;
        Ok(())
    }

    pub fn insert_customer(&self, c: &Customer) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO dim_customers (customer_key, customer_id, first_name, last_name, country, birthdate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                c.customer_key,
                &c.customer_id,
                &c.first_name,
                &c.last_name,
                &c.country,
                c.birthdate.map(|d| d.to_string())
            ],
        )?;
        Ok(())
    }
}

/// Parse an ISO-8601 date column, keeping NULL as None.
fn parse_date(raw: Option<&str>) -> AnalyticsResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| anyhow!("invalid date '{s}' in warehouse: {e}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_and_scan_empty_warehouse() {
        let store = WarehouseStore::in_memory().unwrap();
        store.migrate().unwrap();

        assert!(store.scan_sales().unwrap().is_empty());
        assert!(store.scan_products().unwrap().is_empty());
        assert!(store.scan_customers().unwrap().is_empty());
    }

    #[test]
    fn null_order_date_round_trips_as_none() {
        let store = WarehouseStore::in_memory().unwrap();
        store.migrate().unwrap();

        store.insert_sale(None, 1, 1, 9.99).unwrap();
        store
            .insert_sale(NaiveDate::from_ymd_opt(2023, 5, 4), 1, 1, 10.0)
            .unwrap();

        let sales = store.scan_sales().unwrap();
        assert_eq!(sales.len(), 2);
        assert!(sales[0].order_date.is_none());
        assert_eq!(
            sales[1].order_date,
            NaiveDate::from_ymd_opt(2023, 5, 4)
        );
    }
}
