//! Demo data reset
//!
//! Wipes every table and re-inserts the demo catalog. Used by the
//! `/api/reset-db` maintenance endpoint outside production.

use serde::Serialize;
use sqlx::SqlitePool;

use super::RepoResult;

/// (category, [(product, price)])
const DEMO_CATALOG: &[(&str, &[(&str, f64)])] = &[
    (
        "Coffee",
        &[
            ("Greek Coffee", 2.0),
            ("Espresso", 2.5),
            ("Freddo Espresso", 3.0),
            ("Freddo Cappuccino", 3.5),
            ("Frappe", 3.0),
        ],
    ),
    (
        "Drinks",
        &[
            ("Water", 0.5),
            ("Orange Juice", 3.5),
            ("Soft Drink", 2.5),
            ("Beer", 4.0),
        ],
    ),
    (
        "Snacks",
        &[("Toast", 3.0), ("Cheese Pie", 2.5), ("Chips", 1.5)],
    ),
    (
        "Football",
        &[("Field Rental (1h)", 40.0), ("Ball Rental", 5.0)],
    ),
];

/// Delete order children before parents
const TABLES: &[&str] = &[
    "sale",
    "orders",
    "register_closing",
    "register_session",
    "product",
    "category",
    "football_field_booking",
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
}

/// Wipe all data and insert the demo catalog, all or nothing
pub async fn reset(pool: &SqlitePool) -> RepoResult<SeedSummary> {
    let mut tx = pool.begin().await?;

    for table in TABLES {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
    }

    let now = shared::util::now_millis();
    let mut summary = SeedSummary::default();

    for (category, products) in DEMO_CATALOG {
        let category_id = shared::util::snowflake_id();
        sqlx::query("INSERT INTO category (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(category_id)
            .bind(*category)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        summary.categories += 1;

        for (name, price) in *products {
            sqlx::query(
                "INSERT INTO product (id, name, price, category_id, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            )
            .bind(shared::util::snowflake_id())
            .bind(*name)
            .bind(*price)
            .bind(category_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            summary.products += 1;
        }
    }

    tx.commit().await?;

    tracing::warn!(
        categories = summary.categories,
        products = summary.products,
        "Database reset to demo data"
    );
    Ok(summary)
}
