//! Repository for the `products` table.

use sqlx::PgPool;
use surveyor_core::types::DbId;

use crate::models::product::Product;

const COLUMNS: &str = "id, team_id, name, created_at, updated_at";

/// Provides product inserts and lookups.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product inside an open transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        team_id: DbId,
        name: &str,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (team_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(team_id)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// List products of a team in creation order.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE team_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Product>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }
}
