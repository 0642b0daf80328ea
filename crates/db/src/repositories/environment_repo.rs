//! Repository for the `environments` table.

use sqlx::PgPool;
use surveyor_core::labels::EnvironmentType;
use surveyor_core::types::DbId;

use crate::models::environment::Environment;

const COLUMNS: &str = "id, product_id, environment_type, created_at, updated_at";

/// Provides environment inserts and lookups.
pub struct EnvironmentRepo;

impl EnvironmentRepo {
    /// Insert an environment inside an open transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
        environment_type: EnvironmentType,
    ) -> Result<Environment, sqlx::Error> {
        let query = format!(
            "INSERT INTO environments (product_id, environment_type)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Environment>(&query)
            .bind(product_id)
            .bind(environment_type.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an environment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Environment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM environments WHERE id = $1");
        sqlx::query_as::<_, Environment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an environment by ID inside an open transaction.
    pub async fn find_by_id_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Environment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM environments WHERE id = $1");
        sqlx::query_as::<_, Environment>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List every environment of every product owned by a team.
    ///
    /// Ordered by product, then production before development.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Environment>, sqlx::Error> {
        sqlx::query_as::<_, Environment>(
            "SELECT e.id, e.product_id, e.environment_type, e.created_at, e.updated_at
             FROM environments e
             JOIN products p ON p.id = e.product_id
             WHERE p.team_id = $1
             ORDER BY p.id ASC, (e.environment_type = 'production') DESC, e.id ASC",
        )
        .bind(team_id)
        .fetch_all(pool)
        .await
    }
}
