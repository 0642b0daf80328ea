//! Repository for the `attribute_classes` table.

use sqlx::PgPool;
use surveyor_core::error::CoreError;
use surveyor_core::survey_copy::Resolved;
use surveyor_core::types::DbId;

use crate::error::DbError;
use crate::models::attribute_class::{AttributeClass, CreateAttributeClass};

const COLUMNS: &str = "id, environment_id, name, description, class_type, created_at, updated_at";

/// Provides attribute class inserts, lookups and by-name resolution.
pub struct AttributeClassRepo;

impl AttributeClassRepo {
    /// Insert an attribute class inside an open transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        environment_id: DbId,
        input: &CreateAttributeClass,
    ) -> Result<AttributeClass, sqlx::Error> {
        let query = format!(
            "INSERT INTO attribute_classes (environment_id, name, description, class_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttributeClass>(&query)
            .bind(environment_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.class_type.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// List the attribute classes of an environment in creation order.
    pub async fn list_by_environment(
        pool: &PgPool,
        environment_id: DbId,
    ) -> Result<Vec<AttributeClass>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attribute_classes WHERE environment_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, AttributeClass>(&query)
            .bind(environment_id)
            .fetch_all(pool)
            .await
    }

    /// Ids from `ids` that exist but belong to an environment other than
    /// `environment_id`.
    pub async fn ids_outside_environment_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        environment_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar(
            "SELECT id FROM attribute_classes WHERE id = ANY($1) AND environment_id <> $2 ORDER BY id",
        )
        .bind(ids)
        .bind(environment_id)
        .fetch_all(&mut **tx)
        .await
    }

    /// Find the id of the attribute class called `name` in an environment.
    pub async fn find_id_by_name_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        environment_id: DbId,
        name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM attribute_classes WHERE environment_id = $1 AND name = $2",
        )
        .bind(environment_id)
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Resolve `input.name` in an environment, creating the class if absent.
    pub async fn resolve_by_name_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        environment_id: DbId,
        input: &CreateAttributeClass,
    ) -> Result<Resolved, DbError> {
        if let Some(id) = Self::find_id_by_name_tx(tx, environment_id, &input.name).await? {
            return Ok(Resolved::Reused(id));
        }

        let inserted: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO attribute_classes (environment_id, name, description, class_type)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_attribute_classes_environment_name DO NOTHING
             RETURNING id",
        )
        .bind(environment_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.class_type.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        match inserted {
            Some((id,)) => Ok(Resolved::Created(id)),
            None => Self::find_id_by_name_tx(tx, environment_id, &input.name)
                .await?
                .map(Resolved::Reused)
                .ok_or_else(|| {
                    CoreError::Internal(format!(
                        "attribute_classes insert for '{}' conflicted but no row is visible",
                        input.name
                    ))
                    .into()
                }),
        }
    }
}
