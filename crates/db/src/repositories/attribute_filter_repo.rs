//! Repository for the `attribute_filters` table.

use sqlx::PgPool;
use surveyor_core::types::DbId;

use crate::models::attribute_filter::{AttributeFilter, AttributeFilterWithClass, NewAttributeFilter};

const COLUMNS: &str = "id, survey_id, attribute_class_id, condition, value, created_at";

/// Provides attribute filter inserts and lookups.
pub struct AttributeFilterRepo;

impl AttributeFilterRepo {
    /// Insert a filter for a survey inside an open transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        survey_id: DbId,
        input: &NewAttributeFilter,
    ) -> Result<AttributeFilter, sqlx::Error> {
        let query = format!(
            "INSERT INTO attribute_filters (survey_id, attribute_class_id, condition, value)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttributeFilter>(&query)
            .bind(survey_id)
            .bind(input.attribute_class_id)
            .bind(input.condition.as_str())
            .bind(&input.value)
            .fetch_one(&mut **tx)
            .await
    }

    /// List the filters of a survey in insertion order.
    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<AttributeFilter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attribute_filters WHERE survey_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, AttributeFilter>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// List the filters of a survey inside an open transaction.
    pub async fn list_by_survey_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        survey_id: DbId,
    ) -> Result<Vec<AttributeFilter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attribute_filters WHERE survey_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, AttributeFilter>(&query)
            .bind(survey_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// List the filters of a survey joined with their attribute classes,
    /// in insertion order.
    pub async fn list_with_class_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        survey_id: DbId,
    ) -> Result<Vec<AttributeFilterWithClass>, sqlx::Error> {
        sqlx::query_as::<_, AttributeFilterWithClass>(
            "SELECT f.condition, f.value,
                    c.name AS class_name, c.description AS class_description,
                    c.class_type
             FROM attribute_filters f
             JOIN attribute_classes c ON c.id = f.attribute_class_id
             WHERE f.survey_id = $1
             ORDER BY f.id ASC",
        )
        .bind(survey_id)
        .fetch_all(&mut **tx)
        .await
    }
}
