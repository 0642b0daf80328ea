//! Repository for the `triggers` table.

use sqlx::PgPool;
use surveyor_core::types::DbId;

use crate::models::trigger::Trigger;

const COLUMNS: &str = "id, survey_id, event_class_id, created_at";

/// Provides trigger inserts and lookups.
pub struct TriggerRepo;

impl TriggerRepo {
    /// Link a survey to an event class inside an open transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        survey_id: DbId,
        event_class_id: DbId,
    ) -> Result<Trigger, sqlx::Error> {
        let query = format!(
            "INSERT INTO triggers (survey_id, event_class_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trigger>(&query)
            .bind(survey_id)
            .bind(event_class_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// List the triggers of a survey in insertion order.
    pub async fn list_by_survey(pool: &PgPool, survey_id: DbId) -> Result<Vec<Trigger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM triggers WHERE survey_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Trigger>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// List the triggers of a survey inside an open transaction.
    pub async fn list_by_survey_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        survey_id: DbId,
    ) -> Result<Vec<Trigger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM triggers WHERE survey_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Trigger>(&query)
            .bind(survey_id)
            .fetch_all(&mut **tx)
            .await
    }
}
