//! Survey trigger model.

use serde::Serialize;
use sqlx::FromRow;
use surveyor_core::types::{DbId, Timestamp};

/// A row from the `triggers` table linking a survey to an event class.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trigger {
    pub id: DbId,
    pub survey_id: DbId,
    pub event_class_id: DbId,
    pub created_at: Timestamp,
}
