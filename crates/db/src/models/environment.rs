//! Environment entity model.

use serde::Serialize;
use sqlx::FromRow;
use surveyor_core::types::{DbId, Timestamp};

/// A row from the `environments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Environment {
    pub id: DbId,
    pub product_id: DbId,
    /// `production` or `development`.
    pub environment_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
