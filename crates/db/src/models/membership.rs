//! Team membership model.

use serde::Serialize;
use sqlx::FromRow;
use surveyor_core::types::{DbId, Timestamp};

/// A row from the `memberships` table. Keyed by `(team_id, user_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub team_id: DbId,
    pub user_id: DbId,
    /// One of the `MembershipRole` labels.
    pub role: String,
    pub accepted: bool,
    pub created_at: Timestamp,
}
