//! Team entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use surveyor_core::types::{DbId, Timestamp};

use super::membership::Membership;

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning a new team owned by an existing user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub owner_user_id: DbId,
}

/// A team together with its memberships.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithMemberships {
    #[serde(flatten)]
    pub team: Team,
    pub memberships: Vec<Membership>,
}
