//! Repository for the `memberships` table.

use sqlx::PgPool;
use surveyor_core::labels::MembershipRole;
use surveyor_core::types::DbId;

use crate::models::membership::Membership;

const COLUMNS: &str = "team_id, user_id, role, accepted, created_at";

/// Provides membership inserts and lookups.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Insert a membership inside an open transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        team_id: DbId,
        user_id: DbId,
        role: MembershipRole,
        accepted: bool,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships (team_id, user_id, role, accepted)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(team_id)
            .bind(user_id)
            .bind(role.as_str())
            .bind(accepted)
            .fetch_one(&mut **tx)
            .await
    }

    /// List memberships of a team, oldest first.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships WHERE team_id = $1 ORDER BY created_at ASC, user_id ASC"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }
}
