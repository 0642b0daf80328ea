//! Repository for the `teams` table, including team provisioning.

use sqlx::PgPool;
use surveyor_core::catalog::{DEFAULT_ENVIRONMENTS, DEFAULT_PRODUCT_NAME, OWNER_ROLE};
use surveyor_core::types::DbId;

use crate::models::attribute_class::CreateAttributeClass;
use crate::models::event_class::CreateEventClass;
use crate::models::team::{CreateTeam, Team, TeamWithMemberships};
use crate::repositories::{
    AttributeClassRepo, EnvironmentRepo, EventClassRepo, MembershipRepo, ProductRepo,
};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides team provisioning and lookup.
pub struct TeamRepo;

impl TeamRepo {
    /// Create a team with everything a new team starts with.
    ///
    /// Inserts the team, an accepted owner membership for
    /// `input.owner_user_id`, the default product, and its production and
    /// development environments seeded from the default catalog. All rows
    /// are written in one transaction.
    pub async fn provision(
        pool: &PgPool,
        input: &CreateTeam,
    ) -> Result<TeamWithMemberships, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO teams (name) VALUES ($1) RETURNING {COLUMNS}");
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        let owner =
            MembershipRepo::create_tx(&mut tx, team.id, input.owner_user_id, OWNER_ROLE, true)
                .await?;

        let product = ProductRepo::create_tx(&mut tx, team.id, DEFAULT_PRODUCT_NAME).await?;

        for seed in DEFAULT_ENVIRONMENTS {
            let environment =
                EnvironmentRepo::create_tx(&mut tx, product.id, seed.environment_type).await?;

            for class in seed.event_classes {
                EventClassRepo::create_tx(
                    &mut tx,
                    environment.id,
                    &CreateEventClass::from_seed(class),
                )
                .await?;
            }
            for class in seed.attribute_classes {
                AttributeClassRepo::create_tx(
                    &mut tx,
                    environment.id,
                    &CreateAttributeClass::from_seed(class),
                )
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            team_id = team.id,
            product_id = product.id,
            owner_user_id = input.owner_user_id,
            "Provisioned team"
        );

        Ok(TeamWithMemberships {
            team,
            memberships: vec![owner],
        })
    }

    /// Find a team by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by ID together with its memberships.
    pub async fn find_with_memberships(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TeamWithMemberships>, sqlx::Error> {
        let Some(team) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let memberships = MembershipRepo::list_by_team(pool, id).await?;
        Ok(Some(TeamWithMemberships { team, memberships }))
    }
}
