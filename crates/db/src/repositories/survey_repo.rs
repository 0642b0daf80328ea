//! Repository for the `surveys` table.
//!
//! Besides plain CRUD this holds the two multi-step survey actions:
//! duplicating a survey inside its environment and copying it into another
//! environment. Both run in a single transaction.

use sqlx::PgPool;
use surveyor_core::error::CoreError;
use surveyor_core::survey_copy::{pair_positional, ResolvedClasses};
use surveyor_core::types::DbId;

use crate::error::DbError;
use crate::models::attribute_filter::NewAttributeFilter;
use crate::models::event_class::CreateEventClass;
use crate::models::survey::{CreateSurvey, NewSurvey, Survey, SurveyWithTargeting};
use crate::repositories::{
    AttributeClassRepo, AttributeFilterRepo, EnvironmentRepo, EventClassRepo, TriggerRepo,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, environment_id, name, survey_type, status, questions, \
    thank_you_card, display_option, recontact_days, auto_close, delay, close_on_date, \
    survey_closed_message, created_at, updated_at";

/// Provides survey CRUD plus duplicate and cross-environment copy.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Create a survey in an environment with its triggers and filters.
    ///
    /// Every trigger and filter class must belong to `environment_id`;
    /// classes of another environment fail with [`CoreError::Validation`].
    /// Ids that do not exist at all surface as a foreign key violation.
    pub async fn create(
        pool: &PgPool,
        environment_id: DbId,
        input: &CreateSurvey,
    ) -> Result<Survey, DbError> {
        let mut tx = pool.begin().await?;

        let foreign_events =
            EventClassRepo::ids_outside_environment_tx(&mut tx, environment_id, &input.triggers)
                .await?;
        if !foreign_events.is_empty() {
            return Err(CoreError::Validation(format!(
                "Event classes {foreign_events:?} do not belong to environment {environment_id}"
            ))
            .into());
        }
        let filter_class_ids: Vec<DbId> = input
            .attribute_filters
            .iter()
            .map(|f| f.attribute_class_id)
            .collect();
        let foreign_attributes = AttributeClassRepo::ids_outside_environment_tx(
            &mut tx,
            environment_id,
            &filter_class_ids,
        )
        .await?;
        if !foreign_attributes.is_empty() {
            return Err(CoreError::Validation(format!(
                "Attribute classes {foreign_attributes:?} do not belong to environment {environment_id}"
            ))
            .into());
        }

        let survey = Self::insert_tx(&mut tx, environment_id, &NewSurvey::from(input)).await?;
        for &event_class_id in &input.triggers {
            TriggerRepo::create_tx(&mut tx, survey.id, event_class_id).await?;
        }
        for filter in &input.attribute_filters {
            AttributeFilterRepo::create_tx(&mut tx, survey.id, filter).await?;
        }

        tx.commit().await?;
        Ok(survey)
    }

    /// Find a survey by ID, scoped to the environment it must belong to.
    pub async fn find_scoped(
        pool: &PgPool,
        environment_id: DbId,
        id: DbId,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM surveys WHERE id = $1 AND environment_id = $2");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(environment_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a scoped survey together with its triggers and filters.
    pub async fn find_with_targeting(
        pool: &PgPool,
        environment_id: DbId,
        id: DbId,
    ) -> Result<Option<SurveyWithTargeting>, sqlx::Error> {
        let Some(survey) = Self::find_scoped(pool, environment_id, id).await? else {
            return Ok(None);
        };
        let triggers = TriggerRepo::list_by_survey(pool, id).await?;
        let attribute_filters = AttributeFilterRepo::list_by_survey(pool, id).await?;
        Ok(Some(SurveyWithTargeting {
            survey,
            triggers,
            attribute_filters,
        }))
    }

    /// List the surveys of an environment, most recently created first.
    pub async fn list_by_environment(
        pool: &PgPool,
        environment_id: DbId,
    ) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM surveys WHERE environment_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(environment_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a survey, returning the removed row.
    ///
    /// Triggers and attribute filters go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("DELETE FROM surveys WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Duplicate a survey inside its own environment.
    ///
    /// The copy is a draft named `"<name> (copy)"` whose triggers and
    /// filters point at the same classes as the source. Returns `None` if
    /// no survey `id` exists in `environment_id`.
    pub async fn duplicate(
        pool: &PgPool,
        environment_id: DbId,
        id: DbId,
    ) -> Result<Option<Survey>, DbError> {
        let mut tx = pool.begin().await?;

        let Some(source) = Self::find_scoped_tx(&mut tx, environment_id, id).await? else {
            return Ok(None);
        };
        let triggers = TriggerRepo::list_by_survey_tx(&mut tx, id).await?;
        let filters = AttributeFilterRepo::list_by_survey_tx(&mut tx, id).await?;

        let copy = Self::insert_tx(&mut tx, environment_id, &NewSurvey::copy_of(&source)).await?;
        for trigger in &triggers {
            TriggerRepo::create_tx(&mut tx, copy.id, trigger.event_class_id).await?;
        }
        for filter in &filters {
            let filter = NewAttributeFilter::try_from(filter)?;
            AttributeFilterRepo::create_tx(&mut tx, copy.id, &filter).await?;
        }

        tx.commit().await?;

        tracing::info!(
            source_survey_id = id,
            survey_id = copy.id,
            environment_id,
            triggers = triggers.len(),
            attribute_filters = filters.len(),
            "Duplicated survey"
        );
        Ok(Some(copy))
    }

    /// Copy a survey into another environment.
    ///
    /// Every event class used by a trigger and every attribute class used
    /// by a filter is resolved by name in `target_environment_id`: an
    /// existing class with that name is reused, otherwise one is created
    /// from the source class. Filter `i` of the copy keeps the condition and
    /// value of source filter `i` and targets the `i`-th resolved class.
    ///
    /// Returns `None` if no survey `id` exists in `environment_id`; fails
    /// with [`CoreError::NotFound`] if the target environment is missing.
    pub async fn copy_to_environment(
        pool: &PgPool,
        environment_id: DbId,
        id: DbId,
        target_environment_id: DbId,
    ) -> Result<Option<Survey>, DbError> {
        let mut tx = pool.begin().await?;

        let Some(source) = Self::find_scoped_tx(&mut tx, environment_id, id).await? else {
            return Ok(None);
        };
        if EnvironmentRepo::find_by_id_tx(&mut tx, target_environment_id)
            .await?
            .is_none()
        {
            return Err(CoreError::NotFound {
                entity: "Environment",
                id: target_environment_id,
            }
            .into());
        }

        let mut event_classes = ResolvedClasses::default();
        for class in EventClassRepo::list_for_survey_triggers_tx(&mut tx, id).await? {
            let input = CreateEventClass::copy_of(&class)?;
            let resolved =
                EventClassRepo::resolve_by_name_tx(&mut tx, target_environment_id, &input).await?;
            event_classes.push(resolved);
        }

        let filters = AttributeFilterRepo::list_with_class_tx(&mut tx, id).await?;
        let mut attribute_classes = ResolvedClasses::default();
        for filter in &filters {
            let input = filter.class_copy()?;
            let resolved =
                AttributeClassRepo::resolve_by_name_tx(&mut tx, target_environment_id, &input)
                    .await?;
            attribute_classes.push(resolved);
        }

        let copy =
            Self::insert_tx(&mut tx, target_environment_id, &NewSurvey::copy_of(&source)).await?;
        for &event_class_id in event_classes.ids() {
            TriggerRepo::create_tx(&mut tx, copy.id, event_class_id).await?;
        }
        for (filter, attribute_class_id) in pair_positional(filters, attribute_classes.ids())? {
            let filter = filter.retarget(attribute_class_id)?;
            AttributeFilterRepo::create_tx(&mut tx, copy.id, &filter).await?;
        }

        tx.commit().await?;

        tracing::info!(
            source_survey_id = id,
            survey_id = copy.id,
            environment_id,
            target_environment_id,
            event_classes_created = event_classes.created,
            event_classes_reused = event_classes.reused,
            attribute_classes_created = attribute_classes.created,
            attribute_classes_reused = attribute_classes.reused,
            "Copied survey to environment"
        );
        Ok(Some(copy))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert one survey row within an existing transaction.
    async fn insert_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        environment_id: DbId,
        input: &NewSurvey,
    ) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys
                (environment_id, name, survey_type, status, questions, thank_you_card,
                 display_option, recontact_days, auto_close, delay, close_on_date,
                 survey_closed_message)
             VALUES ($1, $2, COALESCE($3, 'web'), COALESCE($4, 'draft'),
                     COALESCE($5, '[]'::jsonb), COALESCE($6, '{{\"enabled\": false}}'::jsonb),
                     COALESCE($7, 'displayOnce'), $8, $9, COALESCE($10, 0), $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(environment_id)
            .bind(&input.name)
            .bind(&input.survey_type)
            .bind(&input.status)
            .bind(&input.questions)
            .bind(&input.thank_you_card)
            .bind(&input.display_option)
            .bind(input.recontact_days)
            .bind(input.auto_close)
            .bind(input.delay)
            .bind(input.close_on_date)
            .bind(&input.survey_closed_message)
            .fetch_one(&mut **tx)
            .await
    }

    /// Scoped lookup within an existing transaction.
    async fn find_scoped_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        environment_id: DbId,
        id: DbId,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM surveys WHERE id = $1 AND environment_id = $2");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(environment_id)
            .fetch_optional(&mut **tx)
            .await
    }
}
