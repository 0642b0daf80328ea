//! Survey entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use surveyor_core::labels::{DisplayOption, SurveyStatus, SurveyType};
use surveyor_core::survey_copy::{copy_name, COPY_STATUS};
use surveyor_core::types::{DbId, Timestamp};

use super::attribute_filter::{AttributeFilter, NewAttributeFilter};
use super::trigger::Trigger;

/// A row from the `surveys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Survey {
    pub id: DbId,
    pub environment_id: DbId,
    pub name: String,
    pub survey_type: String,
    pub status: String,
    pub questions: serde_json::Value,
    pub thank_you_card: serde_json::Value,
    pub display_option: String,
    pub recontact_days: Option<i32>,
    pub auto_close: Option<i32>,
    pub delay: i32,
    pub close_on_date: Option<Timestamp>,
    pub survey_closed_message: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A survey together with its targeting rows.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyWithTargeting {
    #[serde(flatten)]
    pub survey: Survey,
    pub triggers: Vec<Trigger>,
    pub attribute_filters: Vec<AttributeFilter>,
}

/// Request body for creating a survey in an environment.
///
/// Only `name` is required; omitted columns take the table defaults.
/// `triggers` lists event class ids. Unrecognised fields are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSurvey {
    pub name: String,
    pub survey_type: Option<SurveyType>,
    pub status: Option<SurveyStatus>,
    pub questions: Option<serde_json::Value>,
    pub thank_you_card: Option<serde_json::Value>,
    pub display_option: Option<DisplayOption>,
    pub recontact_days: Option<i32>,
    pub auto_close: Option<i32>,
    pub delay: Option<i32>,
    pub close_on_date: Option<Timestamp>,
    pub survey_closed_message: Option<serde_json::Value>,
    #[serde(default)]
    pub triggers: Vec<DbId>,
    #[serde(default)]
    pub attribute_filters: Vec<NewAttributeFilter>,
}

/// Column values for one `surveys` insert.
///
/// `None` columns fall back to the table defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSurvey {
    pub name: String,
    pub survey_type: Option<String>,
    pub status: Option<String>,
    pub questions: Option<serde_json::Value>,
    pub thank_you_card: Option<serde_json::Value>,
    pub display_option: Option<String>,
    pub recontact_days: Option<i32>,
    pub auto_close: Option<i32>,
    pub delay: Option<i32>,
    pub close_on_date: Option<Timestamp>,
    pub survey_closed_message: Option<serde_json::Value>,
}

impl From<&CreateSurvey> for NewSurvey {
    fn from(input: &CreateSurvey) -> Self {
        Self {
            name: input.name.clone(),
            survey_type: input.survey_type.map(|t| t.as_str().to_string()),
            status: input.status.map(|s| s.as_str().to_string()),
            questions: input.questions.clone(),
            thank_you_card: input.thank_you_card.clone(),
            display_option: input.display_option.map(|d| d.as_str().to_string()),
            recontact_days: input.recontact_days,
            auto_close: input.auto_close,
            delay: input.delay,
            close_on_date: input.close_on_date,
            survey_closed_message: input.survey_closed_message.clone(),
        }
    }
}

impl NewSurvey {
    /// Copy of `source` for duplication or cross-environment copy.
    ///
    /// Renamed with the copy suffix and reset to draft; the question and
    /// thank-you-card trees are cloned so the copy owns its own JSON.
    pub fn copy_of(source: &Survey) -> Self {
        Self {
            name: copy_name(&source.name),
            survey_type: Some(source.survey_type.clone()),
            status: Some(COPY_STATUS.as_str().to_string()),
            questions: Some(source.questions.clone()),
            thank_you_card: Some(source.thank_you_card.clone()),
            display_option: Some(source.display_option.clone()),
            recontact_days: source.recontact_days,
            auto_close: source.auto_close,
            delay: Some(source.delay),
            close_on_date: source.close_on_date,
            survey_closed_message: source.survey_closed_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_survey() -> Survey {
        Survey {
            id: 11,
            environment_id: 3,
            name: "Churn".to_string(),
            survey_type: "web".to_string(),
            status: "inProgress".to_string(),
            questions: serde_json::json!([{"id": "q1", "type": "openText", "headline": "Why?"}]),
            thank_you_card: serde_json::json!({"enabled": true, "headline": "Thanks"}),
            display_option: "displayMultiple".to_string(),
            recontact_days: Some(7),
            auto_close: None,
            delay: 5,
            close_on_date: None,
            survey_closed_message: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn copy_of_renames_and_resets_status() {
        let copy = NewSurvey::copy_of(&sample_survey());
        assert_eq!(copy.name, "Churn (copy)");
        assert_eq!(copy.status.as_deref(), Some("draft"));
    }

    #[test]
    fn copy_of_carries_content_and_settings() {
        let source = sample_survey();
        let copy = NewSurvey::copy_of(&source);
        assert_eq!(copy.questions.as_ref(), Some(&source.questions));
        assert_eq!(copy.thank_you_card.as_ref(), Some(&source.thank_you_card));
        assert_eq!(copy.display_option.as_deref(), Some("displayMultiple"));
        assert_eq!(copy.recontact_days, Some(7));
        assert_eq!(copy.delay, Some(5));
        assert!(copy.survey_closed_message.is_none());
    }

    #[test]
    fn copy_of_keeps_closed_message() {
        let mut source = sample_survey();
        source.survey_closed_message = Some(serde_json::json!({"heading": "Closed"}));
        let copy = NewSurvey::copy_of(&source);
        assert_eq!(copy.survey_closed_message, source.survey_closed_message);
    }

    #[test]
    fn create_survey_body_needs_only_a_name() {
        let input: CreateSurvey =
            serde_json::from_value(serde_json::json!({"name": "NPS"})).unwrap();
        let row = NewSurvey::from(&input);
        assert_eq!(row.name, "NPS");
        assert!(row.status.is_none());
        assert!(input.triggers.is_empty());
        assert!(input.attribute_filters.is_empty());
    }

    #[test]
    fn create_survey_body_maps_labels() {
        let input: CreateSurvey = serde_json::from_value(serde_json::json!({
            "name": "NPS",
            "survey_type": "link",
            "status": "paused",
            "display_option": "respondMultiple",
            "triggers": [4, 5],
            "attribute_filters": [
                {"attribute_class_id": 9, "condition": "notEquals", "value": "free"}
            ]
        }))
        .unwrap();
        let row = NewSurvey::from(&input);
        assert_eq!(row.survey_type.as_deref(), Some("link"));
        assert_eq!(row.status.as_deref(), Some("paused"));
        assert_eq!(row.display_option.as_deref(), Some("respondMultiple"));
        assert_eq!(input.triggers, vec![4, 5]);
        assert_eq!(input.attribute_filters.len(), 1);
    }

    #[test]
    fn create_survey_body_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateSurvey>(serde_json::json!({
            "name": "NPS",
            "thankYouCard": {"enabled": true, "headline": "Thanks"},
            "surveyClosedMessage": {"heading": "Closed"},
            "autoClose": 10
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"), "unexpected error: {err}");
    }

    #[test]
    fn attribute_filter_body_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateSurvey>(serde_json::json!({
            "name": "NPS",
            "attribute_filters": [
                {"attribute_class_id": 9, "condition": "equals", "value": "x", "classId": 9}
            ]
        }));
        assert!(result.is_err());
    }
}
