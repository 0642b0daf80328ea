//! Survey attribute filter model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use surveyor_core::error::CoreError;
use surveyor_core::labels::{ClassType, FilterCondition};
use surveyor_core::types::{DbId, Timestamp};

use super::attribute_class::CreateAttributeClass;

/// A row from the `attribute_filters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttributeFilter {
    pub id: DbId,
    pub survey_id: DbId,
    pub attribute_class_id: DbId,
    pub condition: String,
    pub value: String,
    pub created_at: Timestamp,
}

/// An attribute filter to insert alongside a survey.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAttributeFilter {
    pub attribute_class_id: DbId,
    pub condition: FilterCondition,
    pub value: String,
}

/// An attribute filter joined with the class it targets.
///
/// Used when copying a survey to another environment, where the class has
/// to be found (or recreated) by name.
#[derive(Debug, Clone, FromRow)]
pub struct AttributeFilterWithClass {
    pub condition: String,
    pub value: String,
    pub class_name: String,
    pub class_description: Option<String>,
    pub class_type: String,
}

impl AttributeFilterWithClass {
    /// Same-named class for another environment.
    pub fn class_copy(&self) -> Result<CreateAttributeClass, CoreError> {
        Ok(CreateAttributeClass {
            name: self.class_name.clone(),
            description: self.class_description.clone(),
            class_type: self.class_type.parse::<ClassType>()?,
        })
    }

    /// The filter re-targeted at `attribute_class_id`.
    pub fn retarget(&self, attribute_class_id: DbId) -> Result<NewAttributeFilter, CoreError> {
        Ok(NewAttributeFilter {
            attribute_class_id,
            condition: self.condition.parse()?,
            value: self.value.clone(),
        })
    }
}

impl TryFrom<&AttributeFilter> for NewAttributeFilter {
    type Error = CoreError;

    fn try_from(filter: &AttributeFilter) -> Result<Self, Self::Error> {
        Ok(Self {
            attribute_class_id: filter.attribute_class_id,
            condition: filter.condition.parse()?,
            value: filter.value.clone(),
        })
    }
}
