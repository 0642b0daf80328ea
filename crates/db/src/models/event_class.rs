//! Event class entity model and DTOs.
//!
//! Event classes are the named events a survey can be triggered by. Names
//! are unique within an environment.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use surveyor_core::catalog::SeedClass;
use surveyor_core::error::CoreError;
use surveyor_core::labels::ClassType;
use surveyor_core::types::{DbId, Timestamp};

/// A row from the `event_classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventClass {
    pub id: DbId,
    pub environment_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub class_type: String,
    pub no_code_config: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event class inside an environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventClass {
    pub name: String,
    pub description: Option<String>,
    pub class_type: ClassType,
    pub no_code_config: Option<serde_json::Value>,
}

impl CreateEventClass {
    /// Event class seeded into a freshly provisioned environment.
    pub fn from_seed(seed: &SeedClass) -> Self {
        Self {
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            class_type: seed.class_type,
            no_code_config: None,
        }
    }

    /// Same-named class for another environment, carrying over the
    /// description, type and no-code configuration.
    pub fn copy_of(source: &EventClass) -> Result<Self, CoreError> {
        Ok(Self {
            name: source.name.clone(),
            description: source.description.clone(),
            class_type: source.class_type.parse()?,
            no_code_config: source.no_code_config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surveyor_core::catalog::DEFAULT_ENVIRONMENTS;

    fn sample(class_type: &str) -> EventClass {
        EventClass {
            id: 7,
            environment_id: 1,
            name: "Clicked Upgrade".to_string(),
            description: Some("User clicked the upgrade button".to_string()),
            class_type: class_type.to_string(),
            no_code_config: Some(serde_json::json!({"type": "click", "cssSelector": ".upgrade"})),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn copy_of_keeps_everything_but_ids() {
        let source = sample("manual");
        let copy = CreateEventClass::copy_of(&source).unwrap();
        assert_eq!(copy.name, source.name);
        assert_eq!(copy.description, source.description);
        assert_eq!(copy.class_type, ClassType::Manual);
        assert_eq!(copy.no_code_config, source.no_code_config);
    }

    #[test]
    fn copy_of_rejects_unknown_type() {
        assert!(CreateEventClass::copy_of(&sample("legacy")).is_err());
    }

    #[test]
    fn from_seed_has_no_no_code_config() {
        let seed = &DEFAULT_ENVIRONMENTS[0].event_classes[0];
        let dto = CreateEventClass::from_seed(seed);
        assert_eq!(dto.name, "New Session");
        assert!(dto.no_code_config.is_none());
        assert_eq!(dto.class_type, ClassType::Automatic);
    }
}
