//! Attribute class entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use surveyor_core::catalog::SeedClass;
use surveyor_core::labels::ClassType;
use surveyor_core::types::{DbId, Timestamp};

/// A row from the `attribute_classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttributeClass {
    pub id: DbId,
    pub environment_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub class_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an attribute class inside an environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttributeClass {
    pub name: String,
    pub description: Option<String>,
    pub class_type: ClassType,
}

impl CreateAttributeClass {
    /// Attribute class seeded into a freshly provisioned environment.
    pub fn from_seed(seed: &SeedClass) -> Self {
        Self {
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            class_type: seed.class_type,
        }
    }
}
