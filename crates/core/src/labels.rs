//! Text label enums mapping to `TEXT` columns guarded by `CHECK` constraints.
//!
//! Each variant's label matches the literal accepted by the corresponding
//! constraint in the migrations, and is also the JSON representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_label_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the label stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {} '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

define_label_enum! {
    /// Role a user holds inside a team.
    MembershipRole {
        Owner = "owner",
        Admin = "admin",
        Editor = "editor",
        Developer = "developer",
        Viewer = "viewer",
    }
}

define_label_enum! {
    /// Deployment context of an environment.
    EnvironmentType {
        Production = "production",
        Development = "development",
    }
}

define_label_enum! {
    /// How an event or attribute class came into existence.
    ClassType {
        Automatic = "automatic",
        Manual = "manual",
    }
}

define_label_enum! {
    /// Survey lifecycle status.
    SurveyStatus {
        Draft = "draft",
        InProgress = "inProgress",
        Paused = "paused",
        Completed = "completed",
    }
}

define_label_enum! {
    /// Channel a survey is delivered through.
    SurveyType {
        Web = "web",
        Link = "link",
        Email = "email",
        Mobile = "mobile",
    }
}

define_label_enum! {
    /// How often a respondent may see a survey.
    DisplayOption {
        DisplayOnce = "displayOnce",
        DisplayMultiple = "displayMultiple",
        RespondMultiple = "respondMultiple",
    }
}

define_label_enum! {
    /// Comparison applied by an attribute filter.
    FilterCondition {
        Equals = "equals",
        NotEquals = "notEquals",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back_to_the_same_variant() {
        for status in SurveyStatus::ALL {
            assert_eq!(status.as_str().parse::<SurveyStatus>().unwrap(), *status);
        }
        for role in MembershipRole::ALL {
            assert_eq!(role.as_str().parse::<MembershipRole>().unwrap(), *role);
        }
    }

    #[test]
    fn unknown_label_is_a_validation_error() {
        let err = "archived".parse::<SurveyStatus>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("archived")));
    }

    #[test]
    fn serde_uses_the_database_label() {
        let json = serde_json::to_value(SurveyStatus::InProgress).unwrap();
        assert_eq!(json, "inProgress");

        let parsed: FilterCondition = serde_json::from_value(serde_json::json!("notEquals")).unwrap();
        assert_eq!(parsed, FilterCondition::NotEquals);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(EnvironmentType::Development.to_string(), "development");
        assert_eq!(DisplayOption::RespondMultiple.to_string(), "respondMultiple");
    }
}
