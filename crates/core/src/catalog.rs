//! Default resources seeded into every newly provisioned team.
//!
//! A team starts with one product holding a production and a development
//! environment. Each environment gets a fixed set of automatic event and
//! attribute classes so the SDK can fire its built-in events immediately.

use crate::labels::{ClassType, EnvironmentType, MembershipRole};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the product created alongside a new team.
pub const DEFAULT_PRODUCT_NAME: &str = "My Product";

/// Role granted to the user who creates a team.
pub const OWNER_ROLE: MembershipRole = MembershipRole::Owner;

// ---------------------------------------------------------------------------
// Seed types
// ---------------------------------------------------------------------------

/// A reference class (event or attribute) seeded into an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedClass {
    pub name: &'static str,
    pub description: &'static str,
    pub class_type: ClassType,
}

/// One environment of the default product with its seeded classes.
#[derive(Debug, Clone, Copy)]
pub struct SeedEnvironment {
    pub environment_type: EnvironmentType,
    pub event_classes: &'static [SeedClass],
    pub attribute_classes: &'static [SeedClass],
}

const NEW_SESSION: SeedClass = SeedClass {
    name: "New Session",
    description: "Gets fired when a new session is created",
    class_type: ClassType::Automatic,
};

const EXIT_INTENT: SeedClass = SeedClass {
    name: "Exit Intent (Desktop)",
    description: "A user on Desktop leaves the website with the cursor.",
    class_type: ClassType::Automatic,
};

const HALF_SCROLL: SeedClass = SeedClass {
    name: "50% Scroll",
    description: "A user scrolled 50% of the current page",
    class_type: ClassType::Automatic,
};

const USER_ID: SeedClass = SeedClass {
    name: "userId",
    description: "The internal ID of the person",
    class_type: ClassType::Automatic,
};

const EMAIL: SeedClass = SeedClass {
    name: "email",
    description: "The email of the person",
    class_type: ClassType::Automatic,
};

const DEFAULT_ATTRIBUTE_CLASSES: &[SeedClass] = &[USER_ID, EMAIL];

/// The environments created for the default product, production first.
pub const DEFAULT_ENVIRONMENTS: &[SeedEnvironment] = &[
    SeedEnvironment {
        environment_type: EnvironmentType::Production,
        event_classes: &[NEW_SESSION, EXIT_INTENT, HALF_SCROLL],
        attribute_classes: DEFAULT_ATTRIBUTE_CLASSES,
    },
    SeedEnvironment {
        environment_type: EnvironmentType::Development,
        event_classes: &[NEW_SESSION],
        attribute_classes: DEFAULT_ATTRIBUTE_CLASSES,
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
