//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Helpers suffixed `_tx` run
//! inside a caller-owned transaction so multi-step operations commit or
//! roll back as one unit.

pub mod attribute_class_repo;
pub mod attribute_filter_repo;
pub mod environment_repo;
pub mod event_class_repo;
pub mod membership_repo;
pub mod product_repo;
pub mod survey_repo;
pub mod team_repo;
pub mod trigger_repo;
pub mod user_repo;

pub use attribute_class_repo::AttributeClassRepo;
pub use attribute_filter_repo::AttributeFilterRepo;
pub use environment_repo::EnvironmentRepo;
pub use event_class_repo::EventClassRepo;
pub use membership_repo::MembershipRepo;
pub use product_repo::ProductRepo;
pub use survey_repo::SurveyRepo;
pub use team_repo::TeamRepo;
pub use trigger_repo::TriggerRepo;
pub use user_repo::UserRepo;
