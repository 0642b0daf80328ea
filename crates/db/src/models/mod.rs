//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the API accepts one

pub mod attribute_class;
pub mod attribute_filter;
pub mod environment;
pub mod event_class;
pub mod membership;
pub mod product;
pub mod survey;
pub mod team;
pub mod trigger;
pub mod user;
