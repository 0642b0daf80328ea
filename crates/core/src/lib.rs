//! Domain types shared by every Surveyor crate.
//!
//! Nothing in here touches the network or the database: identifiers,
//! the error type, the text enums stored in `TEXT` columns, the default
//! catalog seeded into new teams, and the pure helpers used when a
//! survey is duplicated or copied between environments.

pub mod catalog;
pub mod error;
pub mod labels;
pub mod survey_copy;
pub mod types;
