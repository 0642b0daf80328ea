//! Surveyor event bus and usage telemetry.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the domain event envelope.
//! - [`TelemetryForwarder`] — background service that logs every event and
//!   ships it to an optional HTTP collector.

pub mod bus;
pub mod telemetry;

pub use bus::{EventBus, PlatformEvent};
pub use telemetry::{TelemetryConfig, TelemetryForwarder};

/// Event names published by the API.
pub mod names {
    /// A survey was created through the create action.
    pub const SURVEY_CREATED: &str = "survey created";
}
