//! Usage telemetry forwarding.
//!
//! [`TelemetryForwarder`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and records every [`PlatformEvent`] in the log. When a collector endpoint
//! is configured, each event is also POSTed to it as JSON. Delivery is a
//! single fire-and-forget attempt: failures are logged and never reach the
//! request that published the event.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for telemetry delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The collector returned a non-2xx status code.
    #[error("Telemetry collector returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// TelemetryConfig
// ---------------------------------------------------------------------------

/// Configuration for the telemetry forwarder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Collector URL. Events are only logged when unset.
    pub endpoint: Option<String>,
    /// Master switch; when true nothing is sent even if `endpoint` is set.
    pub disabled: bool,
}

impl TelemetryConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable             | Default |
    /// |----------------------|---------|
    /// | `TELEMETRY_ENDPOINT` | unset   |
    /// | `TELEMETRY_DISABLED` | `false` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("TELEMETRY_ENDPOINT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let disabled = lookup("TELEMETRY_DISABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { endpoint, disabled }
    }

    /// The endpoint events should be sent to, if sending is enabled.
    pub fn active_endpoint(&self) -> Option<&str> {
        if self.disabled {
            None
        } else {
            self.endpoint.as_deref()
        }
    }
}

// ---------------------------------------------------------------------------
// TelemetryForwarder
// ---------------------------------------------------------------------------

/// Background service forwarding platform events to the telemetry collector.
pub struct TelemetryForwarder {
    config: TelemetryConfig,
    client: reqwest::Client,
}

impl TelemetryForwarder {
    /// Create a forwarder with a pre-configured HTTP client.
    pub fn new(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    /// Run the forwarding loop until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        source_entity_type = ?event.source_entity_type,
                        source_entity_id = ?event.source_entity_id,
                        "Telemetry event"
                    );
                    if let Some(url) = self.config.active_endpoint() {
                        if let Err(e) = self.send(url, &event).await {
                            tracing::warn!(
                                error = %e,
                                event_type = %event.event_type,
                                "Failed to deliver telemetry event"
                            );
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Telemetry forwarder lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, telemetry forwarder shutting down");
                    break;
                }
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn send(&self, url: &str, event: &PlatformEvent) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(url)
            .json(&collector_payload(event))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TelemetryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// JSON body sent to the collector for one event.
pub fn collector_payload(event: &PlatformEvent) -> serde_json::Value {
    serde_json::json!({
        "event": event.event_type,
        "properties": {
            "source_entity_type": event.source_entity_type,
            "source_entity_id": event.source_entity_id,
            "payload": event.payload,
        },
        "timestamp": event.timestamp,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::bus::EventBus;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn config_defaults_to_log_only() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TelemetryConfig::default());
        assert!(config.active_endpoint().is_none());
    }

    #[test]
    fn config_reads_endpoint() {
        let config =
            TelemetryConfig::from_lookup(lookup(&[("TELEMETRY_ENDPOINT", " https://t.example/e ")]));
        assert_eq!(config.active_endpoint(), Some("https://t.example/e"));
    }

    #[test]
    fn disabled_flag_wins_over_endpoint() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("TELEMETRY_ENDPOINT", "https://t.example/e"),
            ("TELEMETRY_DISABLED", "TRUE"),
        ]));
        assert!(config.disabled);
        assert!(config.active_endpoint().is_none());
    }

    #[test]
    fn blank_endpoint_is_ignored() {
        let config = TelemetryConfig::from_lookup(lookup(&[("TELEMETRY_ENDPOINT", "  ")]));
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn collector_payload_shape() {
        let event = PlatformEvent::new("survey created").with_source("survey", 9);
        let body = collector_payload(&event);
        assert_eq!(body["event"], "survey created");
        assert_eq!(body["properties"]["source_entity_type"], "survey");
        assert_eq!(body["properties"]["source_entity_id"], 9);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn forwarder_stops_when_bus_is_dropped() {
        let bus = EventBus::default();
        let forwarder = TelemetryForwarder::new(TelemetryConfig::default()).unwrap();
        let handle = tokio::spawn(forwarder.run(bus.subscribe()));

        bus.publish(PlatformEvent::new("survey created"));
        drop(bus);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("forwarder should exit after the bus closes")
            .unwrap();
    }
}
