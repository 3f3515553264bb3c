//! Best-effort usage telemetry.
//!
//! The platform-wide reporter is an external collaborator; this crate only
//! defines the seam and a logging default. Failures are swallowed by the
//! reporter, never surfaced to the mutation path.

use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait TelemetryReporter: Send + Sync {
    /// Fire-and-forget event delivery.
    async fn send(&self, event: &str, properties: Value);
}

/// Default reporter: logs the event and drops it.
pub struct LoggingTelemetryReporter;

#[async_trait]
impl TelemetryReporter for LoggingTelemetryReporter {
    async fn send(&self, event: &str, properties: Value) {
        log::debug!("telemetry event '{}': {}", event, properties);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every event for assertions.
    #[derive(Default)]
    pub struct RecordingTelemetryReporter {
        pub events: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl TelemetryReporter for RecordingTelemetryReporter {
        async fn send(&self, event: &str, properties: Value) {
            if let Ok(mut events) = self.events.lock() {
                events.push((event.to_string(), properties));
            }
        }
    }
}
