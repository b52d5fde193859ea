//! Event bus abstraction for decoupled event emission.
//!
//! The session reports what it did through this trait so that a UI shell,
//! the headless driver and tests can each observe it their own way.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sink for session events.
pub trait EventBus: Send + Sync {
    /// Emit an event with a JSON payload.
    ///
    /// # Arguments
    /// * `topic` - Event name (see [`event_names`](crate::event_names))
    /// * `payload` - JSON payload to emit
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// Serialize a typed event and emit it.
///
/// Serialization failures are logged and the event is dropped.
pub fn emit_event<T: Serialize>(bus: &dyn EventBus, topic: &str, event: &T) {
    match serde_json::to_value(event) {
        Ok(payload) => bus.emit(topic, payload),
        Err(e) => tracing::warn!(topic, error = %e, "failed to serialize event"),
    }
}

/// A captured event from [`InMemoryEventBus`].
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Keeps every emitted event for later inspection.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<EmittedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        self.log().clone()
    }

    /// Events for a specific topic, in emission order.
    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.log()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    pub fn count(&self, topic: &str) -> usize {
        self.log().iter().filter(|e| e.topic == topic).count()
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.log().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// Discards all events.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {}
}

/// Writes events to the `tracing` log at debug level.
pub struct TracingEventBus;

impl EventBus for TracingEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        tracing::debug!(target: "finder::events", topic, %payload, "event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_memory_event_bus() {
        let bus = InMemoryEventBus::new();

        bus.emit("test:event1", json!({"key": "value1"}));
        bus.emit("test:event2", json!({"key": "value2"}));
        bus.emit("test:event1", json!({"key": "value3"}));

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.events_for("test:event1").len(), 2);
        assert_eq!(bus.count("test:event2"), 1);
        assert_eq!(bus.count("test:missing"), 0);
        assert_eq!(bus.events_for("test:event1")[1].payload["key"], "value3");
    }

    #[test]
    fn test_in_memory_event_bus_clear() {
        let bus = InMemoryEventBus::new();

        bus.emit("test:event", json!({}));
        assert!(!bus.is_empty());

        bus.clear();
        assert!(bus.is_empty());
    }

    #[test]
    fn test_emit_event_serializes_payload() {
        #[derive(Serialize)]
        struct Ping {
            n: u32,
        }

        let bus = InMemoryEventBus::new();
        emit_event(&bus, "test:ping", &Ping { n: 7 });

        assert_eq!(bus.events()[0].payload, json!({"n": 7}));
    }

    #[test]
    fn test_null_and_tracing_buses_accept_events() {
        NullEventBus.emit("test:event", json!({"data": "ignored"}));
        TracingEventBus.emit("test:event", json!({"data": "logged"}));
    }
}
