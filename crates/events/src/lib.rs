//! Event contracts for finder drawing sessions.
//!
//! The session emits these on every observable transition. Using shared
//! types keeps producers and consumers agreeing on field names.
//!
//! Also provides the [`EventBus`] trait for decoupled event emission.

mod bus;

pub use bus::{
    emit_event, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus,
    TracingEventBus,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A stroke was released and appended to the drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeCommittedEvent {
    pub session_id: Uuid,
    pub generation: u64,
    /// Index of the stroke within the current drawing.
    pub stroke_index: usize,
    pub points: usize,
    pub duration_ms: i64,
    pub ts_ms: i64,
}

/// The debounce delay elapsed and ink was sent to the recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionRequestedEvent {
    pub session_id: Uuid,
    pub generation: u64,
    pub strokes: usize,
    pub points: usize,
    pub ts_ms: i64,
}

/// Recognized text replaced the previous value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionAppliedEvent {
    pub session_id: Uuid,
    pub generation: u64,
    pub text: String,
    pub ts_ms: i64,
}

/// Recognition failed. The session keeps its previous text; this event is
/// the only trace of the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionFailedEvent {
    pub session_id: Uuid,
    pub generation: u64,
    pub error: String,
    pub ts_ms: i64,
}

/// A recognition result arrived for a generation that is no longer current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionDiscardedEvent {
    pub session_id: Uuid,
    pub generation: u64,
    pub current_generation: u64,
    pub ts_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    /// Explicit "Clear All".
    User,
    /// Typing took over from drawing.
    TypedInput,
}

/// The drawing was reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClearedEvent {
    pub session_id: Uuid,
    /// Generation after the reset.
    pub generation: u64,
    pub reason: ClearReason,
    /// Whether a debounced recognition was cancelled by this reset.
    #[serde(default)]
    pub cancelled_pending: bool,
    pub ts_ms: i64,
}

/// The user picked an application from the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLaunchRequestedEvent {
    pub session_id: Uuid,
    pub identifier: String,
    pub display_name: String,
    pub ts_ms: i64,
}

/// The recognizer finished preparing, successfully or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReadyEvent {
    pub session_id: Uuid,
    pub recognizer: String,
    pub ready: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub ts_ms: i64,
}

/// Event names as constants to prevent typos.
pub mod event_names {
    pub const STROKE_COMMITTED: &str = "session:stroke_committed";
    pub const RECOGNITION_REQUESTED: &str = "session:recognition_requested";
    pub const RECOGNITION_APPLIED: &str = "session:recognition_applied";
    pub const RECOGNITION_FAILED: &str = "session:recognition_failed";
    pub const RECOGNITION_DISCARDED: &str = "session:recognition_discarded";
    pub const SESSION_CLEARED: &str = "session:cleared";
    pub const APP_LAUNCH_REQUESTED: &str = "session:app_launch_requested";
    pub const MODEL_READY: &str = "session:model_ready";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_event_roundtrip_defaults() {
        let json = format!(
            r#"{{"session_id": "{}", "generation": 4, "reason": "typed_input", "ts_ms": 1}}"#,
            Uuid::nil()
        );
        let event: SessionClearedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.reason, ClearReason::TypedInput);
        assert!(!event.cancelled_pending);
    }

    #[test]
    fn test_failed_event_serializes_error_text() {
        let event = RecognitionFailedEvent {
            session_id: Uuid::nil(),
            generation: 2,
            error: "recognition timed out after 5000 ms".to_string(),
            ts_ms: 0,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["generation"], 2);
        assert_eq!(value["error"], "recognition timed out after 5000 ms");
    }

    #[test]
    fn test_now_ms_is_positive() {
        assert!(now_ms() > 0);
    }
}
