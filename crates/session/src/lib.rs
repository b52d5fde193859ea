//! Drawing session coordination.
//!
//! Owns the state of one drawing screen: the strokes being captured, the
//! debounced recognition of those strokes, the typed text, and the search
//! results derived from both.
//!
//! # Pipeline
//!
//! ```text
//! pointer events → StrokeCapture → (stroke released) → RecognitionDebouncer
//!                                                            │ quiet for `debounce`
//!                                                            ▼
//!        SearchResults ← recognized text ← (generation check) ← RecognitionClient
//! ```
//!
//! All state changes run on a single task ([`SessionHandle::spawn`]). Timers,
//! recognition calls and launches run detached and report back through the
//! same task, so results are applied in order with every other mutation.
//!
//! # Example
//!
//! ```ignore
//! use finder_session::{SessionConfig, SessionHandle};
//!
//! let handle = SessionHandle::spawn(catalog, recognizer, launcher, bus, SessionConfig::default());
//! handle.pointer(PointerEvent::down(10.0, 10.0, now)).await?;
//! handle.pointer(PointerEvent::up(10.0, 10.0, now + 40)).await?;
//!
//! let snapshot = handle.snapshot().await?;
//! println!("{}", snapshot.status_text);
//! ```

mod actor;
mod config;
mod debouncer;
mod error;
mod snapshot;
mod state;

pub use actor::SessionHandle;
pub use config::{
    SessionConfig, COMMAND_BUFFER, DEFAULT_DEBOUNCE, DEFAULT_RECOGNITION_TIMEOUT,
    PLACEHOLDER_TEXT,
};
pub use debouncer::RecognitionDebouncer;
pub use error::SessionError;
pub use snapshot::SessionSnapshot;
pub use state::{DrawingSession, PointerTransition, SessionPhase, TypedTransition};
