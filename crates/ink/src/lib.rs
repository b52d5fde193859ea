//! Digital ink for the finder canvas.
//!
//! Turns raw pointer events into strokes of timestamped points, the unit a
//! handwriting recognizer consumes, and keeps a drawable polyline next to
//! each stroke for display.
//!
//! # Example
//!
//! ```
//! use finder_ink::{CaptureOutcome, PointerEvent, StrokeCapture};
//!
//! let mut capture = StrokeCapture::new();
//! capture.handle(PointerEvent::down(10.0, 10.0, 0));
//! capture.handle(PointerEvent::moved(20.0, 15.0, 16));
//!
//! match capture.handle(PointerEvent::up(20.0, 15.0, 32)) {
//!     CaptureOutcome::Completed { stroke, .. } => assert_eq!(stroke.len(), 2),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod capture;
mod error;
mod path;
mod stroke;

pub use capture::{CaptureOutcome, PointerEvent, PointerPhase, StrokeCapture};
pub use error::InkError;
pub use path::{PathCommand, RenderPath};
pub use stroke::{InkPayload, Point, Stroke};
