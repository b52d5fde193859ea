//! Pointer-event state machine that builds strokes.

use crate::path::RenderPath;
use crate::stroke::{Point, Stroke};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A raw pointer/touch sample, delivered in occurrence order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, time_ms: i64) -> Self {
        Self {
            phase,
            x,
            y,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerPhase::Down, x, y, time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerPhase::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerPhase::Up, x, y, time_ms)
    }

    fn point(&self) -> Point {
        Point::new(self.x, self.y, self.time_ms)
    }
}

/// What a single pointer event did to the capture state.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// A new stroke was opened.
    Started,
    /// A point was appended to the active stroke.
    Extended,
    /// The active stroke was released and frozen.
    Completed { stroke: Stroke, path: RenderPath },
    /// The event did not fit the down → move* → up protocol.
    Ignored,
}

#[derive(Debug, Clone)]
struct ActiveStroke {
    stroke: Stroke,
    path: RenderPath,
}

/// Builds strokes from a pointer event stream.
///
/// At most one stroke is active, between a `Down` and the matching `Up`.
/// Events that violate that protocol are dropped rather than treated as
/// errors.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    active: Option<ActiveStroke>,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: PointerEvent) -> CaptureOutcome {
        match event.phase {
            PointerPhase::Down => self.begin(event),
            PointerPhase::Move => self.extend(event),
            PointerPhase::Up => self.finish(),
        }
    }

    /// True while a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref().map(|a| &a.stroke)
    }

    pub fn active_path(&self) -> Option<&RenderPath> {
        self.active.as_ref().map(|a| &a.path)
    }

    /// Drop any in-progress stroke without completing it.
    pub fn reset(&mut self) {
        self.active = None;
    }

    fn begin(&mut self, event: PointerEvent) -> CaptureOutcome {
        if self.active.is_some() {
            tracing::trace!(x = event.x, y = event.y, "pointer down while drawing, ignored");
            return CaptureOutcome::Ignored;
        }

        self.active = Some(ActiveStroke {
            stroke: Stroke::begin(event.point()),
            path: RenderPath::move_to(event.x, event.y),
        });
        CaptureOutcome::Started
    }

    fn extend(&mut self, event: PointerEvent) -> CaptureOutcome {
        let Some(active) = self.active.as_mut() else {
            tracing::trace!(x = event.x, y = event.y, "stray pointer move, ignored");
            return CaptureOutcome::Ignored;
        };

        active.stroke.push(event.point());
        active.path.line_to(event.x, event.y);
        CaptureOutcome::Extended
    }

    // The release position is not recorded; the last move already carries it.
    fn finish(&mut self) -> CaptureOutcome {
        match self.active.take() {
            Some(ActiveStroke { stroke, path }) => CaptureOutcome::Completed { stroke, path },
            None => {
                tracing::trace!("pointer up without stroke, ignored");
                CaptureOutcome::Ignored
            }
        }
    }
}
