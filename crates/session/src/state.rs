//! Drawing session state machine.
//!
//! Pure and synchronous: the actor drives it and owns the timers. Every
//! transition that invalidates outstanding recognition work bumps the
//! generation, and results are only accepted for the current generation.

use crate::config::PLACEHOLDER_TEXT;
use finder_ink::{CaptureOutcome, InkPayload, PointerEvent, RenderPath, Stroke, StrokeCapture};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No strokes, no recognized text.
    Empty,
    /// A pointer gesture is in progress.
    Drawing,
    /// Strokes and/or recognized text present, pointer up.
    Settled,
}

/// Result of feeding one pointer event to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTransition {
    Ignored,
    Updated,
    /// A stroke was committed. Recognition should be (re)scheduled for
    /// `generation`.
    StrokeCommitted {
        generation: u64,
        stroke_index: usize,
        points: usize,
        duration_ms: i64,
    },
}

/// Result of changing the typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedTransition {
    Updated,
    /// Typing replaced the drawing; pending recognition must be dropped.
    DrawingReset { generation: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    capture: StrokeCapture,
    committed_strokes: Vec<Stroke>,
    committed_paths: Vec<RenderPath>,
    recognized_text: String,
    typed_text: String,
    generation: u64,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.capture.is_active() {
            SessionPhase::Drawing
        } else if self.committed_strokes.is_empty() && self.recognized_text.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Settled
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerTransition {
        match self.capture.handle(event) {
            CaptureOutcome::Ignored => PointerTransition::Ignored,
            CaptureOutcome::Started | CaptureOutcome::Extended => PointerTransition::Updated,
            CaptureOutcome::Completed { stroke, path } => {
                let points = stroke.len();
                let duration_ms = stroke.duration_ms();

                self.committed_strokes.push(stroke);
                self.committed_paths.push(path);
                self.generation += 1;

                PointerTransition::StrokeCommitted {
                    generation: self.generation,
                    stroke_index: self.committed_strokes.len() - 1,
                    points,
                    duration_ms,
                }
            }
        }
    }

    /// Reset to the initial value, typed text included. Returns the new
    /// generation.
    pub fn clear(&mut self) -> u64 {
        self.reset_drawing();
        self.typed_text.clear();
        self.generation
    }

    /// Typed text that is not blank while recognized text is present discards
    /// the drawing, so only one input mode is ever active. Whitespace alone
    /// does not count, matching how the search query is trimmed.
    pub fn set_typed_text(&mut self, text: impl Into<String>) -> TypedTransition {
        self.typed_text = text.into();

        if !self.typed_text.trim().is_empty() && !self.recognized_text.is_empty() {
            self.reset_drawing();
            return TypedTransition::DrawingReset {
                generation: self.generation,
            };
        }

        TypedTransition::Updated
    }

    /// Store a recognition result if it belongs to the current generation.
    pub fn apply_recognition(&mut self, generation: u64, text: &str) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.recognized_text = text.to_string();
        true
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Snapshot of the committed strokes for the recognizer.
    pub fn ink_payload(&self) -> InkPayload {
        InkPayload::from_strokes(&self.committed_strokes)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn committed_strokes(&self) -> &[Stroke] {
        &self.committed_strokes
    }

    pub fn committed_paths(&self) -> &[RenderPath] {
        &self.committed_paths
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.capture.active_stroke()
    }

    pub fn active_path(&self) -> Option<&RenderPath> {
        self.capture.active_path()
    }

    pub fn recognized_text(&self) -> &str {
        &self.recognized_text
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    /// Canvas label: the recognized text, or a hint when there is none.
    pub fn placeholder(&self) -> &str {
        if self.recognized_text.is_empty() {
            PLACEHOLDER_TEXT
        } else {
            &self.recognized_text
        }
    }

    fn reset_drawing(&mut self) {
        self.capture.reset();
        self.committed_strokes.clear();
        self.committed_paths.clear();
        self.recognized_text.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(session: &mut DrawingSession, start: i64, moves: i64) -> PointerTransition {
        session.handle_pointer(PointerEvent::down(0.0, 0.0, start));
        for i in 1..=moves {
            session.handle_pointer(PointerEvent::moved(i as f32, 0.0, start + i * 10));
        }
        session.handle_pointer(PointerEvent::up(0.0, 0.0, start + 100))
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = DrawingSession::new();
        assert_eq!(session.phase(), SessionPhase::Empty);

        session.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
        assert_eq!(session.phase(), SessionPhase::Drawing);
        assert!(session.active_stroke().is_some());

        session.handle_pointer(PointerEvent::up(0.0, 0.0, 10));
        assert_eq!(session.phase(), SessionPhase::Settled);
        assert!(session.active_stroke().is_none());

        session.clear();
        assert_eq!(session.phase(), SessionPhase::Empty);
    }

    #[test]
    fn test_strokes_and_paths_stay_in_lockstep() {
        let mut session = DrawingSession::new();
        for i in 0..3 {
            draw(&mut session, i * 1000, i);
        }

        assert_eq!(session.committed_strokes().len(), 3);
        assert_eq!(session.committed_paths().len(), 3);
        for (stroke, path) in session
            .committed_strokes()
            .iter()
            .zip(session.committed_paths())
        {
            assert_eq!(stroke.len(), path.len());
        }
    }

    #[test]
    fn test_each_commit_bumps_generation() {
        let mut session = DrawingSession::new();

        let first = draw(&mut session, 0, 2);
        let second = draw(&mut session, 500, 0);

        assert_eq!(
            first,
            PointerTransition::StrokeCommitted {
                generation: 1,
                stroke_index: 0,
                points: 3,
                duration_ms: 20,
            }
        );
        assert!(matches!(
            second,
            PointerTransition::StrokeCommitted { generation: 2, stroke_index: 1, points: 1, .. }
        ));
    }

    #[test]
    fn test_stale_generation_is_not_applied() {
        let mut session = DrawingSession::new();
        let PointerTransition::StrokeCommitted { generation, .. } = draw(&mut session, 0, 1) else {
            panic!("expected commit");
        };

        session.clear();
        assert!(!session.apply_recognition(generation, "maps"));
        assert_eq!(session.recognized_text(), "");
        assert_eq!(session.placeholder(), PLACEHOLDER_TEXT);
    }

    #[test]
    fn test_current_generation_is_applied() {
        let mut session = DrawingSession::new();
        draw(&mut session, 0, 1);

        assert!(session.apply_recognition(session.generation(), "maps"));
        assert_eq!(session.recognized_text(), "maps");
        assert_eq!(session.placeholder(), "maps");
    }

    #[test]
    fn test_typing_over_recognized_text_resets_drawing() {
        let mut session = DrawingSession::new();
        draw(&mut session, 0, 1);
        session.apply_recognition(session.generation(), "maps");
        let before = session.generation();

        let transition = session.set_typed_text("cal");

        assert_eq!(
            transition,
            TypedTransition::DrawingReset {
                generation: before + 1
            }
        );
        assert!(session.committed_strokes().is_empty());
        assert!(session.committed_paths().is_empty());
        assert_eq!(session.recognized_text(), "");
        assert_eq!(session.typed_text(), "cal");
    }

    #[test]
    fn test_typing_without_recognized_text_keeps_strokes() {
        let mut session = DrawingSession::new();
        draw(&mut session, 0, 1);

        assert_eq!(session.set_typed_text("cal"), TypedTransition::Updated);
        assert_eq!(session.committed_strokes().len(), 1);
    }

    #[test]
    fn test_empty_typed_text_never_resets() {
        let mut session = DrawingSession::new();
        draw(&mut session, 0, 1);
        session.apply_recognition(session.generation(), "maps");

        assert_eq!(session.set_typed_text(""), TypedTransition::Updated);
        assert_eq!(session.recognized_text(), "maps");
    }

    #[test]
    fn test_blank_typed_text_keeps_drawing() {
        let mut session = DrawingSession::new();
        draw(&mut session, 0, 1);
        session.apply_recognition(session.generation(), "maps");
        let before = session.generation();

        assert_eq!(session.set_typed_text("   "), TypedTransition::Updated);
        assert_eq!(session.generation(), before);
        assert_eq!(session.committed_strokes().len(), 1);
        assert_eq!(session.recognized_text(), "maps");
        assert_eq!(session.typed_text(), "   ");
    }

    #[test]
    fn test_clear_resets_typed_text_and_active_stroke() {
        let mut session = DrawingSession::new();
        session.set_typed_text("cam");
        session.handle_pointer(PointerEvent::down(0.0, 0.0, 0));

        session.clear();

        assert_eq!(session.typed_text(), "");
        assert!(session.active_stroke().is_none());
        assert!(session.ink_payload().is_empty());
    }
}
