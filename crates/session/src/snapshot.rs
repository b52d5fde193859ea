//! Read-only view of a session, published after every transition.

use crate::state::{DrawingSession, SessionPhase};
use finder_catalog::{search, AppCatalog, SearchResults};
use finder_ink::{RenderPath, Stroke};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a renderer needs, taken between two transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub generation: u64,
    pub phase: SessionPhase,
    pub strokes: Vec<Stroke>,
    pub paths: Vec<RenderPath>,
    /// Path of the stroke being drawn, if any.
    pub active_path: Option<RenderPath>,
    pub recognized_text: String,
    pub typed_text: String,
    /// Canvas label.
    pub placeholder: String,
    /// Result list header.
    pub status_text: String,
    /// True until the recognizer finished preparing.
    pub model_loading: bool,
    /// A debounce timer or recognition call is outstanding.
    pub recognition_pending: bool,
    pub results: SearchResults,
}

impl SessionSnapshot {
    pub(crate) fn capture(
        session_id: Uuid,
        session: &DrawingSession,
        catalog: &AppCatalog,
        model_loading: bool,
        recognition_pending: bool,
    ) -> Self {
        let results = search(catalog, session.typed_text(), session.recognized_text());

        Self {
            session_id,
            generation: session.generation(),
            phase: session.phase(),
            strokes: session.committed_strokes().to_vec(),
            paths: session.committed_paths().to_vec(),
            active_path: session.active_path().cloned(),
            recognized_text: session.recognized_text().to_string(),
            typed_text: session.typed_text().to_string(),
            placeholder: session.placeholder().to_string(),
            status_text: results.status.to_string(),
            model_loading,
            recognition_pending,
            results,
        }
    }

    /// Display names of the current results, in order.
    pub fn result_names(&self) -> Vec<&str> {
        self.results
            .entries
            .iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }
}
