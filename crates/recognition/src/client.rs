use crate::error::{RecognitionError, Result};
use async_trait::async_trait;
use finder_ink::InkPayload;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One ranked guess from the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    #[serde(default)]
    pub score: Option<f32>,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: None,
        }
    }
}

/// Candidates for one ink payload, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub candidates: Vec<Candidate>,
}

impl Recognition {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate::new(text)],
        }
    }

    /// Trimmed text of the top candidate.
    ///
    /// Returns `None` when there are no candidates or the top one is blank,
    /// which callers treat the same as a failed recognition.
    pub fn best_text(&self) -> Option<&str> {
        let text = self.candidates.first()?.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Asynchronous handwriting recognizer.
///
/// Implementations must be cheap to share: the session holds one behind an
/// `Arc` and calls it from detached tasks.
#[async_trait]
pub trait RecognitionClient: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Make the recognizer ready (e.g. fetch or warm a model).
    ///
    /// Called once in the background when a session starts. Default is a
    /// no-op for services that need no preparation.
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Recognize the given strokes.
    async fn recognize(&self, ink: &InkPayload) -> Result<Recognition>;
}

pub type RecognitionClientRef = Arc<dyn RecognitionClient>;

/// Recognizer used when no service is configured. Every call fails.
#[derive(Debug, Default)]
pub struct NullRecognizer;

#[async_trait]
impl RecognitionClient for NullRecognizer {
    fn name(&self) -> &str {
        "null"
    }

    async fn recognize(&self, _ink: &InkPayload) -> Result<Recognition> {
        Err(RecognitionError::Unavailable(
            "no recognition endpoint configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_text_trims_top_candidate() {
        let recognition = Recognition {
            candidates: vec![Candidate::new("  maps \n"), Candidate::new("naps")],
        };
        assert_eq!(recognition.best_text(), Some("maps"));
    }

    #[test]
    fn test_best_text_none_for_empty_or_blank() {
        assert_eq!(Recognition::default().best_text(), None);
        assert_eq!(Recognition::from_text("   ").best_text(), None);
    }

    #[tokio::test]
    async fn test_null_recognizer_always_fails() {
        let recognizer = NullRecognizer;
        assert!(recognizer.prepare().await.is_ok());

        let result = recognizer.recognize(&InkPayload::default()).await;
        assert!(matches!(result, Err(RecognitionError::Unavailable(_))));
    }
}
