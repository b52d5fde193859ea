//! JSON-over-HTTP recognizer adapter.
//!
//! Wire format:
//!
//! ```text
//! POST {endpoint}
//! {"language": "en-US", "strokes": [[{"x": 1.0, "y": 2.0, "t": 1700000000000}, ...], ...]}
//!
//! 200 OK
//! {"candidates": [{"text": "maps", "score": 0.92}, ...]}
//! ```

use crate::client::{Recognition, RecognitionClient};
use crate::error::{RecognitionError, Result};
use async_trait::async_trait;
use finder_ink::InkPayload;
use serde::Serialize;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE_TAG: &str = "en-US";

#[derive(Debug, Clone)]
pub struct HttpRecognizerConfig {
    pub endpoint: String,
    /// BCP-47 tag of the recognition model, e.g. `en-US`.
    pub language_tag: String,
}

impl HttpRecognizerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            language_tag: DEFAULT_LANGUAGE_TAG.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WirePoint {
    x: f32,
    y: f32,
    t: i64,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    language: &'a str,
    strokes: Vec<Vec<WirePoint>>,
}

fn request_body<'a>(ink: &InkPayload, language: &'a str) -> WireRequest<'a> {
    WireRequest {
        language,
        strokes: ink
            .strokes()
            .iter()
            .map(|stroke| {
                stroke
                    .points()
                    .iter()
                    .map(|p| WirePoint {
                        x: p.x,
                        y: p.y,
                        t: p.timestamp_ms,
                    })
                    .collect()
            })
            .collect(),
    }
}

fn parse_response(body: &str) -> Result<Recognition> {
    serde_json::from_str(body).map_err(|e| RecognitionError::InvalidResponse(e.to_string()))
}

/// Recognizer backed by a remote HTTP endpoint.
pub struct HttpRecognizer {
    client: reqwest::Client,
    config: HttpRecognizerConfig,
}

impl HttpRecognizer {
    pub fn new(client: reqwest::Client, config: HttpRecognizerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &HttpRecognizerConfig {
        &self.config
    }
}

#[async_trait]
impl RecognitionClient for HttpRecognizer {
    fn name(&self) -> &str {
        "http"
    }

    async fn recognize(&self, ink: &InkPayload) -> Result<Recognition> {
        let body = request_body(ink, &self.config.language_tag);

        tracing::debug!(
            endpoint = %self.config.endpoint,
            strokes = ink.len(),
            points = ink.point_count(),
            "sending ink to recognizer"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RecognitionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text)
    }
}

impl std::fmt::Debug for HttpRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecognizer")
            .field("endpoint", &self.config.endpoint)
            .field("language_tag", &self.config.language_tag)
            .finish_non_exhaustive()
    }
}
