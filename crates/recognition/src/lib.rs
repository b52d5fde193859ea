//! Handwriting recognition seam.
//!
//! The recognizer is an opaque asynchronous service: it receives an
//! [`InkPayload`](finder_ink::InkPayload) and eventually yields ranked text
//! candidates, or fails. Callers treat every failure as "no update".
//!
//! Adapters:
//! - [`HttpRecognizer`] talks to a recognition endpoint over JSON
//! - [`NullRecognizer`] always fails; used when nothing is configured

mod client;
mod error;
mod http;

pub use client::{
    Candidate, NullRecognizer, Recognition, RecognitionClient, RecognitionClientRef,
};
pub use error::{RecognitionError, Result};
pub use http::{HttpRecognizer, HttpRecognizerConfig, DEFAULT_LANGUAGE_TAG};
