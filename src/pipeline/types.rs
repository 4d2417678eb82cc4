//! Types for question answering results.

use thiserror::Error;

use crate::lextrek::LexTrekError;

/// Answer text used when the service omits the `answer` field.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer returned.";

/// Failures surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The question was blank after trimming; nothing was sent
    #[error("Please enter a legal question.")]
    EmptyInput,

    /// The endpoint could not be reached, failed, or returned an unreadable body
    #[error("{0}")]
    Unreachable(String),
}

impl From<LexTrekError> for QueryError {
    fn from(error: LexTrekError) -> Self {
        Self::Unreachable(error.to_string())
    }
}

/// A question that is known to be non-blank.
///
/// The text is kept exactly as entered; trimming is only used for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    question: String,
}

impl Query {
    /// Validates and wraps a question.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::EmptyInput` if the question is empty or whitespace-only.
    ///
    /// # Examples
    ///
    /// ```
    /// use lextrek::pipeline::{Query, QueryError};
    ///
    /// assert!(Query::new("Is a verbal lease valid?").is_ok());
    /// assert_eq!(Query::new("  \n\t ").unwrap_err(), QueryError::EmptyInput);
    /// ```
    pub fn new(question: impl Into<String>) -> Result<Self, QueryError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(QueryError::EmptyInput);
        }
        Ok(Self { question })
    }

    /// Returns the question text.
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Result of one request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    /// Answer exactly as returned by the service (or the placeholder)
    raw_answer: String,
    /// Answer with line-start list numbering removed
    cleaned_answer: String,
    /// Sorted, deduplicated citation tokens found in `raw_answer`
    citations: Vec<String>,
    /// Round-trip time rounded to two decimals
    elapsed_seconds: f64,
}

impl AnswerResult {
    /// Derives a result from a raw answer and the measured round-trip time.
    pub fn from_raw(raw_answer: String, elapsed_seconds: f64) -> Self {
        let cleaned_answer = super::text::strip_numbering(&raw_answer);
        let citations = super::text::extract_citations(&raw_answer);
        Self {
            raw_answer,
            cleaned_answer,
            citations,
            elapsed_seconds: round_seconds(elapsed_seconds),
        }
    }

    pub fn raw_answer(&self) -> &str {
        &self.raw_answer
    }

    pub fn cleaned_answer(&self) -> &str {
        &self.cleaned_answer
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Returns true if at least one citation was found.
    pub fn has_citations(&self) -> bool {
        !self.citations.is_empty()
    }
}

/// Rounds to two decimal places, clamping negatives to zero.
fn round_seconds(seconds: f64) -> f64 {
    (seconds.max(0.0) * 100.0).round() / 100.0
}
