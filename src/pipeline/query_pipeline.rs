//! Request, post-process and log one question.

use std::sync::Arc;
use std::time::Instant;

use crate::lextrek::LexTrekClientTrait;
use crate::query_log::{LogEntry, QueryLog};

use super::types::{AnswerResult, NO_ANSWER_PLACEHOLDER, Query, QueryError};

/// Builder for constructing `QueryPipeline` instances.
#[derive(Default)]
pub struct QueryPipelineBuilder {
    client: Option<Arc<dyn LexTrekClientTrait>>,
    log: Option<Arc<dyn QueryLog>>,
}

impl QueryPipelineBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client used to reach the LexTrek endpoint.
    pub fn client(mut self, client: Arc<dyn LexTrekClientTrait>) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the log that successful exchanges are appended to.
    pub fn log(mut self, log: Arc<dyn QueryLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Builds the `QueryPipeline`.
    ///
    /// # Panics
    ///
    /// Panics if `client()` or `log()` was not called.
    #[must_use]
    pub fn build(self) -> QueryPipeline {
        QueryPipeline {
            client: self.client.expect("client must be set via client() method"),
            log: self.log.expect("log must be set via log() method"),
        }
    }
}

/// Sends questions to LexTrek and turns the replies into `AnswerResult`s.
///
/// Holds no per-question state; every call to [`QueryPipeline::run`] is independent.
pub struct QueryPipeline {
    client: Arc<dyn LexTrekClientTrait>,
    log: Arc<dyn QueryLog>,
}

impl QueryPipeline {
    /// Creates a new `QueryPipeline` with the given client and log.
    #[must_use]
    pub fn new(client: Arc<dyn LexTrekClientTrait>, log: Arc<dyn QueryLog>) -> Self {
        Self { client, log }
    }

    /// Answers one question.
    ///
    /// Issues exactly one request. On success the exchange is appended to the
    /// log; a failed append is reported as a warning and does not fail the run.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Unreachable` if the request fails, times out,
    /// returns a non-success status or an unreadable body. Nothing is logged
    /// in that case.
    pub fn run(&self, query: &Query) -> Result<AnswerResult, QueryError> {
        let started = Instant::now();

        let response = self.client.query(query.question()).map_err(|e| {
            tracing::warn!(error = %e, "LexTrek request failed");
            QueryError::from(e)
        })?;

        let raw_answer = response.answer.unwrap_or_else(|| {
            tracing::debug!("response had no answer field, using placeholder");
            NO_ANSWER_PLACEHOLDER.to_string()
        });

        let result = AnswerResult::from_raw(raw_answer, started.elapsed().as_secs_f64());
        tracing::info!(
            elapsed_seconds = result.elapsed_seconds(),
            citations = result.citations().len(),
            "answer received"
        );

        let entry = LogEntry::now(query.question(), result.raw_answer());
        if let Err(e) = self.log.append(&entry) {
            tracing::warn!(error = %e, "failed to append query log entry");
        }

        Ok(result)
    }
}
