//! Question answering pipeline.
//!
//! This module provides `QueryPipeline`, which forwards a validated question to
//! the LexTrek endpoint, post-processes the answer text and records the
//! exchange in the query log.

mod query_pipeline;
pub mod text;
mod types;

pub use query_pipeline::{QueryPipeline, QueryPipelineBuilder};
pub use types::{AnswerResult, NO_ANSWER_PLACEHOLDER, Query, QueryError};
