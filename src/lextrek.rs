/// LexTrek HTTP client module.
///
/// This module provides a blocking HTTP client for the LexTrek question-answering
/// endpoint, including its error type and timeout configuration.
mod client;

pub use client::{
    LexTrekClient, LexTrekClientBuilder, LexTrekClientTrait, LexTrekError, QueryResponse,
};
