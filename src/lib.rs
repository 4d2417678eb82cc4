pub mod config;
pub mod lextrek;
pub mod logging;
pub mod pipeline;
pub mod query_log;
pub mod tui;

pub use config::{Config, ConfigError};
pub use lextrek::{LexTrekClient, LexTrekClientBuilder, LexTrekClientTrait, LexTrekError};
pub use pipeline::{AnswerResult, Query, QueryError, QueryPipeline, QueryPipelineBuilder};
pub use query_log::{CsvQueryLog, LogEntry, QueryLog};
