use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lextrek::config::{self, Config, ConfigFile};
use lextrek::logging::{self, LogTarget};
use lextrek::{
    AnswerResult, CsvQueryLog, LexTrekClientBuilder, Query, QueryError, QueryPipeline,
    QueryPipelineBuilder,
};

/// lextrek - ask the LexTrek Swiss legal assistant from the terminal
#[derive(Parser)]
#[command(name = "lextrek")]
#[command(about = "Ask Swiss legal questions and see the cited case law and statutes")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: {config_dir}/lextrek/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// URL the question is posted to
    #[arg(long, global = true, value_name = "URL")]
    endpoint_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    timeout_seconds: Option<u64>,

    /// File that answered questions are appended to
    #[arg(long, global = true, value_name = "PATH")]
    log_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui,
    /// Ask a single question and print the answer
    Ask(AskCommand),
}

/// Ask a single question
#[derive(Parser)]
struct AskCommand {
    /// The legal question
    #[arg(value_name = "QUESTION")]
    question: String,
}

impl Cli {
    /// CLI flags as the highest-precedence configuration layer.
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            endpoint_url: self.endpoint_url.clone(),
            timeout_seconds: self.timeout_seconds,
            log_path: self.log_path.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs a failure reaching the service).
fn is_user_error(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<QueryError>(),
        Some(QueryError::EmptyInput)
    )
}

fn run(cli: Cli) -> Result<()> {
    let overrides = cli.overrides();
    let command = cli.command.unwrap_or(Commands::Tui);

    // Blank questions are rejected before any configuration is read
    let query = match &command {
        Commands::Ask(cmd) => Some(Query::new(cmd.question.as_str())?),
        Commands::Tui => None,
    };

    match &command {
        Commands::Tui => logging::init_logging(&LogTarget::File(logging::default_log_file()?), "warn")?,
        Commands::Ask(_) => logging::init_logging(&LogTarget::Stderr, "info")?,
    }

    let config = config::load(cli.config.as_deref(), overrides)
        .context("Failed to load configuration")?;
    let config = config::install(config)?;
    tracing::debug!(
        endpoint = config.endpoint_url(),
        timeout_seconds = config.timeout_seconds(),
        log_path = %config.log_path().display(),
        "configuration loaded"
    );

    let pipeline = build_pipeline(config)?;
    match query {
        Some(query) => handle_ask(&query, &pipeline),
        None => lextrek::tui::run(&pipeline),
    }
}

/// Wires the HTTP client and CSV log into a pipeline.
fn build_pipeline(config: &Config) -> Result<QueryPipeline> {
    let client = LexTrekClientBuilder::from_config(config)
        .build()
        .context("Failed to create LexTrek client")?;

    Ok(QueryPipelineBuilder::new()
        .client(Arc::new(client))
        .log(Arc::new(CsvQueryLog::new(config.log_path())))
        .build())
}

/// Handles the ask command: runs the pipeline once and prints the result.
fn handle_ask(query: &Query, pipeline: &QueryPipeline) -> Result<()> {
    let result = pipeline
        .run(query)
        .context("Failed to reach LexTrek API")?;

    print!("{}", format_result(&result));
    Ok(())
}

/// Formats a result for plain-text output.
fn format_result(result: &AnswerResult) -> String {
    let mut out = String::new();
    out.push_str(result.cleaned_answer());
    out.push('\n');

    if result.has_citations() {
        out.push_str(&format!(
            "\nCitations Found: {}\n",
            result.citations().join(", ")
        ));
    }

    out.push_str(&format!(
        "\nResponse Time: {} seconds\n",
        result.elapsed_seconds()
    ));
    out
}
