//! Terminal User Interface module for lextrek.
//!
//! Provides the question form and result panel using ratatui for rendering
//! and crossterm for terminal management.

use std::io;
use std::panic;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

mod app;
pub mod event;
mod ui;

pub use app::{App, Focus, Status};

use crate::pipeline::QueryPipeline;

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Must run before exiting the TUI, including on error paths.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for the panic hook. Errors are ignored.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Installs a panic hook that restores the terminal before the original hook runs.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Runs a queued question, if any, and stores the outcome in the app.
///
/// Blocks until the pipeline returns. Returns `true` if a question was run.
pub fn process_pending(app: &mut App, pipeline: &QueryPipeline) -> bool {
    let Some(query) = app.take_pending() else {
        return false;
    };

    let outcome = pipeline.run(&query);
    if let Err(e) = &outcome {
        tracing::info!(error = %e, "query failed");
    }
    app.set_outcome(outcome);
    true
}

/// Runs the main event loop for the TUI.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, pipeline: &QueryPipeline) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, pipeline, &mut terminal);

    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Internal event loop implementation.
///
/// A submitted question is drawn in its waiting state before the blocking
/// request is made, so the user sees the wait message.
fn run_event_loop_internal(
    app: &mut App,
    pipeline: &QueryPipeline,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if process_pending(app, pipeline) {
            continue;
        }

        if crossterm_event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = crossterm_event::read()?
        {
            let should_quit = event::handle_key_event(app, key);
            if should_quit {
                break;
            }
        }
    }

    Ok(())
}

/// Entry point for the TUI application.
///
/// # Errors
///
/// Returns an error if terminal initialization or the event loop fails.
pub fn run(pipeline: &QueryPipeline) -> Result<()> {
    init_panic_hook();

    let mut app = App::new();
    run_event_loop(&mut app, pipeline).context("TUI event loop failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::lextrek::{LexTrekClientTrait, LexTrekError, QueryResponse};
    use crate::query_log::{LogEntry, QueryLog};

    #[derive(Default)]
    struct CountingClient {
        calls: Mutex<usize>,
    }

    impl LexTrekClientTrait for CountingClient {
        fn query(&self, _question: &str) -> Result<QueryResponse, LexTrekError> {
            *self.calls.lock().unwrap() += 1;
            Ok(QueryResponse {
                answer: Some("1. See Art. 8 BV.".to_string()),
            })
        }
    }

    struct DownClient;

    impl LexTrekClientTrait for DownClient {
        fn query(&self, _question: &str) -> Result<QueryResponse, LexTrekError> {
            Err(LexTrekError::Http { status: 502 })
        }
    }

    struct NullLog;

    impl QueryLog for NullLog {
        fn append(&self, _entry: &LogEntry) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn process_pending_without_submission_does_nothing() {
        let client = Arc::new(CountingClient::default());
        let pipeline = QueryPipeline::new(client.clone(), Arc::new(NullLog));
        let mut app = App::new();

        assert!(!process_pending(&mut app, &pipeline));
        assert_eq!(*client.calls.lock().unwrap(), 0);
    }

    #[test]
    fn blank_submission_makes_no_network_call() {
        let client = Arc::new(CountingClient::default());
        let pipeline = QueryPipeline::new(client.clone(), Arc::new(NullLog));
        let mut app = App::new();
        app.push_char(' ');
        app.submit();

        assert!(!process_pending(&mut app, &pipeline));
        assert_eq!(*client.calls.lock().unwrap(), 0);
        assert!(matches!(app.status(), Status::Warning(_)));
    }

    #[test]
    fn submission_runs_pipeline_once() {
        let client = Arc::new(CountingClient::default());
        let pipeline = QueryPipeline::new(client.clone(), Arc::new(NullLog));
        let mut app = App::new();
        for c in "Privacy?".chars() {
            app.push_char(c);
        }
        app.submit();

        assert!(process_pending(&mut app, &pipeline));
        assert!(!process_pending(&mut app, &pipeline));
        assert_eq!(*client.calls.lock().unwrap(), 1);

        match app.status() {
            Status::Answered(result) => {
                assert_eq!(result.cleaned_answer(), "See Art. 8 BV.");
                assert_eq!(result.citations(), ["Art. 8 BV"]);
            }
            other => panic!("expected answer, got {:?}", other),
        }
    }

    #[test]
    fn failed_submission_is_shown_and_form_stays_usable() {
        let pipeline = QueryPipeline::new(Arc::new(DownClient), Arc::new(NullLog));
        let mut app = App::new();
        app.push_char('?');
        app.submit();
        process_pending(&mut app, &pipeline);

        assert_eq!(
            app.status(),
            &Status::Failed("HTTP error: status 502".to_string())
        );

        app.submit();
        assert!(app.is_waiting());
    }
}
