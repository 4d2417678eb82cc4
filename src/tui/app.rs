use crate::pipeline::{AnswerResult, Query, QueryError};

/// Application state for the TUI.
///
/// Holds the question being edited, panel focus, and the outcome of the most
/// recent submission.
#[derive(Debug, Clone)]
pub struct App {
    /// Question input buffer (may span several lines)
    question: String,
    /// Currently focused panel
    focus: Focus,
    /// What the result panel shows
    status: Status,
    /// Query accepted by `submit` and waiting for the event loop to run it
    pending: Option<Query>,
    /// Scroll offset for the answer panel
    answer_scroll: u16,
}

/// Panel focus state for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Question input is focused (typing edits the question)
    Question,
    /// Answer panel is focused (j/k scrolling)
    Answer,
}

/// Outcome shown in the result panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// Nothing submitted yet
    Idle,
    /// Submitted question was blank
    Warning(String),
    /// Request is in flight
    Waiting,
    /// Last request succeeded
    Answered(AnswerResult),
    /// Last request failed
    Failed(String),
}

impl App {
    /// Creates a new App with an empty question and focus on the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use lextrek::tui::{App, Focus};
    ///
    /// let app = App::new();
    /// assert_eq!(app.question(), "");
    /// assert_eq!(app.focus(), Focus::Question);
    /// ```
    pub fn new() -> Self {
        Self {
            question: String::new(),
            focus: Focus::Question,
            status: Status::Idle,
            pending: None,
            answer_scroll: 0,
        }
    }

    /// Returns the question input buffer.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the current focus state.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns what the result panel currently shows.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Returns true while a submitted question awaits its answer.
    pub fn is_waiting(&self) -> bool {
        matches!(self.status, Status::Waiting)
    }

    /// Appends a character to the question.
    pub fn push_char(&mut self, c: char) {
        self.question.push(c);
    }

    /// Starts a new line in the question.
    pub fn push_newline(&mut self) {
        self.question.push('\n');
    }

    /// Removes the last character of the question.
    pub fn pop_char(&mut self) {
        self.question.pop();
    }

    /// Submits the current question.
    ///
    /// A blank question sets a warning and queues nothing. Otherwise the query
    /// is queued for [`App::take_pending`] and the status switches to waiting.
    /// Ignored while a request is already in flight.
    ///
    /// # Examples
    ///
    /// ```
    /// use lextrek::tui::{App, Status};
    ///
    /// let mut app = App::new();
    /// app.submit();
    /// assert!(matches!(app.status(), Status::Warning(_)));
    /// assert!(app.take_pending().is_none());
    ///
    /// app.push_char('?');
    /// app.submit();
    /// assert!(app.is_waiting());
    /// assert!(app.take_pending().is_some());
    /// ```
    pub fn submit(&mut self) {
        if self.is_waiting() {
            return;
        }

        match Query::new(self.question.clone()) {
            Ok(query) => {
                self.pending = Some(query);
                self.status = Status::Waiting;
            }
            Err(e) => {
                self.pending = None;
                self.status = Status::Warning(e.to_string());
            }
        }
        self.answer_scroll = 0;
    }

    /// Takes the queued query, if any.
    pub fn take_pending(&mut self) -> Option<Query> {
        self.pending.take()
    }

    /// Records the outcome of a pipeline run.
    pub fn set_outcome(&mut self, outcome: Result<AnswerResult, QueryError>) {
        self.status = match outcome {
            Ok(result) => Status::Answered(result),
            Err(QueryError::EmptyInput) => Status::Warning(QueryError::EmptyInput.to_string()),
            Err(QueryError::Unreachable(message)) => Status::Failed(message),
        };
        self.answer_scroll = 0;
    }

    /// Toggles focus between the question input and the answer panel.
    ///
    /// # Examples
    ///
    /// ```
    /// use lextrek::tui::{App, Focus};
    ///
    /// let mut app = App::new();
    /// app.toggle_focus();
    /// assert_eq!(app.focus(), Focus::Answer);
    /// app.toggle_focus();
    /// assert_eq!(app.focus(), Focus::Question);
    /// ```
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Question => Focus::Answer,
            Focus::Answer => Focus::Question,
        };
    }

    /// Returns the current answer scroll offset.
    pub fn answer_scroll(&self) -> u16 {
        self.answer_scroll
    }

    /// Scrolls the answer panel down by the specified amount.
    pub fn scroll_answer_down(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(amount);
    }

    /// Scrolls the answer panel up by the specified amount.
    pub fn scroll_answer_up(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(amount);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
