//! UI rendering functions for the TUI.
//!
//! Lays out the header, question input, result panel and shortcut bar using
//! ratatui widgets.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{App, Focus, Status};
use crate::pipeline::AnswerResult;

const TITLE: &str = "LexTrek - Swiss Legal Assistant";
const TAGLINE: &str = "Ask a legal question, and LexTrek will respond with a structured summary based on case law and statutes.";
const WAITING_MESSAGE: &str = "Consulting LexTrek, please wait...";

/// Main rendering function for the TUI.
///
/// # Arguments
///
/// * `frame` - The ratatui Frame to render into
/// * `app` - The application state
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(7), // Question input
            Constraint::Min(0),    // Result panel
            Constraint::Length(1), // Shortcut bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_question_input(frame, app, chunks[1]);
    render_result(frame, app, chunks[2]);
    render_shortcut_bar(frame, app, chunks[3]);
}

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::DarkGray))),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::BOTTOM))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Renders the multi-line question input with a cursor indicator when focused.
fn render_question_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Question);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Your Legal Question")
        .border_style(border_style(is_focused));

    let mut content = app.question().to_string();
    if is_focused {
        content.push('█');
    }

    // Keep the end of long questions in view
    let inner_height = area.height.saturating_sub(2);
    let line_count = u16::try_from(content.lines().count()).unwrap_or(u16::MAX);
    let scroll = line_count.saturating_sub(inner_height);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Renders the result panel for the current status.
fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Answer);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Answer")
        .border_style(border_style(is_focused));

    let paragraph = Paragraph::new(status_text(app.status()))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Builds the result panel text for a status.
pub(crate) fn status_text(status: &Status) -> Text<'static> {
    match status {
        Status::Idle => Text::from(Span::styled(
            "Type a question and press Enter.",
            Style::default().fg(Color::DarkGray),
        )),
        Status::Warning(message) => Text::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        Status::Waiting => Text::from(Span::styled(
            WAITING_MESSAGE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        )),
        Status::Failed(message) => Text::from(vec![
            Line::from(Span::styled(
                "Failed to reach LexTrek API:",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
        ]),
        Status::Answered(result) => answer_text(result),
    }
}

/// Formats an answer with its citations and response time.
fn answer_text(result: &AnswerResult) -> Text<'static> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut text = Text::default();

    for line in result.cleaned_answer().lines() {
        text.lines.push(Line::from(line.to_string()));
    }

    if result.has_citations() {
        text.lines.push(Line::from(""));
        text.lines.push(Line::from(Span::styled("Citations Found:", heading)));

        let mut spans = Vec::new();
        for (i, citation) in result.citations().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(", "));
            }
            spans.push(Span::styled(
                citation.clone(),
                Style::default().fg(Color::Cyan),
            ));
        }
        text.lines.push(Line::from(spans));
    }

    text.lines.push(Line::from(""));
    text.lines.push(Line::from(vec![
        Span::styled("Response Time:", heading),
        Span::raw(format!(" {} seconds", result.elapsed_seconds())),
    ]));

    text
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Shows context-aware keyboard shortcuts based on current focus state.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Esc", key_style),
        Span::raw(": quit"),
        Span::styled(" | ", sep_style),
        Span::styled("Tab", key_style),
        Span::raw(": switch panel"),
    ];

    match app.focus() {
        Focus::Question => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": ask"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Alt+Enter", key_style));
            spans.push(Span::raw(": new line"));
        }
        Focus::Answer => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": scroll"));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
