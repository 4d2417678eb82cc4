//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes.
//! Key behavior depends on which panel has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Focus};

/// Handles a keyboard event and updates the app state accordingly.
///
/// Returns `true` if the application should quit, `false` otherwise.
///
/// # Event Handling
///
/// - `Esc` / `Ctrl+C`: Quit application (from any focus state)
/// - `Tab` / `Shift+Tab`: Toggle focus between question and answer
/// - When `Question` focused: characters edit the question, `Enter` submits,
///   `Alt+Enter` inserts a newline
/// - When `Answer` focused: j/k scroll, `q` quits
///
/// # Examples
///
/// ```
/// use lextrek::tui::{App, event::handle_key_event};
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let mut app = App::new();
/// let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
/// let should_quit = handle_key_event(&mut app, key);
/// assert!(should_quit);
/// ```
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL)
    {
        return true;
    }

    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.toggle_focus();
        return false;
    }

    match app.focus() {
        Focus::Question => {
            handle_question_input(app, key);
            false
        }
        Focus::Answer => handle_answer_view(app, key),
    }
}

/// Handles keyboard input when the question input is focused.
fn handle_question_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.push_newline();
        }
        KeyCode::Enter => {
            app.submit();
        }
        // AltGr arrives as Ctrl+Alt on Windows
        KeyCode::Char(c)
            if key.modifiers.is_empty()
                || key.modifiers == KeyModifiers::SHIFT
                || key.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.push_char(c);
        }
        KeyCode::Backspace => {
            app.pop_char();
        }
        _ => {}
    }
}

/// Handles keyboard input when the answer panel is focused.
///
/// Returns `true` on `q`.
fn handle_answer_view(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => return true,
        KeyCode::Char('j') | KeyCode::Down if key.modifiers.is_empty() => {
            app.scroll_answer_down(1);
        }
        KeyCode::Char('k') | KeyCode::Up if key.modifiers.is_empty() => {
            app.scroll_answer_up(1);
        }
        KeyCode::PageDown => app.scroll_answer_down(10),
        KeyCode::PageUp => app.scroll_answer_up(10),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Status;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert!(!press(app, KeyCode::Char(c)));
        }
    }

    #[test]
    fn esc_quits_from_any_focus() {
        let mut app = App::new();
        assert!(press(&mut app, KeyCode::Esc));

        app.toggle_focus();
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut app, key));
    }

    #[test]
    fn q_is_typed_into_question() {
        let mut app = App::new();
        type_text(&mut app, "quorum");
        assert_eq!(app.question(), "quorum");
    }

    #[test]
    fn q_quits_from_answer_panel() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Answer);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn tab_and_backtab_toggle_focus() {
        let mut app = App::new();
        assert!(!press(&mut app, KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Answer);

        let key = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert!(!handle_key_event(&mut app, key));
        assert_eq!(app.focus(), Focus::Question);
    }

    #[test]
    fn shift_characters_are_typed() {
        let mut app = App::new();
        let key = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
        handle_key_event(&mut app, key);
        assert_eq!(app.question(), "B");
    }

    #[test]
    fn altgr_characters_are_typed() {
        let mut app = App::new();
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        for c in ['@', '[', 'c'] {
            assert!(!handle_key_event(&mut app, KeyEvent::new(KeyCode::Char(c), altgr)));
        }
        assert_eq!(app.question(), "@[c");
    }

    #[test]
    fn ctrl_characters_are_not_typed() {
        let mut app = App::new();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(app.question(), "");
    }

    #[test]
    fn backspace_deletes_last_character() {
        let mut app = App::new();
        type_text(&mut app, "Art");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.question(), "Ar");
    }

    #[test]
    fn alt_enter_inserts_newline() {
        let mut app = App::new();
        type_text(&mut app, "a");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        type_text(&mut app, "b");

        assert_eq!(app.question(), "a\nb");
        assert_eq!(app.status(), &Status::Idle);
    }

    #[test]
    fn enter_on_blank_question_warns() {
        let mut app = App::new();
        type_text(&mut app, "  ");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.status(), Status::Warning(_)));
        assert!(app.take_pending().is_none());
    }

    #[test]
    fn enter_submits_question() {
        let mut app = App::new();
        type_text(&mut app, "What is BGE 142 II 49 about?");
        press(&mut app, KeyCode::Enter);

        assert!(app.is_waiting());
        assert_eq!(
            app.take_pending().map(|q| q.question().to_string()),
            Some("What is BGE 142 II 49 about?".to_string())
        );
    }

    #[test]
    fn j_k_scroll_answer_when_focused() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.answer_scroll(), 2);

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.answer_scroll(), 1);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.answer_scroll(), 11);
    }

    #[test]
    fn answer_panel_keys_do_not_edit_question() {
        let mut app = App::new();
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.question(), "x");
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = App::new();
        let mut key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(!handle_key_event(&mut app, key));
    }
}
