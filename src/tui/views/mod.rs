pub mod auth;
pub mod create_dare;
pub mod dares;
pub mod leaderboard;
pub mod my_dares;
pub mod onboarding;
pub mod profile;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::{Block, Borders};
use ratatui_textarea::TextArea;

use super::theme;

/// Single-line bordered input.
pub(crate) fn text_field(title: &str) -> TextArea<'static> {
    let mut field = TextArea::default();
    field.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} ")),
    );
    field.set_cursor_line_style(ratatui::style::Style::default());
    field.set_style(theme::border_default());
    field
}

/// Restyle a field for focus.
pub(crate) fn focus_field(field: &mut TextArea<'static>, focused: bool) {
    field.set_style(theme::field_border(focused));
}

/// Field contents joined into one string.
pub(crate) fn field_text(field: &TextArea<'_>) -> String {
    field.lines().join("\n")
}

/// Feed a key to a single-line field. Enter and Tab are left to the caller.
pub(crate) fn type_into(field: &mut TextArea<'static>, event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab,
            ..
        }) => false,
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) => {
            field.input(event.clone());
            true
        }
        _ => false,
    }
}
