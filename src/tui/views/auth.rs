//! Sign in / sign up view.
//!
//! Email + password, plus a display name when registering. Submission runs
//! against the identity service in the background; the auth store picks up
//! the new session and the app routes on from there.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use ratatui_textarea::TextArea;
use tokio::sync::mpsc;

use super::{field_text, focus_field, text_field, type_into};
use crate::core::backend::{AuthError, AuthUser};
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;
use crate::tui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Password,
}

pub struct AuthState {
    mode: AuthMode,
    name: TextArea<'static>,
    email: TextArea<'static>,
    password: TextArea<'static>,
    focus: Field,
    show_password: bool,
    submitting: bool,
    error: Option<String>,
    result_rx: mpsc::UnboundedReceiver<Result<AuthUser, AuthError>>,
    result_tx: mpsc::UnboundedSender<Result<AuthUser, AuthError>>,
}

impl AuthState {
    pub fn new() -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let mut state = Self {
            mode: AuthMode::SignIn,
            name: text_field("Name"),
            email: text_field("Email"),
            password: text_field("Password"),
            focus: Field::Email,
            show_password: false,
            submitting: false,
            error: None,
            result_rx,
            result_tx,
        };
        state.name.set_placeholder_text("Enter your name");
        state.email.set_placeholder_text("you@college.edu");
        state.apply_mask();
        state.update_focus_styles();
        state
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Forget typed credentials, e.g. after signing out.
    pub fn reset(&mut self) {
        let mode = self.mode;
        *self = Self::new();
        self.mode = mode;
    }

    fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthMode::SignIn => &[Field::Email, Field::Password],
            AuthMode::SignUp => &[Field::Name, Field::Email, Field::Password],
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut TextArea<'static> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (i + 1) % fields.len()
        } else {
            (i + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
        self.update_focus_styles();
    }

    fn update_focus_styles(&mut self) {
        let focus = self.focus;
        focus_field(&mut self.name, focus == Field::Name);
        focus_field(&mut self.email, focus == Field::Email);
        focus_field(&mut self.password, focus == Field::Password);
    }

    fn apply_mask(&mut self) {
        if self.show_password {
            self.password.clear_mask_char();
        } else {
            self.password.set_mask_char('•');
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
        if !self.fields().contains(&self.focus) {
            self.focus = Field::Email;
        }
        self.update_focus_styles();
    }

    /// Poll for the background submission. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        if let Ok(result) = self.result_rx.try_recv() {
            self.submitting = false;
            match result {
                Ok(user) => {
                    self.error = None;
                    self.password = text_field("Password");
                    self.apply_mask();
                    self.update_focus_styles();
                    let who = user.display_name.as_deref().unwrap_or(&user.email);
                    services.notify(format!("Welcome, {who}!"), NotificationLevel::Success);
                }
                Err(e) => {
                    log::info!("Authentication failed: {e}");
                    self.error = Some(e.to_string());
                }
            }
        }
    }

    fn submit(&mut self, services: &Services) {
        if self.submitting {
            return;
        }
        let email = field_text(&self.email).trim().to_string();
        let password = field_text(&self.password);
        let name = field_text(&self.name).trim().to_string();

        if email.is_empty() || password.is_empty() {
            self.error = Some("Email and password are required".into());
            return;
        }
        if self.mode == AuthMode::SignUp && name.is_empty() {
            self.error = Some("Please enter your name".into());
            return;
        }

        self.submitting = true;
        self.error = None;

        let identity = services.identity.clone();
        let tx = self.result_tx.clone();
        let mode = self.mode;
        tokio::spawn(async move {
            let result = match mode {
                AuthMode::SignIn => identity.sign_in(&email, &password).await,
                AuthMode::SignUp => identity.sign_up(&email, &password, &name).await,
            };
            let _ = tx.send(result);
        });
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (_, KeyCode::Tab) | (_, KeyCode::Down) => {
                self.cycle_focus(true);
                true
            }
            (_, KeyCode::BackTab) | (_, KeyCode::Up) => {
                self.cycle_focus(false);
                true
            }
            (KeyModifiers::NONE, KeyCode::F(2)) | (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                self.toggle_mode();
                true
            }
            (KeyModifiers::NONE, KeyCode::F(3)) => {
                self.show_password = !self.show_password;
                self.apply_mask();
                true
            }
            (_, KeyCode::Enter) => {
                if self.focus == *self.fields().last().unwrap_or(&Field::Password) {
                    self.submit(services);
                } else {
                    self.cycle_focus(true);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => false,
            _ => {
                let focus = self.focus;
                type_into(self.field_mut(focus), event)
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 54.min(area.width);
        let fields = self.fields().len() as u16;
        let height = (fields * 3 + 9).min(area.height);
        let card = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let title = match self.mode {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        };
        let block = theme::block_focused(title).title_alignment(Alignment::Center);
        let inner = block.inner(card);
        frame.render_widget(Clear, card);
        frame.render_widget(block, card);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(std::iter::repeat(Constraint::Length(3)).take(self.fields().len()));
        constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)]);
        let rows = Layout::vertical(constraints).split(inner);

        let tagline = match self.mode {
            AuthMode::SignIn => "Welcome back! Ready for more challenges?",
            AuthMode::SignUp => "Join the dare community today",
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(tagline, theme::muted())))
                .alignment(Alignment::Center),
            rows[0],
        );

        for (i, field) in self.fields().iter().enumerate() {
            let widget = match field {
                Field::Name => &self.name,
                Field::Email => &self.email,
                Field::Password => &self.password,
            };
            frame.render_widget(widget, rows[i + 1]);
        }

        let n = self.fields().len();
        let status = if self.submitting {
            Line::from(Span::styled("Please wait...", theme::muted()))
        } else if let Some(ref error) = self.error {
            Line::from(Span::styled(error.clone(), Style::default().fg(theme::ERROR)))
        } else {
            Line::raw("")
        };
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), rows[n + 1]);

        let switch = match self.mode {
            AuthMode::SignIn => "F2:create an account",
            AuthMode::SignUp => "F2:sign in instead",
        };
        let hints = Line::from(vec![
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":submit "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":field "),
            Span::styled("F3", theme::key_hint()),
            Span::raw(if self.show_password { ":hide " } else { ":show " }),
            Span::styled(switch, theme::key_hint()),
        ]);
        frame.render_widget(
            Paragraph::new(hints)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE)),
            rows[n + 2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle_keeps_valid_focus() {
        let mut state = AuthState::new();
        state.toggle_mode();
        assert_eq!(state.mode(), AuthMode::SignUp);
        state.focus = Field::Name;
        state.toggle_mode();
        assert_eq!(state.mode(), AuthMode::SignIn);
        assert_eq!(state.focus, Field::Email);
    }

    #[test]
    fn test_focus_cycles_through_mode_fields() {
        let mut state = AuthState::new();
        assert_eq!(state.focus, Field::Email);
        state.cycle_focus(true);
        assert_eq!(state.focus, Field::Password);
        state.cycle_focus(true);
        assert_eq!(state.focus, Field::Email);

        state.toggle_mode();
        state.cycle_focus(false);
        assert_eq!(state.focus, Field::Name);
    }
}
