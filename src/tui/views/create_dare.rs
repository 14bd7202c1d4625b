//! Create dare view — form for submitting a new dare for moderation.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui_textarea::TextArea;
use tokio::sync::mpsc;

use super::{field_text, focus_field, text_field, type_into};
use crate::core::backend::{Dare, DareCategory, Difficulty, TimeLimit};
use crate::core::dares::{create_dare, DareDraft, DareError};
use crate::core::session::Route;
use crate::tui::events::{Action, AppEvent, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Category,
    Difficulty,
    TimeLimit,
    Requirements,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::Title,
        Field::Description,
        Field::Category,
        Field::Difficulty,
        Field::TimeLimit,
        Field::Requirements,
    ];

    fn is_selector(self) -> bool {
        matches!(self, Field::Category | Field::Difficulty | Field::TimeLimit)
    }
}

/// Step through `options` from `current`, wrapping.
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let i = options.iter().position(|o| *o == current).unwrap_or(0);
    let n = options.len();
    let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
    options[next]
}

pub struct CreateDareState {
    title: TextArea<'static>,
    description: TextArea<'static>,
    requirements: TextArea<'static>,
    category: DareCategory,
    difficulty: Difficulty,
    time_limit: TimeLimit,
    focus: Field,
    submitting: bool,
    error: Option<String>,
    result_rx: mpsc::UnboundedReceiver<Result<Dare, DareError>>,
    result_tx: mpsc::UnboundedSender<Result<Dare, DareError>>,
}

impl CreateDareState {
    pub fn new() -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let defaults = DareDraft::default();
        let mut state = Self {
            title: text_field("Title *"),
            description: text_field("Description *"),
            requirements: text_field("Requirements"),
            category: defaults.category,
            difficulty: defaults.difficulty,
            time_limit: defaults.time_limit,
            focus: Field::Title,
            submitting: false,
            error: None,
            result_rx,
            result_tx,
        };
        state.title.set_placeholder_text("Give your dare a catchy title");
        state.description.set_placeholder_text("Explain what needs to be done");
        state.requirements.set_placeholder_text("Any special requirements or rules");
        state.update_focus_styles();
        state
    }

    fn draft(&self) -> DareDraft {
        DareDraft {
            title: field_text(&self.title),
            description: field_text(&self.description),
            category: self.category,
            difficulty: self.difficulty,
            time_limit: self.time_limit,
            requirements: field_text(&self.requirements),
        }
    }

    fn update_focus_styles(&mut self) {
        let focus = self.focus;
        focus_field(&mut self.title, focus == Field::Title);
        focus_field(&mut self.description, focus == Field::Description);
        focus_field(&mut self.requirements, focus == Field::Requirements);
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focus = cycle(&Field::ORDER, self.focus, forward);
        self.update_focus_styles();
    }

    fn cycle_selector(&mut self, forward: bool) {
        match self.focus {
            Field::Category => self.category = cycle(&DareCategory::ALL, self.category, forward),
            Field::Difficulty => self.difficulty = cycle(&Difficulty::ALL, self.difficulty, forward),
            Field::TimeLimit => self.time_limit = cycle(&TimeLimit::ALL, self.time_limit, forward),
            _ => {}
        }
    }

    /// Poll for the background submission. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        if let Ok(result) = self.result_rx.try_recv() {
            self.submitting = false;
            match result {
                Ok(dare) => {
                    services.notify(
                        format!("\"{}\" submitted for review", dare.title),
                        NotificationLevel::Success,
                    );
                    *self = Self::new();
                    let _ = services
                        .event_tx
                        .send(AppEvent::Action(Action::Navigate(Route::MyDares)));
                }
                Err(e) => {
                    log::warn!("Failed to create dare: {e}");
                    self.error = Some(e.to_string());
                }
            }
        }
    }

    fn submit(&mut self, services: &Services) {
        if self.submitting {
            return;
        }
        let draft = self.draft();
        if !draft.is_valid() {
            self.error = Some(DareError::MissingFields.to_string());
            return;
        }
        let Some(user) = services.session().user else {
            self.error = Some("You must be signed in to create a dare".into());
            return;
        };

        self.submitting = true;
        self.error = None;
        let data = services.data.clone();
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = create_dare(data.as_ref(), &user, &draft).await;
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
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.submit(services),
            (_, KeyCode::Tab | KeyCode::Down) => self.cycle_focus(true),
            (_, KeyCode::BackTab | KeyCode::Up) => self.cycle_focus(false),
            (_, KeyCode::Enter) => {
                if self.focus == Field::Requirements {
                    self.submit(services);
                } else {
                    self.cycle_focus(true);
                }
            }
            (_, KeyCode::Left | KeyCode::Char('h')) if self.focus.is_selector() => self.cycle_selector(false),
            (_, KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ')) if self.focus.is_selector() => {
                self.cycle_selector(true)
            }
            (KeyModifiers::NONE, KeyCode::Esc) => return false,
            _ => {
                let field = match self.focus {
                    Field::Title => &mut self.title,
                    Field::Description => &mut self.description,
                    Field::Requirements => &mut self.requirements,
                    _ => return false,
                };
                return type_into(field, event);
            }
        }
        true
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Create a Dare");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Challenge the community! New dares are reviewed before they go live.",
                theme::muted(),
            )),
            rows[0],
        );
        frame.render_widget(&self.title, rows[1]);
        frame.render_widget(&self.description, rows[2]);

        self.render_selector(
            frame,
            rows[3],
            "Category",
            Field::Category,
            DareCategory::ALL
                .iter()
                .map(|c| (c.label().to_string(), *c == self.category, theme::category_color(*c)))
                .collect(),
        );
        self.render_selector(
            frame,
            rows[4],
            "Difficulty",
            Field::Difficulty,
            Difficulty::ALL
                .iter()
                .map(|d| {
                    (
                        format!("{} ({}c)", d.label(), d.coins()),
                        *d == self.difficulty,
                        theme::difficulty_color(*d),
                    )
                })
                .collect(),
        );
        self.render_selector(
            frame,
            rows[5],
            "Time Limit",
            Field::TimeLimit,
            TimeLimit::ALL
                .iter()
                .map(|t| (t.label().to_string(), *t == self.time_limit, theme::ACCENT))
                .collect(),
        );
        frame.render_widget(&self.requirements, rows[6]);

        let status = if self.submitting {
            Line::from(Span::styled("Creating dare...", theme::muted()))
        } else if let Some(ref e) = self.error {
            Line::from(Span::styled(e.clone(), Style::default().fg(theme::ERROR)))
        } else {
            Line::from(vec![
                Span::styled("Reward: ", theme::muted()),
                Span::styled(
                    format!("{} coins", self.difficulty.coins()),
                    Style::default().fg(theme::COIN).add_modifier(Modifier::BOLD),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(status), rows[7]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Ctrl+S", theme::key_hint()),
                Span::raw(":create "),
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":field "),
                Span::styled("←/→", theme::key_hint()),
                Span::raw(":choose"),
            ])),
            rows[8],
        );
    }

    fn render_selector(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        field: Field,
        options: Vec<(String, bool, ratatui::style::Color)>,
    ) {
        let focused = self.focus == field;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(theme::field_border(focused));

        let mut spans = Vec::with_capacity(options.len() * 2);
        for (label, selected, color) in options {
            let style = if selected {
                Style::default().fg(theme::BG_BASE).bg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle(&TimeLimit::ALL, TimeLimit::Week, true), TimeLimit::Hours24);
        assert_eq!(cycle(&TimeLimit::ALL, TimeLimit::Hours24, false), TimeLimit::Week);
    }

    #[test]
    fn test_selectors_change_draft() {
        let mut state = CreateDareState::new();
        state.focus = Field::Difficulty;
        state.cycle_selector(true);
        assert_eq!(state.draft().difficulty, Difficulty::ALL[1]);
        assert_eq!(state.draft().coins(), Difficulty::ALL[1].coins());

        // Text fields ignore selector keys.
        state.focus = Field::Title;
        state.cycle_selector(true);
        assert_eq!(state.draft().difficulty, Difficulty::ALL[1]);
    }

    #[test]
    fn test_draft_requires_title_and_description() {
        let mut state = CreateDareState::new();
        assert!(!state.draft().is_valid());
        state.title.insert_str("Sing in the library");
        assert!(!state.draft().is_valid());
        state.description.insert_str("Quietly, one verse");
        assert!(state.draft().is_valid());
    }

    #[test]
    fn test_focus_order_covers_all_fields() {
        let mut state = CreateDareState::new();
        for expected in Field::ORDER.iter().skip(1) {
            state.cycle_focus(true);
            assert_eq!(state.focus, *expected);
        }
        state.cycle_focus(true);
        assert_eq!(state.focus, Field::Title);
    }
}
