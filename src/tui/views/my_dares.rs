//! My dares view — dares the signed-in user created, by review status.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::backend::Dare;
use crate::core::dares::{delete_my_dare, list_my_dares, DareError, MyDaresFilter};
use crate::tui::app::centered_rect;
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;
use crate::tui::theme;

enum MyDaresMsg {
    Loaded(MyDaresFilter, Result<Vec<Dare>, DareError>),
    Deleted(String, Result<(), DareError>),
}

pub struct MyDaresState {
    filter: MyDaresFilter,
    dares: Vec<Dare>,
    table_state: TableState,
    loading: bool,
    error: Option<String>,
    /// Dare awaiting delete confirmation.
    confirm_delete: Option<Dare>,
    data_rx: mpsc::UnboundedReceiver<MyDaresMsg>,
    data_tx: mpsc::UnboundedSender<MyDaresMsg>,
}

impl MyDaresState {
    pub fn new() -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            filter: MyDaresFilter::default(),
            dares: Vec::new(),
            table_state: TableState::default(),
            loading: false,
            error: None,
            confirm_delete: None,
            data_rx,
            data_tx,
        }
    }

    pub fn filter(&self) -> MyDaresFilter {
        self.filter
    }

    /// Trigger async load for the current filter.
    pub fn load(&mut self, services: &Services) {
        let Some(uid) = services.session().uid().map(str::to_string) else {
            self.dares.clear();
            self.table_state.select(None);
            return;
        };
        self.loading = true;
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        let filter = self.filter;
        tokio::spawn(async move {
            let result = list_my_dares(data.as_ref(), &uid, filter).await;
            let _ = tx.send(MyDaresMsg::Loaded(filter, result));
        });
    }

    /// Poll for async results. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        while let Ok(msg) = self.data_rx.try_recv() {
            match msg {
                // A reply for a filter the user has since left.
                MyDaresMsg::Loaded(filter, _) if filter != self.filter => {}
                MyDaresMsg::Loaded(_, Ok(dares)) => {
                    self.loading = false;
                    self.error = None;
                    self.dares = dares;
                    let selected = self.table_state.selected().unwrap_or(0);
                    self.table_state.select(if self.dares.is_empty() {
                        None
                    } else {
                        Some(selected.min(self.dares.len() - 1))
                    });
                }
                MyDaresMsg::Loaded(_, Err(e)) => {
                    self.loading = false;
                    log::warn!("Failed to load my dares: {e}");
                    self.error = Some(e.to_string());
                }
                MyDaresMsg::Deleted(id, Ok(())) => {
                    self.dares.retain(|d| d.id != id);
                    if self.dares.is_empty() {
                        self.table_state.select(None);
                    } else if let Some(i) = self.table_state.selected() {
                        self.table_state.select(Some(i.min(self.dares.len() - 1)));
                    }
                    services.notify("Dare deleted", NotificationLevel::Success);
                }
                MyDaresMsg::Deleted(_, Err(e)) => {
                    services.notify(format!("Could not delete dare: {e}"), NotificationLevel::Error);
                }
            }
        }
    }

    fn selected(&self) -> Option<&Dare> {
        self.table_state.selected().and_then(|i| self.dares.get(i))
    }

    fn set_filter(&mut self, filter: MyDaresFilter, services: &Services) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.dares.clear();
        self.table_state.select(None);
        self.load(services);
    }

    fn delete(&mut self, dare: Dare, services: &Services) {
        let Some(uid) = services.session().uid().map(str::to_string) else {
            return;
        };
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let result = delete_my_dare(data.as_ref(), &uid, &dare.id).await;
            let _ = tx.send(MyDaresMsg::Deleted(dare.id, result));
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

        if let Some(dare) = self.confirm_delete.take() {
            if matches!(code, KeyCode::Char('y') | KeyCode::Enter) {
                self.delete(dare, services);
            }
            return true;
        }

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if !self.dares.is_empty() {
                    let i = self.table_state.selected().map_or(0, |i| (i + 1).min(self.dares.len() - 1));
                    self.table_state.select(Some(i));
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                if !self.dares.is_empty() {
                    let i = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
                    self.table_state.select(Some(i));
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('f')) => self.set_filter(self.filter.next(), services),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let i = c as usize - '1' as usize;
                self.set_filter(MyDaresFilter::ALL[i], services);
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => self.load(services),
            (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Delete) => {
                self.confirm_delete = self.selected().cloned();
            }
            _ => return false,
        }
        true
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)]).split(area);

        let mut tabs = Vec::new();
        for (i, filter) in MyDaresFilter::ALL.iter().enumerate() {
            let style = if *filter == self.filter {
                theme::highlight()
            } else {
                theme::muted()
            };
            tabs.push(Span::styled(format!("{}", i + 1), theme::key_hint()));
            tabs.push(Span::styled(format!(" {} ", filter.label()), style));
            tabs.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), rows[0]);

        let block = theme::block_default("My Dares");
        if self.loading && self.dares.is_empty() {
            frame.render_widget(Paragraph::new(Span::styled("Loading...", theme::muted())).block(block), rows[1]);
        } else if let Some(ref e) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(e.clone(), Style::default().fg(theme::ERROR))).block(block),
                rows[1],
            );
        } else if self.dares.is_empty() {
            let empty = match self.filter {
                MyDaresFilter::All => "You haven't created any dares yet. Create one from the Create tab.".to_string(),
                other => format!("No {} dares.", other.label().to_lowercase()),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(empty, theme::muted()))
                    .alignment(Alignment::Center)
                    .block(block),
                rows[1],
            );
        } else {
            let header = Row::new(["Title", "Category", "Difficulty", "Coins", "Status", "Taken", "Done"])
                .style(theme::heading());
            let body: Vec<Row> = self
                .dares
                .iter()
                .map(|d| {
                    Row::new(vec![
                        Cell::from(d.title.clone()),
                        Cell::from(Span::styled(
                            d.category.label(),
                            Style::default().fg(theme::category_color(d.category)),
                        )),
                        Cell::from(Span::styled(
                            d.difficulty.label(),
                            Style::default().fg(theme::difficulty_color(d.difficulty)),
                        )),
                        Cell::from(Span::styled(d.coins.to_string(), Style::default().fg(theme::COIN))),
                        Cell::from(Span::styled(
                            d.status.label(),
                            Style::default()
                                .fg(theme::status_color(d.status))
                                .add_modifier(Modifier::BOLD),
                        )),
                        Cell::from(d.participants.to_string()),
                        Cell::from(d.completions.to_string()),
                    ])
                })
                .collect();
            let table = Table::new(
                body,
                [
                    Constraint::Min(20),
                    Constraint::Length(10),
                    Constraint::Length(11),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(6),
                    Constraint::Length(5),
                ],
            )
            .header(header)
            .block(block)
            .row_highlight_style(theme::highlight())
            .highlight_symbol("▸ ");
            let mut state = self.table_state.clone();
            frame.render_stateful_widget(table, rows[1], &mut state);
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("f/1-4", theme::key_hint()),
                Span::raw(":status "),
                Span::styled("d", theme::key_hint()),
                Span::raw(":delete "),
                Span::styled("r", theme::key_hint()),
                Span::raw(":refresh"),
            ])),
            rows[2],
        );

        if let Some(ref dare) = self.confirm_delete {
            let modal = centered_rect(50, 20, area);
            frame.render_widget(Clear, modal);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!("Delete \"{}\"?", dare.title),
                        Style::default().fg(theme::WARNING).add_modifier(Modifier::BOLD),
                    )),
                    Line::raw(""),
                    Line::from(vec![
                        Span::styled("y", theme::key_hint()),
                        Span::raw(":delete  "),
                        Span::styled("any other key", theme::key_hint()),
                        Span::raw(":cancel"),
                    ]),
                ])
                .alignment(Alignment::Center)
                .block(theme::block_focused("Confirm")),
                modal,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{DareCategory, Difficulty, ReviewStatus, TimeLimit};
    use chrono::Utc;

    fn dare(id: &str) -> Dare {
        Dare {
            id: id.into(),
            title: format!("Dare {id}"),
            description: String::new(),
            category: DareCategory::Fun,
            difficulty: Difficulty::Easy,
            coins: 50,
            time_limit: TimeLimit::Hours24,
            requirements: String::new(),
            created_by: "me".into(),
            created_by_name: "Me".into(),
            status: ReviewStatus::Pending,
            participants: 0,
            completions: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_selection_starts_empty() {
        let state = MyDaresState::new();
        assert!(state.selected().is_none());
        assert_eq!(state.filter(), MyDaresFilter::All);
    }

    #[test]
    fn test_selected_tracks_table_state() {
        let mut state = MyDaresState::new();
        state.dares = vec![dare("a"), dare("b")];
        state.table_state.select(Some(1));
        assert_eq!(state.selected().map(|d| d.id.as_str()), Some("b"));
    }
}
