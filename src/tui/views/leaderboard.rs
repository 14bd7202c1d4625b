//! Leaderboard view — ranked players for a selectable timeframe.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, TableState},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::backend::DataError;
use crate::core::leaderboard::{load_leaderboard, LeaderboardEntry, Timeframe};
use crate::tui::services::Services;
use crate::tui::theme;

type LoadResult = (Timeframe, Result<Vec<LeaderboardEntry>, DataError>);

pub struct LeaderboardState {
    timeframe: Timeframe,
    entries: Vec<LeaderboardEntry>,
    table_state: TableState,
    loading: bool,
    error: Option<String>,
    /// Highlighted row owner.
    current_uid: Option<String>,
    data_rx: mpsc::UnboundedReceiver<LoadResult>,
    data_tx: mpsc::UnboundedSender<LoadResult>,
}

impl LeaderboardState {
    pub fn new() -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            timeframe: Timeframe::default(),
            entries: Vec::new(),
            table_state: TableState::default(),
            loading: false,
            error: None,
            current_uid: None,
            data_rx,
            data_tx,
        }
    }

    /// Trigger async load for the current timeframe.
    pub fn load(&mut self, services: &Services) {
        self.current_uid = services.session().uid().map(str::to_string);
        self.loading = true;
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        let timeframe = self.timeframe;
        tokio::spawn(async move {
            let result = load_leaderboard(data.as_ref(), timeframe, chrono::Utc::now()).await;
            let _ = tx.send((timeframe, result));
        });
    }

    /// Poll for async results. Call from on_tick.
    pub fn poll(&mut self) {
        while let Ok((timeframe, result)) = self.data_rx.try_recv() {
            if timeframe != self.timeframe {
                continue;
            }
            self.loading = false;
            match result {
                Ok(entries) => {
                    self.error = None;
                    self.entries = entries;
                    self.table_state
                        .select(if self.entries.is_empty() { None } else { Some(0) });
                }
                Err(e) => {
                    log::warn!("Failed to load leaderboard: {e}");
                    self.error = Some(e.to_string());
                }
            }
        }
    }

    fn current_entry(&self) -> Option<&LeaderboardEntry> {
        let uid = self.current_uid.as_deref()?;
        self.entries.iter().find(|e| e.uid == uid)
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match code {
            KeyCode::Char('t') => {
                self.timeframe = self.timeframe.next();
                self.load(services);
            }
            KeyCode::Char('r') => self.load(services),
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.entries.is_empty() {
                    let i = self.table_state.selected().map_or(0, |i| (i + 1).min(self.entries.len() - 1));
                    self.table_state.select(Some(i));
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let i = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.table_state.select(Some(i));
            }
            _ => return false,
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let mut tabs = vec![Span::styled("t", theme::key_hint()), Span::raw(" ")];
        for timeframe in Timeframe::ALL {
            let style = if timeframe == self.timeframe {
                theme::highlight()
            } else {
                theme::muted()
            };
            tabs.push(Span::styled(format!(" {} ", timeframe.label()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), rows[0]);

        let block = theme::block_default("Leaderboard");
        if self.loading && self.entries.is_empty() {
            frame.render_widget(Paragraph::new(Span::styled("Loading...", theme::muted())).block(block), rows[1]);
        } else if let Some(ref e) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(e.clone(), Style::default().fg(theme::ERROR))).block(block),
                rows[1],
            );
        } else if self.entries.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No completed dares in this period yet. Be the first!",
                    theme::muted(),
                ))
                .alignment(Alignment::Center)
                .block(block),
                rows[1],
            );
        } else {
            let header = Row::new(["Rank", "Player", "College", "Score", "Dares"]).style(theme::heading());
            let body: Vec<Row> = self
                .entries
                .iter()
                .map(|entry| {
                    let is_me = self.current_uid.as_deref() == Some(entry.uid.as_str());
                    let row = Row::new(vec![
                        medal(entry.rank),
                        entry.name.clone(),
                        entry.college.clone(),
                        entry.score.to_string(),
                        entry.dares.to_string(),
                    ]);
                    if is_me {
                        row.style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
                    } else {
                        row
                    }
                })
                .collect();
            let table = Table::new(
                body,
                [
                    Constraint::Length(6),
                    Constraint::Min(16),
                    Constraint::Min(12),
                    Constraint::Length(7),
                    Constraint::Length(6),
                ],
            )
            .header(header)
            .block(block)
            .row_highlight_style(theme::highlight());
            let mut state = self.table_state.clone();
            frame.render_stateful_widget(table, rows[1], &mut state);
        }

        let mine = match self.current_entry() {
            Some(entry) => Line::from(vec![
                Span::styled("Your rank: ", theme::muted()),
                Span::styled(format!("#{}", entry.rank), theme::title()),
                Span::styled(format!(" · {} points", entry.score), Style::default().fg(theme::COIN)),
            ]),
            None if self.current_uid.is_some() => {
                Line::from(Span::styled("Complete a dare to get on the board.", theme::muted()))
            }
            None => Line::raw(""),
        };
        frame.render_widget(Paragraph::new(mine), rows[2]);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("t", theme::key_hint()),
                Span::raw(":timeframe "),
                Span::styled("r", theme::key_hint()),
                Span::raw(":refresh"),
            ])),
            rows[3],
        );
    }
}

/// Rank cell; the podium gets medals.
fn medal(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{n}"),
    }
}
