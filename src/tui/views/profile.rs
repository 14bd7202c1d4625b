//! Profile view — the signed-in user's card, stats and interests.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::backend::UserProfile;
use crate::core::session::load_profile;
use crate::tui::events::{Action, AppEvent};
use crate::tui::services::Services;
use crate::tui::theme;

pub struct ProfileState {
    profile: Option<UserProfile>,
    loading: bool,
    data_rx: mpsc::UnboundedReceiver<UserProfile>,
    data_tx: mpsc::UnboundedSender<UserProfile>,
}

impl ProfileState {
    pub fn new() -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            profile: None,
            loading: false,
            data_rx,
            data_tx,
        }
    }

    /// Drop the cached profile, e.g. after signing out.
    pub fn clear(&mut self) {
        self.profile = None;
    }

    pub fn load(&mut self, services: &Services) {
        let Some(user) = services.session().user else {
            self.profile = None;
            return;
        };
        self.loading = true;
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(load_profile(data.as_ref(), &user).await);
        });
    }

    pub fn poll(&mut self) {
        while let Ok(profile) = self.data_rx.try_recv() {
            self.loading = false;
            self.profile = Some(profile);
        }
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
            KeyCode::Char('s') => {
                let _ = services.event_tx.send(AppEvent::Action(Action::SignOut));
                true
            }
            KeyCode::Char('r') => {
                self.load(services);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(ref profile) = self.profile else {
            let text = if self.loading { "Loading profile..." } else { "No profile loaded." };
            frame.render_widget(
                Paragraph::new(Span::styled(text, theme::muted()))
                    .alignment(Alignment::Center)
                    .block(theme::block_default("Profile")),
                area,
            );
            return;
        };

        let rows = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_card(frame, rows[0], profile);
        render_stats(frame, rows[1], profile);
        render_about(frame, rows[2], profile);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("s", theme::key_hint()),
                Span::raw(":sign out "),
                Span::styled("r", theme::key_hint()),
                Span::raw(":refresh"),
            ])),
            rows[3],
        );
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, profile: &UserProfile) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", initials(&profile.name)), theme::user_badge()),
                Span::raw(" "),
                Span::styled(profile.name.clone(), theme::title()),
            ]),
            Line::from(Span::styled(profile.email.clone(), theme::muted())),
        ];
        if !profile.college.is_empty() {
            lines.push(Line::from(Span::styled(format!("🎓 {}", profile.college), theme::dim())));
        }
        let mut meta = vec![Span::styled(format!("Joined {}", profile.join_date), theme::dim())];
        if let Some(level) = profile.experience_level {
            meta.push(Span::raw(" · "));
            meta.push(Span::styled(level.label(), Style::default().fg(theme::ACCENT)));
        }
        lines.push(Line::from(meta));

        frame.render_widget(Paragraph::new(lines).block(theme::block_focused("Profile")), area);
    }
}

fn render_stats(frame: &mut Frame, area: Rect, profile: &UserProfile) {
    let stats = &profile.stats;
    let cells = [
        ("Coins", stats.coins.to_string(), theme::COIN),
        ("Dares Done", stats.dares_completed.to_string(), theme::SUCCESS),
        (
            "Rank",
            if stats.rank == 0 { "-".to_string() } else { format!("#{}", stats.rank) },
            theme::PRIMARY_LIGHT,
        ),
        ("Streak", format!("{}🔥", stats.streak), theme::ACCENT),
    ];
    let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, value, color), col) in cells.into_iter().zip(cols.iter()) {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(label, theme::muted())),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme::border_default())),
            *col,
        );
    }
}

fn render_about(frame: &mut Frame, area: Rect, profile: &UserProfile) {
    let mut lines = vec![Line::from(Span::styled("Bio", theme::heading()))];
    lines.push(Line::raw(if profile.bio.is_empty() {
        crate::core::backend::DEFAULT_BIO.to_string()
    } else {
        profile.bio.clone()
    }));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Interests", theme::heading())));
    if profile.interests.is_empty() {
        lines.push(Line::from(Span::styled("None picked yet", theme::dim())));
    } else {
        let spans: Vec<Span> = profile
            .interests
            .iter()
            .flat_map(|i| {
                [
                    Span::styled(format!(" {} {} ", i.icon(), i.label()), theme::button_secondary()),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(spans));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(theme::block_default("About")),
        area,
    );
}

/// Up to two initials for the avatar badge.
fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Priya Sharma"), "PS");
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials("  "), "?");
    }

    #[test]
    fn test_clear_drops_profile() {
        let mut state = ProfileState::new();
        let _ = state.data_tx.send(UserProfile::new_for(&crate::core::backend::AuthUser {
            uid: "u".into(),
            email: "u@x.io".into(),
            display_name: None,
        }));
        state.poll();
        assert!(state.profile.is_some());
        state.clear();
        assert!(state.profile.is_none());
    }
}
