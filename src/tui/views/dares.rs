//! Dares view — browse approved dares, slide to accept, submit proof.
//!
//! Left: filtered list (category cycling, free-text search). Right: details
//! of the selected dare and the slide-to-accept track. Accepting a dare
//! unlocks the proof modal for it.

use std::cell::Cell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use ratatui_textarea::TextArea;
use tokio::sync::mpsc;

use super::{field_text, focus_field, text_field, type_into};
use crate::core::backend::{Dare, DareCategory, Proof};
use crate::core::dares::{
    accept_dare, list_available, submit_proof, DareError, DareFilter, ProofDraft, ProofFile,
};
use crate::core::gesture::{SlideToAccept, SliderConfig};
use crate::core::session::{AuthGate, GateDecision, Route};
use crate::tui::app::centered_rect;
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::slider::{hits_knob, SliderWidget, KNOB_WIDTH};

/// Cells moved per arrow key press on the slider.
const NUDGE_CELLS: f32 = 4.0;

enum DaresMsg {
    Loaded(Result<Vec<Dare>, DareError>),
    Accepted { dare_id: String, result: Result<(), DareError> },
    ProofSubmitted { coins: u64, result: Result<Proof, DareError> },
}

pub enum DaresResult {
    Consumed,
    /// The user needs another screen first (e.g. sign in).
    Navigate(Route),
}

// ── Proof modal ──────────────────────────────────────────────────────────────

struct ProofModal {
    dare: Dare,
    description: TextArea<'static>,
    path: TextArea<'static>,
    path_focused: bool,
    submitting: bool,
    error: Option<String>,
}

impl ProofModal {
    fn new(dare: Dare) -> Self {
        let mut description = text_field("Describe how you completed the dare");
        description.set_placeholder_text("What happened?");
        let mut path = text_field("Photo or video path (optional)");
        path.set_placeholder_text("~/Pictures/proof.jpg");
        let mut modal = Self {
            dare,
            description,
            path,
            path_focused: false,
            submitting: false,
            error: None,
        };
        modal.update_focus_styles();
        modal
    }

    fn update_focus_styles(&mut self) {
        focus_field(&mut self.description, !self.path_focused);
        focus_field(&mut self.path, self.path_focused);
    }

    /// Validate the form into a draft.
    fn draft(&self) -> Result<ProofDraft, DareError> {
        let raw_path = field_text(&self.path);
        let raw_path = raw_path.trim();
        let file = if raw_path.is_empty() {
            None
        } else {
            Some(ProofFile::from_path(&expand_home(raw_path))?)
        };
        let draft = ProofDraft {
            description: field_text(&self.description),
            file,
        };
        if !draft.is_valid() {
            return Err(DareError::EmptyProof);
        }
        Ok(draft)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(70, 60, area);
        let block = theme::block_focused("Submit Proof");
        let inner = block.inner(modal);
        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);

        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(self.dare.title.clone(), theme::title())),
                Line::from(Span::styled(
                    format!("Reward: {} coins · images or videos up to 10MB", self.dare.coins),
                    theme::muted(),
                )),
            ]),
            rows[0],
        );
        frame.render_widget(&self.description, rows[1]);
        frame.render_widget(&self.path, rows[2]);

        let status = if self.submitting {
            Line::from(Span::styled("Submitting...", theme::muted()))
        } else if let Some(ref e) = self.error {
            Line::from(Span::styled(e.clone(), Style::default().fg(theme::ERROR)))
        } else {
            Line::raw("")
        };
        frame.render_widget(Paragraph::new(status), rows[3]);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Ctrl+S", theme::key_hint()),
                Span::raw(":submit "),
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":field "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":cancel"),
            ])),
            rows[4],
        );
    }
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(raw), |home| home.join(rest)),
        None => PathBuf::from(raw),
    }
}

// ── State ────────────────────────────────────────────────────────────────────

pub struct DaresState {
    dares: Vec<Dare>,
    filter: DareFilter,
    search: TextArea<'static>,
    searching: bool,
    list_state: ListState,
    loading: bool,
    error: Option<String>,
    slider: SlideToAccept,
    track_width: u16,
    /// Dares accepted this session.
    accepted: HashSet<String>,
    proof: Option<ProofModal>,
    slider_area: Cell<Rect>,
    data_rx: mpsc::UnboundedReceiver<DaresMsg>,
    data_tx: mpsc::UnboundedSender<DaresMsg>,
}

impl DaresState {
    pub fn new(gesture: SliderConfig) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        let mut search = text_field("Search dares");
        search.set_placeholder_text("type to filter");
        Self {
            dares: Vec::new(),
            filter: DareFilter::default(),
            search,
            searching: false,
            list_state: ListState::default(),
            loading: false,
            error: None,
            slider: SlideToAccept::new(0.0, f32::from(KNOB_WIDTH), gesture),
            track_width: 0,
            accepted: HashSet::new(),
            proof: None,
            slider_area: Cell::new(Rect::default()),
            data_rx,
            data_tx,
        }
    }

    /// Trigger async load of approved dares.
    pub fn load(&mut self, services: &Services) {
        if self.loading {
            return;
        }
        self.loading = true;
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let result = list_available(data.as_ref()).await;
            let _ = tx.send(DaresMsg::Loaded(result));
        });
    }

    /// Poll for async results. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        while let Ok(msg) = self.data_rx.try_recv() {
            match msg {
                DaresMsg::Loaded(Ok(dares)) => {
                    self.loading = false;
                    self.error = None;
                    let selected_id = self.selected().map(|d| d.id.clone());
                    self.dares = dares;
                    self.restore_selection(selected_id);
                }
                DaresMsg::Loaded(Err(e)) => {
                    self.loading = false;
                    log::warn!("Failed to load dares: {e}");
                    self.error = Some(e.to_string());
                }
                DaresMsg::Accepted { dare_id, result } => match result {
                    Ok(()) => {
                        if let Some(dare) = self.dares.iter_mut().find(|d| d.id == dare_id) {
                            dare.participants += 1;
                            services.notify(
                                format!("Accepted \"{}\". Press p to submit proof.", dare.title),
                                NotificationLevel::Success,
                            );
                        }
                        self.accepted.insert(dare_id);
                    }
                    Err(e) => {
                        services.notify(format!("Could not accept dare: {e}"), NotificationLevel::Error);
                        self.slider.reset();
                    }
                },
                DaresMsg::ProofSubmitted { coins, result } => match result {
                    Ok(proof) => {
                        if let Some(dare) = self.dares.iter_mut().find(|d| d.id == proof.dare_id) {
                            dare.completions += 1;
                        }
                        self.proof = None;
                        services.notify(
                            format!("Proof submitted! +{coins} coins"),
                            NotificationLevel::Success,
                        );
                    }
                    Err(e) => {
                        if let Some(modal) = self.proof.as_mut() {
                            modal.submitting = false;
                            modal.error = Some(e.to_string());
                        }
                    }
                },
            }
        }
    }

    /// Advance the slider clock and keep the track sized to the panel.
    pub fn on_tick(&mut self, dt: Duration, services: &Services) {
        let width = self.slider_area.get().width;
        if width != self.track_width {
            self.track_width = width;
            self.slider.set_track_width(f32::from(width));
        }
        if self.slider.tick(dt) {
            self.on_accept(services);
        }
    }

    fn visible(&self) -> Vec<&Dare> {
        self.filter.apply(&self.dares)
    }

    fn selected(&self) -> Option<&Dare> {
        let visible = self.visible();
        self.list_state.selected().and_then(|i| visible.get(i).copied())
    }

    fn restore_selection(&mut self, id: Option<String>) {
        let visible = self.visible();
        let index = id
            .and_then(|id| visible.iter().position(|d| d.id == id))
            .or(if visible.is_empty() { None } else { Some(0) });
        self.list_state.select(index);
    }

    fn on_selection_changed(&mut self) {
        self.slider.reset();
    }

    fn select_next(&mut self) {
        let count = self.visible().len();
        if count == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| (i + 1).min(count - 1));
        self.list_state.select(Some(i));
        self.on_selection_changed();
    }

    fn select_prev(&mut self) {
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        if !self.visible().is_empty() {
            self.list_state.select(Some(i));
        }
        self.on_selection_changed();
    }

    fn refilter(&mut self) {
        let id = self.selected().map(|d| d.id.clone());
        self.filter.search = field_text(&self.search);
        self.restore_selection(id);
        self.on_selection_changed();
    }

    fn on_accept(&mut self, services: &Services) {
        let Some(dare) = self.selected().cloned() else {
            return;
        };
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let result = accept_dare(data.as_ref(), &dare.id).await;
            let _ = tx.send(DaresMsg::Accepted {
                dare_id: dare.id,
                result,
            });
        });
    }

    /// Signed-in users with a profile may take part; others are sent on.
    fn participation_gate(services: &Services) -> Option<Route> {
        match AuthGate::with_profile().evaluate(&services.session()) {
            GateDecision::Allow => None,
            GateDecision::Redirect(route) => Some(route),
            GateDecision::Loading => Some(Route::Auth),
        }
    }

    fn open_proof(&mut self) {
        let Some(dare) = self.selected().cloned() else {
            return;
        };
        if self.accepted.contains(&dare.id) {
            self.proof = Some(ProofModal::new(dare));
        }
    }

    fn submit_proof(&mut self, services: &Services) {
        let Some(modal) = self.proof.as_mut() else {
            return;
        };
        if modal.submitting {
            return;
        }
        let draft = match modal.draft() {
            Ok(draft) => draft,
            Err(e) => {
                modal.error = Some(e.to_string());
                return;
            }
        };
        let Some(uid) = services.session().uid().map(str::to_string) else {
            modal.error = Some("You are not signed in".into());
            return;
        };

        modal.submitting = true;
        modal.error = None;
        let dare = modal.dare.clone();
        let data = services.data.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let result = submit_proof(data.as_ref(), &uid, &dare, &draft).await;
            let _ = tx.send(DaresMsg::ProofSubmitted {
                coins: dare.coins,
                result,
            });
        });
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> Option<DaresResult> {
        if self.proof.is_some() {
            self.handle_proof_input(event, services);
            return Some(DaresResult::Consumed);
        }
        if let Event::Mouse(mouse) = event {
            return self.handle_mouse(mouse, services);
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        if self.searching {
            match code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.searching = false;
                    focus_field(&mut self.search, false);
                }
                _ => {
                    type_into(&mut self.search, event);
                    self.refilter();
                }
            }
            return Some(DaresResult::Consumed);
        }

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => self.select_next(),
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => self.select_prev(),
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                self.searching = true;
                focus_field(&mut self.search, true);
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                self.filter.cycle_category();
                let id = self.selected().map(|d| d.id.clone());
                self.restore_selection(id);
                self.on_selection_changed();
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => self.load(services),
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                if let Some(route) = Self::participation_gate(services) {
                    services.notify("Sign in and finish your profile to accept dares", NotificationLevel::Info);
                    return Some(DaresResult::Navigate(route));
                }
                self.slider.nudge(NUDGE_CELLS);
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => self.slider.release(),
            (KeyModifiers::NONE, KeyCode::Char('p')) => self.open_proof(),
            _ => return None,
        }
        Some(DaresResult::Consumed)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, services: &Services) -> Option<DaresResult> {
        let area = self.slider_area.get();
        let x = f32::from(mouse.column.saturating_sub(area.x));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if hits_knob(&self.slider, area, mouse.column, mouse.row) => {
                if let Some(route) = Self::participation_gate(services) {
                    return Some(DaresResult::Navigate(route));
                }
                self.slider.start(x);
                Some(DaresResult::Consumed)
            }
            MouseEventKind::Drag(MouseButton::Left) if self.slider.is_dragging() => {
                self.slider.drag_to(x);
                Some(DaresResult::Consumed)
            }
            MouseEventKind::Up(MouseButton::Left) if self.slider.is_dragging() => {
                self.slider.release();
                Some(DaresResult::Consumed)
            }
            _ => None,
        }
    }

    fn handle_proof_input(&mut self, event: &Event, services: &Services) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Esc) => self.proof = None,
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.submit_proof(services),
            (_, KeyCode::Tab | KeyCode::BackTab) => {
                if let Some(modal) = self.proof.as_mut() {
                    modal.path_focused = !modal.path_focused;
                    modal.update_focus_styles();
                }
            }
            (_, KeyCode::Enter) => {
                if let Some(modal) = self.proof.as_mut() {
                    if modal.path_focused {
                        self.submit_proof(services);
                    } else {
                        modal.description.insert_newline();
                    }
                }
            }
            _ => {
                if let Some(modal) = self.proof.as_mut() {
                    let field = if modal.path_focused {
                        &mut modal.path
                    } else {
                        &mut modal.description
                    };
                    type_into(field, event);
                }
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);
        self.render_list(frame, cols[0]);
        self.render_detail(frame, cols[1]);

        if let Some(ref modal) = self.proof {
            modal.render(frame, area);
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(1), Constraint::Min(1)]).split(area);
        frame.render_widget(&self.search, rows[0]);

        let mut tabs = vec![Span::styled("c", theme::key_hint()), Span::raw(" ")];
        let all_style = if self.filter.category.is_none() { theme::highlight() } else { theme::muted() };
        tabs.push(Span::styled("All ", all_style));
        for category in DareCategory::ALL {
            let style = if self.filter.category == Some(category) {
                Style::default()
                    .fg(theme::category_color(category))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                theme::muted()
            };
            tabs.push(Span::styled(format!("{} ", category.label()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), rows[1]);

        let block = theme::block_default("Dares");
        if self.loading && self.dares.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading dares...", theme::muted())).block(block),
                rows[2],
            );
            return;
        }
        if let Some(ref e) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(e.clone(), Style::default().fg(theme::ERROR))).block(block),
                rows[2],
            );
            return;
        }

        let visible = self.visible();
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No dares match your filters.", theme::muted())).block(block),
                rows[2],
            );
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|dare| {
                let done = if self.accepted.contains(&dare.id) { "✓ " } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(done, Style::default().fg(theme::SUCCESS)),
                    Span::raw(dare.title.clone()),
                    Span::raw(" "),
                    Span::styled(format!("{}c", dare.coins), Style::default().fg(theme::COIN)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");
        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, rows[2], &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Challenge");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(dare) = self.selected() else {
            self.slider_area.set(Rect::default());
            frame.render_widget(
                Paragraph::new(Span::styled("Select a dare to see the details", theme::muted()))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let mut lines = vec![
            Line::from(Span::styled(dare.title.clone(), theme::title())),
            Line::from(vec![
                Span::styled(
                    dare.category.label(),
                    Style::default().fg(theme::category_color(dare.category)),
                ),
                Span::raw(" · "),
                Span::styled(
                    dare.difficulty.label(),
                    Style::default().fg(theme::difficulty_color(dare.difficulty)),
                ),
                Span::raw(" · "),
                Span::styled(format!("{} coins", dare.coins), Style::default().fg(theme::COIN)),
                Span::raw(" · "),
                Span::styled(dare.time_limit.label(), theme::muted()),
            ]),
            Line::raw(""),
            Line::raw(dare.description.clone()),
        ];
        if !dare.requirements.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("Requirements", theme::heading())));
            lines.push(Line::raw(dare.requirements.clone()));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} participants · {} completions · by {}",
                dare.participants, dare.completions, dare.created_by_name
            ),
            theme::muted(),
        )));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);

        if self.accepted.contains(&dare.id) {
            self.slider_area.set(Rect::default());
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("✓ Accepted ", Style::default().fg(theme::SUCCESS).add_modifier(Modifier::BOLD)),
                    Span::styled("p", theme::key_hint()),
                    Span::raw(":submit proof"),
                ]))
                .alignment(Alignment::Center),
                rows[2],
            );
        } else {
            self.slider_area.set(rows[2]);
            frame.render_widget(SliderWidget::new(&self.slider), rows[2]);
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("→/drag", theme::key_hint()),
                Span::raw(":slide "),
                Span::styled("/", theme::key_hint()),
                Span::raw(":search "),
                Span::styled("c", theme::key_hint()),
                Span::raw(":category "),
                Span::styled("r", theme::key_hint()),
                Span::raw(":refresh"),
            ]))
            .alignment(Alignment::Center),
            rows[3],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{Difficulty, ReviewStatus, TimeLimit};
    use chrono::Utc;

    fn dare(id: &str, title: &str, category: DareCategory) -> Dare {
        Dare {
            id: id.into(),
            title: title.into(),
            description: format!("{title} description"),
            category,
            difficulty: Difficulty::Easy,
            coins: 50,
            time_limit: TimeLimit::Hours24,
            requirements: String::new(),
            created_by: "seed".into(),
            created_by_name: "DareUp".into(),
            status: ReviewStatus::Approved,
            participants: 0,
            completions: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn loaded() -> DaresState {
        let mut state = DaresState::new(SliderConfig::default());
        state.dares = vec![
            dare("a", "Dance in Public", DareCategory::Fun),
            dare("b", "Cold Shower", DareCategory::Extreme),
            dare("c", "Compliment Strangers", DareCategory::Social),
        ];
        state.restore_selection(None);
        state
    }

    #[test]
    fn test_selection_moves_within_visible() {
        let mut state = loaded();
        assert_eq!(state.selected().map(|d| d.id.as_str()), Some("a"));
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected().map(|d| d.id.as_str()), Some("c"));
        state.select_prev();
        assert_eq!(state.selected().map(|d| d.id.as_str()), Some("b"));
    }

    #[test]
    fn test_category_filter_keeps_selection_valid() {
        let mut state = loaded();
        state.select_next();
        state.filter.category = Some(DareCategory::Social);
        state.restore_selection(Some("b".into()));
        assert_eq!(state.selected().map(|d| d.id.as_str()), Some("c"));

        state.filter.category = Some(DareCategory::Creative);
        state.restore_selection(None);
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_selection_change_resets_slider() {
        let mut state = loaded();
        state.slider.set_track_width(40.0);
        state.slider.nudge(10.0);
        assert!(state.slider.position() > 0.0);
        state.select_next();
        assert_eq!(state.slider.position(), 0.0);
    }

    #[test]
    fn test_proof_requires_acceptance() {
        let mut state = loaded();
        state.open_proof();
        assert!(state.proof.is_none());
        state.accepted.insert("a".into());
        state.open_proof();
        assert!(state.proof.is_some());
    }

    #[test]
    fn test_empty_proof_form_is_rejected() {
        let modal = ProofModal::new(dare("a", "Dance", DareCategory::Fun));
        assert!(matches!(modal.draft(), Err(DareError::EmptyProof)));
    }

    #[test]
    fn test_proof_form_checks_file() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hi").unwrap();

        let mut modal = ProofModal::new(dare("a", "Dance", DareCategory::Fun));
        modal.path.insert_str(text.to_string_lossy());
        assert!(matches!(modal.draft(), Err(DareError::UnsupportedFile(_))));

        let photo = dir.path().join("proof.jpg");
        std::fs::write(&photo, [0u8; 16]).unwrap();
        let mut modal = ProofModal::new(dare("a", "Dance", DareCategory::Fun));
        modal.path.insert_str(photo.to_string_lossy());
        let draft = modal.draft().unwrap();
        assert_eq!(draft.file.map(|f| f.mime), Some("image/jpeg".to_string()));
    }
}
