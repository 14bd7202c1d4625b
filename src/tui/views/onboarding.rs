//! Onboarding view: the four-step profile wizard.
//!
//! The wizard's completion hook only captures the finished answers. The
//! save itself runs in a background task picked up on the next key or tick,
//! so the wizard reaches its completed state immediately and this view shows
//! the save's progress and outcome underneath.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use ratatui_textarea::TextArea;
use tokio::sync::mpsc;

use super::{field_text, focus_field, text_field, type_into};
use crate::config::WizardConfig;
use crate::core::backend::{ExperienceLevel, Interest, OnboardingProfile, UserProfile};
use crate::core::onboarding::{
    complete_onboarding, onboarding_wizard, OnboardingDraft, OnboardingError, OnboardingStep,
    SharedDraft,
};
use crate::core::wizard::{TransitionEngine, WizardController, WizardError};
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::stepper::{Stepper, StepperLayout};

/// Interest grid columns.
const GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SaveStatus {
    Idle,
    Saving,
    Failed(String),
    Saved,
}

/// What the completion hook hands over: the answers, or the first step
/// still missing one.
type Handover = Rc<RefCell<Option<Result<OnboardingProfile, OnboardingError>>>>;

pub struct OnboardingState {
    config: WizardConfig,
    draft: SharedDraft,
    wizard: WizardController<OnboardingStep>,
    transition: TransitionEngine,
    /// Answers handed over by the completion hook, waiting to be saved.
    finished: Handover,
    /// Last answers sent, kept for retries.
    submitted: Option<OnboardingProfile>,
    /// Step to reopen on retry when the answers were incomplete.
    resume_step: Option<usize>,
    nickname: TextArea<'static>,
    college: TextArea<'static>,
    bio: TextArea<'static>,
    level_cursor: usize,
    interest_cursor: usize,
    /// On the interests step: typing into the bio instead of the grid.
    bio_focused: bool,
    save: SaveStatus,
    last_area: Cell<Rect>,
    save_rx: mpsc::UnboundedReceiver<Result<UserProfile, OnboardingError>>,
    save_tx: mpsc::UnboundedSender<Result<UserProfile, OnboardingError>>,
}

impl OnboardingState {
    pub fn new(config: &WizardConfig) -> Result<Self, WizardError> {
        let draft: SharedDraft = Rc::new(RefCell::new(OnboardingDraft::default()));
        let finished: Handover = Rc::new(RefCell::new(None));
        let wizard = build_wizard(&draft, &finished, config)?;

        let mut nickname = text_field("Nickname");
        nickname.set_placeholder_text("e.g. DareDevil");
        let mut college = text_field("College");
        college.set_placeholder_text("e.g. State University");
        let mut bio = text_field("Bio (optional)");
        bio.set_placeholder_text("Tell others about yourself");
        focus_field(&mut nickname, true);

        let (save_tx, save_rx) = mpsc::unbounded_channel();
        let mut state = Self {
            config: config.clone(),
            draft,
            wizard,
            transition: TransitionEngine::new(config.transition()),
            finished,
            submitted: None,
            resume_step: None,
            nickname,
            college,
            bio,
            level_cursor: 0,
            interest_cursor: 0,
            bio_focused: false,
            save: SaveStatus::Idle,
            last_area: Cell::new(Rect::default()),
            save_rx,
            save_tx,
        };
        state.observe();
        Ok(state)
    }

    /// Prefill the nickname from the account's display name.
    pub fn load(&mut self, services: &Services) {
        let session = services.session();
        let Some(name) = session.user.and_then(|u| u.display_name) else {
            return;
        };
        if self.draft.borrow().nickname.is_empty() {
            self.nickname.insert_str(&name);
            self.sync_draft();
        }
    }

    pub fn is_saved(&self) -> bool {
        self.save == SaveStatus::Saved
    }

    pub fn current_step(&self) -> usize {
        self.wizard.current_step()
    }

    // ── Async save ───────────────────────────────────────────────────────

    /// Poll for the save result. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        if let Ok(result) = self.save_rx.try_recv() {
            match result {
                Ok(profile) => {
                    self.save = SaveStatus::Saved;
                    services.notify(
                        format!("Welcome aboard, {}!", profile.name),
                        NotificationLevel::Success,
                    );
                    services.auth.refresh_profile();
                }
                Err(e) => {
                    log::error!("Failed to save onboarding: {e}");
                    self.save = SaveStatus::Failed(e.to_string());
                    services.notify(
                        "Failed to save your information. Press r to retry.",
                        NotificationLevel::Error,
                    );
                }
            }
        }
    }

    /// Advance animations by one tick.
    pub fn on_tick(&mut self, dt: Duration) {
        self.transition.advance(dt);
    }

    fn start_save(&mut self, services: &Services) {
        let handed = self.finished.borrow_mut().take();
        match handed {
            Some(Ok(profile)) => self.submitted = Some(profile),
            Some(Err(OnboardingError::Incomplete(step))) => {
                log::warn!("Onboarding completed with step {step} unanswered");
                self.resume_step = Some(step);
                self.save = SaveStatus::Failed(format!(
                    "Step {step} is missing an answer. Press r to finish it"
                ));
                return;
            }
            Some(Err(e)) => {
                self.save = SaveStatus::Failed(e.to_string());
                return;
            }
            None => {}
        }
        let Some(profile) = self.submitted.clone() else {
            return;
        };
        let Some(user) = services.session().user else {
            self.save = SaveStatus::Failed("You are not signed in".into());
            return;
        };

        self.save = SaveStatus::Saving;
        let data = services.data.clone();
        let cache = services.auth.cache().clone();
        let tx = self.save_tx.clone();
        tokio::spawn(async move {
            let result = complete_onboarding(data.as_ref(), &cache, &user, profile).await;
            let _ = tx.send(result);
        });
    }

    /// Start a fresh wizard on `step`, keeping the answers given so far.
    fn reopen_at(&mut self, step: usize) {
        let wizard = match build_wizard(&self.draft, &self.finished, &self.config) {
            Ok(wizard) => wizard,
            Err(e) => {
                log::error!("Failed to reopen onboarding: {e}");
                return;
            }
        };
        self.wizard = wizard;
        // Every step before `step` is answered, so plain forward moves get there.
        while self.wizard.current_step() < step && self.wizard.go_next() {}
        self.transition = TransitionEngine::new(self.config.transition());
        self.resume_step = None;
        self.save = SaveStatus::Idle;
        self.observe();
    }

    fn retry(&mut self, services: &Services) {
        match self.resume_step {
            Some(step) => self.reopen_at(step),
            None => self.start_save(services),
        }
    }

    // ── Wizard plumbing ──────────────────────────────────────────────────

    /// Indicator jump, refused while an earlier step is unanswered.
    fn jump(&mut self, services: &Services, target: usize) -> bool {
        if !self.draft.borrow().can_reach(target) {
            return false;
        }
        self.navigate(services, |w| w.jump_to(target))
    }

    fn observe(&mut self) {
        let height = self
            .wizard
            .current_content()
            .map_or(0, |step| natural_height(*step));
        self.transition.observe(self.wizard.state(), height);
        self.refresh_focus();
    }

    /// Run a wizard operation, then let the transition and save catch up.
    fn navigate(&mut self, services: &Services, op: impl FnOnce(&mut WizardController<OnboardingStep>) -> bool) -> bool {
        let applied = op(&mut self.wizard);
        if applied {
            self.observe();
            if self.wizard.is_completed() {
                self.start_save(services);
            }
        }
        applied
    }

    fn sync_draft(&mut self) {
        let mut draft = self.draft.borrow_mut();
        draft.nickname = field_text(&self.nickname);
        draft.college = field_text(&self.college);
        draft.bio = field_text(&self.bio);
    }

    fn refresh_focus(&mut self) {
        let step = self.wizard.current_content().copied();
        focus_field(&mut self.nickname, step == Some(OnboardingStep::Nickname));
        focus_field(&mut self.college, step == Some(OnboardingStep::College));
        focus_field(
            &mut self.bio,
            step == Some(OnboardingStep::Interests) && self.bio_focused,
        );
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
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
            return false;
        };

        if self.wizard.is_completed() {
            return match (*modifiers, *code) {
                (KeyModifiers::NONE, KeyCode::Char('r')) if matches!(self.save, SaveStatus::Failed(_)) => {
                    self.retry(services);
                    true
                }
                _ => false,
            };
        }

        match (*modifiers, *code) {
            (_, KeyCode::Enter) => {
                self.navigate(services, |w| w.advance());
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => self.navigate(services, |w| w.go_back()),
            (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='9')) => {
                let target = c as usize - '0' as usize;
                self.jump(services, target);
                true
            }
            _ => self.handle_step_input(event, *modifiers, *code),
        }
    }

    fn handle_step_input(&mut self, event: &Event, modifiers: KeyModifiers, code: KeyCode) -> bool {
        let Some(step) = self.wizard.current_content().copied() else {
            return false;
        };
        match step {
            OnboardingStep::Nickname => {
                let consumed = type_into(&mut self.nickname, event);
                self.sync_draft();
                consumed
            }
            OnboardingStep::College => {
                let consumed = type_into(&mut self.college, event);
                self.sync_draft();
                consumed
            }
            OnboardingStep::Experience => self.handle_level_input(code),
            OnboardingStep::Interests => {
                if matches!(code, KeyCode::Tab | KeyCode::BackTab) {
                    self.bio_focused = !self.bio_focused;
                    self.refresh_focus();
                    return true;
                }
                if self.bio_focused {
                    let consumed = type_into(&mut self.bio, event);
                    self.sync_draft();
                    consumed
                } else {
                    self.handle_grid_input(modifiers, code)
                }
            }
        }
    }

    fn handle_level_input(&mut self, code: KeyCode) -> bool {
        let count = ExperienceLevel::ALL.len();
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.level_cursor = (self.level_cursor + 1).min(count - 1);
                self.select_level();
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.level_cursor = self.level_cursor.saturating_sub(1);
                self.select_level();
                true
            }
            KeyCode::Char(' ') => {
                self.select_level();
                true
            }
            _ => false,
        }
    }

    fn select_level(&mut self) {
        self.draft.borrow_mut().experience_level = ExperienceLevel::ALL.get(self.level_cursor).copied();
    }

    fn handle_grid_input(&mut self, modifiers: KeyModifiers, code: KeyCode) -> bool {
        let count = Interest::ALL.len();
        match (modifiers, code) {
            (_, KeyCode::Right | KeyCode::Char('l')) => {
                self.interest_cursor = (self.interest_cursor + 1).min(count - 1);
                true
            }
            (_, KeyCode::Left | KeyCode::Char('h')) => {
                self.interest_cursor = self.interest_cursor.saturating_sub(1);
                true
            }
            (_, KeyCode::Down | KeyCode::Char('j')) => {
                if self.interest_cursor + GRID_COLUMNS < count {
                    self.interest_cursor += GRID_COLUMNS;
                }
                true
            }
            (_, KeyCode::Up | KeyCode::Char('k')) => {
                self.interest_cursor = self.interest_cursor.saturating_sub(GRID_COLUMNS);
                true
            }
            (_, KeyCode::Char(' ')) => {
                if let Some(interest) = Interest::ALL.get(self.interest_cursor) {
                    self.draft.borrow_mut().toggle_interest(*interest);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, services: &Services) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let layout = self.stepper_layout(self.last_area.get());
        let (column, row) = (mouse.column, mouse.row);

        if let Some(step) = layout.indicator_at(column, row) {
            let target = self
                .wizard
                .indicators()
                .get(step - 1)
                .and_then(|indicator| indicator.click_target());
            if let Some(target) = target {
                self.jump(services, target);
            }
            return true;
        }
        if layout.hits_back(column, row) {
            self.navigate(services, |w| w.go_back());
            return true;
        }
        if layout.hits_primary(column, row) {
            self.navigate(services, |w| w.advance());
            return true;
        }
        false
    }

    // ── Rendering ────────────────────────────────────────────────────────

    fn stepper_area(area: Rect) -> Rect {
        let block_inner = theme::block_focused("").inner(area);
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).split(block_inner)[0]
    }

    fn stepper_layout(&self, area: Rect) -> StepperLayout {
        let frame = self.transition.frame();
        Stepper::layout(&self.wizard, &frame, Self::stepper_area(area))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        self.last_area.set(area);

        let title = format!(
            "Set up your profile · {}%",
            self.wizard.state().progress_percent()
        );
        let block = theme::block_focused(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).split(inner);

        let paint = |step: usize, area: Rect, buf: &mut Buffer| self.paint_step(step, area, buf);
        let stepper = Stepper::new(&self.wizard, self.transition.frame(), &paint);
        frame.render_widget(stepper, rows[0]);

        let footer = match &self.save {
            SaveStatus::Idle => self.hint_line(),
            SaveStatus::Saving => Line::from(Span::styled("Saving your profile...", theme::muted())),
            SaveStatus::Failed(e) => Line::from(vec![
                Span::styled(format!("✗ {e} "), Style::default().fg(theme::ERROR)),
                Span::styled("r", theme::key_hint()),
                Span::raw(if self.resume_step.is_some() { ":finish" } else { ":retry" }),
            ]),
            SaveStatus::Saved => Line::from(Span::styled(
                "✓ You're all set! Taking you to the dares...",
                Style::default().fg(theme::SUCCESS),
            )),
        };
        frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), rows[1]);
    }

    fn hint_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":continue "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(":back "),
        ];
        if !self.wizard.step_indicators_disabled() {
            spans.push(Span::styled("Alt+1-4", theme::key_hint()));
            spans.push(Span::raw(":jump "));
        }
        match self.wizard.current_content() {
            Some(OnboardingStep::Experience) => {
                spans.push(Span::styled("j/k", theme::key_hint()));
                spans.push(Span::raw(":choose"));
            }
            Some(OnboardingStep::Interests) => {
                spans.push(Span::styled("Space", theme::key_hint()));
                spans.push(Span::raw(":toggle "));
                spans.push(Span::styled("Tab", theme::key_hint()));
                spans.push(Span::raw(":bio"));
            }
            _ => {}
        }
        Line::from(spans)
    }

    fn paint_step(&self, step: usize, area: Rect, buf: &mut Buffer) {
        let Some(content) = self.wizard.content(step).copied() else {
            return;
        };
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        Paragraph::new(Span::styled(content.title(), theme::title())).render(rows[0], buf);
        Paragraph::new(Span::styled(content.subtitle(), theme::muted())).render(rows[1], buf);
        let body = rows[3];

        match content {
            OnboardingStep::Nickname => (&self.nickname).render(field_rect(body), buf),
            OnboardingStep::College => (&self.college).render(field_rect(body), buf),
            OnboardingStep::Experience => self.paint_levels(body, buf),
            OnboardingStep::Interests => {
                let parts = Layout::vertical([
                    Constraint::Length(grid_rows() as u16),
                    Constraint::Length(1),
                    Constraint::Length(3),
                ])
                .split(body);
                self.paint_interests(parts[0], buf);
                (&self.bio).render(parts[2], buf);
            }
        }
    }

    fn paint_levels(&self, area: Rect, buf: &mut Buffer) {
        let chosen = self.draft.borrow().experience_level;
        let mut lines = Vec::new();
        for (i, level) in ExperienceLevel::ALL.iter().enumerate() {
            let selected = chosen == Some(*level);
            let cursor = if i == self.level_cursor { "▸ " } else { "  " };
            let mark = if selected { "(●) " } else { "( ) " };
            let style = if selected { theme::highlight() } else { Style::default().fg(theme::TEXT) };
            lines.push(Line::from(vec![
                Span::styled(cursor, theme::highlight()),
                Span::styled(mark, style),
                Span::styled(level.label(), style),
            ]));
            lines.push(Line::from(Span::styled(format!("      {}", level.description()), theme::muted())));
        }
        Paragraph::new(lines).render(area, buf);
    }

    fn paint_interests(&self, area: Rect, buf: &mut Buffer) {
        let draft = self.draft.borrow();
        let lines: Vec<Line> = Interest::ALL
            .chunks(GRID_COLUMNS)
            .enumerate()
            .map(|(row, chunk)| {
                let mut spans = Vec::new();
                for (col, interest) in chunk.iter().enumerate() {
                    let index = row * GRID_COLUMNS + col;
                    let picked = draft.interests.contains(interest);
                    let focused = !self.bio_focused && index == self.interest_cursor;
                    let mut style = if picked { theme::highlight() } else { Style::default().fg(theme::TEXT) };
                    if focused {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    let mark = if picked { "[x]" } else { "[ ]" };
                    spans.push(Span::styled(format!(" {mark} {:<14}", interest.label()), style));
                }
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}

fn build_wizard(
    draft: &SharedDraft,
    finished: &Handover,
    config: &WizardConfig,
) -> Result<WizardController<OnboardingStep>, WizardError> {
    let hook_draft = draft.clone();
    let hook_slot = finished.clone();
    onboarding_wizard(
        draft.clone(),
        config.labels(),
        config.disable_step_indicators,
        move |_| *hook_slot.borrow_mut() = Some(hook_draft.borrow().to_profile()),
    )
}

fn grid_rows() -> usize {
    Interest::ALL.len().div_ceil(GRID_COLUMNS)
}

fn field_rect(area: Rect) -> Rect {
    Rect::new(area.x, area.y, area.width.min(48), area.height.min(3))
}

/// Rows a step needs when fully shown: title, subtitle, gap, then the body.
fn natural_height(step: OnboardingStep) -> u16 {
    let body = match step {
        OnboardingStep::Nickname | OnboardingStep::College => 3,
        OnboardingStep::Experience => ExperienceLevel::ALL.len() * 2,
        OnboardingStep::Interests => grid_rows() + 1 + 3,
    };
    3 + body as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> OnboardingState {
        OnboardingState::new(&WizardConfig::default()).unwrap()
    }

    fn services() -> Services {
        let (tx, _rx) = mpsc::unbounded_channel();
        Services::init(&AppConfig::default(), tx)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_heights_differ_per_step() {
        assert_eq!(natural_height(OnboardingStep::Nickname), 6);
        assert_eq!(natural_height(OnboardingStep::Experience), 11);
        assert_eq!(natural_height(OnboardingStep::Interests), 11);
    }

    #[test]
    fn test_level_cursor_selects() {
        let mut s = state();
        assert!(s.handle_level_input(KeyCode::Down));
        assert_eq!(s.draft.borrow().experience_level, Some(ExperienceLevel::Intermediate));
        s.handle_level_input(KeyCode::Up);
        s.handle_level_input(KeyCode::Up);
        assert_eq!(s.draft.borrow().experience_level, Some(ExperienceLevel::Beginner));
    }

    #[test]
    fn test_grid_toggles_interest() {
        let mut s = state();
        s.handle_grid_input(KeyModifiers::NONE, KeyCode::Down);
        assert_eq!(s.interest_cursor, GRID_COLUMNS);
        s.handle_grid_input(KeyModifiers::NONE, KeyCode::Char(' '));
        assert_eq!(s.draft.borrow().interests, vec![Interest::ALL[GRID_COLUMNS]]);
        s.handle_grid_input(KeyModifiers::NONE, KeyCode::Char(' '));
        assert!(s.draft.borrow().interests.is_empty());
    }

    #[test]
    fn test_completion_hook_hands_over_profile() {
        let mut s = state();
        *s.draft.borrow_mut() = OnboardingDraft {
            nickname: "Ace".into(),
            college: "MIT".into(),
            experience_level: Some(ExperienceLevel::Expert),
            interests: vec![Interest::Fun],
            bio: String::new(),
        };
        assert!(s.wizard.jump_to(4));
        assert!(s.wizard.advance());
        let profile = s.finished.borrow_mut().take().unwrap().unwrap();
        assert_eq!(profile.name, "Ace");
        assert!(s.wizard.is_completed());
    }

    #[tokio::test]
    async fn test_jump_refused_until_earlier_steps_answered() {
        let services = services();
        let mut s = state();

        assert!(s.handle_input(&key(KeyCode::Char('4'), KeyModifiers::ALT), &services));
        assert_eq!(s.current_step(), 1);

        {
            let mut draft = s.draft.borrow_mut();
            draft.nickname = "Ace".into();
            draft.college = "MIT".into();
        }
        s.handle_input(&key(KeyCode::Char('4'), KeyModifiers::ALT), &services);
        assert_eq!(s.current_step(), 1);
        s.handle_input(&key(KeyCode::Char('3'), KeyModifiers::ALT), &services);
        assert_eq!(s.current_step(), 3);
        // Going back never needs answers.
        s.handle_input(&key(KeyCode::Char('1'), KeyModifiers::ALT), &services);
        assert_eq!(s.current_step(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_completion_offers_a_way_back() {
        let services = services();
        let mut s = state();
        s.draft.borrow_mut().nickname = "Ace".into();
        s.draft.borrow_mut().college = "MIT".into();
        // Reach the last step with the experience answer missing.
        assert!(s.wizard.jump_to(4));

        s.handle_input(&key(KeyCode::Char(' '), KeyModifiers::NONE), &services);
        s.handle_input(&key(KeyCode::Enter, KeyModifiers::NONE), &services);
        assert!(s.wizard.is_completed());
        assert!(matches!(s.save, SaveStatus::Failed(_)));
        assert_eq!(s.resume_step, Some(3));
        assert!(s.submitted.is_none());

        assert!(s.handle_input(&key(KeyCode::Char('r'), KeyModifiers::NONE), &services));
        assert!(!s.wizard.is_completed());
        assert_eq!(s.current_step(), 3);
        assert_eq!(s.save, SaveStatus::Idle);
        assert_eq!(s.draft.borrow().interests, vec![Interest::ALL[0]]);

        // Answering the missing step lets the wizard finish normally.
        s.handle_input(&key(KeyCode::Char(' '), KeyModifiers::NONE), &services);
        s.handle_input(&key(KeyCode::Enter, KeyModifiers::NONE), &services);
        assert_eq!(s.current_step(), 4);
        s.handle_input(&key(KeyCode::Enter, KeyModifiers::NONE), &services);
        assert!(s.wizard.is_completed());
        assert!(s.resume_step.is_none());
        assert!(s.submitted.is_some());
    }
}
