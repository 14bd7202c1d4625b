use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{next_nav, prev_nav, Action, AppEvent, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::services::Services;
use super::theme;
use super::views::auth::AuthState;
use super::views::create_dare::CreateDareState;
use super::views::dares::{DaresResult, DaresState};
use super::views::leaderboard::LeaderboardState;
use super::views::my_dares::MyDaresState;
use super::views::onboarding::OnboardingState;
use super::views::profile::ProfileState;
use crate::core::session::{AuthSnapshot, GateDecision, Route};
use crate::core::wizard::WizardError;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Screen currently shown.
    pub route: Route,
    /// Screen the user asked for before a sign-in or onboarding detour.
    pending: Option<Route>,
    /// Last auth snapshot received from the store.
    pub session: AuthSnapshot,
    pub auth: AuthState,
    pub onboarding: OnboardingState,
    pub dares: DaresState,
    pub create_dare: CreateDareState,
    pub my_dares: MyDaresState,
    pub leaderboard: LeaderboardState,
    pub profile: ProfileState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Tick length, fed to animations.
    tick: Duration,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
    ) -> Result<Self, WizardError> {
        let onboarding = OnboardingState::new(&services.config.wizard)?;
        Ok(Self {
            running: true,
            route: Route::default(),
            pending: None,
            session: AuthSnapshot::initial(),
            auth: AuthState::new(),
            onboarding,
            dares: DaresState::new(services.config.gesture),
            create_dare: CreateDareState::new(),
            my_dares: MyDaresState::new(),
            leaderboard: LeaderboardState::new(),
            profile: ProfileState::new(),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            tick: Duration::from_millis(services.config.tui.tick_rate_ms),
            event_rx,
            services,
        })
    }

    /// Hand the services back for shutdown.
    pub fn into_services(self) -> Services {
        self.services
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        self.tick = tick_rate;
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.load_route();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Ctrl+C always quits
                if is_force_quit(&crossterm_event) {
                    self.running = false;
                    return;
                }

                // Priority 2: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 3: Navigation shortcuts (text fields would swallow them)
                if Route::NAV.contains(&self.route) {
                    if let Some(action) = map_nav_shortcut(&crossterm_event) {
                        self.handle_action(action);
                        return;
                    }
                }

                // Priority 4: Current view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 5: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::AuthChanged(snapshot) => self.on_auth_changed(snapshot),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the current view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.route {
            Route::Auth => self.auth.handle_input(event, &self.services),
            Route::Onboarding => self.onboarding.handle_input(event, &self.services),
            Route::Dares => match self.dares.handle_input(event, &self.services) {
                Some(DaresResult::Consumed) => true,
                Some(DaresResult::Navigate(route)) => {
                    self.handle_action(Action::Navigate(route));
                    true
                }
                None => false,
            },
            Route::CreateDare => self.create_dare.handle_input(event, &self.services),
            Route::MyDares => self.my_dares.handle_input(event, &self.services),
            Route::Leaderboard => self.leaderboard.handle_input(event, &self.services),
            Route::Profile => self.profile.handle_input(event, &self.services),
        }
    }

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                // Browse as a guest instead of signing in
                KeyCode::Esc if self.route == Route::Auth => Some(Action::Navigate(Route::Dares)),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(route) => self.enter(route, true),
            Action::TabNext => self.enter(next_nav(self.route), true),
            Action::TabPrev => self.enter(prev_nav(self.route), true),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::SignOut => self.sign_out(),
        }
    }

    // ── Routing ─────────────────────────────────────────────────────────

    /// Show `requested`, or wherever its gate redirects. Loads the view when
    /// the route changes or `force_load` is set.
    fn enter(&mut self, requested: Route, force_load: bool) {
        let route = match requested.gate().evaluate(&self.session) {
            GateDecision::Redirect(to) => {
                if Route::NAV.contains(&requested) {
                    self.pending = Some(requested);
                }
                log::debug!("Gate redirected {requested:?} to {to:?}");
                to
            }
            GateDecision::Loading | GateDecision::Allow => requested,
        };

        let changed = route != self.route;
        self.route = route;
        if changed || force_load {
            self.load_route();
        }
    }

    fn load_route(&mut self) {
        if self.session.loading {
            return;
        }
        match self.route {
            Route::Auth | Route::CreateDare => {}
            Route::Onboarding => self.onboarding.load(&self.services),
            Route::Dares => self.dares.load(&self.services),
            Route::MyDares => self.my_dares.load(&self.services),
            Route::Leaderboard => self.leaderboard.load(&self.services),
            Route::Profile => self.profile.load(&self.services),
        }
    }

    fn on_auth_changed(&mut self, snapshot: AuthSnapshot) {
        let was_loading = self.session.loading;
        let user_changed = self.session.uid() != snapshot.uid();
        self.session = snapshot;

        if user_changed {
            self.reset_user_views();
        }
        if self.session.loading {
            return;
        }

        let target = match self.route {
            Route::Auth if self.session.user.is_some() => {
                if self.session.has_profile {
                    self.pending.take().unwrap_or(Route::Dares)
                } else {
                    Route::Onboarding
                }
            }
            Route::Onboarding if self.session.has_profile => self.pending.take().unwrap_or(Route::Dares),
            other => other,
        };
        self.enter(target, was_loading || user_changed);
    }

    /// Forget everything tied to the previous account.
    fn reset_user_views(&mut self) {
        self.auth.reset();
        self.profile.clear();
        self.my_dares = MyDaresState::new();
        self.create_dare = CreateDareState::new();
        match OnboardingState::new(&self.services.config.wizard) {
            Ok(onboarding) => self.onboarding = onboarding,
            Err(e) => log::error!("Failed to rebuild onboarding wizard: {e}"),
        }
        if self.session.user.is_none() {
            self.pending = None;
        }
    }

    fn sign_out(&mut self) {
        let identity = self.services.identity.clone();
        let tx = self.services.event_tx.clone();
        tokio::spawn(async move {
            let notification = match identity.sign_out().await {
                Ok(()) => Notification::new("Signed out", NotificationLevel::Info),
                Err(e) => {
                    log::warn!("Sign out failed: {e}");
                    Notification::new(format!("Sign out failed: {e}"), NotificationLevel::Error)
                }
            };
            let _ = tx.send(AppEvent::Notification(notification));
        });
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        let mut notification = Notification::new(message, level);
        notification.id = self.notification_counter;
        self.notifications.push(notification);

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, poll async data.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        // Poll async view data
        self.auth.poll(&self.services);
        self.onboarding.poll(&self.services);
        self.dares.poll(&self.services);
        self.create_dare.poll(&self.services);
        self.my_dares.poll(&self.services);
        self.leaderboard.poll();
        self.profile.poll();

        // Animations
        self.onboarding.on_tick(self.tick);
        self.dares.on_tick(self.tick, &self.services);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = AppLayout::compute(area, Route::NAV.contains(&self.route));

        if let Some(nav_area) = layout.nav {
            self.render_nav(frame, nav_area);
        }

        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_nav(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Route::NAV
            .iter()
            .enumerate()
            .map(|(i, r)| Line::from(format!("{} {}", i + 1, r.label())))
            .collect();
        let selected = Route::NAV.iter().position(|r| *r == self.route);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme::muted())
            .highlight_style(theme::highlight())
            .divider(Span::styled("│", theme::dim()));
        frame.render_widget(tabs, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        if self.route.gate().evaluate(&self.session) == GateDecision::Loading {
            self.render_loading(frame, area);
            return;
        }
        match self.route {
            Route::Auth => self.auth.render(frame, area),
            Route::Onboarding => self.onboarding.render(frame, area),
            Route::Dares => self.dares.render(frame, area),
            Route::CreateDare => self.create_dare.render(frame, area),
            Route::MyDares => self.my_dares.render(frame, area),
            Route::Leaderboard => self.leaderboard.render(frame, area),
            Route::Profile => self.profile.render(frame, area),
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.route.label()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::PRIMARY));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "🔥 DareUp",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled("Loading...", Style::default().fg(theme::TEXT_MUTED))),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let user = match self.session.user {
            Some(ref user) => Span::styled(
                format!(" {} ", user.display_name.as_deref().unwrap_or(&user.email)),
                theme::user_badge(),
            ),
            None if self.session.loading => Span::styled("…", theme::dim()),
            None => Span::styled("guest", theme::muted()),
        };

        let status = Line::from(vec![
            Span::styled(" DAREUP ", theme::brand_badge()),
            Span::raw(" "),
            user,
            Span::raw(" "),
            Span::styled(
                self.route.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":nav "),
            Span::styled("Alt+1-5", theme::key_hint()),
            Span::raw(":jump "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height).intersection(area);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous screen"),
            ("Alt+1-5", "Jump to screen by number"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Sign In:", ""),
            ("Tab / ↑↓", "Move between fields"),
            ("Enter", "Next field / submit"),
            ("F2", "Switch sign in / sign up"),
            ("F3", "Show / hide password"),
            ("Esc", "Browse dares as a guest"),
            ("", ""),
            ("Onboarding:", ""),
            ("Enter", "Continue / complete"),
            ("Esc", "Back one step"),
            ("Alt+1-4", "Jump to a visited step"),
            ("Space", "Choose level / toggle interest"),
            ("", ""),
            ("Dares:", ""),
            ("j/k", "Select dare"),
            ("/", "Search"),
            ("c", "Cycle category"),
            ("→ / drag", "Slide to accept"),
            ("p", "Submit proof for an accepted dare"),
            ("", ""),
            ("Create Dare:", ""),
            ("←/→", "Change category / difficulty / time"),
            ("Ctrl+S", "Create"),
            ("", ""),
            ("My Dares:", ""),
            ("f / 1-4", "Status filter"),
            ("d", "Delete selected dare"),
            ("", ""),
            ("Leaderboard:", ""),
            ("t", "Cycle timeframe"),
            ("", ""),
            ("Profile:", ""),
            ("s", "Sign out"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint()),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn is_force_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

/// Alt+1..5 jumps straight to a navigation bar entry.
fn map_nav_shortcut(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code: KeyCode::Char(c @ '1'..='5'),
        modifiers: KeyModifiers::ALT,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    let index = *c as usize - '1' as usize;
    Route::NAV.get(index).map(|route| Action::Navigate(*route))
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
