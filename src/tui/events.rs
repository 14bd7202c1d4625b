use crate::core::session::{AuthSnapshot, Route};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for animations, notification TTLs, etc.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The auth store published a new snapshot.
    AuthChanged(AuthSnapshot),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper or by views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Navigate(Route),
    TabNext,
    TabPrev,

    // Modals
    ShowHelp,
    CloseHelp,

    // Session
    SignOut,

    // Application
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Unnumbered notification; `AppState` assigns the id.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 100,
        }
    }
}

/// Next entry of the navigation bar, wrapping. Routes outside the bar start
/// from the first entry.
pub fn next_nav(route: Route) -> Route {
    match Route::NAV.iter().position(|r| *r == route) {
        Some(i) => Route::NAV[(i + 1) % Route::NAV.len()],
        None => Route::NAV[0],
    }
}

pub fn prev_nav(route: Route) -> Route {
    match Route::NAV.iter().position(|r| *r == route) {
        Some(i) => Route::NAV[(i + Route::NAV.len() - 1) % Route::NAV.len()],
        None => Route::NAV[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_cycles() {
        let mut r = Route::NAV[0];
        for _ in 0..Route::NAV.len() {
            r = next_nav(r);
        }
        assert_eq!(r, Route::NAV[0]);

        for _ in 0..Route::NAV.len() {
            r = prev_nav(r);
        }
        assert_eq!(r, Route::NAV[0]);
    }

    #[test]
    fn test_off_bar_routes_start_at_first() {
        assert_eq!(next_nav(Route::Auth), Route::NAV[0]);
        assert_eq!(prev_nav(Route::Onboarding), Route::NAV[0]);
    }

    #[test]
    fn test_notification_defaults() {
        let n = Notification::new("hi", NotificationLevel::Info);
        assert_eq!(n.id, 0);
        assert_eq!(n.ttl_ticks, 100);
    }
}
