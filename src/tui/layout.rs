//! Root layout computation for navigation bar + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Hide the navigation bar below this terminal height.
pub const HIDE_NAV_THRESHOLD: u16 = 8;
/// Cap on the main column width so forms stay readable on wide terminals.
pub const MAX_CONTENT_WIDTH: u16 = 110;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Navigation bar (None if hidden).
    pub nav: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    ///
    /// `show_nav`: the current route belongs to the navigation bar.
    pub fn compute(area: Rect, show_nav: bool) -> Self {
        let show_nav = show_nav && area.height >= HIDE_NAV_THRESHOLD;

        let rows = Layout::vertical([
            Constraint::Length(if show_nav { 1 } else { 0 }),
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let nav = show_nav.then_some(rows[0]);
        let status = rows[2];

        let content = rows[1];
        let main = if content.width > MAX_CONTENT_WIDTH {
            let margin = (content.width - MAX_CONTENT_WIDTH) / 2;
            Rect::new(content.x + margin, content.y, MAX_CONTENT_WIDTH, content.height)
        } else {
            content
        };

        AppLayout { nav, main, status }
    }
}
