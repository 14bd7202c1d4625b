//! Centralized Flame & Ember color theme for the DareUp TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::backend::{DareCategory, Difficulty, ReviewStatus};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Flame red — primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0xEF, 0x44, 0x44);
/// Light flame — highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xF8, 0x71, 0x71);
/// Dark flame — subtle backgrounds, pressed states.
pub const PRIMARY_DARK: Color = Color::Rgb(0x7F, 0x1D, 0x1D);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Ember orange — calls to action, coins, important items.
pub const ACCENT: Color = Color::Rgb(0xF9, 0x73, 0x16);
/// Soft ember — secondary emphasis.
pub const ACCENT_SOFT: Color = Color::Rgb(0xFB, 0x92, 0x3C);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Charcoal — base background.
pub const BG_BASE: Color = Color::Rgb(0x17, 0x11, 0x10);
/// Surface — elevated panels, slider track.
pub const BG_SURFACE: Color = Color::Rgb(0x29, 0x1F, 0x1D);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text — secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text — disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — destructive actions, failures.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — confirmations, completed steps.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning — pending review, degraded status.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
/// Info — informational highlights.
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Coin balances and rewards.
pub const COIN: Color = Color::Rgb(0xEA, 0xB3, 0x08);

pub fn category_color(category: DareCategory) -> Color {
    match category {
        DareCategory::Social => Color::Rgb(0x3B, 0x82, 0xF6),
        DareCategory::Fun => Color::Rgb(0xEA, 0xB3, 0x08),
        DareCategory::Creative => Color::Rgb(0xA8, 0x55, 0xF7),
        DareCategory::Extreme => PRIMARY,
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => SUCCESS,
        Difficulty::Medium => WARNING,
        Difficulty::Hard => ACCENT,
        Difficulty::Extreme => ERROR,
    }
}

pub fn status_color(status: ReviewStatus) -> Color {
    match status {
        ReviewStatus::Pending => WARNING,
        ReviewStatus::Approved => SUCCESS,
        ReviewStatus::Rejected => ERROR,
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for disabled/faint items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Signed-in user badge.
pub fn user_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Enabled primary button.
pub fn button_primary() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Disabled button.
pub fn button_disabled() -> Style {
    Style::default().fg(TEXT_DIM).bg(BG_SURFACE)
}

/// Secondary (back) button.
pub fn button_secondary() -> Style {
    Style::default().fg(TEXT_MUTED)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

/// Border style for a form field.
pub fn field_border(focused: bool) -> Style {
    if focused {
        border_focused()
    } else {
        border_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_flame() {
        assert_eq!(PRIMARY, Color::Rgb(0xEF, 0x44, 0x44));
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        assert_ne!(title(), Style::default());
        assert_ne!(heading(), Style::default());
        assert_ne!(highlight(), Style::default());
        assert_ne!(muted(), Style::default());
        assert_ne!(button_primary(), button_disabled());
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let colors = [
            status_color(ReviewStatus::Pending),
            status_color(ReviewStatus::Approved),
            status_color(ReviewStatus::Rejected),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
