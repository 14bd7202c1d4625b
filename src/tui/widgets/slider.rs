//! Slide-to-accept track widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::gesture::SlideToAccept;
use crate::tui::theme;

/// Knob width in cells.
pub const KNOB_WIDTH: u16 = 5;
const KNOB: &str = "[▶▶▶]";

/// One-row track: filled portion, centered hint and the knob.
pub struct SliderWidget<'a> {
    slider: &'a SlideToAccept,
    hint: &'a str,
    accepted_label: &'a str,
}

impl<'a> SliderWidget<'a> {
    pub fn new(slider: &'a SlideToAccept) -> Self {
        Self {
            slider,
            hint: "Slide to accept",
            accepted_label: "✓ Dare accepted!",
        }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = hint;
        self
    }
}

impl Widget for SliderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let y = area.y;
        let track = Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_SURFACE);
        buf.set_style(Rect::new(area.x, y, area.width, 1), track);

        if self.slider.is_accepted() {
            let fill = Style::default()
                .fg(theme::BG_BASE)
                .bg(theme::SUCCESS)
                .add_modifier(Modifier::BOLD);
            buf.set_style(Rect::new(area.x, y, area.width, 1), fill);
            let x = centered(area, self.accepted_label);
            buf.set_stringn(x, y, self.accepted_label, usize::from(area.width), fill);
            return;
        }

        let hint_x = centered(area, self.hint);
        let hint_style = track.add_modifier(Modifier::ITALIC);
        buf.set_stringn(hint_x, y, self.hint, usize::from(area.width), hint_style);

        let knob_x = area.x + (self.slider.position().round() as u16).min(area.width.saturating_sub(KNOB_WIDTH));
        let filled = knob_x - area.x;
        if filled > 0 {
            buf.set_style(
                Rect::new(area.x, y, filled, 1),
                Style::default().fg(theme::BG_BASE).bg(theme::ACCENT_SOFT),
            );
        }

        let knob_style = if self.slider.is_dragging() {
            Style::default().fg(theme::BG_BASE).bg(theme::PRIMARY_LIGHT)
        } else {
            Style::default().fg(theme::BG_BASE).bg(theme::ACCENT)
        };
        buf.set_stringn(
            knob_x,
            y,
            KNOB,
            usize::from(KNOB_WIDTH.min(area.width)),
            knob_style.add_modifier(Modifier::BOLD),
        );
    }
}

fn centered(area: Rect, text: &str) -> u16 {
    let width = text.chars().count() as u16;
    area.x + area.width.saturating_sub(width) / 2
}

/// Whether a pointer at `column` is over the knob of `slider` drawn in `area`.
pub fn hits_knob(slider: &SlideToAccept, area: Rect, column: u16, row: u16) -> bool {
    if row != area.y || column < area.x {
        return false;
    }
    let knob_x = area.x + (slider.position().round() as u16).min(area.width.saturating_sub(KNOB_WIDTH));
    column >= knob_x && column < knob_x + KNOB_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gesture::SliderConfig;

    fn render_line(slider: &SlideToAccept, width: u16) -> (String, Buffer) {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        SliderWidget::new(slider).render(area, &mut buf);
        let line = (0..width)
            .map(|x| buf.cell((x, 0)).map_or(" ", |c| c.symbol()))
            .collect::<String>();
        (line, buf)
    }

    fn slider(width: u16) -> SlideToAccept {
        SlideToAccept::new(f32::from(width), f32::from(KNOB_WIDTH), SliderConfig::default())
    }

    #[test]
    fn test_idle_track_shows_knob_and_hint() {
        let s = slider(40);
        let (line, _) = render_line(&s, 40);
        assert!(line.starts_with(KNOB));
        assert!(line.contains("Slide to accept"));
    }

    #[test]
    fn test_knob_follows_position() {
        let mut s = slider(40);
        s.nudge(10.0);
        let (line, buf) = render_line(&s, 40);
        assert_eq!(line.find('['), Some(10));
        assert_eq!(buf.cell((3, 0)).map(|c| c.bg), Some(theme::ACCENT_SOFT));
        assert!(hits_knob(&s, Rect::new(0, 0, 40, 1), 12, 0));
        assert!(!hits_knob(&s, Rect::new(0, 0, 40, 1), 2, 0));
    }

    #[test]
    fn test_accepted_track() {
        let mut s = slider(40);
        s.nudge(40.0);
        assert!(s.is_accepted());
        let (line, buf) = render_line(&s, 40);
        assert!(line.contains("Dare accepted"));
        assert_eq!(buf.cell((0, 0)).map(|c| c.bg), Some(theme::SUCCESS));
    }
}
