//! Stepper widget for ratatui.
//!
//! Draws a wizard as three bands:
//!
//! ```text
//!   (✓)────────(2)────────(3)────────(4)      indicator rail
//!
//!   <step content, sliding and fading>        animated height
//!
//!   [ Back ]                    [ Continue ]  footer
//! ```
//!
//! The widget is stateless: it reads the controller's indicators and primary
//! button plus a [`TransitionFrame`], and asks the caller to draw each
//! visible step into a scratch buffer. [`StepperLayout`] is shared with input
//! handling so mouse hit-testing sees the same geometry the renderer drew.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::core::wizard::{
    Layer, PrimaryButton, StepIndicator, StepStatus, TransitionFrame, WizardController,
};
use crate::tui::theme;

/// Cells taken by one indicator glyph, e.g. `(2)`.
pub const INDICATOR_WIDTH: u16 = 3;
/// Rows between bands.
const GAP: u16 = 1;

// ── Indicator rendering ─────────────────────────────────────────────────────

/// Draws step indicators and the connectors between them.
pub trait IndicatorRenderer {
    /// Exactly [`INDICATOR_WIDTH`] cells wide.
    fn indicator(&self, indicator: &StepIndicator) -> Span<'static>;

    /// Connector after `indicator`, `width` cells wide.
    fn connector(&self, indicator: &StepIndicator, width: u16) -> Span<'static>;
}

/// Numbered circles, a check mark for finished steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIndicators;

impl IndicatorRenderer for DefaultIndicators {
    fn indicator(&self, indicator: &StepIndicator) -> Span<'static> {
        match indicator.status {
            StepStatus::Complete => Span::styled(
                "(✓)",
                Style::default().fg(theme::SUCCESS).add_modifier(Modifier::BOLD),
            ),
            StepStatus::Active => Span::styled(
                format!("({})", digit(indicator.step)),
                Style::default()
                    .fg(theme::BG_BASE)
                    .bg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            StepStatus::Inactive => Span::styled(
                format!("({})", digit(indicator.step)),
                theme::muted(),
            ),
        }
    }

    fn connector(&self, indicator: &StepIndicator, width: u16) -> Span<'static> {
        let style = if indicator.connector_complete {
            Style::default().fg(theme::SUCCESS)
        } else {
            theme::dim()
        };
        Span::styled("─".repeat(usize::from(width)), style)
    }
}

/// Single glyph for a step number; steps past 9 show `+`.
fn digit(step: usize) -> char {
    u32::try_from(step)
        .ok()
        .and_then(|n| char::from_digit(n, 10))
        .unwrap_or('+')
}

// ── Geometry ────────────────────────────────────────────────────────────────

/// Rects of every stepper band for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperLayout {
    pub rail: Rect,
    /// One rect per indicator, in step order.
    pub indicators: Vec<Rect>,
    /// Largest area step content may use.
    pub content_max: Rect,
    /// Visible content rows for the animated height.
    pub content: Rect,
    pub back: Option<Rect>,
    pub primary: Option<Rect>,
}

impl StepperLayout {
    /// `height` is the animated content height in rows.
    pub fn compute(
        area: Rect,
        total_steps: usize,
        height: f32,
        show_back: bool,
        primary_label: Option<&str>,
    ) -> Self {
        let rail = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let indicators = indicator_slots(rail, total_steps);

        let content_top = (area.y + 1 + GAP).min(area.bottom());
        // Footer needs its row and a gap.
        let reserved = if primary_label.is_some() { 1 + GAP } else { 0 };
        let max_rows = area.bottom().saturating_sub(content_top).saturating_sub(reserved);
        let content_max = Rect::new(area.x, content_top, area.width, max_rows);

        let rows = (height.max(0.0).round() as u16).min(max_rows);
        let content = Rect::new(area.x, content_top, area.width, rows);

        let footer_y = content.bottom() + GAP;
        let (back, primary) = match primary_label {
            Some(label) if footer_y < area.bottom() => {
                let primary_w = (label.chars().count() as u16 + 4).min(area.width);
                let primary = Rect::new(area.right() - primary_w, footer_y, primary_w, 1);
                let back = show_back.then(|| Rect::new(area.x, footer_y, BACK_WIDTH.min(area.width), 1));
                (back, Some(primary))
            }
            _ => (None, None),
        };

        Self {
            rail,
            indicators,
            content_max,
            content,
            back,
            primary,
        }
    }

    /// Step whose indicator contains the cell, 1-based.
    pub fn indicator_at(&self, column: u16, row: u16) -> Option<usize> {
        self.indicators
            .iter()
            .position(|r| contains(*r, column, row))
            .map(|i| i + 1)
    }

    pub fn hits_back(&self, column: u16, row: u16) -> bool {
        self.back.is_some_and(|r| contains(r, column, row))
    }

    pub fn hits_primary(&self, column: u16, row: u16) -> bool {
        self.primary.is_some_and(|r| contains(r, column, row))
    }
}

const BACK_WIDTH: u16 = 10;

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.right() && row >= r.y && row < r.bottom()
}

/// Indicators spread evenly across the rail, first at the left edge and last
/// at the right edge.
fn indicator_slots(rail: Rect, total: usize) -> Vec<Rect> {
    if total == 0 || rail.height == 0 {
        return Vec::new();
    }
    let total_u16 = u16::try_from(total).unwrap_or(u16::MAX);
    let free = rail.width.saturating_sub(INDICATOR_WIDTH.saturating_mul(total_u16));
    let gaps = total_u16.saturating_sub(1).max(1);

    (0..total_u16)
        .map(|i| {
            let offset = if total_u16 == 1 {
                0
            } else {
                i * INDICATOR_WIDTH + (u32::from(free) * u32::from(i) / u32::from(gaps)) as u16
            };
            let x = (rail.x + offset).min(rail.right().saturating_sub(INDICATOR_WIDTH));
            Rect::new(x, rail.y, INDICATOR_WIDTH.min(rail.width), 1)
        })
        .collect()
}

// ── Widget ──────────────────────────────────────────────────────────────────

/// Draws one step's content into `area` of the scratch buffer.
pub type StepPainter<'a> = &'a dyn Fn(usize, Rect, &mut Buffer);

/// Renders a [`WizardController`] with its current transition frame.
pub struct Stepper<'a, S> {
    wizard: &'a WizardController<S>,
    frame: TransitionFrame,
    renderer: &'a dyn IndicatorRenderer,
    paint: StepPainter<'a>,
}

impl<'a, S> Stepper<'a, S> {
    pub fn new(wizard: &'a WizardController<S>, frame: TransitionFrame, paint: StepPainter<'a>) -> Self {
        Self {
            wizard,
            frame,
            renderer: &DefaultIndicators,
            paint,
        }
    }

    pub fn indicator_renderer(mut self, renderer: &'a dyn IndicatorRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Geometry this widget will use for `area`.
    pub fn layout(wizard: &WizardController<S>, frame: &TransitionFrame, area: Rect) -> StepperLayout {
        let primary = wizard.show_footer().then(|| wizard.primary_button());
        StepperLayout::compute(
            area,
            wizard.total_steps(),
            frame.height,
            wizard.show_back_button(),
            primary.as_ref().map(|p| p.label.as_str()),
        )
    }

    fn render_rail(&self, layout: &StepperLayout, buf: &mut Buffer) {
        let indicators = self.wizard.indicators();
        for (i, (indicator, slot)) in indicators.iter().zip(&layout.indicators).enumerate() {
            let span = self.renderer.indicator(indicator);
            buf.set_span(slot.x, slot.y, &span, slot.width);

            if indicator.is_last {
                continue;
            }
            if let Some(next) = layout.indicators.get(i + 1) {
                let start = slot.right() + 1;
                let width = next.x.saturating_sub(start + 1);
                if width > 0 {
                    let span = self.renderer.connector(indicator, width);
                    buf.set_span(start, slot.y, &span, width);
                }
            }
        }
    }

    fn render_layer(&self, layer: Layer, layout: &StepperLayout, buf: &mut Buffer, opaque: bool) {
        let area = layout.content_max;
        if area.is_empty() {
            return;
        }
        let mut scratch = Buffer::empty(area);
        (self.paint)(layer.step, area, &mut scratch);
        blit(&scratch, buf, layout.content, shift(layer.offset, area.width), layer.opacity, opaque);
    }

    fn render_footer(&self, layout: &StepperLayout, button: &PrimaryButton, buf: &mut Buffer) {
        if let Some(back) = layout.back {
            let label = format!("← {}", self.wizard.labels().back);
            buf.set_stringn(back.x, back.y, label, usize::from(back.width), theme::button_secondary());
        }
        if let Some(primary) = layout.primary {
            let style = if button.enabled {
                theme::button_primary()
            } else {
                theme::button_disabled()
            };
            let label = format!("  {}  ", button.label);
            buf.set_stringn(primary.x, primary.y, label, usize::from(primary.width), style);
        }
    }
}

impl<S> Widget for Stepper<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Self::layout(self.wizard, &self.frame, area);
        self.render_rail(&layout, buf);

        if let Some(exiting) = self.frame.exiting {
            self.render_layer(exiting, &layout, buf, true);
        }
        if let Some(entering) = self.frame.entering {
            // Only the entering layer's drawn cells cover the exiting one.
            self.render_layer(entering, &layout, buf, self.frame.exiting.is_none());
        }

        if self.wizard.show_footer() {
            let button = self.wizard.primary_button();
            self.render_footer(&layout, &button, buf);
        }
    }
}

/// Width fraction to a cell offset.
fn shift(offset: f32, width: u16) -> i32 {
    (offset * f32::from(width)).round() as i32
}

/// Copy `src` into `dst` shifted right by `dx` cells, clipped to `clip`.
/// Faded layers are dimmed; non-opaque copies skip blank cells.
fn blit(src: &Buffer, dst: &mut Buffer, clip: Rect, dx: i32, opacity: f32, opaque: bool) {
    let fade = if opacity < 0.35 {
        Some(Style::default().fg(theme::TEXT_DIM))
    } else if opacity < 0.85 {
        Some(Style::default().add_modifier(Modifier::DIM))
    } else {
        None
    };

    for y in clip.top()..clip.bottom() {
        for x in clip.left()..clip.right() {
            let target = i32::from(x) + dx;
            if target < i32::from(clip.left()) || target >= i32::from(clip.right()) {
                continue;
            }
            let Some(cell) = src.cell((x, y)) else {
                continue;
            };
            if !opaque && cell.symbol() == " " {
                continue;
            }
            let Ok(target) = u16::try_from(target) else {
                continue;
            };
            if let Some(out) = dst.cell_mut((target, y)) {
                *out = cell.clone();
                if let Some(style) = fade {
                    out.set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::{TransitionEngine, WizardBuilder};
    use ratatui::widgets::Paragraph;
    use std::time::Duration;

    fn render_to_string<S>(stepper: Stepper<'_, S>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        stepper.render(area, &mut buf);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn painter(step: usize, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!("step {step} body")).render(area, buf);
    }

    fn settled(wizard: &WizardController<&'static str>, height: u16) -> TransitionFrame {
        let mut engine = TransitionEngine::default();
        engine.observe(wizard.state(), height);
        engine.frame()
    }

    #[test]
    fn test_layout_spreads_indicators() {
        let layout = StepperLayout::compute(Rect::new(0, 0, 40, 12), 4, 3.0, true, Some("Continue"));
        assert_eq!(layout.indicators.len(), 4);
        assert_eq!(layout.indicators[0].x, 0);
        assert_eq!(layout.indicators[3].right(), 40);
        assert!(layout.indicators.windows(2).all(|w| w[0].right() < w[1].x));
        assert_eq!(layout.content.height, 3);
        assert_eq!(layout.primary.map(|r| r.y), Some(layout.content.bottom() + 1));
    }

    #[test]
    fn test_layout_clamps_height_and_hides_footer_when_done() {
        let layout = StepperLayout::compute(Rect::new(0, 0, 40, 8), 3, 50.0, false, None);
        assert_eq!(layout.content.bottom(), 8);
        assert!(layout.primary.is_none());
        assert!(layout.back.is_none());
    }

    #[test]
    fn test_hit_testing() {
        let layout = StepperLayout::compute(Rect::new(0, 0, 40, 12), 4, 2.0, true, Some("Continue"));
        let second = layout.indicators[1];
        assert_eq!(layout.indicator_at(second.x + 1, 0), Some(2));
        assert_eq!(layout.indicator_at(second.x + 1, 1), None);

        let primary = layout.primary.unwrap();
        assert!(layout.hits_primary(primary.x, primary.y));
        assert!(layout.hits_back(0, primary.y));
        assert!(!layout.hits_back(0, 0));
    }

    #[test]
    fn test_renders_rail_content_and_footer() {
        let wizard = WizardBuilder::new(vec!["a", "b", "c"]).build().unwrap();
        let frame = settled(&wizard, 2);
        let lines = render_to_string(Stepper::new(&wizard, frame, &painter), 40, 10);

        assert!(lines[0].starts_with("(1)"));
        assert!(lines[0].ends_with("(3)"));
        assert!(lines[2].contains("step 1 body"));
        assert!(lines.iter().any(|l| l.contains("Continue")));
        // No back button on the first step.
        assert!(!lines.iter().any(|l| l.contains("Back")));
    }

    #[test]
    fn test_disabled_primary_uses_disabled_style() {
        let wizard = WizardBuilder::new(vec!["a", "b"])
            .validator(|_| false)
            .build()
            .unwrap();
        let frame = settled(&wizard, 1);
        let area = Rect::new(0, 0, 30, 8);
        let layout = Stepper::layout(&wizard, &frame, area);
        let mut buf = Buffer::empty(area);
        Stepper::new(&wizard, frame, &painter).render(area, &mut buf);

        let primary = layout.primary.unwrap();
        let cell = buf.cell((primary.x + 2, primary.y)).unwrap();
        assert_eq!(cell.bg, theme::BG_SURFACE);
    }

    #[test]
    fn test_mid_transition_shows_both_layers() {
        let mut wizard = WizardBuilder::new(vec!["a", "b", "c"]).build().unwrap();
        let mut engine = TransitionEngine::default();
        engine.observe(wizard.state(), 1);
        wizard.go_next();
        engine.observe(wizard.state(), 1);
        engine.advance(Duration::from_millis(120));

        let frame = engine.frame();
        assert!(frame.exiting.is_some());
        let lines = render_to_string(Stepper::new(&wizard, frame, &painter), 60, 8);
        let body = &lines[2];
        assert!(body.contains("step 2") || body.contains("step 1"));
    }

    #[test]
    fn test_completed_wizard_draws_no_footer() {
        let mut wizard = WizardBuilder::new(vec!["only"]).build().unwrap();
        assert!(wizard.advance());
        let frame = settled(&wizard, 4);
        let lines = render_to_string(Stepper::new(&wizard, frame, &painter), 30, 8);
        assert!(lines[0].starts_with("(✓)"));
        assert!(!lines.iter().any(|l| l.contains("Complete")));
        assert!(!lines.iter().any(|l| l.contains("body")));
    }

    #[test]
    fn test_custom_renderer() {
        struct Dots;
        impl IndicatorRenderer for Dots {
            fn indicator(&self, _: &StepIndicator) -> Span<'static> {
                Span::raw(" o ")
            }
            fn connector(&self, _: &StepIndicator, width: u16) -> Span<'static> {
                Span::raw(".".repeat(usize::from(width)))
            }
        }

        let wizard = WizardBuilder::new(vec!["a", "b"]).build().unwrap();
        let frame = settled(&wizard, 1);
        let lines = render_to_string(
            Stepper::new(&wizard, frame, &painter).indicator_renderer(&Dots),
            20,
            6,
        );
        assert!(lines[0].starts_with(" o"));
        assert!(lines[0].contains('.'));
    }
}
