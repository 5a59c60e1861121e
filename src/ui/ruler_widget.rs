//! Custom Ratatui widget that renders a [`RulerPicker`] as a tape of tick
//! marks with a fixed center indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::geometry::{IndicatorGeometry, TickGeometry, Viewport};
use crate::core::picker::{Renderer, RulerPicker};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::scroll_surface::ScrollSurface;
use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for one picker on screen.
pub struct RulerState {
    pub picker: RulerPicker,
    pub surface: ScrollSurface,
    /// Inner area the tape was last drawn into (for mouse hit-testing).
    pub area: Rect,
}

impl RulerState {
    pub fn new(picker: RulerPicker, surface: ScrollSurface) -> Self {
        Self {
            picker,
            surface,
            area: Rect::default(),
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom()
    }

    /// Pointer position projected onto the scroll axis.
    pub fn pointer_main(&self, column: u16, row: u16) -> f64 {
        if self.picker.configuration().is_horizontal() {
            f64::from(column)
        } else {
            f64::from(row)
        }
    }

    /// Value the tape will rest on once queued and running scrolls finish.
    pub fn resting_value(&self) -> i64 {
        if let Some(value) = self.picker.pending_value() {
            return value;
        }
        let index = self
            .surface
            .target_index()
            .unwrap_or_else(|| self.picker.highlighted_index());
        self.picker.metrics().value_for_index(index)
    }

    /// Move the highlight by `ticks`, animated.  Steps taken while the tape
    /// is still moving build on where it is heading.
    pub fn step(&mut self, ticks: i64) {
        let value = self.resting_value().saturating_add(ticks);
        self.picker.scroll_to_value(value, true);
    }

    // ── pointer gestures ───────────────────────────────────────

    pub fn begin_drag(&mut self, column: u16, row: u16) {
        let pos = self.pointer_main(column, row);
        self.surface.begin_drag(pos);
    }

    pub fn drag_to(&mut self, column: u16, row: u16) {
        let pos = self.pointer_main(column, row);
        self.surface.drag_to(pos, &mut self.picker);
    }

    pub fn end_drag(&mut self) {
        self.surface.end_drag(&mut self.picker);
    }

    /// Wheel notch: scroll by whole ticks.
    pub fn scroll_ticks(&mut self, ticks: i32) {
        let delta = f64::from(ticks) * self.picker.engine().cell_stride();
        self.surface.scroll_by(delta, &mut self.picker);
    }

    /// One frame of host work: apply deferred requests, then advance any
    /// deceleration.  Returns the settled index, if the content came to
    /// rest this frame.
    pub fn tick(&mut self) -> Option<usize> {
        self.surface.apply_pending(&mut self.picker);
        self.surface.tick(&mut self.picker)
    }
}

// ───────────────────────────────────────── widget ────────────

/// The ruler widget itself: created fresh each frame.
#[derive(Default)]
pub struct RulerWidget<'a> {
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a> RulerWidget<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Draw the indicator in the focused colour.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> StatefulWidget for RulerWidget<'a> {
    type State = RulerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        state.area = inner;

        // Layout pass: the viewport decides the inset.
        let horizontal = state.picker.configuration().is_horizontal();
        let (width, height) = (f64::from(inner.width), f64::from(inner.height));
        let viewport = if horizontal {
            Viewport::new(width, height)
        } else {
            Viewport::new(height, width)
        };
        state.picker.set_viewport(viewport);

        let mut renderer = BufferRenderer {
            buf,
            area: inner,
            horizontal,
            focused: self.focused,
        };
        state.picker.render(&mut renderer);
    }
}

// ───────────────────────────────────────── renderer ──────────

/// Draws picker geometry into a Ratatui buffer.  Horizontal tapes draw
/// vertical bars; vertical tapes draw horizontal bars.
pub struct BufferRenderer<'b> {
    pub buf: &'b mut Buffer,
    pub area: Rect,
    pub horizontal: bool,
    pub focused: bool,
}

impl BufferRenderer<'_> {
    fn tick_symbol(&self) -> &'static str {
        if self.horizontal {
            "│"
        } else {
            "─"
        }
    }

    fn indicator_symbol(&self) -> &'static str {
        if self.horizontal {
            "┃"
        } else {
            "━"
        }
    }

    /// Set one cell given main/cross coordinates relative to the area.
    /// Cells outside the area are skipped.
    fn put(&mut self, main: i32, cross: i32, symbol: &str, style: Style) {
        let (dx, dy) = if self.horizontal { (main, cross) } else { (cross, main) };
        if dx < 0 || dy < 0 || dx >= i32::from(self.area.width) || dy >= i32::from(self.area.height) {
            return;
        }
        let position = (self.area.x + dx as u16, self.area.y + dy as u16);
        if let Some(cell) = self.buf.cell_mut(position) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    fn draw_line(&mut self, main: i32, line_cross: f64, length: f64, symbol: &str, style: Style) {
        let start = cell(line_cross);
        for k in 0..cell(length) {
            self.put(main, start + k, symbol, style);
        }
    }

    /// Set a cell addressed by screen column offset `x` and the fixed
    /// coordinate of a text run.
    fn put_text_cell(&mut self, x: i32, fixed: i32, symbol: &str, style: Style) {
        if self.horizontal {
            self.put(x, fixed, symbol, style);
        } else {
            self.put(fixed, x, symbol, style);
        }
    }

    /// Text runs along x in both orientations: centered on `main` for a
    /// horizontal tape, starting at `cross` for a vertical one.  Wide glyphs
    /// blank the cell they spill into.
    fn draw_text(&mut self, main: i32, cross: f64, text: &str, style: Style) {
        let width = text.width() as i32;
        let (mut x, fixed) = if self.horizontal {
            (main - width / 2, cell(cross))
        } else {
            (cell(cross), main)
        };
        for ch in text.chars() {
            let glyph = ch.width().unwrap_or(0) as i32;
            if glyph == 0 {
                continue;
            }
            let mut tmp = [0u8; 4];
            self.put_text_cell(x, fixed, ch.encode_utf8(&mut tmp), style);
            for k in 1..glyph {
                self.put_text_cell(x + k, fixed, " ", style);
            }
            x += glyph;
        }
    }
}

impl Renderer for BufferRenderer<'_> {
    fn draw_tick(&mut self, tick: &TickGeometry) {
        let main = cell(tick.main);
        self.draw_line(
            main,
            tick.line_cross,
            tick.line_length,
            self.tick_symbol(),
            Theme::tick_style(tick.tier),
        );
        if let Some(ref title) = tick.title {
            self.draw_text(main, tick.label_cross, title, Theme::label_style());
        }
    }

    fn draw_indicator(&mut self, indicator: &IndicatorGeometry) {
        let main = cell(indicator.main);
        self.draw_line(
            main,
            indicator.line_cross,
            indicator.line_length,
            self.indicator_symbol(),
            Theme::indicator_line_style(self.focused),
        );

        let Some(ref text) = indicator.text else {
            return;
        };
        // Clear a one-cell margin around the label so tape labels passing
        // underneath don't collide with it.
        let padded = format!(" {text} ");
        let cross = if self.horizontal {
            indicator.label_cross
        } else {
            indicator.label_cross - 1.0
        };
        self.draw_text(main, cross, &padded, Theme::indicator_label_style(self.focused));
    }
}

fn cell(v: f64) -> i32 {
    v.round() as i32
}
