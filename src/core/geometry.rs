//! Geometry handed to renderers.
//!
//! Positions are split into a *main* coordinate (along the scroll axis,
//! relative to the viewport's leading edge) and a *cross* coordinate
//! (across it, relative to the viewport's top/left edge).  Renderers map
//! those onto x/y according to the scroll direction.

use unicode_width::UnicodeWidthStr;

use super::configuration::Alignment;
use super::metrics::TickTier;

/// The control's size as laid out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Length along the scroll axis.
    pub main: f64,
    /// Length across the scroll axis.
    pub cross: f64,
}

impl Viewport {
    pub fn new(main: f64, cross: f64) -> Self {
        Self { main, cross }
    }
}

/// Measured size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    /// Terminal measurement: display columns (wide glyphs take two), one
    /// line tall.
    pub fn of_text(text: &str) -> Self {
        Self {
            width: text.width() as f64,
            height: 1.0,
        }
    }

    /// Size of this extent across the scroll axis.
    pub fn cross(&self, horizontal: bool) -> f64 {
        if horizontal {
            self.height
        } else {
            self.width
        }
    }
}

/// One tick as the renderer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct TickGeometry {
    pub index: usize,
    pub tier: TickTier,
    /// Center of the line along the scroll axis.
    pub main: f64,
    /// Where the line starts across the scroll axis.
    pub line_cross: f64,
    pub line_length: f64,
    /// `None` means no label for this tick.
    pub title: Option<String>,
    /// Where the label starts across the scroll axis.  Labels are centered
    /// on `main`.
    pub label_cross: f64,
}

/// The fixed center indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorGeometry {
    pub main: f64,
    pub line_cross: f64,
    pub line_length: f64,
    pub text: Option<String>,
    pub text_extent: Extent,
    pub label_cross: f64,
}

/// Place a line and its label across the scroll axis.
///
/// `anchor` is the line length the label is measured from; it differs from
/// `line_length` when labels should line up in a column regardless of tier.
/// Returns `(line_cross, label_cross)`.
pub fn place_across(
    alignment: Alignment,
    cross: f64,
    line_length: f64,
    anchor: f64,
    label_extent: f64,
    label_spacing: f64,
) -> (f64, f64) {
    match alignment {
        Alignment::Start => (0.0, anchor + label_spacing),
        Alignment::End => (
            cross - line_length,
            cross - anchor - label_spacing - label_extent,
        ),
    }
}
