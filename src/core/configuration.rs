//! Picker configuration: orientation, alignment, spacing and metrics.

use serde::Deserialize;

use super::metrics::Metrics;
use crate::error::{PickerError, Result};

/// Axis along which the tape scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Which edge of the cross axis the lines grow from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    #[default]
    End,
}

/// Immutable configuration snapshot.  Replace it wholesale through
/// [`RulerPicker::set_configuration`](super::picker::RulerPicker::set_configuration).
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    scroll_direction: ScrollDirection,
    alignment: Alignment,
    line_spacing: f64,
    line_and_label_spacing: f64,
    metrics: Metrics,
}

impl Configuration {
    /// # Errors
    ///
    /// Fails when either spacing is negative or not finite.
    pub fn new(
        scroll_direction: ScrollDirection,
        alignment: Alignment,
        line_spacing: f64,
        line_and_label_spacing: f64,
        metrics: Metrics,
    ) -> Result<Self> {
        for (name, value) in [
            ("line_spacing", line_spacing),
            ("line_and_label_spacing", line_and_label_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PickerError::InvalidSpacing { name, value });
            }
        }
        Ok(Self {
            scroll_direction,
            alignment,
            line_spacing,
            line_and_label_spacing,
            metrics,
        })
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    pub fn line_and_label_spacing(&self) -> f64 {
        self.line_and_label_spacing
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn is_horizontal(&self) -> bool {
        self.scroll_direction == ScrollDirection::Horizontal
    }
}

impl Default for Configuration {
    /// A fresh horizontal, end-aligned configuration over [`Metrics::default`].
    fn default() -> Self {
        Self {
            scroll_direction: ScrollDirection::Horizontal,
            alignment: Alignment::End,
            line_spacing: 10.0,
            line_and_label_spacing: 6.0,
            metrics: Metrics::default(),
        }
    }
}
