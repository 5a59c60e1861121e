//! Value range and division hierarchy of a ruler.
//!
//! A [`Metrics`] value answers two questions for any tick index: which
//! [`TickTier`] it belongs to, and how long its line is.  It never changes
//! after construction: callers build a new one and hand it to the picker.

use crate::error::{PickerError, Result};

// ───────────────────────────────────────── tier ──────────────

/// Visual classification of a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickTier {
    /// Every `divisions`-th tick (index 0 included).
    Full,
    /// Half-way between two full ticks.
    Mid,
    Small,
}

// ───────────────────────────────────────── metrics ───────────

/// Immutable range + division configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    minimum_value: i64,
    maximum_value: i64,
    default_value: i64,
    divisions: u32,
    full_line_size: f64,
    mid_line_size: f64,
    small_line_size: f64,
}

impl Metrics {
    /// Build a validated metrics value.
    ///
    /// `default_value` is clamped into `[minimum_value, maximum_value]`.
    ///
    /// # Errors
    ///
    /// Fails when `divisions` is zero, when `maximum_value < minimum_value`,
    /// when the range holds more ticks than a `usize` can count, or when a
    /// line size is not a positive finite length.
    pub fn new(
        minimum_value: i64,
        default_value: i64,
        maximum_value: i64,
        divisions: u32,
        full_line_size: f64,
        mid_line_size: f64,
        small_line_size: f64,
    ) -> Result<Self> {
        if divisions == 0 {
            return Err(PickerError::ZeroDivisions);
        }
        if maximum_value < minimum_value {
            return Err(PickerError::InvertedRange {
                minimum: minimum_value,
                maximum: maximum_value,
            });
        }
        let span = maximum_value
            .checked_sub(minimum_value)
            .and_then(|span| usize::try_from(span).ok())
            .filter(|&span| span < usize::MAX);
        if span.is_none() {
            return Err(PickerError::RangeTooLarge {
                minimum: minimum_value,
                maximum: maximum_value,
            });
        }
        for (name, value) in [
            ("full_line_size", full_line_size),
            ("mid_line_size", mid_line_size),
            ("small_line_size", small_line_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PickerError::InvalidLineSize { name, value });
            }
        }

        Ok(Self {
            minimum_value,
            maximum_value,
            default_value: default_value.clamp(minimum_value, maximum_value),
            divisions,
            full_line_size,
            mid_line_size,
            small_line_size,
        })
    }

    pub fn minimum_value(&self) -> i64 {
        self.minimum_value
    }

    pub fn maximum_value(&self) -> i64 {
        self.maximum_value
    }

    pub fn default_value(&self) -> i64 {
        self.default_value
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Ticks between two mid lines.  Zero when `divisions == 1`, in which
    /// case every tick is [`TickTier::Full`] and the mid check never runs.
    pub fn mid_division(&self) -> u32 {
        self.divisions / 2
    }

    pub fn full_line_size(&self) -> f64 {
        self.full_line_size
    }

    /// Number of ticks on the tape (always ≥ 1).
    pub fn item_count(&self) -> usize {
        (self.maximum_value - self.minimum_value) as usize + 1
    }

    /// Clamp an arbitrary value into the picker's range.
    pub fn clamp_value(&self, value: i64) -> i64 {
        value.clamp(self.minimum_value, self.maximum_value)
    }

    /// Tick index of `value`, clamping out-of-range values to the ends.
    pub fn index_for_value(&self, value: i64) -> usize {
        (self.clamp_value(value) - self.minimum_value) as usize
    }

    /// Value shown at tick `index`.
    pub fn value_for_index(&self, index: usize) -> i64 {
        self.minimum_value + index as i64
    }

    /// Classify a tick.  The full check must come first: index 0 is a
    /// multiple of both `divisions` and `mid_division`.
    pub fn tick_tier(&self, index: usize) -> TickTier {
        let divisions = self.divisions as usize;
        let mid = self.mid_division() as usize;
        if index % divisions == 0 {
            TickTier::Full
        } else if mid > 0 && index % mid == 0 {
            TickTier::Mid
        } else {
            TickTier::Small
        }
    }

    /// Line length for a tier.
    pub fn line_length(&self, tier: TickTier) -> f64 {
        match tier {
            TickTier::Full => self.full_line_size,
            TickTier::Mid => self.mid_line_size,
            TickTier::Small => self.small_line_size,
        }
    }
}

impl Default for Metrics {
    /// `10..=150`, default 55, ten divisions, lines 40/28/18.
    fn default() -> Self {
        Self {
            minimum_value: 10,
            maximum_value: 150,
            default_value: 55,
            divisions: 10,
            full_line_size: 40.0,
            mid_line_size: 28.0,
            small_line_size: 18.0,
        }
    }
}
