//! Offset ↔ index conversion.
//!
//! Content offsets are measured along the scroll axis.  The tape is inset by
//! half the viewport so that, at offset `-leading_inset`, tick 0 sits under
//! the center indicator.  Every conversion goes through one rounding rule:
//! **round half away from zero** (`f64::round`), so a borderline drag at
//! exactly 12.5 ticks settles on tick 13.

use super::configuration::Configuration;

/// Thickness of one tick line along the scroll axis.
pub const LINE_THICKNESS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapEngine {
    minimum_value: i64,
    item_count: usize,
    cell_stride: f64,
    leading_inset: f64,
}

impl SnapEngine {
    /// Derive the engine from a configuration and the viewport's length
    /// along the scroll axis.
    pub fn new(config: &Configuration, viewport_main: f64) -> Self {
        let metrics = config.metrics();
        Self {
            minimum_value: metrics.minimum_value(),
            item_count: metrics.item_count(),
            cell_stride: LINE_THICKNESS + config.line_spacing(),
            leading_inset: (viewport_main.max(0.0)) / 2.0,
        }
    }

    /// Distance between two adjacent ticks, spacing included.
    pub fn cell_stride(&self) -> f64 {
        self.cell_stride
    }

    pub fn leading_inset(&self) -> f64 {
        self.leading_inset
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Offset that centers `value`.  Linear in `value`; callers clamp.
    pub fn offset_for_value(&self, value: i64) -> f64 {
        (value - self.minimum_value) as f64 * self.cell_stride - self.leading_inset
    }

    /// Offset that centers tick `index`.
    pub fn offset_for_index(&self, index: usize) -> f64 {
        index as f64 * self.cell_stride - self.leading_inset
    }

    /// Unclamped, rounded tick position for `offset`.
    pub fn raw_index(&self, offset: f64) -> f64 {
        ((offset + self.leading_inset) / self.cell_stride).round()
    }

    /// Tick under the indicator at `offset`, clamped to the tape.
    pub fn index_for_offset(&self, offset: f64) -> usize {
        let raw = self.raw_index(offset);
        if raw.is_nan() || raw <= 0.0 {
            return 0;
        }
        let last = self.item_count - 1;
        if raw >= last as f64 {
            last
        } else {
            raw as usize
        }
    }

    /// Resting offset for a drag released toward `proposed_offset`: the
    /// offset of the nearest tick, never an in-between position.
    pub fn snap_target(&self, proposed_offset: f64) -> f64 {
        self.offset_for_index(self.index_for_offset(proposed_offset))
    }

    /// Tick committed once scrolling has stopped at `final_offset`.
    pub fn settled_index(&self, final_offset: f64) -> usize {
        self.index_for_offset(final_offset)
    }

    /// Offsets of the first and last tick.
    pub fn offset_bounds(&self) -> (f64, f64) {
        (self.offset_for_index(0), self.offset_for_index(self.item_count - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::configuration::{Alignment, ScrollDirection};
    use crate::core::metrics::Metrics;

    fn engine(min: i64, max: i64, divisions: u32, spacing: f64, viewport: f64) -> SnapEngine {
        let metrics = Metrics::new(min, min, max, divisions, 4.0, 3.0, 2.0).unwrap();
        let config = Configuration::new(
            ScrollDirection::Horizontal,
            Alignment::End,
            spacing,
            1.0,
            metrics,
        )
        .unwrap();
        SnapEngine::new(&config, viewport)
    }

    #[test]
    fn test_round_trip_every_value() {
        let e = engine(100, 250, 5, 10.0, 320.0);
        for value in 100..=250 {
            let offset = e.offset_for_value(value);
            assert_eq!(e.index_for_offset(offset), (value - 100) as usize);
        }
    }

    #[test]
    fn test_offset_is_strictly_increasing() {
        let e = engine(-20, 40, 10, 3.0, 81.0);
        let offsets: Vec<f64> = (-20..=40).map(|v| e.offset_for_value(v)).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stride_and_inset() {
        let e = engine(0, 10, 5, 10.0, 200.0);
        assert_eq!(e.cell_stride(), 11.0);
        assert_eq!(e.leading_inset(), 100.0);
        assert_eq!(e.offset_for_value(0), -100.0);
        assert_eq!(e.offset_for_value(3), -67.0);
    }

    #[test]
    fn test_snap_rounds_half_away_from_zero() {
        // Stride 1 with no inset: the offset *is* the raw index.
        let e = engine(0, 100, 5, 0.0, 0.0);
        assert_eq!(e.snap_target(12.6), 13.0);
        assert_eq!(e.snap_target(12.5), 13.0);
        assert_eq!(e.snap_target(12.4), 12.0);
        assert_eq!(e.index_for_offset(12.6), 13);
        assert_eq!(e.settled_index(12.49), 12);
    }

    #[test]
    fn test_snap_target_lands_on_tick_boundary() {
        let e = engine(35, 150, 5, 10.0, 120.0);
        // Raw index 12.6 → tick 13.
        let proposed = 12.6 * e.cell_stride() - e.leading_inset();
        let target = e.snap_target(proposed);
        assert_eq!(target, e.offset_for_index(13));
        assert_eq!(e.index_for_offset(target), 13);
    }

    #[test]
    fn test_offsets_outside_tape_clamp() {
        let e = engine(0, 20, 5, 1.0, 40.0);
        assert_eq!(e.index_for_offset(-10_000.0), 0);
        assert_eq!(e.index_for_offset(10_000.0), 20);
        assert_eq!(e.index_for_offset(f64::NAN), 0);
        assert_eq!(e.snap_target(10_000.0), e.offset_for_index(20));
        assert_eq!(e.snap_target(-10_000.0), e.offset_for_index(0));
    }

    #[test]
    fn test_single_item_tape() {
        let e = engine(7, 7, 5, 2.0, 30.0);
        assert_eq!(e.item_count(), 1);
        for offset in [-100.0, -15.0, 0.0, 3.0, 1e9] {
            assert_eq!(e.index_for_offset(offset), 0);
        }
        assert_eq!(e.offset_bounds(), (-15.0, -15.0));
    }
}
