//! Ready-made [`DataSource`] that labels ticks with their value.

use super::metrics::{Metrics, TickTier};
use super::picker::DataSource;

/// Labels every full tick with its value and the indicator with the value
/// plus a unit, e.g. `"150"` on the tape and `"155 KG"` under the indicator.
#[derive(Debug, Clone, Default)]
pub struct ValueLabels {
    tick_suffix: String,
    highlight_suffix: String,
}

impl ValueLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text appended to tape labels (e.g. `" cm"`).
    pub fn tick_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.tick_suffix = suffix.into();
        self
    }

    /// Text appended to the indicator label (e.g. `" KG"`).
    pub fn highlight_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.highlight_suffix = suffix.into();
        self
    }
}

impl DataSource for ValueLabels {
    fn title_for_index(&self, metrics: &Metrics, index: usize) -> Option<String> {
        if metrics.tick_tier(index) != TickTier::Full {
            return None;
        }
        Some(format!("{}{}", metrics.value_for_index(index), self.tick_suffix))
    }

    fn highlight_title_for_index(&self, metrics: &Metrics, index: usize) -> Option<String> {
        Some(format!("{}{}", metrics.value_for_index(index), self.highlight_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_full_ticks_get_labels() {
        let metrics = Metrics::new(100, 155, 250, 5, 4.0, 3.0, 2.0).unwrap();
        let labels = ValueLabels::new().tick_suffix(" cm").highlight_suffix(" cm");
        assert_eq!(labels.title_for_index(&metrics, 55).as_deref(), Some("155 cm"));
        assert_eq!(labels.title_for_index(&metrics, 56), None);
        assert_eq!(labels.highlight_title_for_index(&metrics, 56).as_deref(), Some("156 cm"));
    }
}
